use dioxus::prelude::*;
use shared_types::{ChatRole, ChatTurn, Locale};

use crate::i18n::{t, use_locale, Msg};

fn author(locale: Locale, role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => t(locale, Msg::You),
        ChatRole::Assistant => t(locale, Msg::Assistant),
    }
}

/// Scrollable list of chat bubbles shared by both chat panels.
#[component]
pub fn ChatThread(turns: Vec<ChatTurn>, #[props(default = false)] pending: bool) -> Element {
    let locale = use_locale();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./chat.css") }

        div { class: "chat-thread", role: "log", "aria-live": "polite",
            if turns.is_empty() && !pending {
                p { class: "chat-empty", "{t(locale, Msg::ChatEmpty)}" }
            }
            for (i, turn) in turns.iter().enumerate() {
                div {
                    key: "{i}",
                    class: "chat-bubble",
                    "data-role": turn.role.as_str(),
                    span { class: "chat-author", "{author(locale, turn.role)}" }
                    p { class: "chat-content", "{turn.content}" }
                }
            }
            if pending {
                div { class: "chat-typing", "aria-busy": "true",
                    span { class: "chat-typing-dot" }
                    span { class: "chat-typing-dot" }
                    span { class: "chat-typing-dot" }
                    span { class: "chat-typing-label", "{t(locale, Msg::AssistantTyping)}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_thread_shows_prompt() {
        let html = dioxus_ssr::render_element(rsx! { ChatThread { turns: vec![] } });
        assert!(html.contains("chat-empty"));
        assert!(!html.contains("chat-typing"));
    }

    #[test]
    fn bubbles_keep_order_and_role() {
        let turns = vec![
            ChatTurn::user("What is stare decisis?"),
            ChatTurn::assistant("Courts follow precedent."),
        ];
        let html = dioxus_ssr::render_element(rsx! { ChatThread { turns, pending: true } });
        assert_eq!(html.matches("class=\"chat-bubble\"").count(), 2);
        let user = html.find("data-role=\"user\"").unwrap();
        let assistant = html.find("data-role=\"assistant\"").unwrap();
        assert!(user < assistant);
        assert!(html.contains("chat-typing"));
        assert!(!html.contains("chat-empty"));
    }
}
