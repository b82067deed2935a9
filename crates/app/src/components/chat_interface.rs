use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdArrowLeft, LdPlus, LdSend};
use dioxus_free_icons::Icon;
use shared_types::{normalize_message, AppError, ChatTurn, MAX_MESSAGE_CHARS};
use shared_ui::{Button, ButtonVariant, PageHeader, Textarea};

use crate::components::chat_thread::ChatThread;
use crate::i18n::{t, use_locale, Msg};
use crate::routes::Route;

/// Whether a keydown in the composer should send: Enter without Shift.
pub(crate) fn is_send_key(evt: &KeyboardEvent) -> bool {
    evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT)
}

/// Full-screen chat. The conversation lives only in this component and is
/// gone when the panel unmounts.
#[component]
pub fn ChatInterface() -> Element {
    let locale = use_locale();
    let mut history = use_signal(Vec::<ChatTurn>::new);
    let mut input = use_signal(String::new);
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let mut send = move || {
        if pending() {
            return;
        }
        let raw = input();
        if raw.trim().is_empty() {
            return;
        }
        let question = match normalize_message(&raw) {
            Ok(question) => question,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        let prior = history();
        history.write().push(ChatTurn::user(question.clone()));
        input.set(String::new());
        error.set(None);
        pending.set(true);

        spawn(async move {
            match server::api::ask_assistant(prior, question, locale).await {
                Ok(answer) => history.write().push(ChatTurn::assistant(answer)),
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            pending.set(false);
        });
    };

    rsx! {
        div { class: "chat-panel chat-panel-standalone",
            PageHeader { title: t(locale, Msg::ChatTitle),
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| {
                        navigator().push(Route::DashboardChatPage {});
                    },
                    Icon::<LdArrowLeft> { icon: LdArrowLeft, width: 16, height: 16 }
                    "{t(locale, Msg::BackToDashboard)}"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: pending() || history.read().is_empty(),
                    onclick: move |_| {
                        history.write().clear();
                        error.set(None);
                    },
                    Icon::<LdPlus> { icon: LdPlus, width: 16, height: 16 }
                    "{t(locale, Msg::NewConversation)}"
                }
            }

            ChatThread { turns: history(), pending: pending() }

            if let Some(message) = error() {
                div { class: "chat-error", role: "alert", "{message}" }
            }

            div { class: "chat-composer",
                Textarea {
                    value: input(),
                    placeholder: t(locale, Msg::ChatPlaceholder),
                    rows: 2,
                    max_chars: MAX_MESSAGE_CHARS,
                    on_input: move |e: FormEvent| input.set(e.value()),
                    on_keydown: move |e: KeyboardEvent| {
                        if is_send_key(&e) {
                            e.prevent_default();
                            send();
                        }
                    },
                }
                Button {
                    loading: pending(),
                    disabled: input.read().trim().is_empty(),
                    onclick: move |_| send(),
                    Icon::<LdSend> { icon: LdSend, width: 16, height: 16 }
                    "{t(locale, Msg::Send)}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleState;
    use shared_types::Locale;

    #[component]
    fn Harness() -> Element {
        use_context_provider(|| LocaleState::new(Locale::En));
        rsx! { ChatInterface {} }
    }

    #[test]
    fn starts_empty_with_disabled_send() {
        let html = dioxus_ssr::render_element(rsx! { Harness {} });
        assert!(html.contains("chat-empty"));
        assert!(html.contains("Ask a legal research question"));
        assert!(html.contains(&format!("0 / {MAX_MESSAGE_CHARS}")));
        assert!(!html.contains("chat-error"));
    }
}
