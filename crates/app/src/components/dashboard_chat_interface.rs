use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPlus, LdSend, LdTrash2};
use dioxus_free_icons::Icon;
use shared_types::{
    normalize_message, AppError, ChatMessage, ChatSession, ChatTurn, MAX_MESSAGE_CHARS,
};
use shared_ui::{Button, ButtonVariant, Skeleton, Textarea};
use uuid::Uuid;

use crate::components::chat_interface::is_send_key;
use crate::components::chat_thread::ChatThread;
use crate::i18n::{t, use_locale, Msg};

/// Turns shown in the thread: the saved messages followed by a question
/// still waiting for its reply.
pub(crate) fn thread_turns(messages: &[ChatMessage], pending: Option<&str>) -> Vec<ChatTurn> {
    let mut turns: Vec<ChatTurn> = messages.iter().map(ChatTurn::from).collect();
    if let Some(question) = pending {
        turns.push(ChatTurn::user(question));
    }
    turns
}

/// A question waiting for its reply. `session` stays `None` until the
/// conversation it starts has been created.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingSend {
    pub session: Option<Uuid>,
    pub question: String,
}

impl PendingSend {
    /// The question, when it belongs to the conversation on screen.
    pub(crate) fn shown_in(&self, selected: Option<Uuid>) -> Option<&str> {
        (self.session == selected).then_some(self.question.as_str())
    }
}

/// Whether a finished exchange for `session_id` belongs in the thread on screen.
pub(crate) fn exchange_applies(selected: Option<Uuid>, session_id: Uuid) -> bool {
    selected == Some(session_id)
}

fn session_date(session: &ChatSession) -> String {
    session.updated_at.format("%b %-d, %H:%M").to_string()
}

/// Chat with saved conversations: a session list beside the thread.
#[component]
pub fn DashboardChatInterface() -> Element {
    let locale = use_locale();
    let mut selected = use_signal(|| Option::<Uuid>::None);
    let mut messages = use_signal(Vec::<ChatMessage>::new);
    let mut input = use_signal(String::new);
    let mut pending = use_signal(|| Option::<PendingSend>::None);
    let mut loading_thread = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let mut sessions = use_resource(move || async move { server::api::list_chat_sessions().await });

    let mut open_session = move |id: Uuid| {
        if selected() == Some(id) {
            return;
        }
        selected.set(Some(id));
        messages.set(Vec::new());
        error.set(None);
        loading_thread.set(true);
        spawn(async move {
            match server::api::get_chat_messages(id.to_string()).await {
                Ok(loaded) => {
                    if selected() == Some(id) {
                        messages.set(loaded);
                    }
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            loading_thread.set(false);
        });
    };

    let new_chat = move |_: MouseEvent| {
        spawn(async move {
            match server::api::create_chat_session().await {
                Ok(session) => {
                    selected.set(Some(session.id));
                    messages.set(Vec::new());
                    error.set(None);
                    sessions.restart();
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
        });
    };

    let mut send = move || {
        if pending.read().is_some() {
            return;
        }
        let raw = input();
        if raw.trim().is_empty() {
            return;
        }
        let content = match normalize_message(&raw) {
            Ok(content) => content,
            Err(err) => {
                error.set(Some(err.message));
                return;
            }
        };
        input.set(String::new());
        error.set(None);
        let origin = selected();
        pending.set(Some(PendingSend {
            session: origin,
            question: content.clone(),
        }));

        spawn(async move {
            let result = async {
                let session_id = match origin {
                    Some(id) => id,
                    None => {
                        let session = server::api::create_chat_session().await?;
                        if selected().is_none() {
                            selected.set(Some(session.id));
                        }
                        if let Some(waiting) = pending.write().as_mut() {
                            waiting.session = Some(session.id);
                        }
                        session.id
                    }
                };
                server::api::send_chat_message(session_id.to_string(), content, locale).await
            }
            .await;
            match result {
                Ok(exchange) => {
                    if exchange_applies(selected(), exchange.session.id) {
                        let mut thread = messages.write();
                        thread.push(exchange.user_message);
                        thread.push(exchange.assistant_message);
                    }
                    sessions.restart();
                }
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            pending.set(None);
        });
    };

    let session_list = match &*sessions.read() {
        Some(Ok(list)) => {
            let current = selected();
            rsx! {
                if list.is_empty() {
                    p { class: "chat-sessions-empty", "{t(locale, Msg::NoConversations)}" }
                }
                ul { class: "chat-session-list",
                    for session in list.iter().cloned() {
                        li {
                            key: "{session.id}",
                            class: "chat-session",
                            "data-active": if current == Some(session.id) { "true" } else { "false" },
                            button {
                                r#type: "button",
                                class: "chat-session-open",
                                onclick: move |_| open_session(session.id),
                                span { class: "chat-session-title", "{session.title}" }
                                span { class: "chat-session-date", {session_date(&session)} }
                            }
                            button {
                                r#type: "button",
                                class: "chat-session-delete",
                                title: t(locale, Msg::DeleteChat),
                                "aria-label": t(locale, Msg::DeleteChat),
                                onclick: move |_| {
                                    let id = session.id;
                                    spawn(async move {
                                        match server::api::delete_chat_session(id.to_string()).await {
                                            Ok(()) => {
                                                if selected() == Some(id) {
                                                    selected.set(None);
                                                    messages.set(Vec::new());
                                                }
                                                sessions.restart();
                                            }
                                            Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
                                        }
                                    });
                                },
                                Icon::<LdTrash2> { icon: LdTrash2, width: 14, height: 14 }
                            }
                        }
                    }
                }
            }
        }
        Some(Err(e)) => rsx! {
            p { class: "chat-error", role: "alert", "{AppError::friendly_message(&e.to_string())}" }
        },
        None => rsx! { Skeleton { lines: 4 } },
    };

    let waiting = pending.read().as_ref().and_then(|p| p.shown_in(selected()).map(str::to_string));
    let thread_pending = waiting.is_some();
    let turns = thread_turns(&messages.read(), waiting.as_deref());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./chat.css") }

        div { class: "chat-panel chat-panel-dashboard",
            aside { class: "chat-sessions",
                div { class: "chat-sessions-header",
                    h2 { class: "chat-sessions-title", "{t(locale, Msg::Conversations)}" }
                    Button { variant: ButtonVariant::Outline, onclick: new_chat,
                        Icon::<LdPlus> { icon: LdPlus, width: 14, height: 14 }
                        "{t(locale, Msg::NewChat)}"
                    }
                }
                {session_list}
            }

            section { class: "chat-main",
                if loading_thread() {
                    Skeleton { lines: 3 }
                } else {
                    ChatThread { turns, pending: thread_pending }
                }

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
                        loading: pending.read().is_some(),
                        disabled: input.read().trim().is_empty(),
                        onclick: move |_| send(),
                        Icon::<LdSend> { icon: LdSend, width: 16, height: 16 }
                        "{t(locale, Msg::Send)}"
                    }
                }
            }
        }
    }
}
