use dioxus::prelude::*;
use shared_types::{ChatExchange, ChatMessage, ChatSession, ChatTurn, Locale};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

/// Answer a question in an unsaved conversation.
#[cfg_attr(feature = "server", tracing::instrument(skip(history, question)))]
#[server]
pub async fn ask_assistant(
    history: Vec<ChatTurn>,
    question: String,
    locale: Locale,
) -> Result<String, ServerFnError> {
    let claims = require_auth()?;
    let question = shared_types::normalize_message(&question).map_err(|e| e.into_server_fn_error())?;
    crate::rate_limit::check_chat_quota(claims.sub).map_err(|e| e.into_server_fn_error())?;

    crate::assistant::reply(&history, &question, locale)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// The caller's saved conversations, most recent first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_chat_sessions() -> Result<Vec<ChatSession>, ServerFnError> {
    let claims = require_auth()?;
    let pool = db().await?;
    crate::repo::chat::list_sessions(pool, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn create_chat_session() -> Result<ChatSession, ServerFnError> {
    let claims = require_auth()?;
    let pool = db().await?;
    crate::repo::chat::create_session(pool, claims.sub, shared_types::DEFAULT_SESSION_TITLE)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_chat_messages(session_id: String) -> Result<Vec<ChatMessage>, ServerFnError> {
    let claims = require_auth()?;
    let session_id = parse_id(&session_id, "session")?;
    let pool = db().await?;

    crate::repo::chat::find_session(pool, claims.sub, session_id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    crate::repo::chat::list_messages(pool, session_id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_chat_session(session_id: String) -> Result<(), ServerFnError> {
    let claims = require_auth()?;
    let session_id = parse_id(&session_id, "session")?;
    let pool = db().await?;
    crate::repo::chat::delete_session(pool, claims.sub, session_id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Persist a user message, answer it, persist the answer and return both.
/// The first message of a session also names it.
#[cfg_attr(feature = "server", tracing::instrument(skip(content)))]
#[server]
pub async fn send_chat_message(
    session_id: String,
    content: String,
    locale: Locale,
) -> Result<ChatExchange, ServerFnError> {
    use crate::repo::chat;
    use shared_types::{derive_session_title, ChatRole, DEFAULT_SESSION_TITLE};

    let claims = require_auth()?;
    let session_id = parse_id(&session_id, "session")?;
    let content = shared_types::normalize_message(&content).map_err(|e| e.into_server_fn_error())?;
    crate::rate_limit::check_chat_quota(claims.sub).map_err(|e| e.into_server_fn_error())?;

    let pool = db().await?;
    let session = chat::find_session(pool, claims.sub, session_id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    let history: Vec<ChatTurn> = chat::list_messages(pool, session_id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .iter()
        .map(ChatTurn::from)
        .collect();

    let user_message = chat::insert_message(pool, session_id, ChatRole::User, &content)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    if history.is_empty() && session.title == DEFAULT_SESSION_TITLE {
        chat::rename_session(pool, session_id, &derive_session_title(&content))
            .await
            .map_err(|e| e.into_server_fn_error())?;
    }

    let answer = crate::assistant::reply(&history, &content, locale)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    let assistant_message = chat::insert_message(pool, session_id, ChatRole::Assistant, &answer)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    let session = chat::find_session(pool, claims.sub, session_id)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    Ok(ChatExchange {
        user_message,
        assistant_message,
        session,
    })
}
