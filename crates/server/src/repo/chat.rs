use chrono::{DateTime, Utc};
use shared_types::{AppError, ChatMessage, ChatRole, ChatSession};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    session_id: Uuid,
    role: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        ChatMessage {
            id: row.id,
            session_id: row.session_id,
            role: ChatRole::from_str_or_default(&row.role),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Create an empty session for the user.
pub async fn create_session(
    pool: &Pool<Postgres>,
    user_id: i64,
    title: &str,
) -> Result<ChatSession, AppError> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        INSERT INTO chat_sessions (user_id, title)
        VALUES ($1, $2)
        RETURNING id, title, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// The user's sessions, most recently active first.
pub async fn list_sessions(pool: &Pool<Postgres>, user_id: i64) -> Result<Vec<ChatSession>, AppError> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, title, created_at, updated_at
        FROM chat_sessions
        WHERE user_id = $1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// A session owned by the user. Sessions of other users are reported as
/// missing.
pub async fn find_session(
    pool: &Pool<Postgres>,
    user_id: i64,
    session_id: Uuid,
) -> Result<ChatSession, AppError> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, title, created_at, updated_at
        FROM chat_sessions
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?
    .ok_or_else(|| AppError::not_found("Chat session not found"))
}

pub async fn delete_session(
    pool: &Pool<Postgres>,
    user_id: i64,
    session_id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM chat_sessions WHERE id = $1 AND user_id = $2")
        .bind(session_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Chat session not found"));
    }
    Ok(())
}

/// Messages of a session in the order they were written.
pub async fn list_messages(
    pool: &Pool<Postgres>,
    session_id: Uuid,
) -> Result<Vec<ChatMessage>, AppError> {
    let rows = sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT id, session_id, role, content, created_at
        FROM chat_messages
        WHERE session_id = $1
        ORDER BY created_at ASC, seq ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(rows.into_iter().map(ChatMessage::from).collect())
}

/// Append a message and bump the session's `updated_at`.
pub async fn insert_message(
    pool: &Pool<Postgres>,
    session_id: Uuid,
    role: ChatRole,
    content: &str,
) -> Result<ChatMessage, AppError> {
    let mut tx = pool.begin().await.map_err(SqlxErrorExt::into_app_error)?;

    let row = sqlx::query_as::<_, MessageRow>(
        r#"
        INSERT INTO chat_messages (session_id, role, content)
        VALUES ($1, $2, $3)
        RETURNING id, session_id, role, content, created_at
        "#,
    )
    .bind(session_id)
    .bind(role.as_str())
    .bind(content)
    .fetch_one(&mut *tx)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    sqlx::query("UPDATE chat_sessions SET updated_at = NOW() WHERE id = $1")
        .bind(session_id)
        .execute(&mut *tx)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;
    Ok(row.into())
}

pub async fn rename_session(
    pool: &Pool<Postgres>,
    session_id: Uuid,
    title: &str,
) -> Result<ChatSession, AppError> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        UPDATE chat_sessions SET title = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, title, created_at, updated_at
        "#,
    )
    .bind(session_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
