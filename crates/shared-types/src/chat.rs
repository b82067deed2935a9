use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppError;

/// Longest message accepted from the composer, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Title of a session before its first message arrives.
pub const DEFAULT_SESSION_TITLE: &str = "New chat";

/// Longest generated session title, in characters (before the ellipsis).
pub const MAX_TITLE_CHARS: usize = 60;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    /// Parse a stored role. Anything other than `user` is treated as the assistant.
    pub fn from_str_or_default(s: &str) -> Self {
        if s.eq_ignore_ascii_case("user") {
            ChatRole::User
        } else {
            ChatRole::Assistant
        }
    }
}

/// A single unsaved exchange used by the standalone chat view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A persisted chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatTurn {
    fn from(m: &ChatMessage) -> Self {
        Self {
            role: m.role,
            content: m.content.clone(),
        }
    }
}

/// A saved conversation owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct ChatSession {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Both halves of one saved exchange, returned after a send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
    /// The session with its possibly-updated title.
    pub session: ChatSession,
}

/// Trim a composer message and check it against the length limit.
pub fn normalize_message(content: &str) -> Result<String, AppError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::field("content", "Message cannot be empty"));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::field(
            "content",
            format!("Message must be at most {MAX_MESSAGE_CHARS} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Session title derived from the first user message: whitespace collapsed,
/// cut to [`MAX_TITLE_CHARS`] with an ellipsis when truncated.
pub fn derive_session_title(first_message: &str) -> String {
    let collapsed = first_message.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_TITLE_CHARS {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(MAX_TITLE_CHARS).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_message("  hello \n").unwrap(), "hello");
    }

    #[test]
    fn normalize_rejects_blank_messages() {
        let err = normalize_message(" \t ").unwrap_err();
        assert!(err.field_errors.contains_key("content"));
    }

    #[test]
    fn normalize_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(normalize_message(&accented).is_ok());
        let too_long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(normalize_message(&too_long).is_err());
    }

    #[test]
    fn short_titles_are_kept() {
        assert_eq!(
            derive_session_title("What is  adverse\npossession?"),
            "What is adverse possession?"
        );
    }

    #[test]
    fn long_titles_are_truncated_with_ellipsis() {
        let message = "Summarize the holding of Marbury v. Madison and explain how judicial review developed afterwards";
        let title = derive_session_title(message);
        assert!(title.ends_with('…'));
        assert!(title.chars().count() <= MAX_TITLE_CHARS + 1);
        assert!(title.starts_with("Summarize the holding of Marbury"));
    }

    #[test]
    fn role_parsing_defaults_to_assistant() {
        assert_eq!(ChatRole::from_str_or_default("USER"), ChatRole::User);
        assert_eq!(ChatRole::from_str_or_default("assistant"), ChatRole::Assistant);
        assert_eq!(ChatRole::from_str_or_default("system"), ChatRole::Assistant);
    }
}
