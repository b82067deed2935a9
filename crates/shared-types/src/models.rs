use serde::{Deserialize, Serialize};

use crate::Locale;

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
}

/// Register request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct RegisterRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(
            min = 3,
            max = 32,
            message = "Username must be between 3 and 32 characters"
        ))
    )]
    pub username: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 80, message = "Display name is required"))
    )]
    pub display_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
}

/// Authenticated user info (safe to send to client).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub locale: Locale,
}

impl AuthUser {
    /// One or two uppercase initials for the avatar chip.
    pub fn initials(&self) -> String {
        let source = if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        };
        source
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: &str, username: &str) -> AuthUser {
        AuthUser {
            id: 7,
            username: username.to_string(),
            display_name: display_name.to_string(),
            email: "counsel@example.com".to_string(),
            role: "user".to_string(),
            locale: Locale::En,
        }
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(user("ada lovelace byron", "ada").initials(), "AL");
        assert_eq!(user("Ruth", "rbg").initials(), "R");
    }

    #[test]
    fn initials_fall_back_to_username() {
        assert_eq!(user("  ", "thurgood").initials(), "T");
    }

    #[test]
    fn missing_locale_deserializes_to_default() {
        let json = r#"{"id":1,"username":"u","display_name":"U","email":"u@x.io","role":"user"}"#;
        let parsed: AuthUser = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.locale, Locale::En);
    }
}
