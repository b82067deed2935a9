use shared_types::{AppError, AuthUser, Locale};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// A `users` row including the password hash. Never sent to clients.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub locale: String,
}

impl From<UserRow> for AuthUser {
    fn from(row: UserRow) -> Self {
        AuthUser {
            id: row.id,
            username: row.username,
            display_name: row.display_name,
            email: row.email,
            role: row.role,
            locale: Locale::from_str_or_default(&row.locale),
        }
    }
}

const COLUMNS: &str = "id, username, display_name, email, password_hash, role, locale";

pub async fn create(
    pool: &Pool<Postgres>,
    username: &str,
    display_name: &str,
    email: &str,
    password_hash: &str,
    locale: Locale,
) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (username, display_name, email, password_hash, locale)
        VALUES ($1, $2, LOWER($3), $4, $5)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(username)
    .bind(display_name)
    .bind(email)
    .bind(password_hash)
    .bind(locale.as_str())
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Case-insensitive lookup by email.
pub async fn find_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<UserRow>, AppError> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {COLUMNS} FROM users WHERE email = LOWER($1)"
    ))
    .bind(email.trim())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<UserRow>, AppError> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn set_locale(pool: &Pool<Postgres>, id: i64, locale: Locale) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE users SET locale = $1, updated_at = NOW() WHERE id = $2")
        .bind(locale.as_str())
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    if result.rows_affected() == 0 {
        return Err(AppError::not_found("User not found"));
    }
    Ok(())
}
