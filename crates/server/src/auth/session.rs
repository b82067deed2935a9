use shared_types::AppError;
use sqlx::{Pool, Postgres};

use super::cookies;
use super::jwt::{self, Claims, TokenPair};
use crate::repo::refresh_token;

/// Issue tokens for a signed-in user, persist the refresh hash and
/// schedule the auth cookies on the current response.
pub async fn start_session(
    pool: &Pool<Postgres>,
    user_id: i64,
    email: &str,
    role: &str,
) -> Result<TokenPair, AppError> {
    let tokens = jwt::issue_token_pair(user_id, email, role)
        .map_err(|e| AppError::internal(format!("Failed to issue tokens: {e}")))?;
    refresh_token::insert(
        pool,
        user_id,
        &jwt::hash_token(&tokens.refresh_token),
        tokens.refresh_expires_at,
    )
    .await?;
    cookies::schedule_auth_cookies(&tokens);
    tracing::info!(user_id, "session started");
    Ok(tokens)
}

/// Exchange a refresh token for a new pair. The old token is revoked;
/// revoked, expired or unknown tokens yield `None`.
pub async fn rotate(
    pool: &Pool<Postgres>,
    raw_refresh_token: &str,
) -> Result<Option<(Claims, TokenPair)>, AppError> {
    let Ok(claims) = jwt::validate_refresh_token(raw_refresh_token) else {
        return Ok(None);
    };

    let hash = jwt::hash_token(raw_refresh_token);
    let Some(stored_id) = refresh_token::find_active(pool, claims.sub, &hash).await? else {
        tracing::warn!(user_id = claims.sub, "refresh token unknown or revoked");
        return Ok(None);
    };
    refresh_token::revoke(pool, stored_id).await?;

    let tokens = jwt::issue_token_pair(claims.sub, &claims.email, &claims.role)
        .map_err(|e| AppError::internal(format!("Failed to issue tokens: {e}")))?;
    refresh_token::insert(
        pool,
        claims.sub,
        &jwt::hash_token(&tokens.refresh_token),
        tokens.refresh_expires_at,
    )
    .await?;

    let fresh = jwt::validate_access_token(&tokens.access_token)
        .map_err(|e| AppError::internal(format!("Issued token failed validation: {e}")))?;
    Ok(Some((fresh, tokens)))
}

/// Revoke every refresh token of the user and clear the auth cookies.
pub async fn end_session(pool: &Pool<Postgres>, user_id: i64) -> Result<(), AppError> {
    let revoked = refresh_token::revoke_all_for_user(pool, user_id).await?;
    cookies::schedule_clear_cookies();
    tracing::info!(user_id, revoked, "session ended");
    Ok(())
}
