// Server-only helpers shared by the api/* modules.

use dioxus::prelude::*;
use shared_types::{AppError, AuthUser};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::{cookies, jwt};
use crate::error_convert::AppErrorExt;

/// The shared pool, with connection errors converted for the transport.
pub(crate) async fn db() -> Result<&'static Pool<Postgres>, ServerFnError> {
    crate::db::get_db()
        .await
        .map_err(AppErrorExt::into_server_fn_error)
}

/// Claims of the caller, if any. Prefers the claims the auth middleware
/// stored on the request and falls back to parsing the access token.
pub(crate) fn current_claims() -> Option<jwt::Claims> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Some(claims.clone());
    }

    let token = cookies::extract_access_token(&parts.headers)?;
    jwt::validate_access_token(&token).ok()
}

/// Claims of the caller, or an "Authentication required" error.
pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}

/// Locale chosen on the language toggle before signing in.
pub(crate) fn cookie_locale() -> Option<shared_types::Locale> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    cookies::extract_cookie(&parts.headers, cookies::LOCALE_COOKIE)
        .map(|code| shared_types::Locale::from_str_or_default(&code))
}

/// Load the user behind a session. A user that no longer exists ends the
/// session and yields `None`.
pub(crate) async fn fetch_auth_user(user_id: i64) -> Result<Option<AuthUser>, ServerFnError> {
    let pool = db().await?;
    let user = crate::repo::user::find_by_id(pool, user_id)
        .await
        .map_err(AppErrorExt::into_server_fn_error)?;

    if user.is_none() {
        tracing::warn!(user_id, "session refers to a deleted user");
        cookies::schedule_clear_cookies();
    }
    Ok(user.map(AuthUser::from))
}

/// Parse an id sent by the client.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, ServerFnError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request(format!("Invalid {what} id")).into_server_fn_error())
}
