use dioxus::prelude::*;
use shared_types::{AuthUser, FeatureFlags, Locale, MessageResponse};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

/// Create an account and sign it in. Sets HTTP-only auth cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn register(
    username: String,
    display_name: String,
    email: String,
    password: String,
) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{password as pw, session};
    use shared_types::{AppError, RegisterRequest};

    if !crate::config::feature_flags().registration {
        return Err(AppError::forbidden("Registration is closed").into_server_fn_error());
    }

    let req = RegisterRequest {
        username: username.trim().to_string(),
        display_name: display_name.trim().to_string(),
        email: email.trim().to_string(),
        password,
    };
    req.validate_request().map_err(|e| e.into_server_fn_error())?;

    let password_hash = pw::hash_password(&req.password)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;

    let pool = db().await?;
    let locale = cookie_locale().unwrap_or_default();
    let user = crate::repo::user::create(
        pool,
        &req.username,
        &req.display_name,
        &req.email,
        &password_hash,
        locale,
    )
    .await
    .map_err(|e| e.into_server_fn_error())?;

    session::start_session(pool, user.id, &user.email, &user.role)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    tracing::info!(user_id = user.id, "account registered");
    Ok(user.into())
}

/// Sign in with email and password. Sets HTTP-only auth cookies on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{password as pw, session};
    use shared_types::{AppError, LoginRequest};

    let req = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    req.validate_request().map_err(|e| e.into_server_fn_error())?;

    let invalid = || AppError::unauthorized("Invalid email or password").into_server_fn_error();

    let pool = db().await?;
    let user = crate::repo::user::find_by_email(pool, &req.email)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(invalid)?;

    let valid = pw::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::internal(e.to_string()).into_server_fn_error())?;
    if !valid {
        tracing::info!(user_id = user.id, "failed sign-in attempt");
        return Err(invalid());
    }

    session::start_session(pool, user.id, &user.email, &user.role)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    Ok(user.into())
}

/// The signed-in user, or `None` for anonymous callers.
///
/// The auth middleware has already validated the access token (refreshing
/// it from the refresh cookie when needed), so this only looks up the user.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    match current_claims() {
        Some(claims) => fetch_auth_user(claims.sub).await,
        None => Ok(None),
    }
}

/// Revoke the caller's refresh tokens and clear the auth cookies.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<MessageResponse, ServerFnError> {
    use crate::auth::{cookies, session};

    match current_claims() {
        Some(claims) => {
            let pool = db().await?;
            session::end_session(pool, claims.sub)
                .await
                .map_err(|e| e.into_server_fn_error())?;
        }
        None => cookies::schedule_clear_cookies(),
    }

    Ok(MessageResponse {
        message: "Signed out".to_string(),
    })
}

/// Remember the caller's interface language.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn set_preferred_locale(locale: Locale) -> Result<(), ServerFnError> {
    let claims = require_auth()?;
    let pool = db().await?;
    crate::repo::user::set_locale(pool, claims.sub, locale)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Feature flags from `config.toml`. Public so the sign-up page can hide
/// itself when registration is closed.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}
