use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sqlx::{Pool, Postgres};

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::validate_access_token;
use super::session;

/// Permissive auth middleware.
///
/// Validates the access token (cookie or Bearer header) and stores its
/// `Claims` in the request extensions. A missing or expired access token is
/// replaced transparently when a valid refresh cookie is present. After the
/// handler runs, cookie changes scheduled through the [`CookieSlot`] are
/// applied to the response.
///
/// Unauthenticated requests pass through; handlers decide authorization.
pub async fn auth_middleware(
    State(pool): State<Pool<Postgres>>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers().clone();
    let mut refreshed = None;

    let claims = cookies::extract_access_token(&headers)
        .and_then(|token| validate_access_token(&token).ok());

    match claims {
        Some(claims) => {
            req.extensions_mut().insert(claims);
        }
        None => {
            if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
                match session::rotate(&pool, &refresh_token).await {
                    Ok(Some((claims, tokens))) => {
                        tracing::debug!(user_id = claims.sub, "session refreshed");
                        req.extensions_mut().insert(claims);
                        refreshed = Some(tokens);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, "transparent refresh failed"),
                }
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some(tokens) = refreshed {
        cookies::set_auth_cookies(
            response.headers_mut(),
            &tokens.access_token,
            &tokens.refresh_token,
        );
    }

    match cookie_slot.take() {
        Some(PendingCookieAction::Set {
            access_token,
            refresh_token,
        }) => cookies::set_auth_cookies(response.headers_mut(), &access_token, &refresh_token),
        Some(PendingCookieAction::Clear) => cookies::clear_auth_cookies(response.headers_mut()),
        None => {}
    }

    response
}
