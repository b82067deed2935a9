use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};
use std::sync::{Arc, Mutex};

use super::jwt::{self, TokenPair};

pub const ACCESS_COOKIE: &str = "counselor_access";
pub const REFRESH_COOKIE: &str = "counselor_refresh";

/// Non-HTTP-only cookie written by the language toggle.
pub const LOCALE_COOKIE: &str = "locale";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty())
}

fn auth_cookie(name: &'static str, value: &str, max_age: cookie::time::Duration) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(max_age)
        .secure(cookie_secure());
    if let Some(domain) = cookie_domain() {
        builder = builder.domain(domain);
    }
    builder.build()
}

fn append(headers: &mut HeaderMap, cookie: Cookie<'_>) {
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!(cookie = cookie.name(), error = %e, "unencodable cookie"),
    }
}

pub fn build_access_cookie(token: &str, max_age_minutes: i64) -> Cookie<'static> {
    auth_cookie(
        ACCESS_COOKIE,
        token,
        cookie::time::Duration::minutes(max_age_minutes),
    )
}

pub fn build_refresh_cookie(token: &str, max_age_days: i64) -> Cookie<'static> {
    auth_cookie(
        REFRESH_COOKIE,
        token,
        cookie::time::Duration::days(max_age_days),
    )
}

/// Set both auth cookies using the configured expiries.
pub fn set_auth_cookies(headers: &mut HeaderMap, access_token: &str, refresh_token: &str) {
    append(
        headers,
        build_access_cookie(access_token, jwt::access_token_expiry_minutes()),
    );
    append(
        headers,
        build_refresh_cookie(refresh_token, jwt::refresh_token_expiry_days()),
    );
}

/// Expire both auth cookies.
pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    append(
        headers,
        auth_cookie(ACCESS_COOKIE, "", cookie::time::Duration::ZERO),
    );
    append(
        headers,
        auth_cookie(REFRESH_COOKIE, "", cookie::time::Duration::ZERO),
    );
}

/// Access token from the cookie, or from a Bearer header for REST clients.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, ACCESS_COOKIE) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, REFRESH_COOKIE)
}

/// Parse a specific cookie value from the Cookie headers.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Cookie change requested by a server function, applied by the middleware.
#[derive(Clone, Debug)]
pub enum PendingCookieAction {
    Set {
        access_token: String,
        refresh_token: String,
    },
    Clear,
}

/// Request extension through which server functions hand cookie changes
/// to [`super::middleware::auth_middleware`].
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    let Some(ctx) = dioxus::fullstack::FullstackContext::current() else {
        tracing::warn!("no request context, cookie change dropped");
        return;
    };
    let parts = ctx.parts_mut();
    match parts.extensions.get::<CookieSlot>() {
        Some(slot) => slot.put(action),
        None => tracing::warn!("auth middleware not installed, cookie change dropped"),
    }
}

/// Schedule auth cookies to be set on the current response.
pub fn schedule_auth_cookies(tokens: &TokenPair) {
    schedule(PendingCookieAction::Set {
        access_token: tokens.access_token.clone(),
        refresh_token: tokens.refresh_token.clone(),
    });
}

/// Schedule auth cookies to be cleared on the current response.
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_named_cookie_among_others() {
        let headers = headers_with_cookie("locale=es; counselor_access=abc.def; theme=dark");
        assert_eq!(extract_access_token(&headers).as_deref(), Some("abc.def"));
        assert_eq!(extract_cookie(&headers, LOCALE_COOKIE).as_deref(), Some("es"));
        assert_eq!(extract_refresh_token(&headers), None);
    }

    #[test]
    fn bearer_header_is_a_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_access_token(&headers).as_deref(), Some("tok"));

        headers.insert(header::COOKIE, HeaderValue::from_static("counselor_access=cookie"));
        assert_eq!(extract_access_token(&headers).as_deref(), Some("cookie"));
    }

    #[test]
    fn empty_cookie_counts_as_missing() {
        let headers = headers_with_cookie("counselor_access=");
        assert_eq!(extract_access_token(&headers), None);
    }

    #[test]
    fn set_cookies_are_http_only() {
        let mut headers = HeaderMap::new();
        set_auth_cookies(&mut headers, "a", "r");
        let values: Vec<_> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.contains("HttpOnly")));
        assert!(values[0].starts_with("counselor_access=a"));
        assert!(values[1].starts_with("counselor_refresh=r"));
    }

    #[test]
    fn clearing_expires_both_cookies() {
        let mut headers = HeaderMap::new();
        clear_auth_cookies(&mut headers);
        let values: Vec<_> = headers.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(values.len(), 2);
        assert!(values
            .iter()
            .all(|v| v.to_str().unwrap().contains("Max-Age=0")));
    }

    #[test]
    fn slot_hands_over_once() {
        let slot = CookieSlot::default();
        slot.put(PendingCookieAction::Clear);
        assert!(matches!(slot.take(), Some(PendingCookieAction::Clear)));
        assert!(slot.take().is_none());
    }
}
