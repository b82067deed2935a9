use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::AppError;

use super::jwt::Claims;

/// Extractor that requires authentication. Rejects with 401 when the auth
/// middleware found no valid session.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use shared_types::AppErrorKind;

    fn claims() -> Claims {
        Claims {
            sub: 5,
            email: "counsel@example.com".into(),
            role: "user".into(),
            exp: 0,
            iat: 0,
            jti: None,
            typ: "access".into(),
        }
    }

    #[tokio::test]
    async fn rejects_without_claims() {
        let (mut parts, _) = Request::new(()).into_parts();
        let err = AuthRequired::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn yields_claims_from_extensions() {
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(claims());
        let AuthRequired(found) = AuthRequired::from_request_parts(&mut parts, &())
            .await
            .ok()
            .unwrap();
        assert_eq!(found, claims());
    }
}
