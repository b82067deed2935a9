use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::env_parse;

/// Token type discriminator so a refresh token cannot act as an access token.
const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims stored in access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique per token so two tokens issued in the same second hash differently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default)]
    pub typ: String,
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Hex SHA-256 of a raw token. Only this hash is persisted for refresh tokens.
pub fn hash_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn jwt_secret() -> Result<String, JwtError> {
    std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            tracing::error!("JWT_SECRET is not set");
            JwtError::from(ErrorKind::InvalidKeyFormat)
        })
}

pub fn access_token_expiry_minutes() -> i64 {
    env_parse("JWT_ACCESS_TOKEN_EXPIRY_MINUTES", 15)
}

pub fn refresh_token_expiry_days() -> i64 {
    env_parse("JWT_REFRESH_TOKEN_EXPIRY_DAYS", 7)
}

fn sign(
    user_id: i64,
    email: &str,
    role: &str,
    typ: &str,
    expires_at: DateTime<Utc>,
) -> Result<String, JwtError> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        iat: Utc::now().timestamp(),
        exp: expires_at.timestamp(),
        jti: Some(uuid::Uuid::new_v4().to_string()),
        typ: typ.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret()?.as_bytes()),
    )
}

pub fn create_access_token(user_id: i64, email: &str, role: &str) -> Result<String, JwtError> {
    let expires_at = Utc::now() + Duration::minutes(access_token_expiry_minutes());
    sign(user_id, email, role, TOKEN_TYPE_ACCESS, expires_at)
}

pub fn create_refresh_token(
    user_id: i64,
    email: &str,
    role: &str,
) -> Result<(String, DateTime<Utc>), JwtError> {
    let expires_at = Utc::now() + Duration::days(refresh_token_expiry_days());
    let token = sign(user_id, email, role, TOKEN_TYPE_REFRESH, expires_at)?;
    Ok((token, expires_at))
}

/// Issue both tokens for a user.
pub fn issue_token_pair(user_id: i64, email: &str, role: &str) -> Result<TokenPair, JwtError> {
    let access_token = create_access_token(user_id, email, role)?;
    let (refresh_token, refresh_expires_at) = create_refresh_token(user_id, email, role)?;
    Ok(TokenPair {
        access_token,
        refresh_token,
        refresh_expires_at,
    })
}

fn decode_claims(token: &str) -> Result<Claims, JwtError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret()?.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Validate an access token. Refresh tokens are rejected.
pub fn validate_access_token(token: &str) -> Result<Claims, JwtError> {
    let claims = decode_claims(token)?;
    if claims.typ != TOKEN_TYPE_ACCESS {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

/// Validate a refresh token. Access tokens are rejected.
pub fn validate_refresh_token(token: &str) -> Result<Claims, JwtError> {
    let claims = decode_claims(token)?;
    if claims.typ != TOKEN_TYPE_REFRESH {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}
