//! JWT access/refresh tokens.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Access-token lifetime in seconds (30 minutes).
pub const ACCESS_TOKEN_TTL_SECS: u64 = 1800;

/// Refresh-token lifetime in seconds (1 day).
pub const REFRESH_TOKEN_TTL_SECS: u64 = 86400;

/// Which half of the token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `user_id` | custom | numeric user id |
/// | `token_type` | custom | `access` or `refresh` |
/// | `iat` | `iat` | issued at, seconds since epoch |
/// | `exp` | `exp` | expiration, seconds since epoch |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub user_id: i32,
    pub token_type: TokenType,
    pub iat: u64,
    pub exp: u64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
}

/// Identity extracted from a validated token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: i32,
    pub exp: u64,
}

/// Errors returned by [`validate_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("wrong token type")]
    WrongType,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign a token of `token_type` for `user_id`, valid for `ttl_secs`.
pub fn issue_token(
    user_id: i32,
    token_type: TokenType,
    ttl_secs: u64,
    secret: &str,
) -> Result<IssuedToken, AuthError> {
    let iat = now_secs();
    let exp = iat + ttl_secs;
    let claims = JwtClaims {
        user_id,
        token_type,
        iat,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Signing)?;
    Ok(IssuedToken { token, exp })
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, `exp` checked with the default 60s leeway.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate `token` and require it to be of `expected` type.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected: TokenType,
) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.token_type != expected {
        return Err(AuthError::WrongType);
    }
    Ok(TokenInfo {
        user_id: claims.user_id,
        exp: claims.exp,
    })
}
