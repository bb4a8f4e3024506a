//! Bearer-token caller extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::header::AUTHORIZATION;
use http::request::Parts;
use pokedex_core::error::AppError;

use crate::token::{TokenType, validate_token};

/// HMAC secret the extractor validates against. Services expose it from their
/// state through `FromRef`.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtSecret(..)")
    }
}

/// Authenticated caller, taken from `Authorization: Bearer <access token>`.
///
/// Rejects with 401 when the header is absent, the token does not verify, or
/// it is a refresh token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
}

fn authenticate(parts: &Parts, secret: &JwtSecret) -> Result<Caller, AppError> {
    let Authorization(bearer) = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized)?;

    let info = validate_token(bearer.token(), &secret.0, TokenType::Access).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::Unauthorized
    })?;

    Ok(Caller {
        user_id: info.user_id,
    })
}

impl<S> FromRequestParts<S> for Caller
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Validate synchronously and hand back a 'static future, see axum-core 0.5's
    // `fn -> impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, &JwtSecret::from_ref(state));
        async move { result }
    }
}

impl<S> OptionalFromRequestParts<S> for Caller
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Absent header yields `None`; a present but invalid token is still a 401.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let result = if parts.headers.contains_key(AUTHORIZATION) {
            authenticate(parts, &JwtSecret::from_ref(state)).map(Some)
        } else {
            Ok(None)
        };
        async move { result }
    }
}
