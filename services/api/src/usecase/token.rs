use anyhow::Context as _;

use pokedex_auth_types::token::{TokenType, issue_token, validate_token};

use crate::domain::repository::UserRepository;
use crate::error::PokedexError;
use crate::usecase::{required_secret, required_text, verify_secret};

/// Signing secret and lifetimes for issued tokens.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

#[derive(Debug)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub settings: TokenSettings,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Exchange login + password for an access/refresh pair.
    ///
    /// Unknown login, wrong password and inactive account all answer
    /// `InvalidCredentials` so callers cannot probe which logins exist.
    pub async fn execute(
        &self,
        login: Option<String>,
        password: Option<String>,
    ) -> Result<TokenPair, PokedexError> {
        let login = required_text(login)?;
        let password = required_secret(password)?;

        let user = self
            .repo
            .find_by_login(&login)
            .await?
            .filter(|u| u.is_active)
            .ok_or(PokedexError::InvalidCredentials)?;

        if !verify_secret(user.password_hash.clone(), password).await? {
            return Err(PokedexError::InvalidCredentials);
        }

        let access = issue_token(
            user.id,
            TokenType::Access,
            self.settings.access_ttl_secs,
            &self.settings.secret,
        )
        .context("sign access token")?;
        let refresh = issue_token(
            user.id,
            TokenType::Refresh,
            self.settings.refresh_ttl_secs,
            &self.settings.secret,
        )
        .context("sign refresh token")?;

        tracing::info!(user_id = user.id, "token pair issued");
        Ok(TokenPair {
            access: access.token,
            refresh: refresh.token,
        })
    }
}

// ── Refresh ──────────────────────────────────────────────────────────────────

pub struct RefreshUseCase<R: UserRepository> {
    pub repo: R,
    pub settings: TokenSettings,
}

impl<R: UserRepository> RefreshUseCase<R> {
    /// Trade a valid refresh token for a new access token.
    pub async fn execute(&self, refresh: Option<String>) -> Result<String, PokedexError> {
        let refresh = required_text(refresh)?;
        let info = validate_token(&refresh, &self.settings.secret, TokenType::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "refresh token rejected");
                PokedexError::InvalidToken
            })?;

        let user = self
            .repo
            .find_by_id(info.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(PokedexError::InvalidToken)?;

        let access = issue_token(
            user.id,
            TokenType::Access,
            self.settings.access_ttl_secs,
            &self.settings.secret,
        )
        .context("sign access token")?;
        Ok(access.token)
    }
}
