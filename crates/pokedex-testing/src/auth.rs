//! Mock auth helpers for integration tests.
//!
//! Signs real access tokens with a test secret so requests pass the `Caller`
//! extractor without going through `POST /api/token/`.

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use pokedex_auth_types::token::{TokenType, issue_token};

/// Secret shared by test states and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "pokedex-test-secret";

/// Identity to authenticate test requests as.
pub struct MockAuth {
    pub user_id: i32,
    pub secret: String,
}

impl MockAuth {
    pub fn new(user_id: i32) -> Self {
        Self {
            user_id,
            secret: TEST_JWT_SECRET.to_owned(),
        }
    }

    /// A freshly signed access token.
    pub fn token(&self) -> String {
        issue_token(self.user_id, TokenType::Access, 300, &self.secret)
            .unwrap()
            .token
    }

    /// A freshly signed refresh token.
    pub fn refresh_token(&self) -> String {
        issue_token(self.user_id, TokenType::Refresh, 300, &self.secret)
            .unwrap()
            .token
    }

    /// `Authorization: Bearer <token>` as a header map.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
