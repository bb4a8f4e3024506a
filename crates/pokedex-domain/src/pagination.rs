//! Offset/limit pagination for upstream species listings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Offset pagination parameters, as accepted by `GET /pokemon/?offset&limit`.
///
/// - `offset`: ≥ 0, default 0
/// - `limit`: 1–100, default 20
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPage {
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for OffsetPage {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
        }
    }
}

impl OffsetPage {
    /// Clamp `limit` to the valid range 1–100.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }
}
