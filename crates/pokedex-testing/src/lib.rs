//! Test utilities for Pokedex services.
//!
//! Provides `MockAuth` for minting bearer tokens and PokeAPI payload builders
//! for `mockito` servers. Import from dev-dependencies only.

pub mod auth;
pub mod upstream;
