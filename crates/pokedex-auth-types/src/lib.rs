//! Auth types shared across Pokedex crates.
//!
//! Provides JWT issuing/validation, password hashing, and the `Caller` extractor.

pub mod caller;
pub mod password;
pub mod token;
