//! Domain types shared across Pokedex crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/`.

pub mod flag;
pub mod pagination;
pub mod team;
