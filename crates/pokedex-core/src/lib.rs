//! Ambient plumbing shared by Pokedex services.
//!
//! Configuration loading, tracing setup, request ids, health probes and the
//! generic `AppError` live here so each service only carries its own domain.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
