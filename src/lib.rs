//! Library crate for arcade-scores-back, exposing modules for binaries and integration tests.

pub mod config;
/// Score persistence.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Error types for every layer.
pub mod error;
/// HTTP routes.
pub mod routes;
/// Business logic behind the routes.
pub mod services;
pub mod state;
