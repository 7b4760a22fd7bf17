//! Cookbook API server library.
//!
//! Exposes config, state, error handling and the route tree so the binary
//! entrypoint and the integration tests share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notices;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
