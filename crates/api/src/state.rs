use std::sync::Arc;

use cookbook_core::password_policy::PasswordPolicy;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cookbook_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Password rules derived from configuration.
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::new(self.config.min_password_length)
    }
}
