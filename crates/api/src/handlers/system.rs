//! Deployment diagnostics for administrators.

use axum::extract::State;
use serde::Serialize;

use crate::middleware::rbac::RequireAdmin;
use crate::response::Page;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SystemPage {
    /// The server answers media requests itself instead of a reverse proxy.
    pub serve_media: bool,
    pub debug: bool,
    /// The configured database is something other than PostgreSQL.
    pub non_postgres_backend: bool,
}

/// GET /api/v1/system
pub async fn system(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Page<SystemPage> {
    Page::new(
        "system",
        SystemPage {
            serve_media: state.config.serve_media,
            debug: state.config.debug,
            non_postgres_backend: state.config.non_postgres_backend(),
        },
    )
}
