//! The caller's view and cook history.

use axum::extract::{Query, State};
use cookbook_db::models::log::{CookLog, ViewLog};
use cookbook_db::repositories::LogRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireGuest;
use crate::query::{PageParams, Pagination};
use crate::response::Page;
use crate::state::AppState;

/// One paginated log table.
#[derive(Debug, Serialize)]
pub struct LogTable<T> {
    pub rows: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub view_log: LogTable<ViewLog>,
    pub cook_log: LogTable<CookLog>,
}

/// GET /api/v1/history
///
/// Both tables share the `page` parameter, newest rows first.
pub async fn history(
    State(state): State<AppState>,
    RequireGuest(user): RequireGuest,
    Query(params): Query<PageParams>,
) -> AppResult<Page<HistoryPage>> {
    let view_total = LogRepo::count_views(&state.pool, user.user_id, None).await?;
    let view_pages = Pagination::new(params.page, view_total);
    let views = LogRepo::list_views(
        &state.pool,
        user.user_id,
        view_pages.limit(),
        view_pages.offset(),
    )
    .await?;

    let cook_total = LogRepo::count_cooks(&state.pool, user.user_id).await?;
    let cook_pages = Pagination::new(params.page, cook_total);
    let cooks = LogRepo::list_cooks(
        &state.pool,
        user.user_id,
        cook_pages.limit(),
        cook_pages.offset(),
    )
    .await?;

    Ok(Page::new(
        "history",
        HistoryPage {
            view_log: LogTable {
                rows: views,
                pagination: view_pages,
            },
            cook_log: LogTable {
                rows: cooks,
                pagination: cook_pages,
            },
        },
    ))
}
