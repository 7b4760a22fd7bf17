//! Static help pages.

use serde_json::json;

use crate::response::Page;

/// GET /api/v1/info/markdown
pub async fn markdown_info() -> Page<serde_json::Value> {
    Page::new("markdown_info", json!({}))
}
