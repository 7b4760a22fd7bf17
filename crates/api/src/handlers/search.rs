//! Recipe search page.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use cookbook_core::history::RECENT_LIMIT;
use cookbook_core::preferences::SearchStyle;
use cookbook_core::types::DbId;
use cookbook_db::models::log::ViewLog;
use cookbook_db::models::recipe::{Keyword, Recipe, RecipeFilter};
use cookbook_db::repositories::{LogRepo, RecipeRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::load_settings;
use crate::middleware::auth::MaybeAuthUser;
use crate::query::Pagination;
use crate::response::Page;
use crate::state::AppState;

/// Filters parsed from the raw query string.
#[derive(Debug, Default, Serialize)]
pub struct SearchFilter {
    pub name: Option<String>,
    pub keywords: Vec<DbId>,
}

impl SearchFilter {
    /// `name=` (last one wins, blank ignored) and repeated `keyword=`
    /// (non-numeric values ignored). Returns the requested page too.
    fn from_pairs(pairs: &[(String, String)]) -> (Self, Option<i64>) {
        let mut filter = SearchFilter::default();
        let mut page = None;
        for (key, value) in pairs {
            match key.as_str() {
                "name" => {
                    let value = value.trim();
                    filter.name = (!value.is_empty()).then(|| value.to_string());
                }
                "keyword" => {
                    if let Ok(id) = value.parse::<DbId>() {
                        if id > 0 && !filter.keywords.contains(&id) {
                            filter.keywords.push(id);
                        }
                    }
                }
                "page" => page = value.parse().ok(),
                _ => {}
            }
        }
        (filter, page)
    }
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub recipes: Vec<Recipe>,
    pub pagination: Pagination,
    pub filter: SearchFilter,
    pub keywords: Vec<Keyword>,
    pub search_style: SearchStyle,
    /// Most recently viewed distinct recipes; only on an unfiltered visit
    /// with the preference enabled.
    pub last_viewed: Option<Vec<ViewLog>>,
}

/// GET /api/v1/search
pub async fn search(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(Page::new("index", serde_json::json!({})).into_response());
    };

    let settings = load_settings(&state.pool, user.user_id).await?;
    let (filter, requested_page) = SearchFilter::from_pairs(&pairs);

    let repo_filter = RecipeFilter {
        name: filter.name.clone(),
        keywords: filter.keywords.clone(),
    };
    let total = RecipeRepo::count(&state.pool, &repo_filter).await?;
    let pagination = Pagination::new(requested_page, total);
    let recipes = RecipeRepo::search(
        &state.pool,
        &repo_filter,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;

    let last_viewed = if pairs.is_empty() && settings.show_recent {
        Some(LogRepo::recent_distinct_views(&state.pool, user.user_id, RECENT_LIMIT).await?)
    } else {
        None
    };

    let keywords = RecipeRepo::list_keywords(&state.pool).await?;

    Ok(Page::new(
        "index",
        SearchPage {
            recipes,
            pagination,
            filter,
            keywords,
            search_style: settings.search_style,
            last_viewed,
        },
    )
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn parses_name_keywords_and_page() {
        let (filter, page) = SearchFilter::from_pairs(&pairs(&[
            ("name", " soup "),
            ("keyword", "3"),
            ("keyword", "x"),
            ("keyword", "3"),
            ("keyword", "5"),
            ("page", "2"),
        ]));
        assert_eq!(filter.name.as_deref(), Some("soup"));
        assert_eq!(filter.keywords, vec![3, 5]);
        assert_eq!(page, Some(2));
    }

    #[test]
    fn blank_name_is_no_filter() {
        let (filter, page) = SearchFilter::from_pairs(&pairs(&[("name", "  ")]));
        assert!(filter.name.is_none());
        assert!(page.is_none());
    }
}
