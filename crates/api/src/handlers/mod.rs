//! Request handlers, one module per page or resource.
//!
//! Every page handler authorizes through an extractor, validates its input,
//! talks to the repositories and answers with a
//! [`Page`](crate::response::Page) or [`Redirect`](crate::response::Redirect).

pub mod auth;
pub mod books;
pub mod history;
pub mod index;
pub mod info;
pub mod meal_plan;
pub mod recipe;
pub mod search;
pub mod settings;
pub mod setup;
pub mod shopping;
pub mod system;

use cookbook_core::preferences::PreferenceSettings;
use cookbook_core::types::DbId;
use cookbook_db::repositories::PreferenceRepo;
use cookbook_db::DbPool;

use crate::error::AppResult;

/// The user's effective preferences, defaults when never saved.
pub(crate) async fn load_settings(pool: &DbPool, user_id: DbId) -> AppResult<PreferenceSettings> {
    Ok(PreferenceRepo::get(pool, user_id)
        .await?
        .map(|p| p.settings())
        .unwrap_or_default())
}
