//! Recipe comment model.

use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A comment joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub recipe_id: DbId,
    pub created_by: DbId,
    pub author: String,
    pub text: String,
    pub created_at: Timestamp,
}
