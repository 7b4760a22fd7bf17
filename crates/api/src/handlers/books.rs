//! Recipe books page.

use std::collections::HashMap;

use axum::extract::State;
use cookbook_core::types::DbId;
use cookbook_db::models::book::{BookEntry, RecipeBook};
use cookbook_db::repositories::BookRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireUser;
use crate::response::Page;
use crate::state::AppState;

/// A book with the recipes bookmarked into it.
#[derive(Debug, Serialize)]
pub struct BookWithEntries {
    pub book: RecipeBook,
    pub recipes: Vec<BookEntry>,
}

#[derive(Debug, Serialize)]
pub struct BooksPage {
    pub book_list: Vec<BookWithEntries>,
}

/// GET /api/v1/books
///
/// Books owned by or shared with the caller, each listed once.
pub async fn books(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> AppResult<Page<BooksPage>> {
    let books = BookRepo::list_visible(&state.pool, user.user_id).await?;
    let ids: Vec<_> = books.iter().map(|b| b.id).collect();
    let entries = BookRepo::entries_for_books(&state.pool, &ids).await?;

    let mut by_book: HashMap<DbId, Vec<BookEntry>> = HashMap::new();
    for entry in entries {
        by_book.entry(entry.book_id).or_default().push(entry);
    }

    let book_list = books
        .into_iter()
        .map(|book| BookWithEntries {
            recipes: by_book.remove(&book.id).unwrap_or_default(),
            book,
        })
        .collect();

    Ok(Page::new("books", BooksPage { book_list }))
}
