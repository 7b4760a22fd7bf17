//! Repository for `recipe_books`, `recipe_book_shares` and
//! `recipe_book_entries`.

use cookbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{BookEntry, CreateRecipeBook, RecipeBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_by, created_at, updated_at";

/// Predicate selecting books owned by or shared with `$1`.
const VISIBLE_TO: &str = "\
    (created_by = $1 OR id IN (SELECT book_id FROM recipe_book_shares WHERE user_id = $1))";

/// Provides access to recipe books and their entries.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row. Used for seeding; no
    /// page creates books.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRecipeBook,
    ) -> Result<RecipeBook, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_books (name, description, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeBook>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Share a book with another user. Sharing twice is a no-op.
    pub async fn share(pool: &PgPool, book_id: DbId, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO recipe_book_shares (book_id, user_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(book_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Books owned by or shared with the user, each listed once, by name.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RecipeBook>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_books
             WHERE {VISIBLE_TO}
             ORDER BY name, id"
        );
        sqlx::query_as::<_, RecipeBook>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the user owns the book or has it shared with them.
    pub async fn is_visible(
        pool: &PgPool,
        book_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query =
            format!("SELECT EXISTS (SELECT 1 FROM recipe_books WHERE id = $2 AND {VISIBLE_TO})");
        sqlx::query_scalar(&query)
            .bind(user_id)
            .bind(book_id)
            .fetch_one(pool)
            .await
    }

    /// Entries of the given books, newest first within each book.
    pub async fn entries_for_books(
        pool: &PgPool,
        book_ids: &[DbId],
    ) -> Result<Vec<BookEntry>, sqlx::Error> {
        sqlx::query_as::<_, BookEntry>(
            "SELECT e.id, e.book_id, e.recipe_id, r.name AS recipe_name, e.created_at
             FROM recipe_book_entries e
             JOIN recipes r ON r.id = e.recipe_id
             WHERE e.book_id = ANY($1)
             ORDER BY e.book_id, e.created_at DESC, e.id DESC",
        )
        .bind(book_ids)
        .fetch_all(pool)
        .await
    }

    /// Bookmark a recipe into a book.
    ///
    /// Returns `false` when the recipe was already in the book.
    pub async fn add_entry(
        pool: &PgPool,
        book_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO recipe_book_entries (book_id, recipe_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_recipe_book_entries_book_recipe DO NOTHING",
        )
        .bind(book_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
