//! Repository for `recipes` and the catalog tables hanging off it
//! (`keywords`, `units`, `ingredients`, `recipe_ingredients`).

use cookbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipe::{
    CreateRecipe, CreateRecipeIngredient, Keyword, Recipe, RecipeFilter, RecipeIngredientDetail,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_by, created_at, updated_at";

/// Shared `WHERE` clause for listing and counting. `$1` is the optional
/// `ILIKE` pattern built by [`contains_pattern`], `$2` the keyword ids a
/// recipe must all carry.
const FILTER_CLAUSE: &str = "\
    ($1::TEXT IS NULL OR name ILIKE $1 ESCAPE '\\') \
    AND (cardinality($2::BIGINT[]) = 0 OR id IN ( \
        SELECT recipe_id FROM recipe_keywords \
        WHERE keyword_id = ANY($2) \
        GROUP BY recipe_id \
        HAVING COUNT(DISTINCT keyword_id) = cardinality($2)))";

const INGREDIENT_COLUMNS: &str = "\
    ri.id, ri.recipe_id, ri.ingredient_id, i.name AS ingredient_name, \
    ri.unit_id, u.name AS unit_name, ri.amount, ri.note";

/// Case-insensitive substring pattern for `fragment`, with `LIKE`
/// metacharacters matched literally.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Provides read access to recipes and the inserts used to seed them.
pub struct RecipeRepo;

impl RecipeRepo {
    // -----------------------------------------------------------------------
    // Recipes
    // -----------------------------------------------------------------------

    /// Insert a new recipe, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRecipe) -> Result<Recipe, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipes (name, description, created_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a recipe by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The subset of `ids` that reference existing recipes, in input order.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM recipes WHERE id = ANY($1) ORDER BY array_position($1, id)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// One page of recipes matching `filter`, ordered by name.
    pub async fn search(
        pool: &PgPool,
        filter: &RecipeFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipes
             WHERE {FILTER_CLAUSE}
             ORDER BY name, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(filter.name.as_deref().map(contains_pattern))
            .bind(&filter.keywords)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of recipes matching `filter`.
    pub async fn count(pool: &PgPool, filter: &RecipeFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM recipes WHERE {FILTER_CLAUSE}");
        sqlx::query_scalar(&query)
            .bind(filter.name.as_deref().map(contains_pattern))
            .bind(&filter.keywords)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Keywords
    // -----------------------------------------------------------------------

    /// Insert a keyword, returning the created row.
    pub async fn create_keyword(pool: &PgPool, name: &str) -> Result<Keyword, sqlx::Error> {
        sqlx::query_as::<_, Keyword>(
            "INSERT INTO keywords (name) VALUES ($1) RETURNING id, name, icon",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Tag a recipe with a keyword. Tagging twice is a no-op.
    pub async fn add_keyword(
        pool: &PgPool,
        recipe_id: DbId,
        keyword_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO recipe_keywords (recipe_id, keyword_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(recipe_id)
        .bind(keyword_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Keywords attached to a recipe, ordered by name.
    pub async fn keywords_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<Keyword>, sqlx::Error> {
        sqlx::query_as::<_, Keyword>(
            "SELECT k.id, k.name, k.icon FROM keywords k
             JOIN recipe_keywords rk ON rk.keyword_id = k.id
             WHERE rk.recipe_id = $1
             ORDER BY k.name",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }

    /// All keywords, ordered by name. Feeds the search filter choices.
    pub async fn list_keywords(pool: &PgPool) -> Result<Vec<Keyword>, sqlx::Error> {
        sqlx::query_as::<_, Keyword>("SELECT id, name, icon FROM keywords ORDER BY name")
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Ingredients
    // -----------------------------------------------------------------------

    /// Return the id of the named unit, creating it if needed.
    pub async fn ensure_unit(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO units (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Return the id of the named ingredient, creating it if needed.
    pub async fn ensure_ingredient(pool: &PgPool, name: &str) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO ingredients (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// Attach an ingredient line to a recipe, returning its id.
    pub async fn add_ingredient(
        pool: &PgPool,
        input: &CreateRecipeIngredient,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, unit_id, amount, note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.recipe_id)
        .bind(input.ingredient_id)
        .bind(input.unit_id)
        .bind(input.amount)
        .bind(&input.note)
        .fetch_one(pool)
        .await
    }

    /// Ingredient lines of the given recipes, grouped by recipe in the order
    /// of `recipe_ids`, then in entry order.
    pub async fn ingredients_for_recipes(
        pool: &PgPool,
        recipe_ids: &[DbId],
    ) -> Result<Vec<RecipeIngredientDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {INGREDIENT_COLUMNS}
             FROM recipe_ingredients ri
             JOIN ingredients i ON i.id = ri.ingredient_id
             JOIN units u ON u.id = ri.unit_id
             WHERE ri.recipe_id = ANY($1)
             ORDER BY array_position($1, ri.recipe_id), ri.id"
        );
        sqlx::query_as::<_, RecipeIngredientDetail>(&query)
            .bind(recipe_ids)
            .fetch_all(pool)
            .await
    }
}
