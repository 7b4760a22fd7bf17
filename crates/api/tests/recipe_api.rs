//! Tests for the recipe detail page, its forms and the cook log.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use cookbook_core::roles::Role;
use cookbook_db::models::book::CreateRecipeBook;
use cookbook_db::repositories::{BookRepo, CommentRepo, LogRepo};
use sqlx::PgPool;

async fn create_book(pool: &PgPool, name: &str, owner: i64) -> i64 {
    let input = CreateRecipeBook {
        name: name.to_string(),
        description: String::new(),
        created_by: owner,
    };
    BookRepo::create(pool, &input).await.unwrap().id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_recipe_is_404(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::Guest).await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/recipes/999", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recipe_page_lists_ingredients(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::Guest).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    common::add_ingredient(&pool, recipe.id, "flour", "g", 200.0).await;

    let uri = format!("/api/v1/recipes/{}", recipe.id);
    let response = get_auth(common::build_test_app(pool), &uri, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["template"], "recipe_view");
    assert_eq!(json["data"]["recipe"]["name"], "Pancakes");
    assert_eq!(json["data"]["ingredients"][0]["ingredient_name"], "flour");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_views_within_five_minutes_log_once(pool: PgPool) {
    let (user, token) = common::signed_in(&pool, "julia", Role::Guest).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    let uri = format!("/api/v1/recipes/{}", recipe.id);

    get_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    get_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    let count = LogRepo::count_views(&pool, user.id, Some(recipe.id)).await.unwrap();
    assert_eq!(count, 1);

    sqlx::query("UPDATE view_logs SET created_at = NOW() - INTERVAL '6 minutes'")
        .execute(&pool)
        .await
        .unwrap();

    get_auth(common::build_test_app(pool.clone()), &uri, &token).await;
    let count = LogRepo::count_views(&pool, user.id, Some(recipe.id)).await.unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_and_bookmark_are_saved_independently(pool: PgPool) {
    let (user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    let book = create_book(&pool, "Breakfast", user.id).await;
    let uri = format!("/api/v1/recipes/{}", recipe.id);

    let body = serde_json::json!({
        "comment": { "text": "Fluffy!" },
        "bookmark": { "book": book },
    });
    let response = post_json_auth(common::build_test_app(pool.clone()), &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let messages: Vec<_> = json["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages, vec!["Comment saved!", "Bookmark saved!"]);
    assert_eq!(json["data"]["comments"][0]["text"], "Fluffy!");
    assert_eq!(json["data"]["comments"][0]["author"], "julia");

    let entries = BookRepo::entries_for_books(&pool, &[book]).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].recipe_id, recipe.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_comment_does_not_block_bookmark(pool: PgPool) {
    let (user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    let book = create_book(&pool, "Breakfast", user.id).await;
    let uri = format!("/api/v1/recipes/{}", recipe.id);

    let body = serde_json::json!({
        "comment": { "text": "" },
        "bookmark": { "book": book },
    });
    let app = common::build_test_app(pool);
    let json = body_json(post_json_auth(app, &uri, body, &token).await).await;

    assert_eq!(
        json["data"]["form_errors"]["comment"]["text"][0],
        "Comment must be 1-4000 characters"
    );
    assert_eq!(json["messages"][0]["level"], "success");
    assert_eq!(json["messages"][0]["text"], "Bookmark saved!");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_comment_is_not_saved(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    let uri = format!("/api/v1/recipes/{}", recipe.id);

    let body = serde_json::json!({ "comment": { "text": "   " } });
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json_auth(app, &uri, body, &token).await).await;

    assert_eq!(
        json["data"]["form_errors"]["comment"]["text"][0],
        "Comment must be 1-4000 characters"
    );
    assert!(json["messages"].as_array().unwrap().is_empty());
    assert!(CommentRepo::list_for_recipe(&pool, recipe.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bookmark_into_foreign_book_is_rejected(pool: PgPool) {
    let (_julia, token) = common::signed_in(&pool, "julia", Role::User).await;
    let other = common::create_user(&pool, "marco", Role::User).await;
    let recipe = common::create_recipe(&pool, "Risotto").await;
    let book = create_book(&pool, "Marco's", other.id).await;
    let uri = format!("/api/v1/recipes/{}", recipe.id);

    let body = serde_json::json!({ "bookmark": { "book": book } });
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json_auth(app, &uri, body, &token).await).await;

    assert!(json["data"]["form_errors"]["bookmark"]["book"].is_array());
    assert!(BookRepo::entries_for_books(&pool, &[book]).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn shared_book_accepts_bookmarks_once(pool: PgPool) {
    let (julia, token) = common::signed_in(&pool, "julia", Role::User).await;
    let other = common::create_user(&pool, "marco", Role::User).await;
    let recipe = common::create_recipe(&pool, "Risotto").await;
    let book = create_book(&pool, "Shared", other.id).await;
    BookRepo::share(&pool, book, julia.id).await.unwrap();
    let uri = format!("/api/v1/recipes/{}", recipe.id);
    let body = serde_json::json!({ "bookmark": { "book": book } });

    let json = body_json(
        post_json_auth(common::build_test_app(pool.clone()), &uri, body.clone(), &token).await,
    )
    .await;
    assert_eq!(json["messages"][0]["text"], "Bookmark saved!");

    let json =
        body_json(post_json_auth(common::build_test_app(pool), &uri, body, &token).await).await;
    assert_eq!(
        json["data"]["form_errors"]["bookmark"]["book"][0],
        "This recipe is already linked to the book!"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cook_log_redirects_back_to_recipe(pool: PgPool) {
    let (user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    let uri = format!("/api/v1/recipes/{}/cook", recipe.id);

    let body = serde_json::json!({ "servings": 4, "rating": 5 });
    let response = post_json_auth(common::build_test_app(pool.clone()), &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, format!("/api/v1/recipes/{}", recipe.id));
    let json = body_json(response).await;
    assert_eq!(json["messages"][0]["text"], "Cook log saved!");
    assert_eq!(LogRepo::count_cooks(&pool, user.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cook_log_with_bad_rating_rerenders(pool: PgPool) {
    let (user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    let uri = format!("/api/v1/recipes/{}/cook", recipe.id);

    let body = serde_json::json!({ "servings": 2, "rating": 9 });
    let response = post_json_auth(common::build_test_app(pool.clone()), &uri, body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["form_errors"]["cook"]["rating"][0],
        "Rating must be between 0 and 5"
    );
    assert_eq!(LogRepo::count_cooks(&pool, user.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guests_cannot_log_cooking(pool: PgPool) {
    let (_guest, token) = common::signed_in(&pool, "visitor", Role::Guest).await;
    let recipe = common::create_recipe(&pool, "Pancakes").await;
    let uri = format!("/api/v1/recipes/{}/cook", recipe.id);

    let response = post_json_auth(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({ "servings": 1 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
