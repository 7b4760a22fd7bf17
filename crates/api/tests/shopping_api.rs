//! Tests for the shopping list.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use cookbook_core::roles::Role;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn query_ids_drop_malformed_and_unknown(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let recipe = common::create_recipe(&pool, "Bread").await;
    let missing = recipe.id + 1;

    let uri = format!("/api/v1/shopping?r={}&r=abc&r={missing}&r=0", recipe.id);
    let response = get_auth(common::build_test_app(pool), &uri, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["template"], "shopping_list");
    assert_eq!(json["data"]["recipes"], serde_json::json!([recipe.id]));
    assert_eq!(json["data"]["markdown_format"], false);
    assert!(json["data"]["form_errors"].as_object().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn amounts_are_summed_per_ingredient_and_unit(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let bread = common::create_recipe(&pool, "Bread").await;
    let cake = common::create_recipe(&pool, "Cake").await;
    common::add_ingredient(&pool, bread.id, "flour", "g", 100.0).await;
    common::add_ingredient(&pool, cake.id, "flour", "g", 50.0).await;
    common::add_ingredient(&pool, cake.id, "sugar", "Special: to taste", 1.0).await;

    let uri = format!("/api/v1/shopping?r={}&r={}", bread.id, cake.id);
    let json = body_json(get_auth(common::build_test_app(pool), &uri, &token).await).await;

    let lines = json["data"]["ingredients"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["ingredient"], "flour");
    assert_eq!(lines[0]["unit"], "g");
    assert_eq!(lines[0]["amount"], 150.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submitted_selection_can_render_markdown(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let bread = common::create_recipe(&pool, "Bread").await;
    common::add_ingredient(&pool, bread.id, "flour", "g", 500.0).await;

    let body = serde_json::json!({ "recipe": [bread.id], "markdown_format": true });
    let json = body_json(
        post_json_auth(common::build_test_app(pool), "/api/v1/shopping", body, &token).await,
    )
    .await;

    assert_eq!(json["data"]["recipes"], serde_json::json!([bread.id]));
    let markdown = json["data"]["markdown"].as_str().unwrap();
    assert!(markdown.contains("flour"), "markdown was: {markdown}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submitted_unknown_recipe_empties_selection(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::User).await;
    let bread = common::create_recipe(&pool, "Bread").await;
    common::add_ingredient(&pool, bread.id, "flour", "g", 500.0).await;

    let body = serde_json::json!({ "recipe": [bread.id, 9999] });
    let json = body_json(
        post_json_auth(common::build_test_app(pool), "/api/v1/shopping", body, &token).await,
    )
    .await;

    assert_eq!(json["data"]["recipes"], serde_json::json!([]));
    assert!(json["data"]["ingredients"].as_array().unwrap().is_empty());
    assert_eq!(
        json["data"]["form_errors"]["form"]["recipe"][0],
        "Select a valid choice. 9999 is not one of the available choices."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_submission_is_a_field_error(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::User).await;

    let json = body_json(
        post_json_auth(
            common::build_test_app(pool),
            "/api/v1/shopping",
            serde_json::json!({}),
            &token,
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["form_errors"]["form"]["recipe"][0], "Select at least one recipe");
}
