//! Tests for the landing redirect.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::Response;
use common::{body_json, get, get_auth, post_json_auth};
use cookbook_core::roles::Role;
use sqlx::PgPool;

fn location(response: &Response) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_first_visit_goes_to_setup(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/setup");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delegated_auth_skips_setup(pool: PgPool) {
    let mut config = common::test_config();
    config.remote_user_auth = true;

    let response = get(common::build_test_app_with(pool, config), "/api/v1").await;

    assert_eq!(location(&response), "/api/v1/search");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_goes_to_search_once_a_user_exists(pool: PgPool) {
    common::create_user(&pool, "julia", Role::User).await;

    let response = get(common::build_test_app(pool), "/api/v1").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/search");
    let json = body_json(response).await;
    assert_eq!(json["redirect"], "/api/v1/search");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signed_in_user_follows_default_page(pool: PgPool) {
    let (_user, token) = common::signed_in(&pool, "julia", Role::User).await;

    // No preference row yet: search.
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1", &token).await;
    assert_eq!(location(&response), "/api/v1/search");

    let body = serde_json::json!({ "preference_form": { "default_page": "plan" } });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/settings", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(common::build_test_app(pool), "/api/v1", &token).await;
    assert_eq!(location(&response), "/api/v1/plan");
}
