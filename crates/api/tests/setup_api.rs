//! Tests for first-run setup.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, get, post_json};
use cookbook_core::roles::Role;
use cookbook_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

fn setup_body(name: &str, password: &str, confirm: &str) -> serde_json::Value {
    serde_json::json!({ "name": name, "password": password, "password_confirm": confirm })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_page_is_open_without_users(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/setup").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["template"], "setup");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_creates_admin_superuser(pool: PgPool) {
    let body = setup_body("chef", "braised-leeks-42", "braised-leeks-42");
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/setup", body).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/api/v1/auth/login");
    let json = body_json(response).await;
    assert_eq!(json["messages"][0]["text"], "User has been created, please login!");

    let user = UserRepo::find_by_username(&pool, "chef").await.unwrap().unwrap();
    assert!(user.is_superuser);
    let admin = RoleRepo::find_by_name(&pool, Role::Admin.as_str()).await.unwrap().unwrap();
    assert_eq!(user.role_id, admin.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mismatched_confirmation_creates_nobody(pool: PgPool) {
    let body = setup_body("chef", "braised-leeks-42", "braised-leeks-43");
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/setup", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["form_errors"]["form"]["password"][0], "Passwords dont match!");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_name_creates_nobody(pool: PgPool) {
    let body = setup_body("   ", "braised-leeks-42", "braised-leeks-42");
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/setup", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["form_errors"]["form"]["name"][0], "Name must be 1-150 characters");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn weak_password_creates_nobody(pool: PgPool) {
    let body = setup_body("chef", "chef1", "chef1");
    let app = common::build_test_app(pool.clone());
    let json = body_json(post_json(app, "/api/v1/setup", body).await).await;

    let errors = json["data"]["form_errors"]["form"]["password"].as_array().unwrap();
    assert!(errors.iter().any(|e| e == "The password is too similar to the username."));
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_is_closed_once_a_user_exists(pool: PgPool) {
    common::create_user(&pool, "julia", Role::User).await;

    let body = setup_body("intruder", "braised-leeks-42", "braised-leeks-42");
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/setup", body).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/api/v1/auth/login");
    let json = body_json(response).await;
    assert_eq!(json["messages"][0]["level"], "error");
    assert!(UserRepo::find_by_username(&pool, "intruder").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_is_closed_with_delegated_auth(pool: PgPool) {
    let mut config = common::test_config();
    config.remote_user_auth = true;

    let response = get(common::build_test_app_with(pool, config), "/api/v1/setup").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
