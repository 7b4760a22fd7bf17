//! Shared fixtures and request helpers for the API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use cookbook_api::auth::jwt::{generate_access_token, JwtConfig};
use cookbook_api::auth::password::hash_password;
use cookbook_api::config::ServerConfig;
use cookbook_api::router::build_app_router;
use cookbook_api::state::AppState;
use cookbook_core::roles::Role;
use cookbook_core::types::DbId;
use cookbook_db::models::recipe::{CreateRecipe, CreateRecipeIngredient, Recipe};
use cookbook_db::models::user::{CreateUser, User};
use cookbook_db::repositories::{RecipeRepo, RoleRepo, UserRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password of every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "simmering-stock-42";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://localhost/cookbook_test".to_string(),
        debug: false,
        serve_media: false,
        remote_user_auth: false,
        min_password_length: 8,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Full application router over `pool`, with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user holding `role`, with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> User {
    let role_row = RoleRepo::find_by_name(pool, role.as_str())
        .await
        .unwrap()
        .expect("roles are seeded by migrations");
    let input = CreateUser {
        username: username.to_string(),
        email: Some(format!("{username}@test.com")),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role_id: role_row.id,
        is_superuser: false,
    };
    UserRepo::create(pool, &input).await.unwrap()
}

/// A valid access token for `user`, signed with the test secret.
pub fn token_for(user: &User, role: Role) -> String {
    generate_access_token(user.id, role, &test_config().jwt).unwrap()
}

/// Insert a user and return it together with an access token.
pub async fn signed_in(pool: &PgPool, username: &str, role: Role) -> (User, String) {
    let user = create_user(pool, username, role).await;
    let token = token_for(&user, role);
    (user, token)
}

pub async fn create_recipe(pool: &PgPool, name: &str) -> Recipe {
    let input = CreateRecipe {
        name: name.to_string(),
        description: None,
        created_by: None,
    };
    RecipeRepo::create(pool, &input).await.unwrap()
}

/// Attach `amount` of `ingredient` measured in `unit` to a recipe.
pub async fn add_ingredient(
    pool: &PgPool,
    recipe_id: DbId,
    ingredient: &str,
    unit: &str,
    amount: f64,
) {
    let input = CreateRecipeIngredient {
        recipe_id,
        ingredient_id: RecipeRepo::ensure_ingredient(pool, ingredient).await.unwrap(),
        unit_id: RecipeRepo::ensure_unit(pool, unit).await.unwrap(),
        amount,
        note: String::new(),
    };
    RecipeRepo::add_ingredient(pool, &input).await.unwrap();
}
