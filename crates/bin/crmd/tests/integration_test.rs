//! End-to-end tests for the full crmd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repo,
//! real service, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use crm_adapter_http_axum::router;
use crm_adapter_http_axum::state::AppState;
use crm_adapter_storage_sqlite_sqlx::{Config, SqliteCustomerRepository};
use crm_app::services::customer_service::CustomerService;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const API_CUSTOMER_PATH: &str = "/api/v1/customers";

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config::new("sqlite::memory:")
        .build()
        .await
        .expect("in-memory database should initialise");

    let repo = SqliteCustomerRepository::new(db.pool().clone());
    router::build(AppState::new(CustomerService::new(repo)))
}

fn random_email(prefix: &str) -> String {
    format!("{prefix}{}@gmail.com", uuid::Uuid::new_v4())
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
}

/// Create a customer through the API and return its id as found in the list.
async fn create_and_find(app: &axum::Router, request: &Value) -> i64 {
    let resp = send(app, "POST", API_CUSTOMER_PATH, Some(request.clone())).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(app, "GET", API_CUSTOMER_PATH, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let all = body_json(resp).await;

    let created = all
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["email"] == request["email"])
        .expect("created customer should be listed");

    assert_eq!(created["name"], request["name"]);
    assert_eq!(created["email"], request["email"]);
    assert_eq!(created["address"], request["address"]);

    created["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app().await;
    let resp = send(&app, "GET", "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_customer() {
    let app = app().await;
    let request = json!({"name": "name", "email": random_email(""), "address": "address"});

    create_and_find(&app, &request).await;
}

#[tokio::test]
async fn should_update_customer() {
    let app = app().await;
    let request = json!({"name": "name", "email": random_email(""), "address": "address"});
    let id = create_and_find(&app, &request).await;
    let new_email = random_email("newEmail");

    let resp = send(
        &app,
        "PUT",
        &format!("{API_CUSTOMER_PATH}/{id}?email={new_email}"),
        None,
    )
    .await;
    assert!(resp.status().is_success());

    let resp = send(&app, "GET", &format!("{API_CUSTOMER_PATH}/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["name"], request["name"]);
    assert_eq!(updated["email"], new_email);
    assert_eq!(updated["address"], request["address"]);
}

#[tokio::test]
async fn should_delete_customer() {
    let app = app().await;
    let request = json!({"name": "name", "email": random_email(""), "address": "address"});
    let id = create_and_find(&app, &request).await;

    let resp = send(&app, "DELETE", &format!("{API_CUSTOMER_PATH}/{id}"), None).await;
    assert!(resp.status().is_success());

    let resp = send(&app, "GET", &format!("{API_CUSTOMER_PATH}/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_complete_customer_crud_cycle() {
    let app = app().await;
    let request = json!({"name": "name", "email": random_email(""), "address": "address"});
    let id = create_and_find(&app, &request).await;
    let new_email = random_email("newEmail");

    let resp = send(
        &app,
        "PUT",
        &format!("{API_CUSTOMER_PATH}/{id}?email={new_email}"),
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", &format!("{API_CUSTOMER_PATH}/{id}"), None).await;
    let fetched = body_json(resp).await;
    assert_eq!(fetched["email"], new_email);
    assert_eq!(fetched["name"], "name");
    assert_eq!(fetched["address"], "address");

    let resp = send(&app, "DELETE", &format!("{API_CUSTOMER_PATH}/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", &format!("{API_CUSTOMER_PATH}/{id}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_duplicate_email_on_create() {
    let app = app().await;
    let request = json!({"name": "name", "email": random_email(""), "address": "address"});
    create_and_find(&app, &request).await;

    let resp = send(&app, "POST", API_CUSTOMER_PATH, Some(request.clone())).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        format!("The email {} unavailable.", request["email"].as_str().unwrap())
    );

    let resp = send(&app, "GET", API_CUSTOMER_PATH, None).await;
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_update_to_email_held_by_another_customer() {
    let app = app().await;
    let first = json!({"name": "first", "email": random_email(""), "address": "IND"});
    let second = json!({"name": "second", "email": random_email(""), "address": "UK"});
    let first_id = create_and_find(&app, &first).await;
    create_and_find(&app, &second).await;
    let taken = second["email"].as_str().unwrap();

    let resp = send(
        &app,
        "PUT",
        &format!("{API_CUSTOMER_PATH}/{first_id}?email={taken}"),
        None,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(
        body["error"],
        format!("The email \"{taken}\" unavailable to update")
    );

    let resp = send(&app, "GET", &format!("{API_CUSTOMER_PATH}/{first_id}"), None).await;
    let untouched = body_json(resp).await;
    assert_eq!(untouched["email"], first["email"]);
}

#[tokio::test]
async fn should_return_not_found_when_deleting_unknown_customer() {
    let app = app().await;

    let resp = send(&app, "DELETE", &format!("{API_CUSTOMER_PATH}/999"), None).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Customer with id 999 doesn't exist.");
}
