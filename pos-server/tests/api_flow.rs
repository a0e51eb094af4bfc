//! End-to-end API flows over an in-memory store.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use pos_server::db::{seed, DbService};
use pos_server::{api, ServerState};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin123";

async fn test_app() -> Router {
    let state = ServerState::for_tests().await.expect("state");
    let db = DbService {
        db: state.get_db(),
    };
    seed::seed_admin(&db, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("seed admin");
    api::build_router(state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let addr: SocketAddr = "127.0.0.1:54321".parse().expect("addr");
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .extension(ConnectInfo(addr));
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        ))
        .await
        .expect("response");
    let status = response.status();
    (status, read_json(response).await)
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let response = app
        .oneshot(request("GET", "/api/health", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_route_rejects_missing_token() {
    let app = test_app().await;
    let response = app
        .oneshot(request(
            "POST",
            "/api/items",
            None,
            Some(json!({ "item_name": "Coffee", "price": "2.50" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = read_json(response).await;
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let app = test_app().await;

    let (status, unknown) = login(&app, "nobody@example.com", "whatever").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, wrong) = login(&app, ADMIN_EMAIL, "not-the-password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Same message either way, no account enumeration
    assert_eq!(unknown["message"], wrong["message"]);
}

#[tokio::test]
async fn sale_flow_from_login_to_report() {
    let app = test_app().await;

    let (status, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().expect("token").to_string();
    assert_eq!(body["data"]["user"]["role"], "admin");

    // Catalog write needs the token
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/items",
            Some(&token),
            Some(json!({ "item_name": "Coffee", "price": "10.00" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let item = read_json(response).await;
    let item_id = item["data"]["id_item"].as_str().expect("id").to_string();

    // Catalog read is public
    let response = app
        .clone()
        .oneshot(request("GET", "/api/items", None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let listing = read_json(response).await;
    assert_eq!(listing["data"].as_array().expect("array").len(), 1);

    // Record a sale
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/transactions",
            Some(&token),
            Some(json!({
                "buyer_contact": "0812-345",
                "items": [{ "id_item": item_id, "quantity": 2 }]
            })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let tx = read_json(response).await;
    assert_eq!(tx["data"]["total_price"], "20.00");
    assert_eq!(tx["data"]["items"][0]["quantity"], 2);

    // The sale shows up in today's report
    let response = app
        .clone()
        .oneshot(request("GET", "/api/report/today", Some(&token), None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let report = read_json(response).await;
    assert_eq!(report["data"]["total_transactions"], 1);
    assert_eq!(report["data"]["sum_total_price"], "20.00");
    assert_eq!(report["data"]["top_items"][0]["quantity_sold"], 2);
}

#[tokio::test]
async fn login_attempts_are_rate_limited_per_ip() {
    let app = test_app().await;

    // Burst allows five attempts, wrong passwords included
    for _ in 0..5 {
        let (status, _) = login(&app, ADMIN_EMAIL, "wrong-password").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "E0007");
}

#[tokio::test]
async fn admin_can_create_cashier_who_can_log_in() {
    let app = test_app().await;

    let (_, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/users",
            Some(&token),
            Some(json!({
                "email": "cashier@example.com",
                "password": "secret1",
                "profile": { "name": "Ana" }
            })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let created = read_json(response).await;
    assert_eq!(created["data"]["user"]["role"], "cashier");
    assert_eq!(created["data"]["profile"]["name"], "Ana");

    // New cashier logs in from a different address to dodge the login limiter
    let addr: SocketAddr = "127.0.0.2:54322".parse().expect("addr");
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .extension(ConnectInfo(addr))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "email": "cashier@example.com", "password": "secret1" }).to_string(),
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let cashier = read_json(response).await;
    let cashier_token = cashier["data"]["token"].as_str().expect("token");

    // Cashiers cannot create users
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/users",
            Some(cashier_token),
            Some(json!({
                "email": "other@example.com",
                "password": "secret1",
                "profile": { "name": "Budi" }
            })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_ownership_is_enforced() {
    let app = test_app().await;

    let (_, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/profile",
            Some(&token),
            Some(json!({ "name": "Owner", "contact": "0800" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let created = read_json(response).await;
    let profile_id = created["data"]["id_profile"]
        .as_str()
        .expect("id")
        .to_string();

    let response = app
        .clone()
        .oneshot(request("GET", "/api/profile/me", Some(&token), None))
        .await
        .expect("response");
    let me = read_json(response).await;
    assert_eq!(me["data"]["profiles"].as_array().expect("array").len(), 1);

    // A profile that does not belong to the caller reads as missing
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/api/profile/profiles:doesnotexist",
            Some(&token),
            Some(json!({ "name": "Hijack" })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/profile/{profile_id}"),
            Some(&token),
            None,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn image_upload_base64_roundtrip() {
    let app = test_app().await;

    let (_, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let token = body["data"]["token"].as_str().expect("token").to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/images/upload/base64",
            Some(&token),
            Some(json!({
                "file_name": "logo.png",
                "data_base64": "iVBORw0KGgo="
            })),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded = read_json(response).await;
    let image_id = uploaded["data"]["id_image"].as_str().expect("id").to_string();
    assert_eq!(uploaded["data"]["content_type"], "image/png");

    // Raw download is public and carries the stored content type
    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/images/{image_id}"), None, None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
}
