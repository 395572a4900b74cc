//! End-to-end HTTP flow over an in-memory store
//! Run: cargo test -p menu-server --test api_flow

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use menu_server::db::store::MemoryStore;
use menu_server::{Config, ServerState, build_router};
use serde_json::{Value, json};
use tower::Service;

const SESSION: &str = "admin-session=authenticated";

fn app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = ServerState::with_store(Config::default(), store.clone());
    (store, build_router(state))
}

async fn send(
    app: &mut Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    session: bool,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if session {
        builder = builder.header(header::COOKIE, SESSION);
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.call(builder.body(body).unwrap()).await.unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn public_menu_serves_demo_data_without_credential() {
    let (_, mut app) = app();

    let response = send(&mut app, Method::GET, "/api/restaurant?public=true", None, false).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store, no-cache, must-revalidate"
    );

    let body = json_body(response).await;
    assert!(body.get("adminPassword").is_none());
    assert_eq!(body["info"]["name"], "QR Menü Demo Restoran");
    assert_eq!(body["categories"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn admin_routes_require_session() {
    let (_, mut app) = app();

    let response = send(&mut app, Method::GET, "/api/restaurant", None, false).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], "E3001");

    let response = send(&mut app, Method::GET, "/api/categories", None, false).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&mut app, Method::GET, "/health", None, false).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_sets_cookie_and_claims_empty_store() {
    let (store, mut app) = app();

    let response = send(
        &mut app,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "password": "yanlis" })),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], "E3004");

    let response = send(
        &mut app,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "password": "admin123" })),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("admin-session=authenticated"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    use menu_server::db::store::DocumentStore;
    let tenant = store.tenant().await.unwrap().unwrap();
    assert_eq!(tenant.admin_password.as_deref(), Some("admin123"));

    let response = send(&mut app, Method::POST, "/api/admin/logout", None, false).await;
    let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn category_and_item_crud() {
    let (_, mut app) = app();

    let response = send(
        &mut app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Sıcak İçecekler", "description": "Demlik çay ve kahve" })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let category = json_body(response).await;
    assert_eq!(category["id"], "sicak-icecekler");
    assert_eq!(category["order"], 1);

    let response = send(
        &mut app,
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "sıcak içecekler", "description": "tekrar" })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &mut app,
        Method::POST,
        "/api/categories/sicak-icecekler/items",
        Some(json!({ "name": "Türk Kahvesi", "description": "Közde", "price": 0 })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &mut app,
        Method::POST,
        "/api/categories/sicak-icecekler/items",
        Some(json!({
            "name": "Türk Kahvesi",
            "description": "Közde",
            "price": 60,
            "preparationTime": "5-7 dk"
        })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let item = json_body(response).await;
    assert_eq!(item["id"], "turk-kahvesi");
    assert_eq!(item["available"], true);

    let response = send(
        &mut app,
        Method::PUT,
        "/api/categories/sicak-icecekler/items/turk-kahvesi",
        Some(json!({ "id": "ignored", "price": 65.5, "available": false })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let item = json_body(response).await;
    assert_eq!(item["id"], "turk-kahvesi");
    assert_eq!(item["price"], 65.5);

    // Live categories show up right away; info still comes from the demo set
    let response = send(&mut app, Method::GET, "/api/restaurant?public=true", None, false).await;
    let body = json_body(response).await;
    assert_eq!(body["info"]["name"], "QR Menü Demo Restoran");
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["id"], "sicak-icecekler");
    assert_eq!(categories[0]["items"][0]["price"], 65.5);

    let response = send(&mut app, Method::GET, "/api/restaurant", None, true).await;
    assert_eq!(json_body(response).await["categories"][0]["id"], "sicak-icecekler");

    let response = send(
        &mut app,
        Method::PUT,
        "/api/restaurant",
        Some(json!({ "info": { "name": "Köşk Kahvecisi" } })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(
        &mut app,
        Method::POST,
        "/api/admin/login",
        Some(json!({ "password": "admin123" })),
        false,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = send(
        &mut app,
        Method::PUT,
        "/api/admin/password",
        Some(json!({ "currentPassword": "admin123", "newPassword": "kahve-2024" })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&mut app, Method::GET, "/api/restaurant?public=true", None, false).await;
    let body = json_body(response).await;
    assert_eq!(body["info"]["name"], "Köşk Kahvecisi");
    assert_eq!(body["categories"][0]["items"][0]["id"], "turk-kahvesi");

    let response = send(
        &mut app,
        Method::DELETE,
        "/api/categories/sicak-icecekler",
        None,
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["deletedItems"], 1);

    let response = send(
        &mut app,
        Method::DELETE,
        "/api/categories/sicak-icecekler",
        None,
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn import_then_reset_round_trip() {
    let (_, mut app) = app();

    let dataset = json!({
        "info": { "name": "Köşk Kebap", "wifi": { "name": "Kosk", "password": "kebap123" } },
        "categories": [
            {
                "id": "kebaplar", "name": "Kebaplar", "description": "Ocakbaşı", "order": 1,
                "items": [{ "id": "adana", "name": "Adana", "description": "Acılı", "price": 320 }]
            }
        ],
        "adminPassword": "kosk-2024"
    });
    let response = send(&mut app, Method::POST, "/api/admin/import", Some(dataset), true).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["data"],
        json!({ "categories": 1, "items": 1 })
    );

    let response = send(&mut app, Method::GET, "/api/restaurant", None, true).await;
    let body = json_body(response).await;
    assert_eq!(body["adminPassword"], "kosk-2024");
    assert_eq!(body["info"]["wifi"]["password"], "kebap123");

    let response = send(&mut app, Method::GET, "/api/categories/kebaplar/items", None, true).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

    let response = send(&mut app, Method::POST, "/api/admin/reset", None, true).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&mut app, Method::GET, "/api/restaurant?public=true", None, false).await;
    assert_eq!(json_body(response).await["info"]["name"], "QR Menü Demo Restoran");
}

#[tokio::test]
async fn store_outage_keeps_public_menu_up() {
    let (store, mut app) = app();
    store.set_unavailable(true);

    let response = send(&mut app, Method::GET, "/api/restaurant?public=true", None, false).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["info"]["name"], "QR Menü Demo Restoran");

    let response = send(
        &mut app,
        Method::PUT,
        "/api/restaurant",
        Some(json!({ "info": { "name": "Köşk" } })),
        true,
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["code"], "E9002");
}
