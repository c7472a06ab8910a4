// Shared test utilities for integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use showbill_db::{AppState, DatabaseConfig};
use showbill_server::ServerConfig;

/// Fresh in-memory database with the schema applied, and a router over it.
pub async fn test_app() -> (Router, DatabaseConnection) {
    let db = showbill_db::connect(&DatabaseConfig::sqlite_memory())
        .await
        .expect("sqlite connects");
    showbill_migration::Migrator::up(&db, None)
        .await
        .expect("migrations apply");

    let state = Arc::new(AppState { db: db.clone() });
    (showbill_server::app(state, &ServerConfig::default()), db)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        location,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// POST `pairs` as an urlencoded form. Repeat a key to send a multi-value field.
pub async fn post_form(app: &Router, uri: &str, pairs: &[(&str, &str)]) -> TestResponse {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

pub fn fillmore() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "The Fillmore"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "1805 Geary Blvd"),
        ("phone", "415-346-3000"),
        ("genres", "Rock n Roll"),
        ("genres", "Jazz"),
        ("website_link", "https://www.fillmore.com"),
    ]
}

pub fn guns_n_petals() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Guns N Petals"),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("genres", "Rock n Roll"),
        ("image_link", "https://images.unsplash.com/photo-1549213783"),
        ("seeking_venue", "y"),
        ("seeking_description", "Looking for shows in the Bay Area"),
    ]
}

/// Id of the only venue or artist called `name` in a search response.
pub async fn id_of(app: &Router, kind: &str, name: &str) -> i64 {
    let found = post_form(app, &format!("/{kind}/search"), &[("search_term", name)]).await;
    assert_eq!(found.body["count"], 1, "{kind} {name} not unique");
    found.body["data"][0]["id"].as_i64().expect("id is a number")
}
