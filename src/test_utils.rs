//! Shared test utilities for Cantina.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        client::{self, ClientInput},
        combo::{self, ComboInput},
        drink::{self, DrinkInput},
        product::{self, ProductInput},
        tab, table,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output through the test harness so it shows up on failure.
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cantina=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates a test table with the given number.
///
/// # Defaults
/// * `capacity`: 4
pub async fn create_test_table(
    db: &DatabaseConnection,
    number: i32,
) -> Result<entities::dining_table::Model> {
    table::create_table(db, number, 4).await
}

/// Creates a test table with custom capacity.
pub async fn create_custom_table(
    db: &DatabaseConnection,
    number: i32,
    capacity: i32,
) -> Result<entities::dining_table::Model> {
    table::create_table(db, number, capacity).await
}

/// Creates a product with no description.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        ProductInput {
            name: name.to_string(),
            description: None,
            price,
        },
    )
    .await
}

/// Creates a drink with no description.
pub async fn create_test_drink(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
) -> Result<entities::drink::Model> {
    drink::create_drink(
        db,
        DrinkInput {
            name: name.to_string(),
            description: None,
            price,
        },
    )
    .await
}

/// Creates a combo with a single placeholder ingredient.
pub async fn create_test_combo(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
) -> Result<entities::combo::Model> {
    let created = combo::create_combo(
        db,
        ComboInput {
            name: name.to_string(),
            description: None,
            price,
            ingredients: vec!["Test ingredient".to_string()],
        },
    )
    .await?;
    Ok(created.combo)
}

/// Creates a client named "Ana" with the given email.
pub async fn create_test_client(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::client::Model> {
    client::create_client(
        db,
        ClientInput {
            first_name: "Ana".to_string(),
            last_name: None,
            email: email.to_string(),
            phone: None,
        },
    )
    .await
}

/// Sets up a test environment with table #1.
/// Returns (db, table) for common test scenarios.
pub async fn setup_with_table() -> Result<(DatabaseConnection, entities::dining_table::Model)> {
    let db = setup_test_db().await?;
    let table = create_test_table(&db, 1).await?;
    Ok((db, table))
}

/// Sets up a test environment with table #1 and an open tab on it.
/// Returns (db, table, tab) for ledger tests. The returned table reflects the
/// state before the tab was opened.
pub async fn setup_with_open_tab() -> Result<(
    DatabaseConnection,
    entities::dining_table::Model,
    entities::tab::Model,
)> {
    let (db, table) = setup_with_table().await?;
    let tab = tab::open_tab(&db, table.id).await?;
    Ok((db, table, tab))
}

/// Sends a request through `router` and decodes the JSON response body.
/// A missing or non-JSON body decodes as `null`.
pub async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, serde_json::Value) {
    let (status, text) = send_with_body(router, method, uri, body).await;
    let json = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Sends a bodyless request and returns the raw response text.
pub async fn send_raw(
    router: &axum::Router,
    method: &str,
    uri: &str,
) -> (axum::http::StatusCode, String) {
    send_with_body(router, method, uri, None).await
}

#[allow(clippy::unwrap_used)]
async fn send_with_body(
    router: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (axum::http::StatusCode, String) {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
