//! Database configuration module for Cantina.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust models. The one rule the entity macros cannot
//! express, "at most one open tab per table", is added as a raw partial unique index.

use crate::entities::{
    Client, Combo, DiningTable, Drink, Employee, Ingredient, Inventory, LineItem, Order, Payment,
    PaymentMethod, Product, Reservation, Supplier, Tab,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Default location of the `SQLite` database file.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/cantina.sqlite?mode=rwc";

/// Partial unique index enforcing one open tab per table at the storage layer.
const ONE_OPEN_TAB_PER_TABLE: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_tabs_one_open_per_table \
     ON tabs (table_id) WHERE status = 'open'";

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first so a fresh
/// checkout can start without manual setup.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(dir) = sqlite_parent_dir(database_url) {
        debug!("Ensuring database directory {:?} exists", dir);
        std::fs::create_dir_all(dir)?;
    }

    let db = Database::connect(database_url).await?;
    info!("Connected to database at {}", database_url);
    Ok(db)
}

/// Returns the directory holding a file-backed `SQLite` database, if any.
fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

async fn create_table_for<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity
/// definitions.
///
/// Parents are created before children so the generated foreign keys always point at
/// existing tables. Safe to call on every start-up.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table_for(db, &schema, DiningTable).await?;
    create_table_for(db, &schema, Client).await?;
    create_table_for(db, &schema, Product).await?;
    create_table_for(db, &schema, Combo).await?;
    create_table_for(db, &schema, Ingredient).await?;
    create_table_for(db, &schema, Drink).await?;
    create_table_for(db, &schema, Reservation).await?;
    create_table_for(db, &schema, Tab).await?;
    create_table_for(db, &schema, LineItem).await?;
    create_table_for(db, &schema, Order).await?;
    create_table_for(db, &schema, PaymentMethod).await?;
    create_table_for(db, &schema, Payment).await?;
    create_table_for(db, &schema, Employee).await?;
    create_table_for(db, &schema, Supplier).await?;
    create_table_for(db, &schema, Inventory).await?;

    db.execute_unprepared(ONE_OPEN_TAB_PER_TABLE).await?;

    info!("Database tables ensured");
    Ok(())
}
