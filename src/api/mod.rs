//! HTTP surface - axum routers over the `core` operations.
//!
//! Each submodule owns the routes for one area and exposes `router()`; [`router`]
//! merges them, attaches shared state and wraps everything in request tracing.
//! Handlers only translate between HTTP and `core`; all rules live in `core`.

pub mod clients;
pub mod extract;
pub mod menu;
pub mod orders;
pub mod response;
pub mod staff;
pub mod tables;
pub mod tabs;

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Pooled database connection
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    /// Wraps a connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(tabs::router())
        .merge(tables::router())
        .merge(menu::router())
        .merge(clients::router())
        .merge(orders::router())
        .merge(staff::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/health
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use crate::test_utils::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() -> Result<()> {
        let app = router(AppState::new(setup_test_db().await?));
        let (status, body) = send_raw(&app, "GET", "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
        Ok(())
    }

    #[tokio::test]
    async fn test_state_clones_share_connection() -> Result<()> {
        let state = AppState::new(setup_test_db().await?);
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.db, &cloned.db));

        crate::core::table::create_table(&cloned.db, 3, 4).await?;
        let tables = crate::core::table::list_tables(&state.db).await?;
        assert_eq!(tables.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() -> Result<()> {
        let app = router(AppState::new(setup_test_db().await?));
        let (status, _) = send(&app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }
}
