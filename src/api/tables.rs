//! Dining table routes, including the availability query.

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiPath},
        response::StatusResponse,
    },
    core::table,
    entities::DiningTableModel,
    errors::{Error, Result},
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

/// Table routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tables", get(list).post(create))
        .route("/api/tables/available", get(list_available))
        .route("/api/tables/{id}", get(get_by_id).put(update).delete(delete))
        .route("/api/tables/{id}/availability", get(availability))
}

/// Body of POST/PUT /api/tables
#[derive(Debug, Deserialize)]
pub struct TableRequest {
    /// Number shown on the table
    pub number: i32,
    /// Seats
    pub capacity: i32,
}

/// Response of GET /api/tables/{id}/availability
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    /// Table id
    pub table_id: i64,
    /// Whether a tab can be opened now
    pub available: bool,
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<DiningTableModel>>> {
    Ok(Json(table::list_tables(&state.db).await?))
}

async fn list_available(State(state): State<AppState>) -> Result<Json<Vec<DiningTableModel>>> {
    Ok(Json(table::list_available_tables(&state.db).await?))
}

async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DiningTableModel>> {
    table::get_table_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or(Error::TableNotFound { id })
}

async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TableRequest>,
) -> Result<(StatusCode, Json<DiningTableModel>)> {
    let table = table::create_table(&state.db, body.number, body.capacity).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<TableRequest>,
) -> Result<Json<DiningTableModel>> {
    Ok(Json(
        table::update_table(&state.db, id, body.number, body.capacity).await?,
    ))
}

async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    table::delete_table(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Table {id} deleted"))))
}

/// GET /api/tables/{id}/availability
async fn availability(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<AvailabilityResponse>> {
    let available = table::is_table_available(&state.db, id).await?;
    Ok(Json(AvailabilityResponse {
        table_id: id,
        available,
    }))
}
