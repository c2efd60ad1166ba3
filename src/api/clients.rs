//! Client and reservation routes.

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiPath},
        response::StatusResponse,
    },
    core::{
        client::{self, ClientInput},
        reservation::{self, ReservationInput},
    },
    entities::{ClientModel, ReservationModel},
    errors::Result,
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

/// Client and reservation routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route(
            "/api/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route(
            "/api/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/api/reservations/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
}

async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientModel>>> {
    Ok(Json(client::list_clients(&state.db).await?))
}

async fn get_client(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ClientModel>> {
    Ok(Json(client::get_client(&state.db, id).await?))
}

async fn create_client(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ClientInput>,
) -> Result<(StatusCode, Json<ClientModel>)> {
    let created = client::create_client(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_client(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ClientInput>,
) -> Result<Json<ClientModel>> {
    Ok(Json(client::update_client(&state.db, id, body).await?))
}

async fn delete_client(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    client::delete_client(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Client {id} deleted"))))
}

async fn list_reservations(State(state): State<AppState>) -> Result<Json<Vec<ReservationModel>>> {
    Ok(Json(reservation::list_reservations(&state.db).await?))
}

async fn get_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ReservationModel>> {
    Ok(Json(reservation::get_reservation(&state.db, id).await?))
}

async fn create_reservation(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ReservationInput>,
) -> Result<(StatusCode, Json<ReservationModel>)> {
    let created = reservation::create_reservation(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ReservationInput>,
) -> Result<Json<ReservationModel>> {
    Ok(Json(
        reservation::update_reservation(&state.db, id, body).await?,
    ))
}

async fn delete_reservation(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    reservation::delete_reservation(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!(
        "Reservation {id} cancelled"
    ))))
}
