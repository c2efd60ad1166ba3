//! Kitchen order, payment method and payment routes.

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiPath},
        response::StatusResponse,
    },
    core::{
        order::{self, OrderInput},
        payment::{self, PaymentInput, PaymentMethodInput},
    },
    entities::{OrderModel, PaymentMethodModel, PaymentModel},
    errors::Result,
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

/// Order and payment routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route(
            "/api/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/api/payment-methods", get(list_methods).post(create_method))
        .route(
            "/api/payment-methods/{id}",
            get(get_method).put(update_method).delete(delete_method),
        )
        .route("/api/payments", get(list_payments).post(create_payment))
        .route(
            "/api/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderModel>>> {
    Ok(Json(order::list_orders(&state.db).await?))
}

async fn get_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<OrderModel>> {
    Ok(Json(order::get_order(&state.db, id).await?))
}

async fn create_order(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OrderInput>,
) -> Result<(StatusCode, Json<OrderModel>)> {
    let created = order::create_order(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<OrderInput>,
) -> Result<Json<OrderModel>> {
    Ok(Json(order::update_order(&state.db, id, body).await?))
}

async fn delete_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    order::delete_order(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Order {id} deleted"))))
}

async fn list_methods(State(state): State<AppState>) -> Result<Json<Vec<PaymentMethodModel>>> {
    Ok(Json(payment::list_payment_methods(&state.db).await?))
}

async fn get_method(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PaymentMethodModel>> {
    Ok(Json(payment::get_payment_method(&state.db, id).await?))
}

async fn create_method(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PaymentMethodInput>,
) -> Result<(StatusCode, Json<PaymentMethodModel>)> {
    let created = payment::create_payment_method(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_method(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<PaymentMethodInput>,
) -> Result<Json<PaymentMethodModel>> {
    Ok(Json(payment::update_payment_method(&state.db, id, body).await?))
}

async fn delete_method(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    payment::delete_payment_method(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!(
        "Payment method {id} deleted"
    ))))
}

async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<PaymentModel>>> {
    Ok(Json(payment::list_payments(&state.db).await?))
}

async fn get_payment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PaymentModel>> {
    Ok(Json(payment::get_payment(&state.db, id).await?))
}

async fn create_payment(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<PaymentInput>,
) -> Result<(StatusCode, Json<PaymentModel>)> {
    let created = payment::create_payment(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_payment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<PaymentInput>,
) -> Result<Json<PaymentModel>> {
    Ok(Json(payment::update_payment(&state.db, id, body).await?))
}

async fn delete_payment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    payment::delete_payment(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Payment {id} deleted"))))
}
