//! Back-of-house routes: employees, suppliers and inventory.

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiPath},
        response::StatusResponse,
    },
    core::{
        employee::{self, EmployeeInput},
        supplier::{self, InventoryInput, SupplierInput},
    },
    entities::{EmployeeModel, InventoryModel, SupplierModel},
    errors::Result,
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

/// Employee, supplier and inventory routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/api/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/api/suppliers/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .route("/api/inventory", get(list_inventory).post(create_entry))
        .route(
            "/api/inventory/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<EmployeeModel>>> {
    Ok(Json(employee::list_employees(&state.db).await?))
}

async fn get_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EmployeeModel>> {
    Ok(Json(employee::get_employee(&state.db, id).await?))
}

async fn create_employee(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EmployeeInput>,
) -> Result<(StatusCode, Json<EmployeeModel>)> {
    let created = employee::create_employee(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<EmployeeInput>,
) -> Result<Json<EmployeeModel>> {
    Ok(Json(employee::update_employee(&state.db, id, body).await?))
}

async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    employee::delete_employee(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Employee {id} deleted"))))
}

async fn list_suppliers(State(state): State<AppState>) -> Result<Json<Vec<SupplierModel>>> {
    Ok(Json(supplier::list_suppliers(&state.db).await?))
}

async fn get_supplier(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<SupplierModel>> {
    Ok(Json(supplier::get_supplier(&state.db, id).await?))
}

async fn create_supplier(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SupplierInput>,
) -> Result<(StatusCode, Json<SupplierModel>)> {
    let created = supplier::create_supplier(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_supplier(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<SupplierInput>,
) -> Result<Json<SupplierModel>> {
    Ok(Json(supplier::update_supplier(&state.db, id, body).await?))
}

async fn delete_supplier(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    supplier::delete_supplier(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Supplier {id} deleted"))))
}

async fn list_inventory(State(state): State<AppState>) -> Result<Json<Vec<InventoryModel>>> {
    Ok(Json(supplier::list_inventory(&state.db).await?))
}

async fn get_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<InventoryModel>> {
    Ok(Json(supplier::get_inventory_entry(&state.db, id).await?))
}

async fn create_entry(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<InventoryInput>,
) -> Result<(StatusCode, Json<InventoryModel>)> {
    let created = supplier::create_inventory_entry(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<InventoryInput>,
) -> Result<Json<InventoryModel>> {
    Ok(Json(
        supplier::update_inventory_entry(&state.db, id, body).await?,
    ))
}

async fn delete_entry(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    supplier::delete_inventory_entry(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!(
        "Inventory entry {id} deleted"
    ))))
}
