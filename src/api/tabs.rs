//! Tab ledger routes.
//!
//! | Path | Method | Operation |
//! |------|--------|-----------|
//! | /api/tabs | GET | list tabs, optional `?status=open\|closed` |
//! | /api/tabs | POST | open a tab `{"table_id": 5}` |
//! | /api/tabs/{id} | GET | one tab |
//! | /api/tabs/{id} | DELETE | delete an empty tab |
//! | /api/tabs/{id}/items | GET | line items in insertion order |
//! | /api/tabs/{id}/items | POST | add `{"item": {"kind": "product", "id": 1}, "quantity": 2}` |
//! | /api/tabs/{id}/close | POST | close the tab |
//! | /api/tabs/{id}/detail | GET | tab with line items |

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiPath, ApiQuery},
        response::StatusResponse,
    },
    core::{
        pricing::MenuItem,
        tab::{self, TabDetail},
    },
    entities::{LineItemModel, TabModel, TabStatus},
    errors::Result,
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

/// Tab routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tabs", get(list).post(open))
        .route("/api/tabs/{id}", get(get_by_id).delete(delete))
        .route("/api/tabs/{id}/items", get(list_items).post(add_item))
        .route("/api/tabs/{id}/close", post(close))
        .route("/api/tabs/{id}/detail", get(detail))
}

/// Body of POST /api/tabs
#[derive(Debug, Deserialize)]
pub struct OpenTabRequest {
    /// Table to open the tab on
    pub table_id: i64,
}

/// Body of POST /api/tabs/{id}/items
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// What is being added
    pub item: MenuItem,
    /// How many units
    pub quantity: i32,
}

/// Query of GET /api/tabs
#[derive(Debug, Deserialize)]
pub struct ListTabsQuery {
    /// Only tabs in this state
    pub status: Option<TabStatus>,
}

/// GET /api/tabs
async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTabsQuery>,
) -> Result<Json<Vec<TabModel>>> {
    Ok(Json(tab::list_tabs(&state.db, query.status).await?))
}

/// POST /api/tabs
async fn open(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<OpenTabRequest>,
) -> Result<(StatusCode, Json<TabModel>)> {
    let tab = tab::open_tab(&state.db, body.table_id).await?;
    Ok((StatusCode::CREATED, Json(tab)))
}

/// GET /api/tabs/{id}
async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TabModel>> {
    Ok(Json(tab::get_tab(&state.db, id).await?))
}

/// GET /api/tabs/{id}/detail
async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TabDetail>> {
    Ok(Json(tab::get_tab_detail(&state.db, id).await?))
}

/// GET /api/tabs/{id}/items
async fn list_items(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<LineItemModel>>> {
    Ok(Json(tab::list_line_items(&state.db, id).await?))
}

/// POST /api/tabs/{id}/items
async fn add_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<AddItemRequest>,
) -> Result<(StatusCode, Json<LineItemModel>)> {
    let line = tab::add_line_item(&state.db, id, body.item, body.quantity).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// POST /api/tabs/{id}/close
async fn close(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TabModel>> {
    Ok(Json(tab::close_tab(&state.db, id).await?))
}

/// DELETE /api/tabs/{id}
async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    tab::delete_tab(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Tab {id} deleted"))))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::api::{AppState, router};
    use crate::errors::Result;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_tab_lifecycle_over_http() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let table = create_custom_table(&db, 5, 4).await?;
        let empanada = create_test_product(&db, "Empanada", 9.5).await?;
        let soda = create_test_drink(&db, "Soda", 3.0).await?;
        let app = router(AppState::new(db));

        let (status, tab) =
            send(&app, "POST", "/api/tabs", Some(json!({"table_id": table.id}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(tab["status"], "open");
        let tab_id = tab["id"].as_i64().unwrap();

        let (status, availability) =
            send(&app, "GET", &format!("/api/tables/{}/availability", table.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(availability["available"], false);

        let (status, line) = send(
            &app,
            "POST",
            &format!("/api/tabs/{tab_id}/items"),
            Some(json!({"item": {"kind": "product", "id": empanada.id}, "quantity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(line["subtotal"], 19.0);
        assert_eq!(line["item_kind"], "product");

        send(
            &app,
            "POST",
            &format!("/api/tabs/{tab_id}/items"),
            Some(json!({"item": {"kind": "drink", "id": soda.id}, "quantity": 1})),
        )
        .await;

        let (_, fetched) = send(&app, "GET", &format!("/api/tabs/{tab_id}"), None).await;
        assert_eq!(fetched["total"], 22.0);

        let (_, items) = send(&app, "GET", &format!("/api/tabs/{tab_id}/items"), None).await;
        assert_eq!(items.as_array().unwrap().len(), 2);

        let (status, closed) = send(&app, "POST", &format!("/api/tabs/{tab_id}/close"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(closed["status"], "closed");

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/tabs/{tab_id}/items"),
            Some(json!({"item": {"kind": "drink", "id": soda.id}, "quantity": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "error");

        let (status, _) = send(&app, "GET", "/api/tabs?status=closed", None).await;
        assert_eq!(status, StatusCode::OK);

        Ok(())
    }

    #[tokio::test]
    async fn test_open_twice_is_conflict() -> Result<()> {
        let (db, table) = setup_with_table().await?;
        let app = router(AppState::new(db));

        send(&app, "POST", "/api/tabs", Some(json!({"table_id": table.id}))).await;
        let (status, body) =
            send(&app, "POST", "/api/tabs", Some(json!({"table_id": table.id}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "error");
        assert_eq!(
            body["message"],
            format!("Table {} already has an open tab", table.id)
        );

        let (_, open) = send(&app, "GET", "/api/tabs?status=open", None).await;
        assert_eq!(open.as_array().unwrap().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_error_statuses() -> Result<()> {
        let (db, _table, tab) = setup_with_open_tab().await?;
        let app = router(AppState::new(db));

        let (status, body) = send(&app, "GET", "/api/tabs/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Tab 999 not found");

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/tabs/{}/items", tab.id),
            Some(json!({"item": {"kind": "combo", "id": 1}, "quantity": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/tabs/{}/items", tab.id),
            Some(json!({"item": {"kind": "pizza", "id": 1}, "quantity": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");

        let (status, body) = send(&app, "GET", "/api/tabs/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");

        let (status, _) = send(&app, "GET", "/api/tabs?status=pending", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_tab_over_http() -> Result<()> {
        let (db, _table, tab) = setup_with_open_tab().await?;
        let app = router(AppState::new(db));

        let (status, body) = send(&app, "DELETE", &format!("/api/tabs/{}", tab.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let (status, body) = send(&app, "DELETE", &format!("/api/tabs/{}", tab.id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");

        Ok(())
    }
}
