//! Menu catalog routes: products, combos and drinks.

use crate::{
    api::{
        AppState,
        extract::{ApiJson, ApiPath},
        response::StatusResponse,
    },
    core::{
        combo::{self, ComboInput, ComboWithIngredients},
        drink::{self, DrinkInput},
        product::{self, ProductInput},
    },
    entities::{ComboModel, DrinkModel, ProductModel},
    errors::Result,
};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

/// Menu routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/combos", get(list_combos).post(create_combo))
        .route(
            "/api/combos/{id}",
            get(get_combo).put(update_combo).delete(delete_combo),
        )
        .route("/api/combos/{id}/ingredients", get(combo_ingredients))
        .route("/api/drinks", get(list_drinks).post(create_drink))
        .route(
            "/api/drinks/{id}",
            get(get_drink).put(update_drink).delete(delete_drink),
        )
}

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductModel>>> {
    Ok(Json(product::list_products(&state.db).await?))
}

async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ProductModel>> {
    Ok(Json(product::get_product(&state.db, id).await?))
}

async fn create_product(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProductInput>,
) -> Result<(StatusCode, Json<ProductModel>)> {
    let created = product::create_product(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ProductInput>,
) -> Result<Json<ProductModel>> {
    Ok(Json(product::update_product(&state.db, id, body).await?))
}

async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    product::delete_product(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Product {id} deleted"))))
}

async fn list_combos(State(state): State<AppState>) -> Result<Json<Vec<ComboModel>>> {
    Ok(Json(combo::list_combos(&state.db).await?))
}

async fn get_combo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ComboWithIngredients>> {
    Ok(Json(combo::get_combo_with_ingredients(&state.db, id).await?))
}

async fn combo_ingredients(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(combo::get_ingredients(&state.db, id).await?))
}

async fn create_combo(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ComboInput>,
) -> Result<(StatusCode, Json<ComboWithIngredients>)> {
    let created = combo::create_combo(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_combo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ComboInput>,
) -> Result<Json<ComboWithIngredients>> {
    Ok(Json(combo::update_combo(&state.db, id, body).await?))
}

async fn delete_combo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    combo::delete_combo(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Combo {id} deleted"))))
}

async fn list_drinks(State(state): State<AppState>) -> Result<Json<Vec<DrinkModel>>> {
    Ok(Json(drink::list_drinks(&state.db).await?))
}

async fn get_drink(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<DrinkModel>> {
    Ok(Json(drink::get_drink(&state.db, id).await?))
}

async fn create_drink(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DrinkInput>,
) -> Result<(StatusCode, Json<DrinkModel>)> {
    let created = drink::create_drink(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_drink(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<DrinkInput>,
) -> Result<Json<DrinkModel>> {
    Ok(Json(drink::update_drink(&state.db, id, body).await?))
}

async fn delete_drink(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatusResponse>> {
    drink::delete_drink(&state.db, id).await?;
    Ok(Json(StatusResponse::success(format!("Drink {id} deleted"))))
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
    async fn test_combo_routes() -> Result<()> {
        let app = router(AppState::new(setup_test_db().await?));

        let (status, combo) = send(
            &app,
            "POST",
            "/api/combos",
            Some(json!({"name": "Parrillada", "price": 30.0, "ingredients": ["asado", "chorizo"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(combo["name"], "Parrillada");
        let id = combo["id"].as_i64().unwrap();

        let (status, ingredients) =
            send(&app, "GET", &format!("/api/combos/{id}/ingredients"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ingredients, json!(["asado", "chorizo"]));

        let (status, _) = send(&app, "GET", "/api/combos/999/ingredients", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_product_and_drink_routes() -> Result<()> {
        let app = router(AppState::new(setup_test_db().await?));

        let (status, product) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({"name": "Empanada", "price": 9.5})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = product["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/products/{id}"),
            Some(json!({"name": "Empanada", "price": -1.0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let (status, drink) =
            send(&app, "POST", "/api/drinks", Some(json!({"name": "Soda", "price": 3.0}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, fetched) = send(
            &app,
            "GET",
            &format!("/api/drinks/{}", drink["id"].as_i64().unwrap()),
            None,
        )
        .await;
        assert_eq!(fetched["name"], "Soda");

        Ok(())
    }
}
