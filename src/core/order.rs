//! Kitchen order registry ("pedidos").
//!
//! Orders are a record of what a table asked the kitchen for. They are independent of
//! tabs: billing happens through line items, and payments are recorded against orders.

use crate::{
    core::{ensure_exists, require_text},
    entities::{Client, Combo, DiningTable, Order, order},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when placing or replacing an order.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderInput {
    /// Table placing the order
    pub table_id: i64,
    /// Client placing it, if known
    #[serde(default)]
    pub client_id: Option<i64>,
    /// Combo being ordered, if any
    #[serde(default)]
    pub combo_id: Option<i64>,
    /// What the kitchen should prepare
    pub description: String,
    /// Number of units, positive
    pub quantity: i32,
}

/// Lists orders, oldest first.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    Order::find()
        .order_by_asc(order::Column::OrderedAt)
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an order by id.
///
/// # Errors
/// Returns `Error::NotFound` if no order has this id.
pub async fn get_order(db: &DatabaseConnection, order_id: i64) -> Result<order::Model> {
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })
}

async fn validate(db: &DatabaseConnection, input: &OrderInput) -> Result<String> {
    if input.quantity <= 0 {
        return Err(Error::InvalidQuantity {
            quantity: input.quantity,
        });
    }
    let description = require_text(&input.description, "Order description")?;

    ensure_exists(db, DiningTable, input.table_id, "table").await?;
    if let Some(client_id) = input.client_id {
        ensure_exists(db, Client, client_id, "client").await?;
    }
    if let Some(combo_id) = input.combo_id {
        ensure_exists(db, Combo, combo_id, "combo").await?;
    }
    Ok(description)
}

/// Places an order.
///
/// # Errors
/// Returns `Error::InvalidQuantity` or `Error::Validation` for bad input and
/// `Error::NotFound` if the table, client or combo does not exist.
pub async fn create_order(db: &DatabaseConnection, input: OrderInput) -> Result<order::Model> {
    let description = validate(db, &input).await?;

    let order = order::ActiveModel {
        table_id: Set(input.table_id),
        client_id: Set(input.client_id),
        combo_id: Set(input.combo_id),
        description: Set(description),
        quantity: Set(input.quantity),
        ordered_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Order {} from table {}: {} x {}",
        order.id, order.table_id, order.quantity, order.description
    );
    Ok(order)
}

/// Replaces an order's contents. The original `ordered_at` is kept.
pub async fn update_order(
    db: &DatabaseConnection,
    order_id: i64,
    input: OrderInput,
) -> Result<order::Model> {
    let mut order: order::ActiveModel = get_order(db, order_id).await?.into();
    let description = validate(db, &input).await?;

    order.table_id = Set(input.table_id);
    order.client_id = Set(input.client_id);
    order.combo_id = Set(input.combo_id);
    order.description = Set(description);
    order.quantity = Set(input.quantity);

    order.update(db).await.map_err(Into::into)
}

/// Deletes an order.
///
/// # Errors
/// Returns `Error::ForeignKey` while payments reference the order.
pub async fn delete_order(db: &DatabaseConnection, order_id: i64) -> Result<()> {
    get_order(db, order_id).await?.delete(db).await?;
    info!("Deleted order {}", order_id);
    Ok(())
}
