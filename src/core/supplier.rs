//! Supplier and inventory registries.
//!
//! Inventory entries record stock per supplier as entered. Nothing in the ledger
//! decrements stock when items are sold.

use crate::{
    core::{ensure_exists, require_email, require_text},
    entities::{Inventory, Supplier, inventory, supplier},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when creating or replacing a supplier.
#[derive(Clone, Debug, Deserialize)]
pub struct SupplierInput {
    /// Company name
    pub name: String,
    /// Contact person
    #[serde(default)]
    pub contact: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email, must be unique
    pub email: String,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
}

/// Fields accepted when creating or replacing an inventory entry.
#[derive(Clone, Debug, Deserialize)]
pub struct InventoryInput {
    /// Name of the stocked item
    pub item_name: String,
    /// Units on hand, non-negative
    pub quantity: i32,
    /// Supplier the stock came from
    pub supplier_id: i64,
}

/// Lists suppliers by name.
pub async fn list_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a supplier by id.
///
/// # Errors
/// Returns `Error::NotFound` if no supplier has this id.
pub async fn get_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<supplier::Model> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "supplier",
            id: supplier_id,
        })
}

/// Adds a supplier.
pub async fn create_supplier(
    db: &DatabaseConnection,
    input: SupplierInput,
) -> Result<supplier::Model> {
    let supplier = supplier::ActiveModel {
        name: Set(require_text(&input.name, "Supplier name")?),
        contact: Set(input.contact),
        phone: Set(input.phone),
        email: Set(require_email(&input.email)?),
        address: Set(input.address),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Added supplier {}", supplier.name);
    Ok(supplier)
}

/// Replaces a supplier's details.
pub async fn update_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
    input: SupplierInput,
) -> Result<supplier::Model> {
    let name = require_text(&input.name, "Supplier name")?;
    let email = require_email(&input.email)?;

    let mut supplier: supplier::ActiveModel = get_supplier(db, supplier_id).await?.into();
    supplier.name = Set(name);
    supplier.contact = Set(input.contact);
    supplier.phone = Set(input.phone);
    supplier.email = Set(email);
    supplier.address = Set(input.address);

    supplier.update(db).await.map_err(Into::into)
}

/// Removes a supplier with no inventory entries.
///
/// # Errors
/// Returns `Error::ForeignKey` while inventory entries reference the supplier.
pub async fn delete_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<()> {
    get_supplier(db, supplier_id).await?.delete(db).await?;
    info!("Removed supplier {}", supplier_id);
    Ok(())
}

/// Lists inventory entries by item name.
pub async fn list_inventory(db: &DatabaseConnection) -> Result<Vec<inventory::Model>> {
    Inventory::find()
        .order_by_asc(inventory::Column::ItemName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an inventory entry by id.
///
/// # Errors
/// Returns `Error::NotFound` if no entry has this id.
pub async fn get_inventory_entry(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<inventory::Model> {
    Inventory::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "inventory entry",
            id: entry_id,
        })
}

async fn validate_inventory(db: &DatabaseConnection, input: &InventoryInput) -> Result<String> {
    let item_name = require_text(&input.item_name, "Item name")?;
    if input.quantity < 0 {
        return Err(Error::Validation {
            message: format!("Stock quantity cannot be negative, got {}", input.quantity),
        });
    }
    ensure_exists(db, Supplier, input.supplier_id, "supplier").await?;
    Ok(item_name)
}

/// Records stock from a supplier.
///
/// # Errors
/// Returns `Error::Validation` for a blank name or negative quantity and
/// `Error::NotFound` if the supplier does not exist.
pub async fn create_inventory_entry(
    db: &DatabaseConnection,
    input: InventoryInput,
) -> Result<inventory::Model> {
    let item_name = validate_inventory(db, &input).await?;

    let entry = inventory::ActiveModel {
        item_name: Set(item_name),
        quantity: Set(input.quantity),
        supplier_id: Set(input.supplier_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Stocked {} x {} from supplier {}",
        entry.quantity, entry.item_name, entry.supplier_id
    );
    Ok(entry)
}

/// Replaces an inventory entry.
pub async fn update_inventory_entry(
    db: &DatabaseConnection,
    entry_id: i64,
    input: InventoryInput,
) -> Result<inventory::Model> {
    let mut entry: inventory::ActiveModel = get_inventory_entry(db, entry_id).await?.into();
    let item_name = validate_inventory(db, &input).await?;

    entry.item_name = Set(item_name);
    entry.quantity = Set(input.quantity);
    entry.supplier_id = Set(input.supplier_id);

    entry.update(db).await.map_err(Into::into)
}

/// Deletes an inventory entry.
pub async fn delete_inventory_entry(db: &DatabaseConnection, entry_id: i64) -> Result<()> {
    get_inventory_entry(db, entry_id).await?.delete(db).await?;
    info!("Deleted inventory entry {}", entry_id);
    Ok(())
}
