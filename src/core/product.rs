//! Product business logic - Handles the food side of the menu catalog.
//!
//! Products are priced menu items that can be put on a tab as line items. Changing a
//! product's price only affects line items added afterwards, since each line item keeps
//! its own copy of the unit price. Deleting a product likewise leaves existing line
//! items untouched.

use crate::{
    core::{require_amount, require_text},
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when creating or replacing a product.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductInput {
    /// Menu name
    pub name: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price, non-negative
    pub price: f64,
}

/// Retrieves all products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns `Error::NotFound` if no product has this id.
pub async fn get_product(db: &DatabaseConnection, product_id: i64) -> Result<product::Model> {
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "product",
            id: product_id,
        })
}

/// Finds a product by its exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product, trimming the name.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    input: ProductInput,
) -> Result<product::Model> {
    let name = require_text(&input.name, "Product name")?;
    let price = require_amount(input.price)?;

    let product = product::ActiveModel {
        name: Set(name),
        description: Set(input.description),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created product '{}' at {:.2}", product.name, product.price);
    Ok(product)
}

/// Replaces a product's name, description and price.
///
/// # Errors
/// Returns an error if validation fails as in [`create_product`] or the product does
/// not exist.
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    input: ProductInput,
) -> Result<product::Model> {
    let name = require_text(&input.name, "Product name")?;
    let price = require_amount(input.price)?;

    let mut product: product::ActiveModel = get_product(db, product_id).await?.into();
    product.name = Set(name);
    product.description = Set(input.description);
    product.price = Set(price);

    product.update(db).await.map_err(Into::into)
}

/// Permanently deletes a product. Line items already on tabs keep their snapshot.
///
/// # Errors
/// Returns `Error::NotFound` if the product does not exist.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let product = get_product(db, product_id).await?;
    product.delete(db).await?;
    info!("Deleted product {}", product_id);
    Ok(())
}
