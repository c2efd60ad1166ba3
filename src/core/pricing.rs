//! Line-item pricing - resolves a menu reference to a price and snapshots it.
//!
//! A [`MenuItem`] names one of the three priced catalogs by tag. [`lookup`] reads the
//! current name and price from the matching table; [`quote`] is the pure part that
//! turns a price and a quantity into the values stored on the line item.

use crate::{
    entities::{Combo, Drink, ItemKind, Product},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reference to something on the menu, tagged by catalog.
///
/// Serialized as `{"kind": "product", "id": 3}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum MenuItem {
    /// A row in `products`
    Product(i64),
    /// A row in `combos`
    Combo(i64),
    /// A row in `drinks`
    Drink(i64),
}

impl MenuItem {
    /// The catalog this reference points into.
    #[must_use]
    pub const fn kind(self) -> ItemKind {
        match self {
            Self::Product(_) => ItemKind::Product,
            Self::Combo(_) => ItemKind::Combo,
            Self::Drink(_) => ItemKind::Drink,
        }
    }

    /// The id within the catalog.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Product(id) | Self::Combo(id) | Self::Drink(id) => id,
        }
    }
}

/// Current catalog data for a menu item.
#[derive(Clone, Debug, PartialEq)]
pub struct PricedItem {
    /// What was referenced
    pub item: MenuItem,
    /// Name at lookup time
    pub name: String,
    /// Price at lookup time
    pub price: f64,
}

/// Price snapshot stored on a line item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePrice {
    /// Copied unit price
    pub unit_price: f64,
    /// `unit_price * quantity`
    pub subtotal: f64,
}

/// Computes the snapshot for `quantity` units at `price`.
///
/// # Errors
/// Returns `Error::InvalidAmount` if the subtotal does not fit in a finite amount.
pub fn quote(price: f64, quantity: i32) -> Result<LinePrice> {
    let subtotal = price * f64::from(quantity);
    if !subtotal.is_finite() {
        return Err(Error::InvalidAmount { amount: subtotal });
    }
    Ok(LinePrice {
        unit_price: price,
        subtotal,
    })
}

/// Looks up the current name and price of `item` in its catalog.
///
/// # Errors
/// Returns `Error::MenuItemNotFound` if the referenced row does not exist.
pub async fn lookup<C>(db: &C, item: MenuItem) -> Result<PricedItem>
where
    C: ConnectionTrait,
{
    let found = match item {
        MenuItem::Product(id) => Product::find_by_id(id)
            .one(db)
            .await?
            .map(|p| (p.name, p.price)),
        MenuItem::Combo(id) => Combo::find_by_id(id)
            .one(db)
            .await?
            .map(|c| (c.name, c.price)),
        MenuItem::Drink(id) => Drink::find_by_id(id)
            .one(db)
            .await?
            .map(|d| (d.name, d.price)),
    };

    let (name, price) = found.ok_or(Error::MenuItemNotFound {
        kind: item.kind(),
        id: item.id(),
    })?;
    debug!("Priced {} {} '{}' at {:.2}", item.kind(), item.id(), name, price);

    Ok(PricedItem { item, name, price })
}
