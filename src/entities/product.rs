//! Product entity - A plain menu item with a price.
//!
//! Products are the source of truth for pricing; a line item copies the price
//! at the moment it is put on a tab.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shown on the menu (e.g., "Empanada")
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Current unit price
    pub price: f64,
}

/// Products have no outgoing relations; line items reference them by kind + id
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
