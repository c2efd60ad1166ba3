//! Drink entity - Beverages, priced separately from food products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Drink database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drinks")]
pub struct Model {
    /// Unique identifier for the drink
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shown on the menu
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Current unit price
    pub price: f64,
}

/// `Drink` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
