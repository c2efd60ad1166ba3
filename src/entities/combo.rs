//! Combo entity - A bundled meal sold at a single price.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Combo database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "combos")]
pub struct Model {
    /// Unique identifier for the combo
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shown on the menu
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Current price of the whole combo
    pub price: f64,
}

/// Defines relationships between Combo and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One combo lists many ingredients
    #[sea_orm(has_many = "super::ingredient::Entity")]
    Ingredients,
    /// One combo can appear on many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
