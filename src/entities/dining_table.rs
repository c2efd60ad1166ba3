//! Dining table entity - A physical table in the dining room.
//!
//! The `available` flag is owned by the tab ledger: opening a tab clears it and
//! closing the tab sets it again. General table updates never touch it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Dining table database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dining_tables")]
pub struct Model {
    /// Unique identifier for the table
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Number painted on the table, unique across the dining room
    #[sea_orm(unique)]
    pub number: i32,
    /// Seat capacity
    pub capacity: i32,
    /// Whether a new tab may be opened on this table
    pub available: bool,
}

/// Defines relationships between `DiningTable` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One table has many tabs over its lifetime
    #[sea_orm(has_many = "super::tab::Entity")]
    Tabs,
    /// One table has many reservations
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
    /// One table has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::tab::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tabs.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
