//! Tab entity - A running account ("cuenta") opened against a dining table.
//!
//! A tab is created open with a zero total, accumulates line items, and is
//! closed once. Closed tabs are kept for history. The database carries a partial
//! unique index so that at most one open tab exists per table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a tab
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum TabStatus {
    /// Accepting line items
    #[sea_orm(string_value = "open")]
    Open,
    /// Settled; read-only
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// Tab database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tabs")]
pub struct Model {
    /// Unique identifier for the tab
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Table this tab is running on
    pub table_id: i64,
    /// Current lifecycle state
    pub status: TabStatus,
    /// Sum of all line-item subtotals
    pub total: f64,
    /// When the tab was opened
    pub opened_at: DateTimeUtc,
    /// When the tab was closed, `None` while open
    pub closed_at: Option<DateTimeUtc>,
}

impl Model {
    /// Returns `true` while the tab accepts line items.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == TabStatus::Open
    }
}

/// Defines relationships between Tab and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each tab belongs to one dining table
    #[sea_orm(
        belongs_to = "super::dining_table::Entity",
        from = "Column::TableId",
        to = "super::dining_table::Column::Id"
    )]
    DiningTable,
    /// One tab has many line items
    #[sea_orm(has_many = "super::line_item::Entity")]
    LineItems,
}

impl Related<super::dining_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiningTable.def()
    }
}

impl Related<super::line_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
