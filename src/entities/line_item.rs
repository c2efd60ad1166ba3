//! Line item entity - One priced entry on a tab ("detalle de cuenta").
//!
//! The unit price and item name are copied from the catalog when the line is
//! written, so later menu price changes never rewrite an existing tab.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which catalog a line item was priced from
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Plain product
    #[sea_orm(string_value = "product")]
    Product,
    /// Combo meal
    #[sea_orm(string_value = "combo")]
    Combo,
    /// Drink
    #[sea_orm(string_value = "drink")]
    Drink,
}

impl ItemKind {
    /// Lowercase name, matching the stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Combo => "combo",
            Self::Drink => "drink",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tab_line_items")]
pub struct Model {
    /// Unique identifier for the line item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tab this line belongs to
    pub tab_id: i64,
    /// Catalog the item came from
    pub item_kind: ItemKind,
    /// Id within that catalog
    pub item_id: i64,
    /// Item name at the time of insertion
    pub item_name: String,
    /// Units ordered, always positive
    pub quantity: i32,
    /// Unit price captured at insertion
    pub unit_price: f64,
    /// `unit_price * quantity`
    pub subtotal: f64,
    /// When the line was added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `LineItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line item belongs to one tab
    #[sea_orm(
        belongs_to = "super::tab::Entity",
        from = "Column::TabId",
        to = "super::tab::Column::Id"
    )]
    Tab,
}

impl Related<super::tab::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tab.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
