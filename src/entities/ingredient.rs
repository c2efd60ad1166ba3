//! Ingredient entity - Free-text ingredient names listed on a combo.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ingredient database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    /// Unique identifier for the ingredient row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Combo this ingredient belongs to
    pub combo_id: i64,
}

/// Defines relationships between Ingredient and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ingredient belongs to one combo
    #[sea_orm(
        belongs_to = "super::combo::Entity",
        from = "Column::ComboId",
        to = "super::combo::Column::Id",
        on_delete = "Cascade"
    )]
    Combo,
}

impl Related<super::combo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Combo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
