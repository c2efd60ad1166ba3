//! Employee entity - Front-of-house and kitchen staff.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Position, e.g. `"waiter"`
    pub role: String,
    /// Contact email, unique per employee
    #[sea_orm(unique)]
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
}

/// `Employee` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
