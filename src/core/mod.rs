//! Core business logic - framework-agnostic ledger, availability and registry operations.
//!
//! Every function takes a sea-orm connection and returns [`crate::errors::Result`];
//! the HTTP layer in [`crate::api`] is a thin translation on top.

pub mod client;
pub mod combo;
pub mod drink;
pub mod employee;
pub mod order;
pub mod payment;
pub mod pricing;
pub mod product;
pub mod reservation;
pub mod supplier;
pub mod tab;
pub mod table;

use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};

/// Verifies that a row with `id` exists in `entity`, for foreign-key checks before a write.
pub(crate) async fn ensure_exists<E, C>(
    db: &C,
    _entity: E,
    id: i64,
    name: &'static str,
) -> Result<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::NotFound { entity: name, id })
}

/// Rejects blank names, returning the trimmed value.
pub(crate) fn require_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{field} cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

/// Rejects negative or non-finite prices and amounts.
pub(crate) fn require_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

/// Rejects blank emails and ones without an `@`, returning the trimmed value.
pub(crate) fn require_email(value: &str) -> Result<String> {
    let email = require_text(value, "Email")?;
    if !email.contains('@') {
        return Err(Error::Validation {
            message: format!("'{email}' is not an email address"),
        });
    }
    Ok(email)
}
