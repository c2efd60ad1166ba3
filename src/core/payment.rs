//! Payment methods and recorded payments.
//!
//! Payments are bookkeeping only. Nothing here checks that an order is fully paid or
//! talks to a payment processor.

use crate::{
    core::{ensure_exists, require_amount, require_text},
    entities::{Order, Payment, PaymentMethod, payment, payment_method},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when creating or renaming a payment method.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentMethodInput {
    /// Method name, e.g. `"cash"`
    pub kind: String,
}

/// Fields accepted when recording or correcting a payment.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentInput {
    /// Order being paid
    pub order_id: i64,
    /// How it was paid
    pub payment_method_id: i64,
    /// Amount paid, non-negative
    pub amount: f64,
}

/// Lists payment methods by name.
pub async fn list_payment_methods(db: &DatabaseConnection) -> Result<Vec<payment_method::Model>> {
    PaymentMethod::find()
        .order_by_asc(payment_method::Column::Kind)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a payment method by id.
///
/// # Errors
/// Returns `Error::NotFound` if no method has this id.
pub async fn get_payment_method(
    db: &DatabaseConnection,
    method_id: i64,
) -> Result<payment_method::Model> {
    PaymentMethod::find_by_id(method_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "payment method",
            id: method_id,
        })
}

/// Finds a payment method by its exact kind.
pub async fn get_payment_method_by_kind(
    db: &DatabaseConnection,
    kind: &str,
) -> Result<Option<payment_method::Model>> {
    PaymentMethod::find()
        .filter(payment_method::Column::Kind.eq(kind))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a payment method.
///
/// # Errors
/// Returns `Error::Conflict` if the kind already exists.
pub async fn create_payment_method(
    db: &DatabaseConnection,
    input: PaymentMethodInput,
) -> Result<payment_method::Model> {
    let kind = require_text(&input.kind, "Payment method")?;
    let method = payment_method::ActiveModel {
        kind: Set(kind),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Added payment method '{}'", method.kind);
    Ok(method)
}

/// Renames a payment method.
pub async fn update_payment_method(
    db: &DatabaseConnection,
    method_id: i64,
    input: PaymentMethodInput,
) -> Result<payment_method::Model> {
    let kind = require_text(&input.kind, "Payment method")?;
    let mut method: payment_method::ActiveModel = get_payment_method(db, method_id).await?.into();
    method.kind = Set(kind);
    method.update(db).await.map_err(Into::into)
}

/// Removes a payment method no payment uses.
pub async fn delete_payment_method(db: &DatabaseConnection, method_id: i64) -> Result<()> {
    get_payment_method(db, method_id).await?.delete(db).await?;
    info!("Removed payment method {}", method_id);
    Ok(())
}

/// Lists payments, most recent first.
pub async fn list_payments(db: &DatabaseConnection) -> Result<Vec<payment::Model>> {
    Payment::find()
        .order_by_desc(payment::Column::PaidAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a payment by id.
///
/// # Errors
/// Returns `Error::NotFound` if no payment has this id.
pub async fn get_payment(db: &DatabaseConnection, payment_id: i64) -> Result<payment::Model> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "payment",
            id: payment_id,
        })
}

async fn validate_payment(db: &DatabaseConnection, input: &PaymentInput) -> Result<f64> {
    let amount = require_amount(input.amount)?;
    ensure_exists(db, Order, input.order_id, "order").await?;
    ensure_exists(db, PaymentMethod, input.payment_method_id, "payment method").await?;
    Ok(amount)
}

/// Records a payment against an order.
///
/// # Errors
/// Returns `Error::InvalidAmount` for a negative amount and `Error::NotFound` if the
/// order or method does not exist.
pub async fn create_payment(
    db: &DatabaseConnection,
    input: PaymentInput,
) -> Result<payment::Model> {
    let amount = validate_payment(db, &input).await?;

    let payment = payment::ActiveModel {
        order_id: Set(input.order_id),
        payment_method_id: Set(input.payment_method_id),
        amount: Set(amount),
        paid_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Recorded payment of {:.2} for order {}",
        payment.amount, payment.order_id
    );
    Ok(payment)
}

/// Corrects a recorded payment.
pub async fn update_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    input: PaymentInput,
) -> Result<payment::Model> {
    let mut payment: payment::ActiveModel = get_payment(db, payment_id).await?.into();
    let amount = validate_payment(db, &input).await?;

    payment.order_id = Set(input.order_id);
    payment.payment_method_id = Set(input.payment_method_id);
    payment.amount = Set(amount);

    payment.update(db).await.map_err(Into::into)
}

/// Deletes a payment record.
pub async fn delete_payment(db: &DatabaseConnection, payment_id: i64) -> Result<()> {
    get_payment(db, payment_id).await?.delete(db).await?;
    info!("Deleted payment {}", payment_id);
    Ok(())
}
