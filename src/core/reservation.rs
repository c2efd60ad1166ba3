//! Reservation registry - clients booking tables.
//!
//! A reservation does not touch table availability; only an open tab does.

use crate::{
    core::ensure_exists,
    entities::{Client, DiningTable, Reservation, reservation},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when creating or replacing a reservation.
#[derive(Clone, Debug, Deserialize)]
pub struct ReservationInput {
    /// Client making the booking
    pub client_id: i64,
    /// Table being booked
    pub table_id: i64,
    /// Date and time the table is wanted
    pub reserved_for: DateTime<Utc>,
}

/// Lists reservations in the order they are due.
pub async fn list_reservations(db: &DatabaseConnection) -> Result<Vec<reservation::Model>> {
    Reservation::find()
        .order_by_asc(reservation::Column::ReservedFor)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a reservation by id.
///
/// # Errors
/// Returns `Error::NotFound` if no reservation has this id.
pub async fn get_reservation(
    db: &DatabaseConnection,
    reservation_id: i64,
) -> Result<reservation::Model> {
    Reservation::find_by_id(reservation_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "reservation",
            id: reservation_id,
        })
}

async fn check_references(db: &DatabaseConnection, input: &ReservationInput) -> Result<()> {
    ensure_exists(db, Client, input.client_id, "client").await?;
    ensure_exists(db, DiningTable, input.table_id, "table").await
}

/// Books a table for a client.
///
/// # Errors
/// Returns `Error::NotFound` if the client or table does not exist.
pub async fn create_reservation(
    db: &DatabaseConnection,
    input: ReservationInput,
) -> Result<reservation::Model> {
    check_references(db, &input).await?;

    let reservation = reservation::ActiveModel {
        client_id: Set(input.client_id),
        table_id: Set(input.table_id),
        reserved_for: Set(input.reserved_for),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Reserved table {} for client {} at {}",
        reservation.table_id, reservation.client_id, reservation.reserved_for
    );
    Ok(reservation)
}

/// Moves a reservation to another client, table or time.
pub async fn update_reservation(
    db: &DatabaseConnection,
    reservation_id: i64,
    input: ReservationInput,
) -> Result<reservation::Model> {
    let mut reservation: reservation::ActiveModel =
        get_reservation(db, reservation_id).await?.into();
    check_references(db, &input).await?;

    reservation.client_id = Set(input.client_id);
    reservation.table_id = Set(input.table_id);
    reservation.reserved_for = Set(input.reserved_for);

    reservation.update(db).await.map_err(Into::into)
}

/// Cancels a reservation.
pub async fn delete_reservation(db: &DatabaseConnection, reservation_id: i64) -> Result<()> {
    get_reservation(db, reservation_id).await?.delete(db).await?;
    info!("Cancelled reservation {}", reservation_id);
    Ok(())
}
