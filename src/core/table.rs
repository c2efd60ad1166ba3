//! Dining table business logic and the table availability gate.
//!
//! Tables are plain records except for `available`, which only the tab ledger writes
//! through [`set_availability`]. [`find_open_tab`] is the precondition check behind
//! "at most one open tab per table"; the partial unique index on `tabs` backs it up
//! at the storage layer.

use crate::{
    entities::{DiningTable, Tab, TabStatus, dining_table, tab},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{debug, info, warn};

/// Retrieves all tables ordered by table number.
pub async fn list_tables(db: &DatabaseConnection) -> Result<Vec<dining_table::Model>> {
    DiningTable::find()
        .order_by_asc(dining_table::Column::Number)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the tables a new tab can be opened on, ordered by table number.
///
/// Used by front-of-house screens to pre-filter selectable tables.
pub async fn list_available_tables(db: &DatabaseConnection) -> Result<Vec<dining_table::Model>> {
    DiningTable::find()
        .filter(dining_table::Column::Available.eq(true))
        .order_by_asc(dining_table::Column::Number)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a table by its id.
pub async fn get_table_by_id(
    db: &DatabaseConnection,
    table_id: i64,
) -> Result<Option<dining_table::Model>> {
    DiningTable::find_by_id(table_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a table by the number painted on it.
pub async fn get_table_by_number(
    db: &DatabaseConnection,
    number: i32,
) -> Result<Option<dining_table::Model>> {
    DiningTable::find()
        .filter(dining_table::Column::Number.eq(number))
        .one(db)
        .await
        .map_err(Into::into)
}

fn validate_layout(number: i32, capacity: i32) -> Result<()> {
    if number <= 0 {
        return Err(Error::Validation {
            message: format!("Table number must be positive, got {number}"),
        });
    }
    if capacity <= 0 {
        return Err(Error::Validation {
            message: format!("Table capacity must be positive, got {capacity}"),
        });
    }
    Ok(())
}

/// Creates a new, available table.
///
/// # Errors
/// Returns `Error::Validation` if `number` or `capacity` is not positive and
/// `Error::Conflict` if another table already uses `number`.
pub async fn create_table(
    db: &DatabaseConnection,
    number: i32,
    capacity: i32,
) -> Result<dining_table::Model> {
    validate_layout(number, capacity)?;

    let table = dining_table::ActiveModel {
        number: Set(number),
        capacity: Set(capacity),
        available: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created table #{} (id {}) seating {}", number, table.id, capacity);
    Ok(table)
}

/// Updates a table's number and capacity. Availability is left untouched.
///
/// # Errors
/// Returns `Error::TableNotFound` if the table does not exist, plus the validation
/// and conflict errors of [`create_table`].
pub async fn update_table(
    db: &DatabaseConnection,
    table_id: i64,
    number: i32,
    capacity: i32,
) -> Result<dining_table::Model> {
    validate_layout(number, capacity)?;

    let mut table: dining_table::ActiveModel = DiningTable::find_by_id(table_id)
        .one(db)
        .await?
        .ok_or(Error::TableNotFound { id: table_id })?
        .into();

    table.number = Set(number);
    table.capacity = Set(capacity);

    table.update(db).await.map_err(Into::into)
}

/// Deletes a table that no tab has ever referenced.
///
/// # Errors
/// Returns `Error::TableNotFound` if missing and `Error::TableInUse` if any tab,
/// open or closed, points at it.
pub async fn delete_table(db: &DatabaseConnection, table_id: i64) -> Result<()> {
    let table = DiningTable::find_by_id(table_id)
        .one(db)
        .await?
        .ok_or(Error::TableNotFound { id: table_id })?;

    let tab_count = Tab::find()
        .filter(tab::Column::TableId.eq(table_id))
        .count(db)
        .await?;
    if tab_count > 0 {
        warn!(
            "Refusing to delete table {} referenced by {} tabs",
            table_id, tab_count
        );
        return Err(Error::TableInUse {
            id: table_id,
            count: tab_count,
        });
    }

    table.delete(db).await?;
    info!("Deleted table {}", table_id);
    Ok(())
}

/// Reports whether a new tab may be opened on the table.
///
/// # Errors
/// Returns `Error::TableNotFound` if the table does not exist.
pub async fn is_table_available(db: &DatabaseConnection, table_id: i64) -> Result<bool> {
    let table = get_table_by_id(db, table_id)
        .await?
        .ok_or(Error::TableNotFound { id: table_id })?;
    debug!("Table {} available: {}", table_id, table.available);
    Ok(table.available)
}

/// Returns the open tab on `table_id`, if there is one.
pub async fn find_open_tab<C>(db: &C, table_id: i64) -> Result<Option<tab::Model>>
where
    C: ConnectionTrait,
{
    Tab::find()
        .filter(tab::Column::TableId.eq(table_id))
        .filter(tab::Column::Status.eq(TabStatus::Open))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Writes the availability flag. Only the tab ledger calls this, inside its transactions.
pub(crate) async fn set_availability<C>(db: &C, table_id: i64, available: bool) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = DiningTable::update_many()
        .col_expr(dining_table::Column::Available, Expr::value(available))
        .filter(dining_table::Column::Id.eq(table_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::TableNotFound { id: table_id });
    }
    Ok(())
}
