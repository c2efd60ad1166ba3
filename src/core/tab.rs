//! Tab ledger - opens, fills, closes and deletes tabs ("cuentas").
//!
//! Every operation that writes more than one row runs inside a single database
//! transaction, so a tab can never exist without its table being marked unavailable
//! and a line item can never be stored without its subtotal being added to the tab.
//! [`add_line_item`] is the only path that raises a tab's total; the increment is
//! evaluated in SQL (`total = total + subtotal`) rather than read-modify-write.

use crate::{
    core::{
        pricing::{self, MenuItem},
        table,
    },
    entities::{LineItem, Tab, TabStatus, line_item, tab},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A tab together with its line items, as shown on a bill.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TabDetail {
    /// The tab itself
    pub tab: tab::Model,
    /// Line items in insertion order
    pub line_items: Vec<line_item::Model>,
    /// Total units across all line items
    pub item_count: i64,
}

/// Opens a new tab on `table_id` and marks the table unavailable.
///
/// The table row is claimed before anything is read, so a concurrent open on the same
/// table waits for this transaction and then sees the tab it created. Should one still
/// slip through, the partial unique index stops it and it is reported the same way.
///
/// # Errors
/// * `Error::TableNotFound` if the table does not exist.
/// * `Error::TabAlreadyOpen` if the table already has an open tab. Nothing is written.
pub async fn open_tab(db: &DatabaseConnection, table_id: i64) -> Result<tab::Model> {
    let txn = db.begin().await?;

    // First statement must write: it takes the database write lock
    table::set_availability(&txn, table_id, false).await?;

    if let Some(existing) = table::find_open_tab(&txn, table_id).await? {
        warn!(
            "Rejected open on table {}: tab {} is still open",
            table_id, existing.id
        );
        return Err(Error::TabAlreadyOpen { table_id });
    }

    let opened = tab::ActiveModel {
        table_id: Set(table_id),
        status: Set(TabStatus::Open),
        total: Set(0.0),
        opened_at: Set(Utc::now()),
        closed_at: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| match Error::from(e) {
        Error::Conflict { .. } => Error::TabAlreadyOpen { table_id },
        other => other,
    })?;

    txn.commit().await?;

    info!("Opened tab {} on table {}", opened.id, table_id);
    Ok(opened)
}

/// Adds `quantity` units of `item` to an open tab.
///
/// The unit price is copied from the catalog now; the line item and the tab total
/// are written in one transaction.
///
/// # Errors
/// * `Error::InvalidQuantity` if `quantity` is not positive.
/// * `Error::TabNotFound` if the tab does not exist.
/// * `Error::InvalidState` if the tab is closed. The total is not touched.
/// * `Error::MenuItemNotFound` if the referenced product, combo or drink is missing.
/// * `Error::InvalidAmount` if the subtotal or the new total is not a finite amount.
pub async fn add_line_item(
    db: &DatabaseConnection,
    tab_id: i64,
    item: MenuItem,
    quantity: i32,
) -> Result<line_item::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let tab = Tab::find_by_id(tab_id)
        .one(&txn)
        .await?
        .ok_or(Error::TabNotFound { id: tab_id })?;

    if !tab.is_open() {
        warn!("Rejected line item on closed tab {}", tab_id);
        return Err(Error::InvalidState {
            message: format!("tab {tab_id} is closed"),
        });
    }

    let priced = pricing::lookup(&txn, item).await?;
    let line = pricing::quote(priced.price, quantity)?;

    let new_total = tab.total + line.subtotal;
    if !new_total.is_finite() {
        warn!("Rejected line item on tab {}: total would overflow", tab_id);
        return Err(Error::InvalidAmount { amount: new_total });
    }

    let created = line_item::ActiveModel {
        tab_id: Set(tab_id),
        item_kind: Set(item.kind()),
        item_id: Set(item.id()),
        item_name: Set(priced.name),
        quantity: Set(quantity),
        unit_price: Set(line.unit_price),
        subtotal: Set(line.subtotal),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    Tab::update_many()
        .col_expr(
            tab::Column::Total,
            Expr::col(tab::Column::Total).add(line.subtotal),
        )
        .filter(tab::Column::Id.eq(tab_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(
        "Added {} x {} '{}' to tab {} (subtotal {:.2})",
        quantity,
        item.kind(),
        created.item_name,
        tab_id,
        created.subtotal
    );
    Ok(created)
}

/// Closes an open tab and releases its table.
///
/// # Errors
/// * `Error::TabNotFound` if the tab does not exist.
/// * `Error::InvalidState` if the tab is already closed.
pub async fn close_tab(db: &DatabaseConnection, tab_id: i64) -> Result<tab::Model> {
    let txn = db.begin().await?;

    let tab = Tab::find_by_id(tab_id)
        .one(&txn)
        .await?
        .ok_or(Error::TabNotFound { id: tab_id })?;

    if !tab.is_open() {
        warn!("Rejected close on already closed tab {}", tab_id);
        return Err(Error::InvalidState {
            message: format!("tab {tab_id} is already closed"),
        });
    }

    let table_id = tab.table_id;
    let mut active: tab::ActiveModel = tab.into();
    active.status = Set(TabStatus::Closed);
    active.closed_at = Set(Some(Utc::now()));
    let closed = active.update(&txn).await?;

    table::set_availability(&txn, table_id, true).await?;

    txn.commit().await?;

    info!(
        "Closed tab {} on table {} with total {:.2}",
        closed.id, table_id, closed.total
    );
    Ok(closed)
}

/// Finds a tab by its id.
///
/// # Errors
/// Returns `Error::TabNotFound` if the tab does not exist.
pub async fn get_tab(db: &DatabaseConnection, tab_id: i64) -> Result<tab::Model> {
    Tab::find_by_id(tab_id)
        .one(db)
        .await?
        .ok_or(Error::TabNotFound { id: tab_id })
}

/// Lists tabs, newest first, optionally restricted to one status.
pub async fn list_tabs(
    db: &DatabaseConnection,
    status: Option<TabStatus>,
) -> Result<Vec<tab::Model>> {
    let mut query = Tab::find();
    if let Some(status) = status {
        query = query.filter(tab::Column::Status.eq(status));
    }
    query
        .order_by_desc(tab::Column::OpenedAt)
        .order_by_desc(tab::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists a tab's line items in the order they were added.
///
/// # Errors
/// Returns `Error::TabNotFound` if the tab does not exist.
pub async fn list_line_items(
    db: &DatabaseConnection,
    tab_id: i64,
) -> Result<Vec<line_item::Model>> {
    get_tab(db, tab_id).await?;

    LineItem::find()
        .filter(line_item::Column::TabId.eq(tab_id))
        .order_by_asc(line_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a tab with its line items.
///
/// # Errors
/// Returns `Error::TabNotFound` if the tab does not exist.
pub async fn get_tab_detail(db: &DatabaseConnection, tab_id: i64) -> Result<TabDetail> {
    let tab = get_tab(db, tab_id).await?;
    let line_items = tab
        .find_related(LineItem)
        .order_by_asc(line_item::Column::Id)
        .all(db)
        .await?;
    let item_count = line_items.iter().map(|l| i64::from(l.quantity)).sum();

    debug!(
        "Loaded tab {} with {} line items",
        tab_id,
        line_items.len()
    );
    Ok(TabDetail {
        tab,
        line_items,
        item_count,
    })
}

/// Permanently deletes a tab that has no line items.
///
/// Tabs with line items are history and are rejected rather than cascaded. Deleting
/// an empty open tab releases its table in the same transaction.
///
/// # Errors
/// * `Error::TabNotFound` if the tab does not exist.
/// * `Error::TabNotEmpty` if any line item references the tab.
pub async fn delete_tab(db: &DatabaseConnection, tab_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let tab = Tab::find_by_id(tab_id)
        .one(&txn)
        .await?
        .ok_or(Error::TabNotFound { id: tab_id })?;

    let count = LineItem::find()
        .filter(line_item::Column::TabId.eq(tab_id))
        .count(&txn)
        .await?;
    if count > 0 {
        warn!("Refusing to delete tab {} with {} line items", tab_id, count);
        return Err(Error::TabNotEmpty { id: tab_id, count });
    }

    let release_table = tab.is_open().then_some(tab.table_id);
    tab.delete(&txn).await?;

    if let Some(table_id) = release_table {
        table::set_availability(&txn, table_id, true).await?;
    }

    txn.commit().await?;

    info!("Deleted tab {}", tab_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::table::is_table_available;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    async fn line_item_sum(db: &DatabaseConnection, tab_id: i64) -> Result<f64> {
        Ok(list_line_items(db, tab_id)
            .await?
            .iter()
            .map(|l| l.subtotal)
            .sum())
    }

    #[tokio::test]
    async fn test_add_line_item_quantity_validation() -> Result<()> {
        // Quantity is checked before any storage access
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = add_line_item(&db, 1, MenuItem::Product(1), 0).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: 0 })));

        let result = add_line_item(&db, 1, MenuItem::Product(1), -3).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: -3 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_open_tab_marks_table_unavailable() -> Result<()> {
        init_test_tracing();
        let (db, table) = setup_with_table().await?;

        let tab = open_tab(&db, table.id).await?;
        assert_eq!(tab.table_id, table.id);
        assert_eq!(tab.status, TabStatus::Open);
        assert_eq!(tab.total, 0.0);
        assert!(tab.closed_at.is_none());
        assert!(!is_table_available(&db, table.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_open_tab_missing_table() -> Result<()> {
        let db = setup_test_db().await?;
        let result = open_tab(&db, 42).await;
        assert!(matches!(result, Err(Error::TableNotFound { id: 42 })));
        assert!(list_tabs(&db, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_second_open_conflicts_without_side_effects() -> Result<()> {
        let (db, table) = setup_with_table().await?;
        let first = open_tab(&db, table.id).await?;

        let result = open_tab(&db, table.id).await;
        assert!(matches!(result, Err(Error::TabAlreadyOpen { table_id }) if table_id == table.id));

        let tabs = list_tabs(&db, None).await?;
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].id, first.id);
        assert!(!is_table_available(&db, table.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_rejects_second_open_tab() -> Result<()> {
        // Bypass the application check to prove the partial unique index holds on its own
        let (db, table) = setup_with_table().await?;
        open_tab(&db, table.id).await?;

        let raw = tab::ActiveModel {
            table_id: Set(table.id),
            status: Set(TabStatus::Open),
            total: Set(0.0),
            opened_at: Set(Utc::now()),
            closed_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await;
        let err = Error::from(raw.unwrap_err());
        assert!(matches!(err, Error::Conflict { message: _ }));

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_opens_leave_one_open_tab() -> Result<()> {
        // A pooled file database gives each open its own connection
        let dir = tempfile::tempdir()?;
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("cantina.sqlite").display()
        );
        let db = crate::config::database::create_connection(&url).await?;
        crate::config::database::create_tables(&db).await?;
        let table = create_test_table(&db, 7).await?;

        let (first, second) = tokio::join!(open_tab(&db, table.id), open_tab(&db, table.id));

        let results = [first, second];
        let opened: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(opened.len(), 1, "expected exactly one open: {results:?}");
        assert_eq!(opened[0].table_id, table.id);
        let rejected = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert!(
            matches!(rejected, Error::TabAlreadyOpen { .. } | Error::Conflict { .. }),
            "unexpected error: {rejected:?}"
        );

        let open = list_tabs(&db, Some(TabStatus::Open)).await?;
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, opened[0].id);
        assert!(!is_table_available(&db, table.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_line_item_rejects_overflowing_amounts() -> Result<()> {
        let (db, _table, tab) = setup_with_open_tab().await?;
        let huge = create_test_product(&db, "Caviar", 1e308).await?;

        let result = add_line_item(&db, tab.id, MenuItem::Product(huge.id), 2).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));
        assert_eq!(get_tab(&db, tab.id).await?.total, 0.0);
        assert!(list_line_items(&db, tab.id).await?.is_empty());

        // Each subtotal is finite, but the running total would not be
        add_line_item(&db, tab.id, MenuItem::Product(huge.id), 1).await?;
        let result = add_line_item(&db, tab.id, MenuItem::Product(huge.id), 1).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let tab = get_tab(&db, tab.id).await?;
        assert!(tab.total.is_finite());
        assert_eq!(tab.total, 1e308);
        assert_eq!(list_line_items(&db, tab.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_full_tab_scenario() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let table = create_custom_table(&db, 5, 4).await?;
        let empanada = create_test_product(&db, "Empanada", 9.5).await?;
        let soda = create_test_product(&db, "Soda", 3.0).await?;

        let tab = open_tab(&db, table.id).await?;
        assert_eq!(tab.status, TabStatus::Open);
        assert_eq!(tab.total, 0.0);
        assert!(!is_table_available(&db, table.id).await?);

        let first = add_line_item(&db, tab.id, MenuItem::Product(empanada.id), 2).await?;
        assert_eq!(first.unit_price, 9.5);
        assert_eq!(first.subtotal, 19.0);
        assert_eq!(get_tab(&db, tab.id).await?.total, 19.0);

        add_line_item(&db, tab.id, MenuItem::Product(soda.id), 1).await?;
        assert_eq!(get_tab(&db, tab.id).await?.total, 22.0);

        let closed = close_tab(&db, tab.id).await?;
        assert_eq!(closed.status, TabStatus::Closed);
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.total, 22.0);
        assert!(is_table_available(&db, table.id).await?);

        let late = add_line_item(&db, tab.id, MenuItem::Product(soda.id), 1).await;
        assert!(matches!(late, Err(Error::InvalidState { message: _ })));
        assert_eq!(get_tab(&db, tab.id).await?.total, 22.0);

        // Table is free again
        let reopened = open_tab(&db, table.id).await?;
        assert_ne!(reopened.id, tab.id);
        assert_eq!(reopened.total, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_total_matches_sum_of_subtotals() -> Result<()> {
        let (db, _table, tab) = setup_with_open_tab().await?;
        let product = create_test_product(&db, "Milanesa", 12.25).await?;
        let drink = create_test_drink(&db, "Malbec", 7.5).await?;
        let combo = create_test_combo(&db, "Menu del dia", 15.0).await?;

        let items = [
            (MenuItem::Product(product.id), 3),
            (MenuItem::Drink(drink.id), 2),
            (MenuItem::Combo(combo.id), 1),
            (MenuItem::Product(product.id), 1),
        ];
        for (item, qty) in items {
            add_line_item(&db, tab.id, item, qty).await?;
            let total = get_tab(&db, tab.id).await?.total;
            assert_eq!(total, line_item_sum(&db, tab.id).await?);
        }

        assert_eq!(get_tab(&db, tab.id).await?.total, 12.25 * 4.0 + 15.0 + 15.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_line_item_price_is_a_snapshot() -> Result<()> {
        let (db, _table, tab) = setup_with_open_tab().await?;
        let product = create_test_product(&db, "Flan", 4.0).await?;

        let line = add_line_item(&db, tab.id, MenuItem::Product(product.id), 2).await?;
        crate::core::product::update_product(
            &db,
            product.id,
            crate::core::product::ProductInput {
                name: "Flan".to_string(),
                description: None,
                price: 6.0,
            },
        )
        .await?;

        let items = list_line_items(&db, tab.id).await?;
        assert_eq!(items[0].id, line.id);
        assert_eq!(items[0].unit_price, 4.0);
        assert_eq!(items[0].subtotal, 8.0);
        assert_eq!(get_tab(&db, tab.id).await?.total, 8.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_line_item_missing_references() -> Result<()> {
        let (db, _table, tab) = setup_with_open_tab().await?;

        let missing_tab = add_line_item(&db, 999, MenuItem::Product(1), 1).await;
        assert!(matches!(missing_tab, Err(Error::TabNotFound { id: 999 })));

        let missing_item = add_line_item(&db, tab.id, MenuItem::Combo(999), 1).await;
        assert!(matches!(
            missing_item,
            Err(Error::MenuItemNotFound { kind: _, id: 999 })
        ));
        assert_eq!(get_tab(&db, tab.id).await?.total, 0.0);
        assert!(list_line_items(&db, tab.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_close_tab_twice_is_invalid_state() -> Result<()> {
        let (db, table, tab) = setup_with_open_tab().await?;
        close_tab(&db, tab.id).await?;

        let again = close_tab(&db, tab.id).await;
        assert!(matches!(again, Err(Error::InvalidState { message: _ })));
        assert!(is_table_available(&db, table.id).await?);

        let missing = close_tab(&db, 999).await;
        assert!(matches!(missing, Err(Error::TabNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_tabs_filters_by_status() -> Result<()> {
        let db = setup_test_db().await?;
        let t1 = create_test_table(&db, 1).await?;
        let t2 = create_test_table(&db, 2).await?;

        let closed = open_tab(&db, t1.id).await?;
        close_tab(&db, closed.id).await?;
        let open = open_tab(&db, t2.id).await?;

        let all = list_tabs(&db, None).await?;
        assert_eq!(all.len(), 2);

        let open_only = list_tabs(&db, Some(TabStatus::Open)).await?;
        assert_eq!(open_only.len(), 1);
        assert_eq!(open_only[0].id, open.id);

        let closed_only = list_tabs(&db, Some(TabStatus::Closed)).await?;
        assert_eq!(closed_only.len(), 1);
        assert_eq!(closed_only[0].id, closed.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_tab_detail() -> Result<()> {
        let (db, _table, tab) = setup_with_open_tab().await?;
        let product = create_test_product(&db, "Choripan", 6.0).await?;
        let drink = create_test_drink(&db, "Agua", 1.5).await?;
        add_line_item(&db, tab.id, MenuItem::Product(product.id), 2).await?;
        add_line_item(&db, tab.id, MenuItem::Drink(drink.id), 3).await?;

        let detail = get_tab_detail(&db, tab.id).await?;
        assert_eq!(detail.line_items.len(), 2);
        assert_eq!(detail.item_count, 5);
        assert_eq!(detail.tab.total, 16.5);
        assert_eq!(detail.line_items[1].item_name, "Agua");

        let missing = get_tab_detail(&db, 999).await;
        assert!(matches!(missing, Err(Error::TabNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_empty_open_tab_releases_table() -> Result<()> {
        let (db, table, tab) = setup_with_open_tab().await?;

        delete_tab(&db, tab.id).await?;
        assert!(matches!(
            get_tab(&db, tab.id).await,
            Err(Error::TabNotFound { id: _ })
        ));
        assert!(is_table_available(&db, table.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_tab_with_line_items_is_rejected() -> Result<()> {
        let (db, table, tab) = setup_with_open_tab().await?;
        let product = create_test_product(&db, "Locro", 11.0).await?;
        add_line_item(&db, tab.id, MenuItem::Product(product.id), 1).await?;

        let result = delete_tab(&db, tab.id).await;
        assert!(matches!(result, Err(Error::TabNotEmpty { id: _, count: 1 })));

        // Nothing changed
        assert_eq!(get_tab(&db, tab.id).await?.total, 11.0);
        assert!(!is_table_available(&db, table.id).await?);

        let missing = delete_tab(&db, 999).await;
        assert!(matches!(missing, Err(Error::TabNotFound { id: 999 })));

        Ok(())
    }
}
