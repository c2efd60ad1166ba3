//! Floor plan and menu seeding from config.toml
//!
//! The seed file describes the tables, menu and payment methods a fresh install should
//! start with. Seeding is idempotent: entries that already exist (tables by number,
//! menu items by name, payment methods by kind) are left exactly as they are, so edits
//! made through the API survive a restart.

use crate::{
    core::{
        combo::{self, ComboInput},
        drink::{self, DrinkInput},
        payment::{self, PaymentMethodInput},
        product::{self, ProductInput},
        table,
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Structure of the whole seed file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct SeedConfig {
    /// Dining tables to create
    #[serde(default)]
    pub tables: Vec<TableSeed>,
    /// Food products
    #[serde(default)]
    pub products: Vec<MenuItemSeed>,
    /// Drinks
    #[serde(default)]
    pub drinks: Vec<MenuItemSeed>,
    /// Combos with their ingredients
    #[serde(default)]
    pub combos: Vec<ComboSeed>,
    /// Accepted payment methods
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethodSeed>,
}

/// A `[[tables]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct TableSeed {
    /// Table number
    pub number: i32,
    /// Seats
    pub capacity: i32,
}

/// A `[[products]]` or `[[drinks]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemSeed {
    /// Menu name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
}

/// A `[[combos]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct ComboSeed {
    /// Menu name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Price of the combo
    pub price: f64,
    /// Ingredient names
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// A `[[payment_methods]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodSeed {
    /// Method name, e.g. `"cash"`
    pub kind: String,
}

/// Number of rows each seeding pass inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Tables created
    pub tables: usize,
    /// Products created
    pub products: usize,
    /// Drinks created
    pub drinks: usize,
    /// Combos created
    pub combos: usize,
    /// Payment methods created
    pub payment_methods: usize,
}

impl SeedReport {
    /// Total rows created across all sections.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.tables + self.products + self.drinks + self.combos + self.payment_methods
    }
}

/// Loads the seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

/// Inserts every configured entry that does not exist yet.
///
/// # Errors
/// Returns the first validation or database error encountered. Entries seeded before
/// the failure stay in place; rerunning picks up where it stopped.
pub async fn seed_database(db: &DatabaseConnection, config: &SeedConfig) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for seed in &config.tables {
        if table::get_table_by_number(db, seed.number).await?.is_some() {
            debug!("Table #{} already exists, skipping", seed.number);
            continue;
        }
        table::create_table(db, seed.number, seed.capacity).await?;
        report.tables += 1;
    }

    for seed in &config.products {
        if product::get_product_by_name(db, &seed.name).await?.is_some() {
            debug!("Product '{}' already exists, skipping", seed.name);
            continue;
        }
        product::create_product(
            db,
            ProductInput {
                name: seed.name.clone(),
                description: seed.description.clone(),
                price: seed.price,
            },
        )
        .await?;
        report.products += 1;
    }

    for seed in &config.drinks {
        if drink::get_drink_by_name(db, &seed.name).await?.is_some() {
            debug!("Drink '{}' already exists, skipping", seed.name);
            continue;
        }
        drink::create_drink(
            db,
            DrinkInput {
                name: seed.name.clone(),
                description: seed.description.clone(),
                price: seed.price,
            },
        )
        .await?;
        report.drinks += 1;
    }

    for seed in &config.combos {
        if combo::get_combo_by_name(db, &seed.name).await?.is_some() {
            debug!("Combo '{}' already exists, skipping", seed.name);
            continue;
        }
        combo::create_combo(
            db,
            ComboInput {
                name: seed.name.clone(),
                description: seed.description.clone(),
                price: seed.price,
                ingredients: seed.ingredients.clone(),
            },
        )
        .await?;
        report.combos += 1;
    }

    for seed in &config.payment_methods {
        if payment::get_payment_method_by_kind(db, &seed.kind)
            .await?
            .is_some()
        {
            debug!("Payment method '{}' already exists, skipping", seed.kind);
            continue;
        }
        payment::create_payment_method(
            db,
            PaymentMethodInput {
                kind: seed.kind.clone(),
            },
        )
        .await?;
        report.payment_methods += 1;
    }

    info!(
        "Seeding created {} tables, {} products, {} drinks, {} combos, {} payment methods",
        report.tables, report.products, report.drinks, report.combos, report.payment_methods
    );
    Ok(report)
}

/// Seeds from `path` if the file exists.
///
/// Returns `Ok(None)` when there is no seed file.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be parsed, plus any error
/// from [`seed_database`].
pub async fn seed_from_file(
    db: &DatabaseConnection,
    path: &Path,
) -> Result<Option<SeedReport>> {
    if !path.exists() {
        info!("No seed file at {}, skipping seeding", path.display());
        return Ok(None);
    }

    let config = load_config(path)?;
    seed_database(db, &config).await.map(Some)
}
