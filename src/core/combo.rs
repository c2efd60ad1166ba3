//! Combo business logic - bundled meals and their ingredient lists.
//!
//! A combo and its ingredient rows are always written together in one transaction.
//! Updating a combo replaces the whole ingredient list; deleting it cascades to the
//! ingredients but is refused while kitchen orders still point at it.

use crate::{
    core::{require_amount, require_text},
    entities::{Combo, Ingredient, combo, ingredient},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fields accepted when creating or replacing a combo.
#[derive(Clone, Debug, Deserialize)]
pub struct ComboInput {
    /// Menu name
    pub name: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Price of the whole combo
    pub price: f64,
    /// Ingredient names, in display order
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// A combo together with its ingredient names.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComboWithIngredients {
    /// The combo row
    #[serde(flatten)]
    pub combo: combo::Model,
    /// Ingredient names in insertion order
    pub ingredients: Vec<String>,
}

fn clean_ingredients(ingredients: &[String]) -> Result<Vec<String>> {
    ingredients
        .iter()
        .map(|name| require_text(name, "Ingredient name"))
        .collect()
}

async fn insert_ingredients<C>(db: &C, combo_id: i64, names: &[String]) -> Result<()>
where
    C: ConnectionTrait,
{
    if names.is_empty() {
        return Ok(());
    }
    let rows = names.iter().map(|name| ingredient::ActiveModel {
        name: Set(name.clone()),
        combo_id: Set(combo_id),
        ..Default::default()
    });
    Ingredient::insert_many(rows).exec(db).await?;
    Ok(())
}

/// Retrieves all combos, ordered by name.
pub async fn list_combos(db: &DatabaseConnection) -> Result<Vec<combo::Model>> {
    Combo::find()
        .order_by_asc(combo::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a combo by id.
///
/// # Errors
/// Returns `Error::NotFound` if no combo has this id.
pub async fn get_combo(db: &DatabaseConnection, combo_id: i64) -> Result<combo::Model> {
    Combo::find_by_id(combo_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "combo",
            id: combo_id,
        })
}

/// Finds a combo by its exact name.
pub async fn get_combo_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<combo::Model>> {
    Combo::find()
        .filter(combo::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists the ingredient names of a combo.
///
/// # Errors
/// Returns `Error::NotFound` if the combo does not exist.
pub async fn get_ingredients(db: &DatabaseConnection, combo_id: i64) -> Result<Vec<String>> {
    let combo = get_combo(db, combo_id).await?;
    let rows = combo
        .find_related(Ingredient)
        .order_by_asc(ingredient::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|row| row.name).collect())
}

/// Loads a combo with its ingredient names.
pub async fn get_combo_with_ingredients(
    db: &DatabaseConnection,
    combo_id: i64,
) -> Result<ComboWithIngredients> {
    let combo = get_combo(db, combo_id).await?;
    let ingredients = get_ingredients(db, combo_id).await?;
    Ok(ComboWithIngredients { combo, ingredients })
}

/// Creates a combo and its ingredient rows.
///
/// # Errors
/// Returns `Error::Validation` for a blank combo or ingredient name and
/// `Error::InvalidAmount` for a bad price.
pub async fn create_combo(
    db: &DatabaseConnection,
    input: ComboInput,
) -> Result<ComboWithIngredients> {
    let name = require_text(&input.name, "Combo name")?;
    let price = require_amount(input.price)?;
    let ingredients = clean_ingredients(&input.ingredients)?;

    let txn = db.begin().await?;
    let combo = combo::ActiveModel {
        name: Set(name),
        description: Set(input.description),
        price: Set(price),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    insert_ingredients(&txn, combo.id, &ingredients).await?;
    txn.commit().await?;

    info!(
        "Created combo '{}' at {:.2} with {} ingredients",
        combo.name,
        combo.price,
        ingredients.len()
    );
    Ok(ComboWithIngredients { combo, ingredients })
}

/// Replaces a combo's fields and its entire ingredient list.
pub async fn update_combo(
    db: &DatabaseConnection,
    combo_id: i64,
    input: ComboInput,
) -> Result<ComboWithIngredients> {
    let name = require_text(&input.name, "Combo name")?;
    let price = require_amount(input.price)?;
    let ingredients = clean_ingredients(&input.ingredients)?;

    let txn = db.begin().await?;
    let mut combo: combo::ActiveModel = Combo::find_by_id(combo_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "combo",
            id: combo_id,
        })?
        .into();
    combo.name = Set(name);
    combo.description = Set(input.description);
    combo.price = Set(price);
    let combo = combo.update(&txn).await?;

    Ingredient::delete_many()
        .filter(ingredient::Column::ComboId.eq(combo_id))
        .exec(&txn)
        .await?;
    insert_ingredients(&txn, combo_id, &ingredients).await?;
    txn.commit().await?;

    Ok(ComboWithIngredients { combo, ingredients })
}

/// Deletes a combo together with its ingredients.
///
/// # Errors
/// Returns `Error::NotFound` if missing and `Error::ForeignKey` if orders reference it.
pub async fn delete_combo(db: &DatabaseConnection, combo_id: i64) -> Result<()> {
    get_combo(db, combo_id).await?.delete(db).await?;
    info!("Deleted combo {}", combo_id);
    Ok(())
}
