//! Drink business logic - the beverage side of the menu catalog.

use crate::{
    core::{require_amount, require_text},
    entities::{Drink, drink},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when creating or replacing a drink.
#[derive(Clone, Debug, Deserialize)]
pub struct DrinkInput {
    /// Menu name
    pub name: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price, non-negative
    pub price: f64,
}

/// Retrieves all drinks, ordered by name.
pub async fn list_drinks(db: &DatabaseConnection) -> Result<Vec<drink::Model>> {
    Drink::find()
        .order_by_asc(drink::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a drink by id.
///
/// # Errors
/// Returns `Error::NotFound` if no drink has this id.
pub async fn get_drink(db: &DatabaseConnection, drink_id: i64) -> Result<drink::Model> {
    Drink::find_by_id(drink_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "drink",
            id: drink_id,
        })
}

/// Finds a drink by its exact name.
pub async fn get_drink_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<drink::Model>> {
    Drink::find()
        .filter(drink::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a drink.
///
/// # Errors
/// Returns `Error::Validation` for a blank name and `Error::InvalidAmount` for a
/// negative or non-finite price.
pub async fn create_drink(db: &DatabaseConnection, input: DrinkInput) -> Result<drink::Model> {
    let name = require_text(&input.name, "Drink name")?;
    let price = require_amount(input.price)?;

    let drink = drink::ActiveModel {
        name: Set(name),
        description: Set(input.description),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created drink '{}' at {:.2}", drink.name, drink.price);
    Ok(drink)
}

/// Replaces a drink's fields.
pub async fn update_drink(
    db: &DatabaseConnection,
    drink_id: i64,
    input: DrinkInput,
) -> Result<drink::Model> {
    let name = require_text(&input.name, "Drink name")?;
    let price = require_amount(input.price)?;

    let mut drink: drink::ActiveModel = get_drink(db, drink_id).await?.into();
    drink.name = Set(name);
    drink.description = Set(input.description);
    drink.price = Set(price);

    drink.update(db).await.map_err(Into::into)
}

/// Deletes a drink.
pub async fn delete_drink(db: &DatabaseConnection, drink_id: i64) -> Result<()> {
    get_drink(db, drink_id).await?.delete(db).await?;
    info!("Deleted drink {}", drink_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_drink_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_drink(
            &db,
            DrinkInput {
                name: " ".to_string(),
                description: None,
                price: 2.0,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = create_drink(
            &db,
            DrinkInput {
                name: "Agua".to_string(),
                description: None,
                price: f64::INFINITY,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_drink_crud() -> Result<()> {
        let db = setup_test_db().await?;
        let drink = create_test_drink(&db, "Malbec", 7.5).await?;
        assert_eq!(get_drink_by_name(&db, "Malbec").await?.unwrap().id, drink.id);

        let updated = update_drink(
            &db,
            drink.id,
            DrinkInput {
                name: "Malbec Reserva".to_string(),
                description: Some("Mendoza".to_string()),
                price: 11.0,
            },
        )
        .await?;
        assert_eq!(updated.price, 11.0);
        assert_eq!(list_drinks(&db).await?, vec![updated]);

        delete_drink(&db, drink.id).await?;
        assert!(matches!(
            get_drink(&db, drink.id).await,
            Err(Error::NotFound {
                entity: "drink",
                id: _
            })
        ));

        Ok(())
    }
}
