//! Client registry - guests known to the restaurant.

use crate::{
    core::{require_email, require_text},
    entities::{Client, client},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when creating or replacing a client.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientInput {
    /// Given name
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: Option<String>,
    /// Contact email, must be unique
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
}

/// Lists all clients ordered by id.
pub async fn list_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>> {
    Client::find()
        .order_by_asc(client::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a client by id.
///
/// # Errors
/// Returns `Error::NotFound` if no client has this id.
pub async fn get_client(db: &DatabaseConnection, client_id: i64) -> Result<client::Model> {
    Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "client",
            id: client_id,
        })
}

/// Registers a client.
///
/// # Errors
/// Returns `Error::Validation` for a blank name or malformed email and
/// `Error::Conflict` if the email is already registered.
pub async fn create_client(db: &DatabaseConnection, input: ClientInput) -> Result<client::Model> {
    let first_name = require_text(&input.first_name, "First name")?;
    let email = require_email(&input.email)?;

    let client = client::ActiveModel {
        first_name: Set(first_name),
        last_name: Set(input.last_name),
        email: Set(email),
        phone: Set(input.phone),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Registered client {} <{}>", client.id, client.email);
    Ok(client)
}

/// Replaces a client's details.
pub async fn update_client(
    db: &DatabaseConnection,
    client_id: i64,
    input: ClientInput,
) -> Result<client::Model> {
    let first_name = require_text(&input.first_name, "First name")?;
    let email = require_email(&input.email)?;

    let mut client: client::ActiveModel = get_client(db, client_id).await?.into();
    client.first_name = Set(first_name);
    client.last_name = Set(input.last_name);
    client.email = Set(email);
    client.phone = Set(input.phone);

    client.update(db).await.map_err(Into::into)
}

/// Deletes a client.
///
/// # Errors
/// Returns `Error::NotFound` if missing and `Error::ForeignKey` while reservations
/// or orders still reference the client.
pub async fn delete_client(db: &DatabaseConnection, client_id: i64) -> Result<()> {
    get_client(db, client_id).await?.delete(db).await?;
    info!("Deleted client {}", client_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_client_crud() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "ana@example.com").await?;
        assert_eq!(client.first_name, "Ana");

        let updated = update_client(
            &db,
            client.id,
            ClientInput {
                first_name: "Ana Maria".to_string(),
                last_name: Some("Lopez".to_string()),
                email: "ana@example.com".to_string(),
                phone: Some("555-0100".to_string()),
            },
        )
        .await?;
        assert_eq!(updated.last_name.as_deref(), Some("Lopez"));
        assert_eq!(list_clients(&db).await?, vec![updated]);

        delete_client(&db, client.id).await?;
        assert!(matches!(
            get_client(&db, client.id).await,
            Err(Error::NotFound {
                entity: "client",
                id: _
            })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_client(&db, "dup@example.com").await?;

        let result = create_test_client(&db, "dup@example.com").await;
        assert!(matches!(result, Err(Error::Conflict { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_client_with_reservation_is_rejected() -> Result<()> {
        let (db, table) = setup_with_table().await?;
        let client = create_test_client(&db, "busy@example.com").await?;
        crate::core::reservation::create_reservation(
            &db,
            crate::core::reservation::ReservationInput {
                client_id: client.id,
                table_id: table.id,
                reserved_for: Utc::now(),
            },
        )
        .await?;

        let result = delete_client(&db, client.id).await;
        assert!(matches!(result, Err(Error::ForeignKey { message: _ })));

        Ok(())
    }
}
