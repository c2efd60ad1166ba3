//! Employee registry.

use crate::{
    core::{require_email, require_text},
    entities::{Employee, employee},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields accepted when hiring or updating an employee.
#[derive(Clone, Debug, Deserialize)]
pub struct EmployeeInput {
    /// Full name
    pub name: String,
    /// Position, e.g. `"waiter"`
    pub role: String,
    /// Contact email, must be unique
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
}

/// Lists employees by name.
pub async fn list_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    Employee::find()
        .order_by_asc(employee::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an employee by id.
///
/// # Errors
/// Returns `Error::NotFound` if no employee has this id.
pub async fn get_employee(db: &DatabaseConnection, employee_id: i64) -> Result<employee::Model> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "employee",
            id: employee_id,
        })
}

/// Adds an employee.
///
/// # Errors
/// Returns `Error::Validation` for blank fields and `Error::Conflict` for a taken email.
pub async fn create_employee(
    db: &DatabaseConnection,
    input: EmployeeInput,
) -> Result<employee::Model> {
    let employee = employee::ActiveModel {
        name: Set(require_text(&input.name, "Employee name")?),
        role: Set(require_text(&input.role, "Role")?),
        email: Set(require_email(&input.email)?),
        phone: Set(input.phone),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Added employee {} ({})", employee.name, employee.role);
    Ok(employee)
}

/// Replaces an employee's details.
pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i64,
    input: EmployeeInput,
) -> Result<employee::Model> {
    let name = require_text(&input.name, "Employee name")?;
    let role = require_text(&input.role, "Role")?;
    let email = require_email(&input.email)?;

    let mut employee: employee::ActiveModel = get_employee(db, employee_id).await?.into();
    employee.name = Set(name);
    employee.role = Set(role);
    employee.email = Set(email);
    employee.phone = Set(input.phone);

    employee.update(db).await.map_err(Into::into)
}

/// Removes an employee.
pub async fn delete_employee(db: &DatabaseConnection, employee_id: i64) -> Result<()> {
    get_employee(db, employee_id).await?.delete(db).await?;
    info!("Removed employee {}", employee_id);
    Ok(())
}
