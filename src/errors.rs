//! Unified error type for Cantina.
//!
//! Every fallible operation in `core`, `config` and `api` returns [`Result`].
//! Storage errors are classified on the way in: unique-index violations become
//! [`Error::Conflict`] and foreign-key violations become [`Error::ForeignKey`].

use crate::entities::line_item::ItemKind;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Coarse classification of an [`Error`], used to pick an HTTP status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist
    NotFound,
    /// The write would violate a uniqueness or ownership rule
    Conflict,
    /// The operation is illegal for the entity's current state
    InvalidState,
    /// The request itself is malformed
    Validation,
    /// Storage, configuration or I/O failure
    Internal,
}

/// All errors surfaced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Unclassified database failure
    #[error("Database error: {0}")]
    Database(DbErr),

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input failed validation before reaching storage
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A monetary amount was negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A line-item quantity was zero or negative
    #[error("Invalid quantity: {quantity} (must be a positive integer)")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// No dining table with this id
    #[error("Table {id} not found")]
    TableNotFound {
        /// Requested table id
        id: i64,
    },

    /// No tab with this id
    #[error("Tab {id} not found")]
    TabNotFound {
        /// Requested tab id
        id: i64,
    },

    /// The product, combo or drink referenced by a line item does not exist
    #[error("{kind} {id} not found")]
    MenuItemNotFound {
        /// Which catalog was searched
        kind: ItemKind,
        /// Requested item id
        id: i64,
    },

    /// Generic lookup miss for registry entities
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name, e.g. `"client"`
        entity: &'static str,
        /// Requested id
        id: i64,
    },

    /// The table already has a tab in the open state
    #[error("Table {table_id} already has an open tab")]
    TabAlreadyOpen {
        /// Table the open was attempted on
        table_id: i64,
    },

    /// A unique value is already taken
    #[error("Conflict: {message}")]
    Conflict {
        /// Storage-provided detail
        message: String,
    },

    /// A foreign-key constraint rejected the write
    #[error("Foreign key constraint violated: {message}")]
    ForeignKey {
        /// Storage-provided detail
        message: String,
    },

    /// The operation is not allowed in the tab's current state
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Why the transition was refused
        message: String,
    },

    /// Deleting a tab that still carries line items
    #[error("Tab {id} has {count} line items and cannot be deleted")]
    TabNotEmpty {
        /// Tab id
        id: i64,
        /// Number of line items found
        count: u64,
    },

    /// Deleting a table that tabs still reference
    #[error("Table {id} is referenced by {count} tabs and cannot be deleted")]
    TableInUse {
        /// Table id
        id: i64,
        /// Number of tabs found
        count: u64,
    },
}

impl Error {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TableNotFound { .. }
            | Self::TabNotFound { .. }
            | Self::MenuItemNotFound { .. }
            | Self::NotFound { .. } => ErrorKind::NotFound,
            Self::TabAlreadyOpen { .. }
            | Self::Conflict { .. }
            | Self::ForeignKey { .. }
            | Self::TabNotEmpty { .. }
            | Self::TableInUse { .. } => ErrorKind::Conflict,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::Validation { .. } | Self::InvalidAmount { .. } | Self::InvalidQuantity { .. } => {
                ErrorKind::Validation
            }
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => ErrorKind::Internal,
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::Conflict { message },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => Self::ForeignKey { message },
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
