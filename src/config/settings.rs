//! Server settings loaded from environment variables.
//!
//! Values come from the process environment, which `main` populates from `.env`
//! via `dotenvy` before calling [`Settings::from_env`]. Every setting has a default
//! so the server starts with no configuration at all.

use crate::config::database;
use crate::errors::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default HTTP listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default seed file location.
pub const DEFAULT_SEED_FILE: &str = "config.toml";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Sea-orm connection URL
    pub database_url: String,
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// TOML file with tables and menu entries to seed
    pub seed_file: PathBuf,
}

impl Settings {
    /// Reads `DATABASE_URL`, `CANTINA_BIND_ADDR` and `CANTINA_SEED_FILE`.
    ///
    /// # Errors
    /// Returns `Error::Config` if `CANTINA_BIND_ADDR` is not a valid socket address.
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("CANTINA_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let seed_file =
            std::env::var("CANTINA_SEED_FILE").unwrap_or_else(|_| DEFAULT_SEED_FILE.to_string());

        Ok(Self {
            database_url: database::get_database_url(),
            bind_addr: parse_bind_addr(&bind_addr)?,
            seed_file: PathBuf::from(seed_file),
        })
    }
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr> {
    raw.parse().map_err(|e| Error::Config {
        message: format!("Invalid CANTINA_BIND_ADDR '{raw}': {e}"),
    })
}
