/// Database configuration and connection management
pub mod database;

/// Menu and floor-plan seeding from config.toml
pub mod seed;

/// Server settings loaded from environment variables
pub mod settings;
