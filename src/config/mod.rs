/// Database connection and schema creation
pub mod database;

/// Server, store and token settings from the environment
pub mod settings;

/// Asset status vocabulary loading from config.toml
pub mod statuses;
