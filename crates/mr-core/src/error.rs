//! Error types for mr-core

use thiserror::Error;

/// Core error type for migrun
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Migrations directory not found
    #[error("[E003] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// E004: Migration name is empty, names no file, or escapes the migrations directory
    #[error("[E004] Invalid migration name '{name}': {reason}")]
    InvalidMigrationName { name: String, reason: String },

    /// E005: Migration listed more than once
    #[error("[E005] Duplicate migration in manifest: {name}")]
    DuplicateMigration { name: String },

    /// E006: Named target is not defined in the config
    #[error("[E006] Unknown target '{name}'. Available targets: {available}")]
    UnknownTarget { name: String, available: String },

    /// E007: Remote endpoint URL missing or malformed
    #[error("[E007] Invalid remote URL: {message}")]
    InvalidRemoteUrl { message: String },

    /// E008: Service credential could not be resolved
    #[error("[E008] Service key not set: export {env_var} or pass --service-key")]
    MissingServiceKey { env_var: String },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E015: YAML parse error
    #[error("[E015] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
