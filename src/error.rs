//! Typed errors for the journal collaborators (store, profiles, import, entry).
//!
//! The aggregation engine itself never fails; everything that touches files or
//! foreign data reports through [`JournalError`], which converts cleanly into
//! `anyhow::Error` at the binary boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Persisted state exists but cannot be read back.
    #[error("corrupt state in {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("unsupported schema version {found} (this build reads up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("no trade with id {0}")]
    UnknownTrade(String),

    #[error("no open position matches {0}")]
    NoOpenPosition(String),

    #[error("no user with id {0}")]
    UnknownUser(String),

    #[error("user {0} already exists")]
    DuplicateUser(String),

    #[error("cannot remove {0}: at least one profile must remain")]
    LastUser(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Import record could not be normalized.
    #[error("import error: {0}")]
    Import(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, JournalError>;
