//! Personal trade journal: P&L aggregation with drill-down, plus the local
//! store, profile, import and quick-entry collaborators that feed it.

pub mod activity;
pub mod config;
pub mod dashboard;
pub mod drill;
pub mod error;
pub mod import;
pub mod parser;
pub mod period;
pub mod profiles;
pub mod series;
pub mod state;
pub mod summary;
pub mod types;
pub mod utils;
