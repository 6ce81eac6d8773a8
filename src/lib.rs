//! cafe-api — Cafe & Wifi directory service
//!
//! A small HTTP API over a single table of cafe records:
//!
//! - **API** (`api`): axum routes and JSON handlers
//! - **Storage** (`db`): SQLite-backed cafe queries via sqlx
//! - **Config** (`config`): environment-driven configuration
//! - **State** (`state`): shared connection pool + delete credential

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
