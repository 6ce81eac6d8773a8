//! Database access layer

pub mod cafes;

/// Embedded migrations, applied at startup and by tests
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
