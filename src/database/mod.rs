pub mod schema;

pub use schema::*;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::error::AppError;

/// Opens a pool with foreign keys enforced, creating the database file if
/// needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<Pool<Sqlite>, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates any missing tables. Safe to run on every startup.
#[instrument(skip(pool))]
pub async fn init_schema(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    info!("Ensuring database schema");
    sqlx::raw_sql(CURRENT_SCHEMA).execute(pool).await?;
    Ok(())
}
