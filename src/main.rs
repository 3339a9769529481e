use anyhow::Context;
use course_recommender::database::{connect, init_schema};
use course_recommender::env::{AppConfig, load_environment};
use course_recommender::init_rocket;
use course_recommender::telemetry::init_tracing;
use tracing::{error, info};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = load_environment() {
        eprintln!("Failed to load environment files: {}", e);
    }

    let config = AppConfig::from_env();
    let _guard = init_tracing(config.otlp_endpoint.as_deref());

    info!(database_url = %config.database_url, "Connecting to SQLite database");
    let pool = connect(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to SQLite database")?;

    if let Err(e) = init_schema(&pool).await {
        error!("Failed to create database schema: {}", e);
        return Err(e).context("Database schema setup failed");
    }

    let _rocket = init_rocket(pool)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server terminated with an error: {}", e))?;

    Ok(())
}
