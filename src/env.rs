use std::path::Path;

use tracing::{info, warn};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://course_recommendation.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub fn load_environment() -> Result<(), Box<dyn std::error::Error>> {
    let is_production =
        dotenvy::var("ROCKET_PROFILE").unwrap_or("development".to_string()) == "production";

    let env_files = if is_production {
        vec!["config/common.env", "config/prod.env", ".secrets.env"]
    } else {
        vec!["config/common.env", "config/dev.env", ".secrets.env"]
    };

    for env_file in env_files {
        load_env_file(env_file)?;
    }

    Ok(())
}

fn load_env_file(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        warn!("Warning: Environment file {} not found, skipping", path);
        return Ok(());
    }

    dotenvy::from_filename_override(path)?;
    info!("Loaded environment from: {}", path);
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = dotenvy::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match dotenvy::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(
                    value = %raw,
                    "Invalid DATABASE_MAX_CONNECTIONS, using {}", DEFAULT_MAX_CONNECTIONS
                );
                DEFAULT_MAX_CONNECTIONS
            }),
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let otlp_endpoint = dotenvy::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|endpoint| !endpoint.trim().is_empty());

        Self {
            database_url,
            max_connections,
            otlp_endpoint,
        }
    }
}
