use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; catalog paths are optional overrides.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file replacing the built-in role catalog.
    pub role_catalog_path: Option<PathBuf>,
    /// JSON file replacing the built-in synonym table.
    pub synonym_table_path: Option<PathBuf>,
    /// Upper bound on skills accepted in one request.
    pub max_user_skills: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            role_catalog_path: None,
            synonym_table_path: None,
            max_user_skills: 200,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: match std::env::var("PORT") {
                Ok(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                Err(_) => defaults.port,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            role_catalog_path: optional_path("ROLE_CATALOG_PATH"),
            synonym_table_path: optional_path("SYNONYM_TABLE_PATH"),
            max_user_skills: match std::env::var("MAX_USER_SKILLS") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_USER_SKILLS must be a non-negative integer")?,
                Err(_) => defaults.max_user_skills,
            },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
