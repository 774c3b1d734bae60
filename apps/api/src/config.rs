use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::store::DEFAULT_STORE_KEY;

/// Application configuration loaded from environment variables.
/// Every setting has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file backing the key-value store.
    pub store_path: PathBuf,
    /// Key the resume list is saved under.
    pub store_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            store_path: std::env::var("CVWIZARD_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("cvwizard-store.json")),
            store_key: env_or("CVWIZARD_STORE_KEY", DEFAULT_STORE_KEY),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            store_path: PathBuf::from("unused.json"),
            store_key: DEFAULT_STORE_KEY.to_string(),
        }
    }
}
