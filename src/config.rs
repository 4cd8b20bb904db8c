//! Configuration file support
//!
//! Loads config from ~/.explainit/config.toml

use serde::Deserialize;
use std::path::PathBuf;

/// Fallback backend address (the analysis server's local default)
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Configuration for the ExplainIt client
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Analysis backend base URL
    pub api_base: Option<String>,
}

impl Config {
    /// Load config from ~/.explainit/config.toml
    pub fn load() -> Self {
        let path = config_path();

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".explainit")
        .join("config.toml")
}

/// Resolve the backend base URL.
/// `flag` already folds in the CLI flag and the env var (clap `env`);
/// after that comes the config file, then the local default.
pub fn resolve_api_base(flag: Option<String>, config: &Config) -> String {
    flag.or_else(|| config.api_base.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}
