//! Configuration management using config.toml, with `.env` / environment overrides

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_CLASSIFY_PATH: &str = "/api/classify-image";
pub const DEFAULT_NUTRITION_PATH: &str = "/api/nutrition";
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:4000/graphql";

/// Overrides `server_url`
pub const ENV_SERVER_URL: &str = "NUTRITION_SERVER_URL";
/// Overrides `graphql_endpoint`
pub const ENV_GRAPHQL_ENDPOINT: &str = "GRAPHQL_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the classification and nutrition paths are resolved against
    pub server_url: String,

    pub classify_path: String,

    pub nutrition_path: String,

    pub graphql_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            classify_path: DEFAULT_CLASSIFY_PATH.to_string(),
            nutrition_path: DEFAULT_NUTRITION_PATH.to_string(),
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Load config.toml from the working directory, then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_from(CONFIG_PATH);
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load config from `path`, creating a default file if it doesn't exist
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("Error parsing {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Error reading {}: {}", path.display(), e),
            }
            // Leave a broken file alone so the user can fix it
            return Config::default();
        }

        let config = Config::default();
        if let Err(e) = config.save_to(path) {
            tracing::debug!("Could not create {}: {}", path.display(), e);
        }
        config
    }

    /// Replace values with any set (non-empty) override
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = get(ENV_SERVER_URL) {
            self.server_url = url;
        }
        if let Some(endpoint) = get(ENV_GRAPHQL_ENDPOINT) {
            self.graphql_endpoint = endpoint;
        }
    }

    /// Save config to config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(CONFIG_PATH)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn classify_url(&self) -> String {
        join_url(&self.server_url, &self.classify_path)
    }

    pub fn nutrition_url(&self) -> String {
        join_url(&self.server_url, &self.nutrition_path)
    }

    /// Both collaborator URLs need a server and a path
    pub fn is_valid(&self) -> bool {
        !self.server_url.trim().is_empty()
            && !self.classify_path.trim().is_empty()
            && !self.nutrition_path.trim().is_empty()
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    format!("{}/{}", base, path)
}
