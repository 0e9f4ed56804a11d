use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::trending::DEFAULT_TABLE;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    /// Project endpoint, e.g. `https://abc123.supabase.co`.
    pub url: String,

    /// Anon/service key sent with every request. No session is established;
    /// each call authenticates with this static key alone.
    pub key: String,

    /// Target table for search counters.
    pub table: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase: SupabaseConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment
    /// overrides. The original deployment configured this module purely from
    /// the environment, so `TRENDARR_SUPABASE_*` variables win over file
    /// values.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TRENDARR_SUPABASE_URL") {
            self.supabase.url = url;
        }
        if let Ok(key) = std::env::var("TRENDARR_SUPABASE_KEY") {
            self.supabase.key = key;
        }
        if let Ok(table) = std::env::var("TRENDARR_SUPABASE_TABLE") {
            self.supabase.table = table;
        }
    }

    /// Startup validation: the store endpoint and key are required before
    /// any operation can run, so their absence is fatal here rather than on
    /// the first request.
    pub fn validate(&self) -> Result<()> {
        if self.supabase.url.is_empty() {
            anyhow::bail!("Supabase URL is required (supabase.url or TRENDARR_SUPABASE_URL)");
        }

        if self.supabase.key.is_empty() {
            anyhow::bail!("Supabase key is required (supabase.key or TRENDARR_SUPABASE_KEY)");
        }

        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("trendarr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".trendarr").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.supabase.table, "trending_searches");
        assert!(config.supabase.url.is_empty());
        assert!(config.supabase.key.is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_endpoint() {
        let config = Config::default();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.supabase.url = "https://abc123.supabase.co".to_string();
        assert!(config.validate().is_err());

        config.supabase.key = "anon-key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[supabase]"));
        assert!(toml_str.contains("table = \"trending_searches\""));
    }

    #[test]
    fn test_config_deserialization_keeps_defaults() {
        let toml_str = r#"
            [supabase]
            url = "https://abc123.supabase.co"
            key = "anon-key"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.supabase.url, "https://abc123.supabase.co");
        assert_eq!(config.supabase.table, "trending_searches");
    }
}
