//! Configuration for the indexer binary.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Top-level configuration, loaded from `config/config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexerConfig {
    /// Environment variable holding the PostgreSQL connection string.
    #[serde(default = "default_database_url_env_var")]
    pub database_url_env_var: String,

    /// Capacity of the receipt channel between the host feed and the engine.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_database_url_env_var() -> String {
    "DATABASE_URL".to_string()
}

fn default_channel_capacity() -> usize {
    1000
}

impl IndexerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file at {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let config: IndexerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.database_url_env_var, "DATABASE_URL");
        assert_eq!(config.channel_capacity, 1000);
    }

    #[test]
    fn test_explicit_values() {
        let config: IndexerConfig = serde_json::from_str(
            r#"{"database_url_env_var": "HOTGAME_DB_URL", "channel_capacity": 64}"#,
        )
        .unwrap();
        assert_eq!(config.database_url_env_var, "HOTGAME_DB_URL");
        assert_eq!(config.channel_capacity, 64);
    }
}
