//! User configuration
//!
//! Reads `<config dir>/kaomo/config.toml`. Every key is optional; a missing
//! file means all defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::ranking::{FieldWeights, RankingOptions, DEFAULT_COST_CEILING};
use crate::recency::DEFAULT_RECENT_CAPACITY;
use crate::store::{JsonFileStore, StoreResult, DEFAULT_HISTORY_CAPACITY};

pub const CONFIG_ENV_VAR: &str = "KAOMO_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No config directory available on this platform")]
    ConfigDirUnavailable,

    #[error("Config validation error: {0}")]
    InvalidConfig(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub cost_ceiling: f64,
    pub tag_weight: f64,
    pub category_weight: f64,
    pub glyph_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let weights = FieldWeights::default();
        Self {
            cost_ceiling: DEFAULT_COST_CEILING,
            tag_weight: weights.tags,
            category_weight: weights.category,
            glyph_weight: weights.glyph,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub recent_capacity: usize,
    pub history_capacity: usize,
    pub grid_columns: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            grid_columns: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data dir
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// `<platform config dir>/kaomo/config.toml`
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("kaomo").join("config.toml"))
            .ok_or(ConfigError::ConfigDirUnavailable)
    }

    /// `$KAOMO_CONFIG` when set, else the default path
    pub fn resolve_path() -> ConfigResult<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Self::default_path(),
        }
    }

    /// Load and validate. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let s = &self.search;
        for (name, weight) in [
            ("tag_weight", s.tag_weight),
            ("category_weight", s.category_weight),
            ("glyph_weight", s.glyph_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::InvalidConfig(format!(
                    "search.{name} must be within [0, 1], got {weight}"
                )));
            }
        }
        if !(s.cost_ceiling > 0.0 && s.cost_ceiling <= 1.0) {
            return Err(ConfigError::InvalidConfig(format!(
                "search.cost_ceiling must be within (0, 1], got {}",
                s.cost_ceiling
            )));
        }

        let session = &self.session;
        for (name, value) in [
            ("recent_capacity", session.recent_capacity),
            ("history_capacity", session.history_capacity),
            ("grid_columns", session.grid_columns),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidConfig(format!(
                    "session.{name} must be at least 1"
                )));
            }
        }
        Ok(())
    }

    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            weights: FieldWeights {
                tags: self.search.tag_weight,
                category: self.search.category_weight,
                glyph: self.search.glyph_weight,
            },
            cost_ceiling: self.search.cost_ceiling,
        }
    }

    pub fn data_dir(&self) -> StoreResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => JsonFileStore::default_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults_match_engine_constants() {
        let config = Config::default();
        assert_eq!(config.ranking_options(), RankingOptions::default());
        assert_eq!(config.session.recent_capacity, 8);
        assert_eq!(config.session.history_capacity, 20);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [search]
            cost_ceiling = 0.4

            [session]
            grid_columns = 10

            [storage]
            data_dir = "/tmp/kaomo-data"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.cost_ceiling, 0.4);
        assert_eq!(config.search.tag_weight, 1.0);
        assert_eq!(config.session.grid_columns, 10);
        assert_eq!(config.session.recent_capacity, 8);
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/kaomo-data"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = Config::parse("theme = \"dark\"\n[search]\nfuzzy = true\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let err = Config::parse("[search]\nglyph_weight = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(msg) if msg.contains("glyph_weight")));
    }

    #[test]
    fn test_rejects_zero_ceiling() {
        assert!(matches!(
            Config::parse("[search]\ncost_ceiling = 0.0\n"),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert!(matches!(
            Config::parse("[session]\nrecent_capacity = 0\n"),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(Config::parse("[search"), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[session]\nhistory_capacity = 50\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().session.history_capacity, 50);
    }
}
