//! Configuration management for banksampah
//!
//! This module handles loading, validation, and management of
//! banksampah configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Ledger snapshot location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding ledger exports
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Snapshot file name inside `path`
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            ledger_file: default_ledger_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_ledger_file() -> String {
    "ledger.json".to_string()
}

/// Report defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Window used when a command is given no explicit range
    #[serde(default)]
    pub default_range: TimeRange,
    /// Size of the recent-transactions slice in backup snapshots
    #[serde(default = "default_recent_limit")]
    pub recent_transactions_limit: usize,
    /// Organization used when `--org` is omitted
    #[serde(default)]
    pub organization_id: Option<String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_range: TimeRange::default(),
            recent_transactions_limit: default_recent_limit(),
            organization_id: None,
        }
    }
}

fn default_recent_limit() -> usize {
    10
}

/// Time range presets understood by report front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// From midnight until the end of today
    Today,
    /// The last 7 calendar days including today
    Last7,
    /// The last 14 calendar days including today
    Last14,
    /// The last 30 calendar days including today
    Last30,
    /// Everything since the reporting epoch
    All,
    /// Explicit start and end dates
    Custom,
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Last7
    }
}

impl TimeRange {
    /// Number of days covered by a "last N days" preset
    pub fn lookback_days(&self) -> Option<u32> {
        match self {
            TimeRange::Last7 => Some(7),
            TimeRange::Last14 => Some(14),
            TimeRange::Last30 => Some(30),
            _ => None,
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" | "hari-ini" => Ok(TimeRange::Today),
            "last7" | "7d" => Ok(TimeRange::Last7),
            "last14" | "14d" => Ok(TimeRange::Last14),
            "last30" | "30d" => Ok(TimeRange::Last30),
            "all" | "semua" => Ok(TimeRange::All),
            "custom" => Ok(TimeRange::Custom),
            _ => Err(format!("Invalid time range: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Today => write!(f, "today"),
            TimeRange::Last7 => write!(f, "last7"),
            TimeRange::Last14 => write!(f, "last14"),
            TimeRange::Last30 => write!(f, "last30"),
            TimeRange::All => write!(f, "all"),
            TimeRange::Custom => write!(f, "custom"),
        }
    }
}

/// Currency formatting for text output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_code")]
    pub code: String,
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            thousands_separator: default_thousands_sep(),
        }
    }
}

fn default_currency_code() -> String {
    "IDR".to_string()
}

fn default_currency_symbol() -> String {
    "Rp".to_string()
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::Io(e),
        })?;

        let config = Self::from_yaml(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.reports.recent_transactions_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reports.recent_transactions_limit".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }

        if self.data.ledger_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.ledger_file".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the ledger snapshot
    pub fn ledger_path(&self) -> PathBuf {
        self.data.path.join(&self.data.ledger_file)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.reports.default_range, TimeRange::Last7);
        assert_eq!(config.reports.recent_transactions_limit, 10);
        assert_eq!(config.currency.code, "IDR");
        assert_eq!(config.ledger_path(), PathBuf::from("./data/ledger.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.currency.symbol, "Rp");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("reports:\n  default_range: last30\n").unwrap();
        assert_eq!(config.reports.default_range, TimeRange::Last30);
        assert_eq!(config.reports.recent_transactions_limit, 10);
        assert_eq!(config.data.ledger_file, "ledger.json");
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let err = Config::from_yaml("reports:\n  recent_transactions_limit: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "reports.recent_transactions_limit"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let err = Config::from_yaml("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("reports: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/definitely/not/here/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data:\n  path: /srv/banksampah\n  ledger_file: export.json").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.ledger_path(), PathBuf::from("/srv/banksampah/export.json"));
    }

    #[test]
    fn test_time_range_from_str() {
        assert_eq!("today".parse::<TimeRange>().unwrap(), TimeRange::Today);
        assert_eq!("7d".parse::<TimeRange>().unwrap(), TimeRange::Last7);
        assert_eq!("LAST30".parse::<TimeRange>().unwrap(), TimeRange::Last30);
        assert_eq!("semua".parse::<TimeRange>().unwrap(), TimeRange::All);
        assert!("quarter".parse::<TimeRange>().is_err());
        assert_eq!(TimeRange::Last14.to_string(), "last14");
        assert_eq!(TimeRange::Last14.lookback_days(), Some(14));
        assert_eq!(TimeRange::All.lookback_days(), None);
    }
}
