//! Configuration for the order system.
//!
//! Read from a TOML file. Every section is optional; a missing section takes the values of
//! [`Config::default`]'s counterpart, except `catalog`, which is empty when omitted.
//!
//! ```toml
//! log_filter = "order_lifecycle=debug,info"
//! mailbox_capacity = 64
//!
//! [[catalog]]
//! name = "Appl Watch"
//! price = 1500.0
//! weight = 350.0
//!
//! [carrier]
//! base_fee = 15.0
//! per_gram = 0.05
//!
//! [gateway]
//! latency_ms = 20
//! declined_cards = ["4000000000000002"]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Capacity of the order actor's mailbox.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub carrier: CarrierConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// One product of the static catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub price: f64,
    /// Weight of a single unit, in grams.
    pub weight: f64,
}

/// Flat-rate shipping: `base_fee + per_gram * weight`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarrierConfig {
    pub base_fee: f64,
    pub per_gram: f64,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            base_fee: 15.0,
            per_gram: 0.05,
        }
    }
}

/// Behaviour of the simulated payment gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Delay before a request is answered.
    pub latency_ms: u64,
    /// Card numbers whose payments are declined.
    pub declined_cards: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            declined_cards: Vec::new(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_mailbox_capacity() -> usize {
    32
}

impl Default for Config {
    /// The demo setup: a two-product catalog and an accept-everything gateway.
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            mailbox_capacity: default_mailbox_capacity(),
            catalog: vec![
                CatalogEntry {
                    name: "Appl Watch".to_string(),
                    price: 1500.0,
                    weight: 350.0,
                },
                CatalogEntry {
                    name: "Phone Case".to_string(),
                    price: 25.0,
                    weight: 40.0,
                },
            ],
            carrier: CarrierConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::Validation(
                "mailbox_capacity must be greater than zero".into(),
            ));
        }

        let mut names = HashSet::new();
        for entry in &self.catalog {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Catalog entry name cannot be empty".into(),
                ));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate catalog entry '{}'",
                    entry.name
                )));
            }
            non_negative(&format!("catalog '{}' price", entry.name), entry.price)?;
            non_negative(&format!("catalog '{}' weight", entry.name), entry.weight)?;
        }

        non_negative("carrier base_fee", self.carrier.base_fee)?;
        non_negative("carrier per_gram", self.carrier.per_gram)?;
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )))
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mailbox_capacity, 32);
        assert_eq!(config.catalog.len(), 2);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = r#"
log_filter = "debug"
mailbox_capacity = 8

[[catalog]]
name = "Appl Watch"
price = 1500.0
weight = 350.0

[carrier]
base_fee = 20.0
per_gram = 0.1

[gateway]
latency_ms = 5
declined_cards = ["4000000000000002"]
"#
        .parse()
        .unwrap();

        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.catalog[0].name, "Appl Watch");
        assert_eq!(config.carrier.base_fee, 20.0);
        assert_eq!(config.gateway.latency_ms, 5);
        assert_eq!(config.gateway.declined_cards, vec!["4000000000000002"]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = "[gateway]\nlatency_ms = 1\n".parse().unwrap();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.mailbox_capacity, 32);
        assert!(config.catalog.is_empty());
        assert_eq!(config.carrier, CarrierConfig::default());
        assert_eq!(config.gateway.latency_ms, 1);
        assert!(config.gateway.declined_cards.is_empty());
    }

    #[test]
    fn test_validation_failures() {
        let zero_capacity = "mailbox_capacity = 0".parse::<Config>();
        assert!(matches!(zero_capacity, Err(ConfigError::Validation(_))));

        let duplicate = r#"
[[catalog]]
name = "Appl Watch"
price = 1.0
weight = 1.0

[[catalog]]
name = "Appl Watch"
price = 2.0
weight = 2.0
"#
        .parse::<Config>();
        match duplicate {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("Duplicate")),
            other => panic!("expected validation error, got {:?}", other),
        }

        let negative = "[carrier]\nbase_fee = -1.0\n".parse::<Config>();
        assert!(matches!(negative, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = "mailbox_capacity = \"many\"".parse::<Config>();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mailbox_capacity = 4").unwrap();
        writeln!(file, "[[catalog]]").unwrap();
        writeln!(file, "name = \"Phone Case\"").unwrap();
        writeln!(file, "price = 25.0").unwrap();
        writeln!(file, "weight = 40.0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.mailbox_capacity, 4);
        assert_eq!(config.catalog[0].price, 25.0);

        let missing = Config::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
