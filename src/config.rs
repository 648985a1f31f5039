use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    /// Recipe reads issued at once while building one list
    #[serde(default = "default_max_concurrent_reads")]
    pub max_concurrent_reads: usize,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            max_concurrent_reads: default_max_concurrent_reads(),
            decimal_places: default_decimal_places(),
            title: default_title(),
        }
    }
}

fn default_max_concurrent_reads() -> usize {
    larder_shopping::aggregation::DEFAULT_MAX_CONCURRENT_READS
}

fn default_decimal_places() -> u32 {
    larder_shopping::export::DEFAULT_DECIMAL_PLACES
}

fn default_title() -> String {
    larder_shopping::export::DEFAULT_TITLE.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LARDER__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("database.url", "sqlite:larder.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LARDER")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.shopping.max_concurrent_reads < 1 {
            return Err("Shopping max_concurrent_reads must be at least 1".to_string());
        }
        if self.shopping.decimal_places > larder_shopping::export::MAX_DECIMAL_PLACES {
            return Err("Shopping decimal_places must be at most 6".to_string());
        }
        Ok(())
    }

    pub fn format_options(&self) -> larder_shopping::FormatOptions {
        larder_shopping::FormatOptions {
            decimal_places: self.shopping.decimal_places,
            title: self.shopping.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            shopping: ShoppingConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_concurrent_reads() {
        let mut config = config();
        config.shopping.max_concurrent_reads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_precision_bound() {
        let mut config = config();
        config.shopping.decimal_places = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.child("larder.toml");
        std::fs::write(
            &path,
            "[database]\nurl = \"sqlite:file.db\"\nmax_connections = 2\n\n[shopping]\ndecimal_places = 1\ntitle = \"Groceries\"\n",
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap().to_string())).unwrap();

        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.shopping.decimal_places, 1);
        assert_eq!(config.shopping.max_concurrent_reads, 4);
        assert_eq!(config.format_options().title, "Groceries");
        assert_eq!(config.observability.log_level, "info");
    }
}
