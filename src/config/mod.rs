//! Configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "FORAGE_DB_PATH";
/// Environment variable overriding the target collection.
pub const ENV_COLLECTION: &str = "FORAGE_COLLECTION";
/// Environment variable overriding the expiring-report lookahead (days).
pub const ENV_LOOKAHEAD_DAYS: &str = "FORAGE_LOOKAHEAD_DAYS";

/// Main configuration for forage.
#[derive(Debug, Clone)]
pub struct ForageConfig {
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
    /// Collection seeded and reported on.
    pub collection: String,
    /// Lookahead window for the expiring report, in days.
    pub lookahead_days: i64,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Database path.
    pub db_path: Option<String>,
    /// Collection name.
    pub collection: Option<String>,
    /// Lookahead days.
    pub lookahead_days: Option<i64>,
}

impl Default for ForageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("forage.db"),
            collection: crate::services::DEFAULT_COLLECTION.to_string(),
            lookahead_days: crate::services::DEFAULT_LOOKAHEAD_DAYS,
        }
    }
}

impl ForageConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location, then applies
    /// environment overrides.
    ///
    /// Checks the platform config dir (`~/.config/forage/config.toml` and
    /// equivalents) and falls back to defaults if no file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let config = directories::BaseDirs::new()
            .map(|base_dirs| base_dirs.config_dir().join("forage").join("config.toml"))
            .filter(|path| path.exists())
            .and_then(|path| Self::load_from_file(&path).ok())
            .unwrap_or_default();

        config.with_env_overrides()
    }

    /// Converts a `ConfigFile` to `ForageConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(db_path) = file.db_path {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(collection) = file.collection {
            config.collection = collection;
        }
        if let Some(lookahead_days) = file.lookahead_days {
            config.lookahead_days = lookahead_days;
        }

        config
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(db_path) = std::env::var(ENV_DB_PATH) {
            if !db_path.is_empty() {
                self.db_path = PathBuf::from(db_path);
            }
        }
        if let Ok(collection) = std::env::var(ENV_COLLECTION) {
            if !collection.is_empty() {
                self.collection = collection;
            }
        }
        if let Ok(lookahead) = std::env::var(ENV_LOOKAHEAD_DAYS) {
            if let Ok(days) = lookahead.parse() {
                self.lookahead_days = days;
            }
        }
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Sets the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}
