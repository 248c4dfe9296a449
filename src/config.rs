//! Configuration file handling for fin.
//!
//! The configuration file is stored at `$FIN_HOME/config.json` and holds the location of the
//! transactions file and the default savings goal.

use crate::store::Store;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "fin";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const TRANSACTIONS_CSV: &str = "transactions.csv";

/// The savings goal, in percent, used when none is configured.
pub const DEFAULT_SAVINGS_GOAL: u8 = 20;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FIN_HOME` and from there it loads `$FIN_HOME/config.json`. It resolves the
/// location of the transactions file, which is either configured or expected at
/// `$FIN_HOME/transactions.csv`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_file: PathBuf,
}

impl Config {
    /// Creates the data directory and an initial `config.json` file.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/fin`
    /// - `data_file` - Where transactions are stored. A relative path is resolved against `dir`.
    ///   When `None`, `transactions.csv` in `dir` is used.
    /// - `savings_goal` - The default savings goal in percent. When `None`, 20 is used.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists.
    /// - Returns an error if the savings goal is above 100.
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        data_file: Option<PathBuf>,
        savings_goal: Option<u8>,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fin home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file,
            savings_goal: savings_goal.unwrap_or(DEFAULT_SAVINGS_GOAL),
        };
        config_file.validate()?;
        config_file.save(&config_path).await?;

        let data_file = resolve(&root, config_file.data_file());
        if let Some(parent) = data_file.parent() {
            utils::make_dir(parent).await?;
        }
        debug!("Created config at {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
            data_file,
        })
    }

    /// This will
    /// - validate that `fin_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub async fn load(fin_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fin_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The fin home directory is missing, run 'fin init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'fin init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let data_file = resolve(&root, config_file.data_file());

        Ok(Self {
            root,
            config_path,
            config_file,
            data_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The absolute path of the transactions file.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn savings_goal(&self) -> u8 {
        self.config_file.savings_goal
    }

    /// The record store backed by `data_file`.
    pub fn store(&self) -> Store {
        Store::new(self.data_file())
    }
}

/// Checks if `p` is relative, and if so, resolves it against `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fin",
///   "config_version": 1,
///   "data_file": "transactions.csv",
///   "savings_goal": 20
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fin"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the transactions file (optional, relative to config.json or absolute)
    /// Defaults to $FIN_HOME/transactions.csv if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_file: Option<PathBuf>,

    /// The savings goal in percent, 0 to 100
    #[serde(default = "default_savings_goal")]
    savings_goal: u8,
}

fn default_savings_goal() -> u8 {
    DEFAULT_SAVINGS_GOAL
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: None,
            savings_goal: DEFAULT_SAVINGS_GOAL,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or holds invalid values
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            self.app_name
        );
        ensure!(
            self.savings_goal <= 100,
            "Invalid savings_goal in config file: expected 0 to 100, got {}",
            self.savings_goal
        );
        Ok(())
    }

    /// Gets the transactions file path.
    ///
    /// If the path is relative, it should be interpreted as relative to the config.json file.
    /// If None, defaults to $FIN_HOME/transactions.csv
    fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(TRANSACTIONS_CSV))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("fin_home");

        let config = Config::create(&home_dir, None, None).await.unwrap();

        assert!(config.root().is_dir());
        assert!(config.config_path().is_file());
        assert_eq!(config.data_file(), config.root().join(TRANSACTIONS_CSV));
        assert_eq!(config.savings_goal(), DEFAULT_SAVINGS_GOAL);
        assert_eq!(config.store().path(), config.data_file());
    }

    #[tokio::test]
    async fn test_config_create_then_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().to_owned();
        let created = Config::create(&home_dir, Some(PathBuf::from("data/ledger.csv")), Some(35))
            .await
            .unwrap();
        assert!(created.data_file().parent().unwrap().is_dir());

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(loaded.savings_goal(), 35);
        assert_eq!(loaded.data_file(), loaded.root().join("data").join("ledger.csv"));
        assert_eq!(loaded.data_file(), created.data_file());
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), None, None).await.unwrap();
        let result = Config::create(dir.path(), None, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_create_bad_goal() {
        let dir = TempDir::new().unwrap();
        let result = Config::create(dir.path(), None, Some(101)).await;
        assert!(result.is_err());
        assert!(!dir.path().join(CONFIG_JSON).exists());
    }

    #[tokio::test]
    async fn test_config_load_missing() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path()).await;
        assert!(result.unwrap_err().to_string().contains("fin init"));
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_absolute_data_file() {
        let dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let data_file = elsewhere.path().join("money.csv");
        let config = Config::create(dir.path(), Some(data_file.clone()), None)
            .await
            .unwrap();
        assert_eq!(config.data_file(), data_file);
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.savings_goal, DEFAULT_SAVINGS_GOAL);
        assert_eq!(config.data_file(), PathBuf::from(TRANSACTIONS_CSV));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original = ConfigFile {
            data_file: Some(PathBuf::from("my.csv")),
            savings_goal: 50,
            ..ConfigFile::default()
        };
        original.save(&config_path).await.unwrap();
        let loaded = ConfigFile::load(&config_path).await.unwrap();

        assert_eq!(original, loaded);
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "fin",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.savings_goal, DEFAULT_SAVINGS_GOAL);
        assert_eq!(config.data_file(), PathBuf::from(TRANSACTIONS_CSV));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "savings_goal": 20
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("data_file"));
        assert!(json.contains("savings_goal"));
    }
}
