//! # Settings Module
//!
//! ## Purpose
//! Keeps the preferences of a drill session in one place: hint language, current topic,
//! how many equations to request at once, where questions come from and how to log.
//! Preferences live in a JSON file (`chemdrill_config.json` by default) and fall back to
//! defaults when the file is missing or broken.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "language": "english",
//!   "topic": "half_equation",
//!   "batch_size": 5,
//!   "endpoint": "http://localhost:8080/equations",
//!   "timeout_secs": 15,
//!   "question_bank": null,
//!   "log_file": "chemdrill.log",
//!   "log_level": "info"
//! }
//! ```
//!
//! ## Question provider choice
//! | endpoint | question_bank | provider |
//! |----------|---------------|----------|
//! | set      | any           | remote service, built-in bank on failure |
//! | unset    | set           | bank file, built-in bank on failure |
//! | unset    | unset         | built-in bank |
//!
//! ## Usage Pattern
//! ```rust
//! use ChemDrill::settings::Settings;
//! use ChemDrill::Balance::hints::Topic;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut settings = Settings::with_config_file(dir.path().join("config.json"));
//! settings.set_topic(Topic::Redox).unwrap();
//! settings.set_batch_size(8).unwrap();
//! assert_eq!(settings.config().batch_size, 8);
//! ```

use crate::Balance::hints::{Language, Topic};
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "chemdrill_config.json";
pub const MAX_BATCH_SIZE: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid question service endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Preferences of a drill session.
///
/// # Fields
/// * `language` - language of hints and topic titles
/// * `topic` - topic of the drill
/// * `batch_size` - number of equations requested at once, 1..=20
/// * `endpoint` - URL of the question service, `None` for local questions
/// * `timeout_secs` - timeout of one request to the question service
/// * `question_bank` - JSON file with extra equations, used when there is no endpoint
/// * `log_file` - file that receives the full log
/// * `log_level` - "error", "warn", "info", "debug" or "trace"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    pub language: Language,
    pub topic: Topic,
    pub batch_size: usize,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub question_bank: Option<String>,
    pub log_file: String,
    pub log_level: String,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            topic: Topic::Basic,
            batch_size: 5,
            endpoint: None,
            timeout_secs: 15,
            question_bank: None,
            log_file: "chemdrill.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn check_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    match Url::parse(endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ConfigError::InvalidEndpoint(endpoint.to_string())),
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

impl DrillConfig {
    /// configured level, `Info` for unknown names
    pub fn log_level_filter(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Checks every field that has a restricted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidValue {
                key: "batch_size",
                value: self.batch_size.to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs",
                value: self.timeout_secs.to_string(),
            });
        }
        if let Some(endpoint) = &self.endpoint {
            check_endpoint(endpoint)?;
        }
        if parse_level(&self.log_level).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "log_level",
                value: self.log_level.clone(),
            });
        }
        Ok(())
    }
}

/// Settings bound to a configuration file.
///
/// Every setter validates its value, updates the configuration and saves it.
/// A setter that fails leaves the configuration unchanged.
#[derive(Debug, Clone)]
pub struct Settings {
    config: DrillConfig,
    config_file: PathBuf,
    // why the config file was replaced by defaults, until a valid config is saved over it
    // rejection message of the config file; cleared once a valid config is saved
    load_problem: Option<String>,
}

impl Settings {
    /// Creates settings from "chemdrill_config.json" in the current directory.
    /// A missing or invalid file gives the default configuration.
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Creates settings from a custom configuration file.
    ///
    /// # Arguments
    /// * `config_file` - Path to the configuration file
    ///
    /// # Returns
    /// Settings with configuration loaded from the file, or defaults
    pub fn with_config_file(config_file: impl Into<PathBuf>) -> Self {
        let config_file = config_file.into();
        let (config, load_problem) = match Self::load_config(&config_file) {
            Ok(config) => (config, None),
            Err(e) => {
                let problem = format!(
                    "using default settings, '{}' was rejected: {}",
                    config_file.display(),
                    e
                );
                warn!("{}", problem);
                (DrillConfig::default(), Some(problem))
            }
        };
        Self {
            config,
            config_file,
            load_problem,
        }
    }

    /// Message about a rejected config file, kept so it can be reported once logging is set up
    pub fn load_problem(&self) -> Option<&str> {
        self.load_problem.as_deref()
    }

    /// Loads configuration from a JSON file.
    ///
    /// # Returns
    /// * `Ok(DrillConfig)` - Loaded configuration, or the default one if the file doesn't exist
    /// * `Err(ConfigError)` - If the file can't be read, parsed or validated
    pub fn load_config(config_file: &Path) -> Result<DrillConfig, ConfigError> {
        if !config_file.exists() {
            return Ok(DrillConfig::default());
        }
        let content = fs::read_to_string(config_file)?;
        let config: DrillConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("settings loaded from '{}'", config_file.display());
        Ok(config)
    }

    /// Saves current configuration to the config file.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        info!("settings saved to '{}'", self.config_file.display());
        Ok(())
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    // applies a change to a copy, validates and saves it, and only then keeps it
    fn update(&mut self, change: impl FnOnce(&mut DrillConfig)) -> Result<(), ConfigError> {
        let previous = self.config.clone();
        change(&mut self.config);
        let result = self.config.validate().and_then(|()| self.save_config());
        match result {
            Ok(()) => self.load_problem = None,
            Err(_) => self.config = previous,
        }
        result
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), ConfigError> {
        self.update(|c| c.language = language)
    }

    pub fn set_topic(&mut self, topic: Topic) -> Result<(), ConfigError> {
        self.update(|c| c.topic = topic)
    }

    pub fn set_batch_size(&mut self, batch_size: usize) -> Result<(), ConfigError> {
        self.update(|c| c.batch_size = batch_size)
    }

    pub fn set_timeout_secs(&mut self, timeout_secs: u64) -> Result<(), ConfigError> {
        self.update(|c| c.timeout_secs = timeout_secs)
    }

    /// `None` or an empty string switches the remote service off
    pub fn set_endpoint(&mut self, endpoint: Option<&str>) -> Result<(), ConfigError> {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        self.update(|c| c.endpoint = endpoint)
    }

    /// Uses a question bank file; the file must exist.
    pub fn set_question_bank(&mut self, path: Option<&str>) -> Result<(), ConfigError> {
        let path = path.map(str::trim).filter(|p| !p.is_empty());
        if let Some(path) = path {
            if !Path::new(path).exists() {
                return Err(ConfigError::InvalidValue {
                    key: "question_bank",
                    value: path.to_string(),
                });
            }
        }
        let path = path.map(str::to_string);
        self.update(|c| c.question_bank = path)
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        let level = level.trim().to_lowercase();
        self.update(|c| c.log_level = level)
    }

    /// Resets all preferences to defaults and saves them.
    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.update(|c| *c = DrillConfig::default())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
