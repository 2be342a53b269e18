//! Configuration types for Unicity tools.
//!
//! Rules are declared in a `Unicity.toml` file at the project root:
//!
//! ```toml
//! [[rules]]
//! name = "record-ids"
//! target = "records.[].id"
//! search = ["records.[].id", "records.[].altIds.[]"]
//! policy = "counted"
//! ```
//!
//! # Features
//!
//! - `cli` - Include CLI configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use unicity::{ConstraintError, SearchPath, SearchPaths, UniqueConstraint, UniquePolicy, UniqueRule};

/// The standard configuration filename.
pub const CONFIG_FILENAME: &str = "Unicity.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid rule: {0}")]
    InvalidRule(#[from] ConstraintError),
    #[error("Duplicate rule name '{0}'")]
    DuplicateRule(String),
}

/// One uniqueness rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleConfig {
    pub name: String,
    /// Values to check
    pub target: SearchPath,
    /// Where to look for duplicates; defaults to `target`
    #[serde(default)]
    pub search: Option<SearchPaths>,
    #[serde(default)]
    pub policy: UniquePolicy,
}

impl RuleConfig {
    pub fn search_paths(&self) -> SearchPaths {
        self.search
            .clone()
            .unwrap_or_else(|| SearchPaths::single(self.target.clone()))
    }

    pub fn to_rule(&self) -> Result<UniqueRule, ConfigError> {
        let constraint = UniqueConstraint::new(self.name.clone(), self.search_paths())?
            .with_policy(self.policy);
        Ok(UniqueRule::new(self.target.clone(), constraint))
    }
}

/// CLI-specific configuration.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Rules to run when `unicity check` is given no `--rule`.
    #[serde(default)]
    pub default_rules: Vec<String>,
}

/// The main Unicity configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnicityConfig {
    /// Rules in declaration order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,

    /// CLI-specific configuration.
    #[cfg(feature = "cli")]
    #[serde(default)]
    pub cli: Option<CliConfig>,
}

impl UnicityConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Parse configuration from a string.
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        let config: UnicityConfig = toml::from_str(content)?;
        config.check_names()?;
        Ok(config)
    }

    fn check_names(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.rules.iter().enumerate() {
            if self.rules[..i].iter().any(|r| r.name == rule.name) {
                return Err(ConfigError::DuplicateRule(rule.name.clone()));
            }
        }
        Ok(())
    }

    /// Find the configuration file by searching upward from the given directory.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration by searching upward from the given directory.
    pub fn load_from_dir(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        if let Some(config_path) = Self::find_config_file(start_dir) {
            let config = Self::load(&config_path)?;
            Ok(Some((config_path, config)))
        } else {
            Ok(None)
        }
    }

    /// Get the default rules for CLI check command.
    #[cfg(feature = "cli")]
    pub fn default_rules(&self) -> &[String] {
        self.cli
            .as_ref()
            .map(|c| c.default_rules.as_slice())
            .unwrap_or(&[])
    }

    /// Get a rule by name.
    pub fn get_rule(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Get all rule names.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Build every rule, in declaration order.
    pub fn to_rules(&self) -> Result<Vec<UniqueRule>, ConfigError> {
        self.rules.iter().map(RuleConfig::to_rule).collect()
    }
}
