//! config
//!
//! TOML configuration for the gateway.
//!
//! # Location
//!
//! Resolved in order of precedence:
//! 1. An explicit `--config` path
//! 2. `$CHANGELIST_GATEWAY_CONFIG` if set
//! 3. `<config_dir>/changelist-gateway/config.toml` if it exists
//! 4. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! default_changelist = "Default"
//!
//! [rest]
//! bind = "127.0.0.1:8993"
//!
//! [callback]
//! timeout_secs = 30
//!
//! [[seed_project]]
//! name = "demo"
//! ```
//!
//! `default_changelist` is the canonical default-changelist name the
//! `activate` verb substitutes for `default=true`; the engine treats it as
//! injected configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CHANGELIST_GATEWAY_CONFIG";

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the schema.
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or otherwise unusable.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Canonical default-changelist name.
    pub default_changelist: String,

    /// REST transport settings.
    pub rest: RestConfig,

    /// Callback invoker settings.
    pub callback: CallbackConfig,

    /// Projects the bundled server seeds at startup.
    #[serde(rename = "seed_project")]
    pub seed_projects: Vec<SeedProject>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            default_changelist: "Default".to_string(),
            rest: RestConfig::default(),
            callback: CallbackConfig::default(),
            seed_projects: Vec::new(),
        }
    }
}

/// REST transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestConfig {
    /// Address the server binds.
    pub bind: SocketAddr,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8993".parse().expect("static default address"),
        }
    }
}

/// Callback invoker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallbackConfig {
    /// Longest wait for the OS URL handler, in seconds.
    pub timeout_secs: u64,
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// A project the bundled server creates at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedProject {
    /// Project identifier.
    pub name: String,
}

impl GatewayConfig {
    /// Load configuration, resolving the file location as documented on the
    /// module.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a resolved file cannot be read or parsed,
    /// or when a value fails validation. A missing default-location file is
    /// not an error; defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match resolve_path(explicit) {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse one specific config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Check value-level constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_changelist.is_empty() {
            return Err(ConfigError::InvalidValue(
                "default_changelist must not be empty".to_string(),
            ));
        }
        if self.callback.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "callback.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The callback timeout as a [`Duration`].
    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback.timeout_secs)
    }
}

/// Resolve which config file to read, if any.
fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let default = dirs::config_dir()?.join("changelist-gateway").join("config.toml");
    default.exists().then_some(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = GatewayConfig::default();
        config.validate().unwrap();
        assert_eq!(config.default_changelist, "Default");
        assert_eq!(config.callback_timeout(), Duration::from_secs(30));
        assert!(config.seed_projects.is_empty());
    }

    #[test]
    fn parses_a_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_changelist = "Changes"

[rest]
bind = "0.0.0.0:9000"

[callback]
timeout_secs = 5

[[seed_project]]
name = "demo"

[[seed_project]]
name = "acme"
"#
        )
        .unwrap();

        let config = GatewayConfig::load_file(file.path()).unwrap();
        assert_eq!(config.default_changelist, "Changes");
        assert_eq!(config.rest.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.callback.timeout_secs, 5);
        let names: Vec<_> = config.seed_projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["demo", "acme"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_changelists = \"typo\"").unwrap();
        assert!(matches!(
            GatewayConfig::load_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn empty_default_changelist_fails_validation() {
        let config = GatewayConfig {
            default_changelist: String::new(),
            ..GatewayConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = GatewayConfig {
            callback: CallbackConfig { timeout_secs: 0 },
            ..GatewayConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
