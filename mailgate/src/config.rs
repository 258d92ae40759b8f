//! Configuration file handling.
//!
//! The file is RON:
//!
//! ```ron
//! (
//!     dns: (timeout_secs: 3),
//!     mailer: (tolerate_partial_failure: true, charset: "utf-8"),
//!     transport: Sendmail(path: "/usr/sbin/sendmail"),
//! )
//! ```

use std::path::{Path, PathBuf};

use mailgate_dns::DnsConfig;
use mailgate_mailer::{MailerConfig, TransportConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CONFIG_ENV: &str = "MAILGATE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub mailer: MailerConfig,

    #[serde(default)]
    pub transport: TransportConfig,
}

impl Config {
    /// Parses a configuration from RON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a valid configuration.
    pub fn from_ron(content: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(content)?)
    }
}

/// Find the configuration file using the following precedence:
/// 1. `MAILGATE_CONFIG` environment variable
/// 2. ./mailgate.config.ron (current working directory)
/// 3. /etc/mailgate/mailgate.config.ron (system-wide config)
///
/// `Ok(None)` means no file exists and defaults apply.
///
/// # Errors
///
/// Returns an error if `MAILGATE_CONFIG` names a file that does not exist.
pub fn find_config_file(env_path: Option<PathBuf>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = env_path {
        if path.exists() {
            return Ok(Some(path));
        }
        anyhow::bail!(
            "{CONFIG_ENV} points to non-existent file: {}",
            path.display()
        );
    }

    Ok([
        PathBuf::from("./mailgate.config.ron"),
        PathBuf::from("/etc/mailgate/mailgate.config.ron"),
    ]
    .into_iter()
    .find(|path| path.exists()))
}

/// Loads the configuration from `path`, or the default location.
///
/// # Errors
///
/// Returns an error if the file cannot be found, read or parsed.
pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(std::env::var_os(CONFIG_ENV).map(PathBuf::from))?,
    };

    let Some(path) = path else {
        debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|e| {
        anyhow::anyhow!("Failed to read config from {}: {}", path.display(), e)
    })?;

    Config::from_ron(&content)
}
