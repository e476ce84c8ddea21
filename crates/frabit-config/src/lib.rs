//! Client configuration for the Frabit SDK and CLI.
//!
//! A kubeconfig-style YAML file holds named contexts, each describing one
//! Frabit server (URL, token source, user agent, static headers). See
//! [`client`] for the file format.

use std::path::PathBuf;

pub mod client;
pub mod error;

pub use client::{
    ClientConfig, Context, client_config_path, load_client_config, load_client_config_from,
    save_client_config, save_client_config_to,
};
pub use error::{ConfigError, Result};

/// Application directory name under the platform config dir.
const APP_NAME: &str = "frabit";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "FRABIT_CONFIG_DIR";

/// Directory holding Frabit client configuration.
///
/// `$FRABIT_CONFIG_DIR` when set and non-empty, otherwise
/// `<platform config dir>/frabit`.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
