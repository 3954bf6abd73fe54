//! Configuration loading

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub daemon: DaemonConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Bind address for web server
    #[serde(default = "default_bind")]
    pub bind: String,
    /// TLS configuration (optional - enables HTTPS when present)
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            tls: None,
        }
    }
}

/// TLS/HTTPS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM format)
    pub cert: String,
    /// Path to private key file (PEM format)
    pub key: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Directory holding index.html and the compiled WASM bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> String {
    "web".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// JSON-lines file receiving accepted messages
    #[serde(default = "default_store_path")]
    pub store_path: String,
    /// Longest accepted name, in characters
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    /// Longest accepted email address, in characters
    #[serde(default = "default_max_email_len")]
    pub max_email_len: usize,
    /// Longest accepted message body, in characters
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
    /// Largest request body accepted by `POST /api/contact`, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Most recent messages kept in memory for `GET /api/messages`
    #[serde(default = "default_retained_messages")]
    pub retained_messages: usize,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            max_name_len: default_max_name_len(),
            max_email_len: default_max_email_len(),
            max_message_len: default_max_message_len(),
            max_body_bytes: default_max_body_bytes(),
            retained_messages: default_retained_messages(),
        }
    }
}

fn default_store_path() -> String {
    "./messages.jsonl".to_string()
}

fn default_max_name_len() -> usize {
    100
}

fn default_max_email_len() -> usize {
    254
}

fn default_max_message_len() -> usize {
    5000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_retained_messages() -> usize {
    500
}

/// Inbox access
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Bearer token for `GET /api/messages`; the inbox is closed when unset
    #[serde(default)]
    pub token: Option<String>,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

/// Default configuration rendered as TOML
pub fn default_config_toml() -> Result<String> {
    Ok(toml::to_string_pretty(&Config::default())?)
}
