// config.rs — Daemon configuration.
//
// Loaded from a vine.toml file when one is given; every field has a
// default so a bare `vine-daemon` starts a complete local instance.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the Vine daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VineConfig {
    /// Address the HTTP server binds.
    pub listen_addr: String,

    /// Domain of the command addresses this deployment owns.
    pub mail_domain: String,

    /// Sender address for engine-composed notifications.
    pub sender: String,

    /// Base URL of this daemon's reshare endpoint, as seen from email
    /// clients.
    pub api_url: String,

    /// Base URL of the client application.
    pub app_url: String,

    /// Path of the transition audit JSONL log.
    pub audit_log: PathBuf,

    /// Per-request deadline handed to every store and transport call.
    pub request_timeout_secs: u64,
}

impl Default for VineConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8660".to_string(),
            mail_domain: "vine.local".to_string(),
            sender: "no-reply@vine.local".to_string(),
            api_url: "http://127.0.0.1:8660".to_string(),
            app_url: "http://127.0.0.1:8660/app".to_string(),
            audit_log: PathBuf::from(".vine/transitions.jsonl"),
            request_timeout_secs: 30,
        }
    }
}

impl VineConfig {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn request_deadline_window(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
