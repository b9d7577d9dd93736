use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Origin of the deployed borrowing API.
pub const DEFAULT_API_URL: &str = "https://it-borrowing-system.onrender.com";

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Total request timeout in seconds. Unset means requests may hang
    /// indefinitely, leaving the issuing store in its loading state.
    #[serde(default)]
    pub timeout_seconds: Option<u32>,
}

/// Where the signed-in identity is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the session file. Defaults to the platform data
    /// directory (`~/.local/share/borrowdesk` on Linux).
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Notification polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Seconds between notification fetches (default: 60).
    #[serde(default = "default_notification_interval")]
    pub notifications_interval_seconds: u64,
    /// Notifications older than this many seconds are hidden (default: 600).
    #[serde(default = "default_notification_max_age")]
    pub notification_max_age_seconds: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_connect_timeout() -> u32 {
    10
}

fn default_notification_interval() -> u64 {
    60
}

fn default_notification_max_age() -> u64 {
    600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_seconds: default_connect_timeout(),
            timeout_seconds: None,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            notifications_interval_seconds: default_notification_interval(),
            notification_max_age_seconds: default_notification_max_age(),
        }
    }
}

impl ApiConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .map(|secs| Duration::from_secs(u64::from(secs)))
    }
}

impl SessionConfig {
    /// Resolved session directory.
    ///
    /// Falls back to the current directory if no data dir is available.
    pub fn resolved_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("borrowdesk"),
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.notifications_interval_seconds)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.notification_max_age_seconds)
    }
}
