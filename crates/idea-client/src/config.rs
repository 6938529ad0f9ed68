//! Client configuration.

use std::env;
use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied to every request.
    pub timeout: Duration,
    /// Delay between polls of the idea list.
    pub refresh_interval: Duration,
    /// Poll the list in the background.
    pub real_time_updates: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(10),
            real_time_updates: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `IDEA_BOARD_API_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("IDEA_BOARD_API_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url,
            ..Self::default()
        }
    }
}
