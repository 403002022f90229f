//! Configuration types for hazard-dl

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API-imposed maximum number of points per call
pub const MAX_POINTS_PER_CALL: usize = 1000;

/// Client configuration for the hazard API
///
/// All fields have sensible defaults; `ClientConfig::default()` targets the
/// production API. Tests override `base_url` to point at a mock server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the hazard API, without a trailing slash (default: "https://api.reask.earth/v1")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (default: 300)
    ///
    /// Large batches can take a while server-side, so this is deliberately
    /// generous compared to typical HTTP defaults.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of points per API call (default: 1000, the API limit)
    #[serde(default = "default_max_points")]
    pub max_points_per_call: usize,
}

fn default_base_url() -> String {
    "https://api.reask.earth/v1".to_string()
}

fn default_user_agent() -> String {
    format!("hazard-dl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_points() -> usize {
    MAX_POINTS_PER_CALL
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_points_per_call: default_max_points(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a non-default API base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
