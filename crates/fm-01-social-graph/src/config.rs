//! Configuration for the Social Graph subsystem

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Social graph configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialGraphConfig {
    /// Deadline for every individual store call, in milliseconds
    pub store_timeout_ms: u64,
}

impl SocialGraphConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for SocialGraphConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 5_000,
        }
    }
}
