//! Server settings received from the client.

use serde::Deserialize;
use serde_json::Value;

/// Configuration section name on the client side.
pub const SECTION: &str = "gable";

pub const DEFAULT_MAX_PROBLEMS: usize = 100;

/// The two recognized options. Anything else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// When disabled, diagnostics are cleared by publishing an empty list.
    pub enable_validation: bool,
    /// Diagnostics beyond this cap are dropped in discovery order.
    pub max_problems: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_validation: true,
            max_problems: DEFAULT_MAX_PROBLEMS,
        }
    }
}

impl Settings {
    /// Deserialize a configuration payload, falling back to the defaults on
    /// a missing or malformed value.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        if value.is_null() {
            return Self::default();
        }
        serde_json::from_value(value.clone()).unwrap_or_else(|err| {
            tracing::warn!(%err, "malformed configuration, using defaults");
            Self::default()
        })
    }
}
