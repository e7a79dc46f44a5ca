//! Process-wide provider configuration.

use std::sync::RwLock;

use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};

/// Settings shared by every registry created in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Asks the host to submit the default tile without further UI.
    pub auto_submit_default: bool,
}

impl ProviderConfig {
    /// Configuration used until the host installs its own.
    pub const DEFAULT: Self = Self {
        auto_submit_default: true,
    };

    /// Parses a JSON document such as `{"auto_submit_default": false}`.
    ///
    /// Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidArgument`] if the document is malformed
    /// or carries unknown fields.
    pub fn from_json(json: &str) -> ProviderResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| ProviderError::invalid_argument(format!("provider config: {err}")))
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static CONFIG: RwLock<ProviderConfig> = RwLock::new(ProviderConfig::DEFAULT);

/// Replaces the process-wide configuration.
///
/// Registries snapshot the configuration when they are created, so this only
/// affects registries constructed afterwards.
#[uniffi::export]
pub fn set_config(config: ProviderConfig) {
    let mut current = CONFIG
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *current = config;
    log::debug!("provider config set: {config:?}");
}

/// Returns the process-wide configuration.
#[uniffi::export]
#[must_use]
pub fn current_config() -> ProviderConfig {
    *CONFIG.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}
