//! Logon tile enumeration and credential lifecycle management.
//!
//! A host (the logon UI) picks a [`UsageScenario`], hands over the accounts it
//! wants to show, and asks a [`ProviderRegistry`] how many tiles to display.
//! The registry builds one credential per account through a host-supplied
//! [`CredentialFactory`], caches the set until the scenario or the accounts
//! change, and releases every credential it owns on rebuild and on drop.

pub mod config;
pub use config::{current_config, set_config, ProviderConfig};

mod error;
pub use error::*;

pub mod logger;

pub mod module;

pub mod provider;
pub use provider::*;

mod scenario;
pub use scenario::*;

uniffi::setup_scaffolding!("credprov_core");
