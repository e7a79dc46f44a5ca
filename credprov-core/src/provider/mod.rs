//! Credential provider core.
//!
//! The provider depends on host-provided capabilities through traits:
//!
//! - [`CandidateUserArray`] / [`CandidateUser`]: the accounts to show as tiles
//! - [`CredentialFactory`]: builds one [`Credential`] per candidate user
//! - [`ProviderEvents`]: event sink forwarded to credentials
//!
//! [`ProviderRegistry`] ties them together and owns the enumerated set.

mod context;
mod credential_set;
mod registry;
mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::CredentialContext;
pub use credential_set::RebuildReport;
pub use registry::{CredentialCount, ProviderRegistry};
pub use traits::{CandidateUser, CandidateUserArray, Credential, CredentialFactory, ProviderEvents};
