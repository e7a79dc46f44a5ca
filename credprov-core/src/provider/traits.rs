//! Host-side interfaces the provider consumes.

use std::sync::Arc;

use crate::error::ProviderResult;
use crate::scenario::UsageScenario;

use super::context::CredentialContext;

/// One account the host wants represented as a tile.
#[uniffi::export(with_foreign)]
pub trait CandidateUser: Send + Sync {
    /// Security identifier of the account.
    fn sid(&self) -> String;
}

/// Ordered, read-only list of candidate users owned by the host.
///
/// The registry keeps a shared reference to the array and reads it only when
/// it rebuilds the credential set.
#[uniffi::export(with_foreign)]
pub trait CandidateUserArray: Send + Sync {
    /// Number of candidate users.
    fn count(&self) -> u32;

    /// Returns the user at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the host cannot
    /// produce the user.
    fn get_at(&self, index: u32) -> ProviderResult<Arc<dyn CandidateUser>>;
}

/// One tile's credential, built by a [`CredentialFactory`].
///
/// The handle is opaque to the registry. Dropping the last `Arc` tears the
/// credential down.
#[uniffi::export(with_foreign)]
pub trait Credential: Send + Sync {
    /// Security identifier of the account this tile authenticates.
    fn user_sid(&self) -> String;
}

/// Builds credentials for candidate users.
#[uniffi::export(with_foreign)]
pub trait CredentialFactory: Send + Sync {
    /// Creates the credential for `user` in `scenario`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::OutOfMemory`] or
    /// [`ProviderError::InitializationFailed`] when the credential cannot be
    /// built.
    ///
    /// [`ProviderError::OutOfMemory`]: crate::ProviderError::OutOfMemory
    /// [`ProviderError::InitializationFailed`]: crate::ProviderError::InitializationFailed
    fn create(
        &self,
        scenario: UsageScenario,
        context: Arc<CredentialContext>,
        user: Arc<dyn CandidateUser>,
    ) -> ProviderResult<Arc<dyn Credential>>;
}

/// Event sink registered by the host through `advise`.
///
/// The registry never calls it itself; credentials receive it through their
/// [`CredentialContext`] and use it to report UI changes.
#[uniffi::export(with_foreign)]
pub trait ProviderEvents: Send + Sync {
    /// Tells the host the enumerated credentials changed.
    fn credentials_changed(&self, advise_context: u64);
}
