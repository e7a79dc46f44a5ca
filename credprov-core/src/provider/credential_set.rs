//! The enumerated credential set and the rebuild that produces it.

use std::sync::Arc;

use crate::error::{ProviderError, ProviderResult};

use super::context::CredentialContext;
use super::traits::{CandidateUserArray, Credential, CredentialFactory};

/// Outcome of the most recent rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RebuildReport {
    slots: u32,
    constructed: u32,
    last_error: Option<ProviderError>,
}

impl RebuildReport {
    /// Number of tiles reported to the host, holes included.
    #[must_use]
    pub const fn slots(&self) -> u32 {
        self.slots
    }

    /// Number of slots holding a usable credential.
    #[must_use]
    pub const fn constructed(&self) -> u32 {
        self.constructed
    }

    /// Number of slots whose credential failed to build.
    #[must_use]
    pub const fn holes(&self) -> u32 {
        self.slots - self.constructed
    }

    /// Last error absorbed while building, if any.
    #[must_use]
    pub const fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }
}

/// Credentials index-aligned with the candidate users seen at the last rebuild.
///
/// `None` slots are holes. Dropping the set (or calling [`release`]) drops the
/// registry's share of every credential.
///
/// [`release`]: CredentialSet::release
#[derive(Default)]
pub(crate) struct CredentialSet {
    slots: Vec<Option<Arc<dyn Credential>>>,
}

impl CredentialSet {
    /// Builds one credential per candidate user.
    ///
    /// A failing candidate leaves a hole and does not stop the enumeration;
    /// the report keeps the last failure.
    pub(crate) fn enumerate(
        users: &dyn CandidateUserArray,
        factory: &dyn CredentialFactory,
        context: &Arc<CredentialContext>,
    ) -> (Self, RebuildReport) {
        let count = users.count();
        let mut report = RebuildReport::default();
        if count == 0 {
            return (Self::default(), report);
        }

        let mut slots = Vec::new();
        let reserved = usize::try_from(count)
            .ok()
            .is_some_and(|capacity| slots.try_reserve_exact(capacity).is_ok());
        if !reserved {
            log::error!("cannot reserve {count} credential slots");
            report.last_error = Some(ProviderError::OutOfMemory);
            return (Self::default(), report);
        }

        for index in 0..count {
            match build_slot(index, users, factory, context) {
                Ok(credential) => {
                    slots.push(Some(credential));
                    report.constructed += 1;
                }
                Err(err) => {
                    log::warn!("no credential for candidate {index}: {err}");
                    slots.push(None);
                    report.last_error = Some(err);
                }
            }
        }
        report.slots = count;

        (Self { slots }, report)
    }

    /// Number of tiles, holes included.
    pub(crate) fn len(&self) -> u32 {
        // The set never holds more slots than a `u32` candidate count.
        u32::try_from(self.slots.len()).unwrap_or(u32::MAX)
    }

    /// Returns a new share of the credential at `index`.
    pub(crate) fn get(&self, index: u32) -> ProviderResult<Arc<dyn Credential>> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.slots.get(i))
            .ok_or_else(|| {
                ProviderError::invalid_argument(format!(
                    "tile index {index} out of range for {} tiles",
                    self.len()
                ))
            })?;
        slot.clone().ok_or(ProviderError::BrokenTile { index })
    }

    /// Drops every slot and returns how many live credentials were released.
    pub(crate) fn release(&mut self) -> usize {
        let released = self.slots.iter().flatten().count();
        self.slots.clear();
        released
    }
}

/// The user share obtained here is handed to the factory and released when
/// `create` returns, whatever the outcome.
fn build_slot(
    index: u32,
    users: &dyn CandidateUserArray,
    factory: &dyn CredentialFactory,
    context: &Arc<CredentialContext>,
) -> ProviderResult<Arc<dyn Credential>> {
    let user = users.get_at(index)?;
    factory.create(context.scenario(), Arc::clone(context), user)
}
