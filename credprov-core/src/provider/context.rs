//! Shared context handed to the credential factory.

use std::fmt;
use std::sync::Arc;

use crate::scenario::UsageScenario;

use super::traits::ProviderEvents;

/// Read-only state shared by every credential built in one rebuild.
#[derive(uniffi::Object)]
pub struct CredentialContext {
    scenario: UsageScenario,
    events: Option<Arc<dyn ProviderEvents>>,
    advise_context: u64,
}

impl CredentialContext {
    pub(crate) fn new(
        scenario: UsageScenario,
        events: Option<Arc<dyn ProviderEvents>>,
        advise_context: u64,
    ) -> Self {
        Self {
            scenario,
            events,
            advise_context,
        }
    }
}

impl fmt::Debug for CredentialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialContext")
            .field("scenario", &self.scenario)
            .field("advised", &self.events.is_some())
            .field("advise_context", &self.advise_context)
            .finish()
    }
}

#[uniffi::export]
impl CredentialContext {
    /// Scenario the credentials are built for.
    #[must_use]
    pub fn scenario(&self) -> UsageScenario {
        self.scenario
    }

    /// Host event sink, if the host called `advise`.
    #[must_use]
    pub fn events(&self) -> Option<Arc<dyn ProviderEvents>> {
        self.events.clone()
    }

    /// Cookie the host expects back in event callbacks.
    #[must_use]
    pub fn advise_context(&self) -> u64 {
        self.advise_context
    }
}
