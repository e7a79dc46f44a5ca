//! Provider registry: scenario selection, lazy enumeration and tile access.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{current_config, ProviderConfig};
use crate::error::{ProviderError, ProviderResult};
use crate::module::ModuleRef;
use crate::scenario::{ScenarioState, UsageScenario};

use super::context::CredentialContext;
use super::credential_set::{CredentialSet, RebuildReport};
use super::traits::{CandidateUserArray, Credential, CredentialFactory, ProviderEvents};

/// Answer to the host's "how many tiles" query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct CredentialCount {
    /// Number of tiles, including tiles whose credential failed to build.
    pub count: u32,
    /// Tile to show zoomed in by default. The provider never picks one.
    pub default_index: Option<u32>,
    /// Whether the host should submit the default tile without further UI.
    pub auto_submit_default: bool,
}

/// Owns the enumerated credentials for one host session.
///
/// The host selects a scenario, supplies candidate users, then asks for the
/// tile count. Any change to the scenario or the users marks the set dirty;
/// it is rebuilt on the next [`query_credential_count`] and never earlier.
///
/// Host callbacks (user lookup, credential construction, credential drops)
/// run while the registry's lock is held. The host must not call back into
/// the registry from those callbacks; a re-entrant call deadlocks.
///
/// [`query_credential_count`]: ProviderRegistry::query_credential_count
#[derive(uniffi::Object)]
pub struct ProviderRegistry {
    inner: Mutex<RegistryInner>,
    _module: ModuleRef,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry").finish()
    }
}

struct RegistryInner {
    factory: Arc<dyn CredentialFactory>,
    config: ProviderConfig,
    state: ScenarioState,
    users: Option<Arc<dyn CandidateUserArray>>,
    events: Option<Arc<dyn ProviderEvents>>,
    advise_context: u64,
    credentials: CredentialSet,
    rebuild_pending: bool,
    last_rebuild: Option<RebuildReport>,
}

impl RegistryInner {
    fn new(factory: Arc<dyn CredentialFactory>, config: ProviderConfig) -> Self {
        Self {
            factory,
            config,
            state: ScenarioState::Uninitialized,
            users: None,
            events: None,
            advise_context: 0,
            credentials: CredentialSet::default(),
            rebuild_pending: false,
            last_rebuild: None,
        }
    }

    fn select_scenario(&mut self, scenario: UsageScenario) -> ProviderResult<()> {
        let (next, outcome) = self.state.select(scenario);
        if next != self.state {
            log::debug!("scenario state {} -> {next}", self.state);
            self.state = next;
        }
        if outcome.is_ok() {
            self.rebuild_pending = true;
        }
        outcome
    }

    fn set_candidate_users(&mut self, users: Arc<dyn CandidateUserArray>) {
        let previous = self.users.replace(users);
        drop(previous);
        self.rebuild_pending = true;
    }

    fn query_credential_count(&mut self) -> CredentialCount {
        if self.rebuild_pending {
            self.rebuild();
        }
        CredentialCount {
            count: self.credentials.len(),
            default_index: None,
            auto_submit_default: self.config.auto_submit_default,
        }
    }

    fn rebuild(&mut self) {
        let released = self.credentials.release();
        log::debug!("released {released} enumerated credentials");

        let (credentials, report) = match (self.state.enumeration_scenario(), &self.users) {
            (Some(scenario), Some(users)) => {
                log::debug!("enumerating {} candidate users", users.count());
                let context = Arc::new(CredentialContext::new(
                    scenario,
                    self.events.clone(),
                    self.advise_context,
                ));
                CredentialSet::enumerate(users.as_ref(), self.factory.as_ref(), &context)
            }
            (Some(_), None) => {
                log::debug!("no candidate users supplied, nothing to enumerate");
                (CredentialSet::default(), RebuildReport::default())
            }
            (None, _) => {
                log::debug!("scenario state {} does not enumerate", self.state);
                (CredentialSet::default(), RebuildReport::default())
            }
        };

        log::info!(
            "enumerated {} tiles ({} unavailable)",
            report.slots(),
            report.holes()
        );
        self.credentials = credentials;
        self.last_rebuild = Some(report);
        self.rebuild_pending = false;
    }
}

impl ProviderRegistry {
    fn from_inner(inner: RegistryInner) -> Self {
        Self {
            inner: Mutex::new(inner),
            _module: ModuleRef::acquire(),
        }
    }

    /// Host calls are serialized and nothing here panics while holding the
    /// lock, so a poisoned mutex still guards consistent state. Host
    /// callbacks made under the guard must not re-enter the registry.
    fn lock_inner(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Report of the most recent rebuild, or `None` before the first one.
    ///
    /// Rust-only: the report is not exported over FFI, where hosts only see
    /// the count and per-tile [`ProviderError::BrokenTile`] errors.
    #[must_use]
    pub fn last_rebuild(&self) -> Option<RebuildReport> {
        self.lock_inner().last_rebuild.clone()
    }
}

#[uniffi::export]
impl ProviderRegistry {
    /// Creates a registry using the process-wide configuration.
    #[uniffi::constructor]
    #[must_use]
    pub fn new(factory: Arc<dyn CredentialFactory>) -> Self {
        Self::with_config(factory, current_config())
    }

    /// Creates a registry with an explicit configuration.
    #[uniffi::constructor]
    #[must_use]
    pub fn with_config(factory: Arc<dyn CredentialFactory>, config: ProviderConfig) -> Self {
        Self::from_inner(RegistryInner::new(factory, config))
    }

    /// Selects the usage scenario for this session.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotSupported`] for password change and
    /// credential UI scenarios, and for any scenario once the session has
    /// been declined.
    pub fn select_scenario(&self, scenario: UsageScenario) -> ProviderResult<()> {
        log::debug!("select scenario {scenario}");
        self.lock_inner().select_scenario(scenario)
    }

    /// Selects the usage scenario from the host's numeric tag.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidArgument`] for unrecognized tags and
    /// otherwise behaves like [`select_scenario`](Self::select_scenario).
    pub fn select_scenario_tag(&self, tag: u32) -> ProviderResult<()> {
        let scenario = UsageScenario::try_from(tag)?;
        self.select_scenario(scenario)
    }

    /// Replaces the candidate users and marks the credentials for rebuild.
    ///
    /// The current credentials stay reachable until the next count query.
    pub fn set_candidate_users(&self, users: Arc<dyn CandidateUserArray>) {
        log::debug!("candidate users replaced");
        self.lock_inner().set_candidate_users(users);
    }

    /// Returns the tile count, rebuilding the credentials first if needed.
    pub fn query_credential_count(&self) -> CredentialCount {
        self.lock_inner().query_credential_count()
    }

    /// Returns a shared reference to the credential for tile `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidArgument`] if `index` is not below the
    /// last reported count, and [`ProviderError::BrokenTile`] if the
    /// credential for that tile failed to build.
    pub fn get_credential_at(&self, index: u32) -> ProviderResult<Arc<dyn Credential>> {
        self.lock_inner().credentials.get(index)
    }

    /// Registers the host event sink passed to credentials built from now on.
    pub fn advise(&self, events: Arc<dyn ProviderEvents>, advise_context: u64) {
        let mut inner = self.lock_inner();
        inner.events = Some(events);
        inner.advise_context = advise_context;
    }

    /// Drops the host event sink.
    pub fn unadvise(&self) {
        let mut inner = self.lock_inner();
        inner.events = None;
        inner.advise_context = 0;
    }

    /// Pre-populating a tile from an incoming serialization.
    ///
    /// # Errors
    ///
    /// Always returns [`ProviderError::NotSupported`].
    #[allow(clippy::needless_pass_by_value, clippy::unused_self)]
    pub fn set_serialization(&self, serialization: Vec<u8>) -> ProviderResult<()> {
        Err(ProviderError::not_supported(format!(
            "incoming serialization ({} bytes)",
            serialization.len()
        )))
    }

    /// Current scenario state.
    #[must_use]
    pub fn scenario_state(&self) -> ScenarioState {
        self.lock_inner().state
    }
}
