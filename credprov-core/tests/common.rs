//! Common test utilities shared across integration tests.
#![allow(missing_docs)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use credprov_core::{
    CandidateUser, CandidateUserArray, Credential, CredentialContext, CredentialFactory,
    ProviderError, ProviderResult, UsageScenario,
};

pub struct HostUser {
    sid: String,
}

impl CandidateUser for HostUser {
    fn sid(&self) -> String {
        self.sid.clone()
    }
}

/// User array as the logon UI would hand it over.
pub struct HostUserArray {
    users: Vec<Arc<HostUser>>,
}

impl HostUserArray {
    pub fn with_users(count: usize) -> Arc<Self> {
        Arc::new(Self {
            users: (0..count)
                .map(|i| {
                    Arc::new(HostUser {
                        sid: format!("S-1-5-21-3623811015-{}", 1000 + i),
                    })
                })
                .collect(),
        })
    }

    pub fn sid_at(&self, index: usize) -> String {
        self.users[index].sid.clone()
    }
}

impl CandidateUserArray for HostUserArray {
    fn count(&self) -> u32 {
        u32::try_from(self.users.len()).unwrap()
    }

    fn get_at(&self, index: u32) -> ProviderResult<Arc<dyn CandidateUser>> {
        let user = self
            .users
            .get(index as usize)
            .ok_or_else(|| ProviderError::InvalidArgument(format!("no user {index}")))?;
        let user: Arc<dyn CandidateUser> = user.clone();
        Ok(user)
    }
}

pub struct TrackedCredential {
    sid: String,
    live: Arc<AtomicUsize>,
}

impl Credential for TrackedCredential {
    fn user_sid(&self) -> String {
        self.sid.clone()
    }
}

impl Drop for TrackedCredential {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Factory counting `create` calls and live credentials.
#[derive(Default)]
pub struct CountingFactory {
    created: AtomicUsize,
    live: Arc<AtomicUsize>,
    failing: HashSet<String>,
}

impl CountingFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_for(sids: &[String]) -> Arc<Self> {
        Arc::new(Self {
            failing: sids.iter().cloned().collect(),
            ..Self::default()
        })
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl CredentialFactory for CountingFactory {
    fn create(
        &self,
        scenario: UsageScenario,
        context: Arc<CredentialContext>,
        user: Arc<dyn CandidateUser>,
    ) -> ProviderResult<Arc<dyn Credential>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        assert_eq!(scenario, context.scenario());

        let sid = user.sid();
        if self.failing.contains(&sid) {
            return Err(ProviderError::InitializationFailed(sid));
        }
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(TrackedCredential {
            sid,
            live: Arc::clone(&self.live),
        }))
    }
}
