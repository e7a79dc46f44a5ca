//! In-memory host doubles for provider tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{ProviderError, ProviderResult};
use crate::scenario::UsageScenario;

use super::context::CredentialContext;
use super::traits::{CandidateUser, CandidateUserArray, Credential, CredentialFactory};

pub fn logon_context() -> Arc<CredentialContext> {
    Arc::new(CredentialContext::new(UsageScenario::Logon, None, 0))
}

pub struct TestUser {
    sid: String,
}

impl CandidateUser for TestUser {
    fn sid(&self) -> String {
        self.sid.clone()
    }
}

pub struct TestUsers {
    users: Vec<Arc<TestUser>>,
    unreadable: Option<u32>,
}

impl TestUsers {
    pub fn new(sids: &[&str]) -> Self {
        Self {
            users: sids
                .iter()
                .map(|sid| {
                    Arc::new(TestUser {
                        sid: (*sid).to_string(),
                    })
                })
                .collect(),
            unreadable: None,
        }
    }

    /// Makes `get_at(index)` fail as if the host could not produce the user.
    pub fn with_unreadable(mut self, index: u32) -> Self {
        self.unreadable = Some(index);
        self
    }

    /// User references handed out and not yet dropped.
    pub fn outstanding_shares(&self) -> usize {
        self.users.iter().map(|user| Arc::strong_count(user) - 1).sum()
    }
}

impl CandidateUserArray for TestUsers {
    fn count(&self) -> u32 {
        u32::try_from(self.users.len()).unwrap()
    }

    fn get_at(&self, index: u32) -> ProviderResult<Arc<dyn CandidateUser>> {
        if self.unreadable == Some(index) {
            return Err(ProviderError::InvalidArgument(format!(
                "user {index} unavailable"
            )));
        }
        let user = self
            .users
            .get(index as usize)
            .ok_or_else(|| ProviderError::InvalidArgument(format!("no user {index}")))?;
        let user: Arc<dyn CandidateUser> = user.clone();
        Ok(user)
    }
}

/// Claims more users than any slot vector can hold.
pub struct UnboundedUsers;

impl CandidateUserArray for UnboundedUsers {
    fn count(&self) -> u32 {
        u32::MAX
    }

    fn get_at(&self, index: u32) -> ProviderResult<Arc<dyn CandidateUser>> {
        Ok(Arc::new(TestUser {
            sid: format!("S-1-5-21-{index}"),
        }))
    }
}

pub struct TestCredential {
    sid: String,
    released: Arc<AtomicUsize>,
}

impl Credential for TestCredential {
    fn user_sid(&self) -> String {
        self.sid.clone()
    }
}

impl Drop for TestCredential {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct TestFactory {
    calls: AtomicUsize,
    released: Arc<AtomicUsize>,
    failing: Vec<String>,
    exhausted: Vec<String>,
    last_context: Mutex<Option<Arc<CredentialContext>>>,
}

impl TestFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, sid: &str) -> Self {
        self.failing.push(sid.to_string());
        self
    }

    /// Makes `create` report memory exhaustion for `sid`.
    pub fn out_of_memory_for(mut self, sid: &str) -> Self {
        self.exhausted.push(sid.to_string());
        self
    }

    /// Number of `create` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of credentials built by this factory that have been dropped.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn last_context(&self) -> Option<Arc<CredentialContext>> {
        self.last_context.lock().unwrap().clone()
    }
}

impl CredentialFactory for TestFactory {
    fn create(
        &self,
        _scenario: UsageScenario,
        context: Arc<CredentialContext>,
        user: Arc<dyn CandidateUser>,
    ) -> ProviderResult<Arc<dyn Credential>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_context.lock().unwrap() = Some(context);

        let sid = user.sid();
        if self.exhausted.contains(&sid) {
            return Err(ProviderError::OutOfMemory);
        }
        if self.failing.contains(&sid) {
            return Err(ProviderError::InitializationFailed(format!(
                "no tile for {sid}"
            )));
        }
        Ok(Arc::new(TestCredential {
            sid,
            released: Arc::clone(&self.released),
        }))
    }
}
