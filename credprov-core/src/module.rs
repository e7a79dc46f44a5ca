//! Process-wide count of live provider objects.
//!
//! The hosting module may only be unloaded once every registry it handed out
//! has been dropped. Each registry holds a [`ModuleRef`] for its lifetime.

use std::sync::atomic::{AtomicUsize, Ordering};

static ACTIVE_OBJECTS: AtomicUsize = AtomicUsize::new(0);

/// Reference on the hosting module, released on drop.
#[derive(Debug)]
pub(crate) struct ModuleRef(());

impl ModuleRef {
    pub(crate) fn acquire() -> Self {
        let previous = ACTIVE_OBJECTS.fetch_add(1, Ordering::AcqRel);
        if previous == 0 {
            log::debug!("first provider object created, module pinned");
        }
        Self(())
    }
}

impl Drop for ModuleRef {
    fn drop(&mut self) {
        let previous = ACTIVE_OBJECTS.fetch_sub(1, Ordering::AcqRel);
        if previous == 1 {
            log::debug!("last provider object released, module may unload");
        }
    }
}

/// Number of provider objects currently alive in this process.
#[uniffi::export]
#[must_use]
pub fn active_objects() -> u64 {
    u64::try_from(ACTIVE_OBJECTS.load(Ordering::Acquire)).unwrap_or(u64::MAX)
}

/// Whether the hosting module can be unloaded (no provider object alive).
#[uniffi::export]
#[must_use]
pub fn can_unload_now() -> bool {
    ACTIVE_OBJECTS.load(Ordering::Acquire) == 0
}
