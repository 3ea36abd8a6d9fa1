use std::sync::{Arc, RwLock};

use crate::repaint::{RepaintHandle, RepaintSender};
use crate::state::EngineState;

/// Holder of the current [`EngineState`] snapshot.
///
/// Transitions replace the whole snapshot under the write lock; readers get
/// a cheap `Arc` clone that never changes underneath them.
#[derive(Debug, Clone)]
pub(crate) struct StateStore {
    inner: Arc<RwLock<Arc<EngineState>>>,
    repaint: RepaintHandle,
}

impl StateStore {
    pub(crate) fn new(state: EngineState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(state))),
            repaint: RepaintHandle::default(),
        }
    }

    /// Current snapshot.
    pub(crate) fn get(&self) -> Arc<EngineState> {
        self.inner
            .read()
            .map(|guard| Arc::clone(&guard))
            .unwrap_or_else(|poisoned| Arc::clone(&poisoned.into_inner()))
    }

    /// Replace the snapshot with `f(current)` and publish it.
    pub(crate) fn update<F>(&self, f: F) -> Arc<EngineState>
    where
        F: FnOnce(&EngineState) -> EngineState,
    {
        let next = {
            let mut guard = self
                .inner
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let next = Arc::new(f(&guard));
            *guard = Arc::clone(&next);
            next
        };
        self.repaint.send();
        next
    }

    /// Run `f` on the current snapshot while holding off writers.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Arc<EngineState>) -> R) -> R {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    /// Like [`update`](StateStore::update), but `f` may decline by returning
    /// `None`, in which case nothing is published.
    pub(crate) fn update_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&EngineState) -> Option<EngineState>,
    {
        let published = {
            let mut guard = self
                .inner
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match f(&guard) {
                Some(next) => {
                    *guard = Arc::new(next);
                    true
                }
                None => false,
            }
        };
        if published {
            self.repaint.send();
        }
        published
    }

    pub(crate) fn install_repaint(&self, sender: RepaintSender) {
        self.repaint.install(sender);
    }
}
