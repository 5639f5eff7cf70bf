//! Fan-out of sync progress events to registered callbacks.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use crate::model::sync::SyncProgress;

type ProgressCallback = Arc<dyn Fn(&SyncProgress) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    callbacks: BTreeMap<u64, ProgressCallback>,
    last: Option<SyncProgress>,
}

#[derive(Clone, Default)]
pub struct ProgressHub {
    listeners: Arc<Mutex<Listeners>>,
}

impl ProgressHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` until the returned subscription is dropped.
    pub fn subscribe<F>(&self, callback: F) -> ProgressSubscription
    where
        F: Fn(&SyncProgress) + Send + Sync + 'static,
    {
        let mut listeners = self.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.callbacks.insert(id, Arc::new(callback));

        ProgressSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Records `progress` as the latest event and hands it to every callback.
    ///
    /// Callbacks run outside the lock, so they may subscribe or unsubscribe.
    pub fn emit(&self, progress: SyncProgress) {
        let callbacks: Vec<ProgressCallback> = {
            let mut listeners = self.lock();
            listeners.last = Some(progress.clone());
            listeners.callbacks.values().cloned().collect()
        };

        for callback in callbacks {
            callback(&progress);
        }
    }

    pub fn last(&self) -> Option<SyncProgress> {
        self.lock().last.clone()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().callbacks.len()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle of a progress callback; dropping it unregisters the callback.
pub struct ProgressSubscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl ProgressSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .callbacks
                .remove(&self.id);
        }
    }
}
