use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Runs a callback once a key has been quiet for `delay`.
///
/// Scheduling a key that already has a pending callback aborts the pending one,
/// so each settling period produces exactly one run.
#[derive(Debug)]
pub struct Debouncer<K> {
    delay: Duration,
    pending: Mutex<HashMap<K, JoinHandle<()>>>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + 'static,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `callback` for `key`, replacing a pending one.
    ///
    /// Outside a tokio runtime there is nothing to defer on, so the callback runs immediately.
    pub fn schedule<F>(&self, key: K, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!("No runtime available, running {:?} immediately", key);
                callback();
                return;
            }
        };

        let delay = self.delay;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });

        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        pending.retain(|_, h| !h.is_finished());
        if let Some(previous) = pending.insert(key.clone(), handle) {
            debug!("Rescheduled pending callback for {:?}", key);
            previous.abort();
        }
    }

    /// Aborts the pending callback for `key`; returns whether one was still waiting
    pub fn cancel(&self, key: &K) -> bool {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match pending.remove(key) {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Aborts every pending callback whose key matches `predicate`
    pub fn cancel_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&K) -> bool,
    {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let keys: Vec<K> = pending.keys().filter(|k| predicate(k)).cloned().collect();
        let mut cancelled = 0;
        for key in keys {
            if let Some(handle) = pending.remove(&key) {
                if !handle.is_finished() {
                    cancelled += 1;
                }
                handle.abort();
            }
        }
        cancelled
    }

    /// Number of callbacks still waiting to run
    pub fn pending(&self) -> usize {
        let pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        pending.values().filter(|h| !h.is_finished()).count()
    }
}
