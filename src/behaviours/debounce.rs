use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs `action` once things calm down.
///
/// Every `trigger` throws away the pending timer and starts a new one, so
/// the action only runs `wait` after the last trigger. Needs a tokio
/// runtime. The pending timer sits behind a mutex, so triggering from
/// several threads works, the last trigger to take the lock wins.
#[derive(Clone)]
pub struct Debouncer {
    wait: Duration,
    action: Arc<dyn Fn() + Send + Sync>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.wait)
            .finish()
    }
}

impl Debouncer {
    pub fn new(wait: Duration, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            wait,
            action: Arc::new(action),
            pending: Arc::default(),
        }
    }

    pub fn trigger(&self) {
        let wait = self.wait;
        let action = self.action.clone();
        let Ok(mut pending) = self.pending.lock() else {
            log::error!("Debouncer lock poisoned");
            return;
        };
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            action();
        }));
    }
}
