use std::time::Duration;

use flume::Receiver;

use crate::environment::storage::Publisher;
use crate::environment::types::{Toast, ToastKind};
use crate::helper::generate_id;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Keeps the visible toasts in display order and removes each one once
/// its duration ran out. Needs a tokio runtime for the expiry timers.
#[derive(Clone, Debug)]
pub struct ToastManager {
    toasts: Publisher<Vec<Toast>>,
    duration: Duration,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastManager {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: Publisher::default(),
            duration,
        }
    }

    /// Show a toast for the default duration
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> String {
        self.show_for(message, kind, self.duration)
    }

    pub fn show_for(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> String {
        let toast = Toast {
            id: generate_id(),
            message: message.into(),
            kind,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        };
        let id = toast.id.clone();
        log::debug!("toast {kind}: {}", toast.message);
        self.toasts.with_mutation(|toasts| toasts.push(toast));

        let manager = self.clone();
        let expired = id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            manager.remove(&expired);
        });
        id
    }

    /// Unknown ids are ignored, the toast may already be gone
    pub fn remove(&self, id: &str) {
        self.toasts.with_mutation_if(|toasts| {
            let count = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != count
        });
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.value()
    }

    pub fn subscribe(&self) -> Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }
}
