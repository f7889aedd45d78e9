use std::sync::{Arc, Mutex, MutexGuard};

use flume::{Receiver, Sender};

/// Shared state that tells its subscribers about every mutation.
///
/// Each subscriber receives a snapshot of the value after the mutation
/// happened. Subscribers that dropped their receiver are forgotten on
/// the next mutation.
pub struct Publisher<T> {
    value: Arc<Mutex<T>>,
    subscribers: Arc<Mutex<Vec<Sender<T>>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Default + Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("value", &self.value)
            .finish()
    }
}

impl<T: Clone> Publisher<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(value)),
            subscribers: Arc::default(),
        }
    }

    pub fn subscribe(&self) -> Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        lock(&self.subscribers).push(sender);
        receiver
    }

    /// Read access without notifying anyone
    pub fn with<R>(&self, action: impl FnOnce(&T) -> R) -> R {
        action(&lock(&self.value))
    }

    pub fn value(&self) -> T {
        self.with(T::clone)
    }

    /// Mutate the value and publish the result
    pub fn with_mutation<R>(&self, action: impl FnOnce(&mut T) -> R) -> R {
        let (result, snapshot) = {
            let mut value = lock(&self.value);
            let result = action(&mut value);
            (result, value.clone())
        };
        self.publish(snapshot);
        result
    }

    /// Like `with_mutation`, but subscribers only hear about it when
    /// `action` reports a change. Check and change share one lock.
    pub fn with_mutation_if(&self, action: impl FnOnce(&mut T) -> bool) -> bool {
        let snapshot = {
            let mut value = lock(&self.value);
            if !action(&mut value) {
                return false;
            }
            value.clone()
        };
        self.publish(snapshot);
        true
    }

    fn publish(&self, snapshot: T) {
        lock(&self.subscribers).retain(|sender| sender.send(snapshot.clone()).is_ok());
    }
}

/// A panic while holding the lock leaves the data usable for us, so we
/// keep going with whatever is inside
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::error!("Poisoned state lock, continuing");
        poisoned.into_inner()
    })
}
