use crate::runtime::ReactiveRuntime;
use parking_lot::RwLock;
use std::sync::Arc;

/// A reactive value that notifies its observers when written.
///
/// A signal is bound to the runtime that was current when it was created.
/// Clones share the same value.
pub struct Signal<T> {
    value: Arc<RwLock<T>>,
    runtime: Arc<ReactiveRuntime>,
    id: usize,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            runtime: Arc::clone(&self.runtime),
            id: self.id,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    pub fn new(initial: T) -> Self {
        let runtime = ReactiveRuntime::current();
        let id = runtime.next_id();

        Self {
            value: Arc::new(RwLock::new(initial)),
            runtime,
            id,
        }
    }

    /// Get a clone of the current value and track the read.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Read the value with a function.
    ///
    /// `f` runs on a copy taken under the lock, so it may read or write
    /// this signal again.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.runtime.track_read(self.id);
        self.with_untracked(f)
    }

    /// Read the value without registering a dependency.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.value.read().clone();
        f(&value)
    }

    /// Replace the value and notify observers.
    pub fn set(&self, new_value: T) {
        *self.value.write() = new_value;
        self.runtime.notify(self.id);
    }

    /// Update the value and notify observers.
    ///
    /// `f` edits a copy outside the lock; the copy is written back after.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.value.read().clone();
        f(&mut value);
        *self.value.write() = value;
        self.runtime.notify(self.id);
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Signal<T> {
    /// Replace the value only if it differs. Returns whether it changed.
    pub fn set_if_changed(&self, new_value: T) -> bool {
        {
            let mut value = self.value.write();
            if *value == new_value {
                return false;
            }
            *value = new_value;
        }
        self.runtime.notify(self.id);
        true
    }
}
