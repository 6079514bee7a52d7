use crate::runtime::ReactiveRuntime;
use std::sync::Arc;

/// A side effect that runs when its dependencies change.
///
/// Effects track every signal or memo they read and re-run synchronously
/// after any of them is written. Dependencies are re-collected on each run.
/// Dropping the effect unsubscribes it.
///
/// # Examples
///
/// ```
/// use postboard::{Effect, Signal};
/// use std::sync::{Arc, atomic::{AtomicI32, Ordering}};
///
/// let signal = Signal::new(5);
/// let last_value = Arc::new(AtomicI32::new(0));
///
/// let _effect = Effect::new({
///     let signal = signal.clone();
///     let last_value = last_value.clone();
///     move || last_value.store(signal.get(), Ordering::SeqCst)
/// });
/// assert_eq!(last_value.load(Ordering::SeqCst), 5);
///
/// signal.set(10);
/// assert_eq!(last_value.load(Ordering::SeqCst), 10);
/// ```
#[must_use = "dropping an Effect unsubscribes it"]
pub struct Effect {
    id: usize,
    runtime: Arc<ReactiveRuntime>,
}

impl Effect {
    /// Create an effect and run it once to collect its dependencies.
    pub fn new<F>(effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let runtime = ReactiveRuntime::current();
        let id = runtime.next_id();

        runtime.register_effect(id, Arc::new(effect));
        runtime.run_effect(id);

        Self { id, runtime }
    }

    /// Manually re-run the effect.
    pub fn run(&self) {
        self.runtime.run_effect(self.id);
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        self.runtime.remove_observer(self.id);
    }
}
