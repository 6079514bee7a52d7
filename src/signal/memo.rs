use crate::runtime::ReactiveRuntime;
use parking_lot::Mutex;
use std::sync::Arc;

/// A memoized computed value that automatically tracks dependencies.
///
/// The computation runs lazily on the first read and again only after one
/// of the values it read has changed.
pub struct Memo<T> {
    cached: Arc<Mutex<Option<T>>>,
    compute: Arc<dyn Fn() -> T + Send + Sync>,
    runtime: Arc<ReactiveRuntime>,
    id: usize,
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            cached: Arc::clone(&self.cached),
            compute: Arc::clone(&self.compute),
            runtime: Arc::clone(&self.runtime),
            id: self.id,
        }
    }
}

impl<T: Clone + Send + 'static> Memo<T> {
    /// Create a new memo with the given computation function.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let runtime = ReactiveRuntime::current();
        let id = runtime.next_id();
        runtime.register_memo(id);

        Self {
            cached: Arc::new(Mutex::new(None)),
            compute: Arc::new(compute),
            runtime,
            id,
        }
    }

    /// Get the current value, recomputing if necessary.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Read the memoized value with a function.
    ///
    /// `f` runs after the cache lock is released, so it may read this memo
    /// again.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.runtime.track_read(self.id);

        if !self.runtime.is_memo_dirty(self.id) {
            let cached = self.cached.lock().clone();
            if let Some(value) = cached {
                return f(&value);
            }
        }

        // The cache stays unlocked while the computation reads its sources.
        let value = self.runtime.with_observer(self.id, || (self.compute)());
        tracing::trace!(memo_id = self.id, "memo recomputed");
        self.runtime.mark_memo_clean(self.id);
        *self.cached.lock() = Some(value.clone());
        f(&value)
    }
}

impl<T> Drop for Memo<T> {
    fn drop(&mut self) {
        // Last handle gone: drop the memo's node from the graph.
        if Arc::strong_count(&self.cached) == 1 {
            self.runtime.remove_observer(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn memo_basic() {
        ReactiveRuntime::scope(|| {
            let count = Signal::new(5);
            let doubled = Memo::new({
                let count = count.clone();
                move || count.get() * 2
            });

            assert_eq!(doubled.get(), 10);

            count.set(10);
            assert_eq!(doubled.get(), 20);
        });
    }

    #[test]
    fn memo_computes_once_per_change() {
        ReactiveRuntime::scope(|| {
            let runs = Arc::new(AtomicUsize::new(0));
            let input = Signal::new(1);
            let memo = Memo::new({
                let input = input.clone();
                let runs = runs.clone();
                move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                    input.get() + 1
                }
            });

            assert_eq!(runs.load(Ordering::SeqCst), 0);
            assert_eq!(memo.get(), 2);
            assert_eq!(memo.get(), 2);
            assert_eq!(runs.load(Ordering::SeqCst), 1);

            input.set(7);
            assert_eq!(memo.get(), 8);
            assert_eq!(runs.load(Ordering::SeqCst), 2);
        });
    }

    #[test]
    fn callbacks_may_reenter_the_memo() {
        ReactiveRuntime::scope(|| {
            let input = Signal::new(3);
            let memo = Memo::new({
                let input = input.clone();
                move || input.get() * 2
            });

            // First read computes, second read hits the cache.
            assert_eq!(memo.with(|v| *v + memo.get()), 12);
            assert_eq!(memo.with(|v| *v + memo.get()), 12);
        });
    }
}
