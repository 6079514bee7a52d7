use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

type Observer = Arc<dyn Fn() + Send + Sync>;

/// Dependency graph shared by every primitive created in one runtime.
#[derive(Default)]
struct Graph {
    current_observer: Option<usize>,
    // Source ID -> observers that read it during their last run
    dependents: HashMap<usize, HashSet<usize>>,
    // Observer ID -> sources it read during its last run
    sources: HashMap<usize, HashSet<usize>>,
    effects: HashMap<usize, Observer>,
    // Memo ID -> dirty flag
    memo_dirty: HashMap<usize, bool>,
}

impl Graph {
    fn unlink(&mut self, observer_id: usize) {
        if let Some(old) = self.sources.remove(&observer_id) {
            for source_id in old {
                if let Some(deps) = self.dependents.get_mut(&source_id) {
                    deps.remove(&observer_id);
                }
            }
        }
    }

    /// Marks every memo downstream of `source_id` dirty and returns the
    /// effects that must re-run, ordered by ID (registration order).
    fn invalidate(&mut self, source_id: usize) -> BTreeSet<usize> {
        let mut effects = BTreeSet::new();
        let mut pending = vec![source_id];

        while let Some(id) = pending.pop() {
            let Some(deps) = self.dependents.get(&id) else {
                continue;
            };
            for &observer_id in deps {
                match self.memo_dirty.get_mut(&observer_id) {
                    Some(dirty) if !*dirty => {
                        *dirty = true;
                        pending.push(observer_id);
                    }
                    Some(_) => {}
                    None => {
                        if self.effects.contains_key(&observer_id) {
                            effects.insert(observer_id);
                        }
                    }
                }
            }
        }
        effects
    }
}

/// Reactive runtime for signals, memos and effects.
///
/// The runtime tracks which observers read which sources and re-runs
/// effects synchronously after a write. Invalidation happens in two
/// phases: every dependent memo is marked dirty before any effect runs,
/// so an effect never sees a stale memo next to a fresh signal.
///
/// # Examples
///
/// ```
/// use postboard::runtime::ReactiveRuntime;
/// use postboard::Signal;
///
/// ReactiveRuntime::scope(|| {
///     let signal = Signal::new(0);
///     assert_eq!(signal.get(), 0);
/// });
/// ```
pub struct ReactiveRuntime {
    next_id: AtomicUsize,
    graph: Mutex<Graph>,
}

thread_local! {
    static RUNTIME_STACK: RefCell<Vec<Arc<ReactiveRuntime>>> = const { RefCell::new(Vec::new()) };
}

impl ReactiveRuntime {
    /// Create a new isolated runtime.
    pub fn new() -> Arc<Self> {
        Arc::new(ReactiveRuntime {
            next_id: AtomicUsize::new(0),
            graph: Mutex::new(Graph::default()),
        })
    }

    /// Run a function with a fresh isolated runtime.
    pub fn scope<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        Self::with_runtime(Self::new(), f)
    }

    /// The process-wide runtime used when no scoped runtime is active.
    pub fn global() -> Arc<Self> {
        static RUNTIME: OnceLock<Arc<ReactiveRuntime>> = OnceLock::new();
        Arc::clone(RUNTIME.get_or_init(Self::new))
    }

    /// The innermost scoped runtime, or the global one.
    pub fn current() -> Arc<Self> {
        RUNTIME_STACK
            .with(|stack| stack.borrow().last().cloned())
            .unwrap_or_else(Self::global)
    }

    /// Run a function with `runtime` as the current runtime.
    ///
    /// Primitives created inside `f` stay bound to `runtime` afterwards.
    pub fn with_runtime<F, R>(runtime: Arc<Self>, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        RUNTIME_STACK.with(|stack| stack.borrow_mut().push(runtime));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        RUNTIME_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });

        match result {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    /// Generate the next unique ID for a reactive primitive.
    pub(crate) fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Record that the current observer (if any) read `source_id`.
    pub(crate) fn track_read(&self, source_id: usize) {
        let mut graph = self.graph.lock();
        if let Some(observer_id) = graph.current_observer {
            graph
                .dependents
                .entry(source_id)
                .or_default()
                .insert(observer_id);
            graph
                .sources
                .entry(observer_id)
                .or_default()
                .insert(source_id);
        }
    }

    /// Propagate a write to `source_id`: dirty memos first, then effects.
    pub(crate) fn notify(&self, source_id: usize) {
        let effects = self.graph.lock().invalidate(source_id);
        if !effects.is_empty() {
            tracing::trace!(source_id, effects = effects.len(), "notifying effects");
        }
        for effect_id in effects {
            self.run_effect(effect_id);
        }
    }

    /// Evaluate `f` as observer `observer_id`, replacing its previous
    /// dependencies with whatever `f` reads.
    pub(crate) fn with_observer<F, R>(&self, observer_id: usize, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let prev = {
            let mut graph = self.graph.lock();
            graph.unlink(observer_id);
            graph.current_observer.replace(observer_id)
        };

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        self.graph.lock().current_observer = prev;

        match result {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    pub(crate) fn register_effect(&self, effect_id: usize, run: Observer) {
        self.graph.lock().effects.insert(effect_id, run);
    }

    pub(crate) fn run_effect(&self, effect_id: usize) {
        let run = self.graph.lock().effects.get(&effect_id).cloned();
        if let Some(run) = run {
            tracing::trace!(effect_id, "running effect");
            self.with_observer(effect_id, || run());
        }
    }

    /// Forget an observer and all edges pointing at it.
    pub(crate) fn remove_observer(&self, observer_id: usize) {
        let mut graph = self.graph.lock();
        graph.effects.remove(&observer_id);
        graph.memo_dirty.remove(&observer_id);
        graph.dependents.remove(&observer_id);
        graph.unlink(observer_id);
    }

    /// Register a memo; it starts dirty.
    pub(crate) fn register_memo(&self, memo_id: usize) {
        self.graph.lock().memo_dirty.insert(memo_id, true);
    }

    pub(crate) fn is_memo_dirty(&self, memo_id: usize) -> bool {
        self.graph
            .lock()
            .memo_dirty
            .get(&memo_id)
            .copied()
            .unwrap_or(true)
    }

    pub(crate) fn mark_memo_clean(&self, memo_id: usize) {
        self.graph.lock().memo_dirty.insert(memo_id, false);
    }

    /// Number of live effects. Used to check that dropped watchers unsubscribe.
    pub fn effect_count(&self) -> usize {
        self.graph.lock().effects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_pushes_and_pops() {
        let outer = ReactiveRuntime::current();
        let inner = ReactiveRuntime::new();
        let seen = ReactiveRuntime::with_runtime(inner.clone(), ReactiveRuntime::current);
        assert!(Arc::ptr_eq(&seen, &inner));
        assert!(Arc::ptr_eq(&ReactiveRuntime::current(), &outer));
    }

    #[test]
    fn scope_pops_after_panic() {
        let before = ReactiveRuntime::current();
        let result = std::panic::catch_unwind(|| {
            ReactiveRuntime::scope(|| panic!("boom"));
        });
        assert!(result.is_err());
        assert!(Arc::ptr_eq(&ReactiveRuntime::current(), &before));
    }

    #[test]
    fn invalidate_walks_memo_chain() {
        let runtime = ReactiveRuntime::new();
        let signal = runtime.next_id();
        let memo = runtime.next_id();
        let effect = runtime.next_id();

        runtime.register_memo(memo);
        runtime.register_effect(effect, Arc::new(|| {}));
        runtime.with_observer(memo, || runtime.track_read(signal));
        runtime.mark_memo_clean(memo);
        runtime.with_observer(effect, || runtime.track_read(memo));

        let effects = runtime.graph.lock().invalidate(signal);
        assert!(runtime.is_memo_dirty(memo));
        assert_eq!(effects.into_iter().collect::<Vec<_>>(), vec![effect]);
    }
}
