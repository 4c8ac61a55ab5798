//! The engine facade: one load in flight, a FIFO of pending tasks, and the
//! cache of everything loaded so far.

use crate::cache::{Bundle, CacheStore};
use crate::loader::Loader;
use crate::queue::PendingQueue;
use crate::source::Source;
use crate::task::LoadTask;

/// A single-flight loading and caching engine over a `Source`.
///
/// The host owns the value, submits work through `load` and `unload`, and
/// calls `advance` once per tick to drive loading forward. At most one load
/// is in flight at any time; everything else waits in submission order.
/// Cached keys complete synchronously without touching the source again.
pub struct ResourceSystem<S: Source> {
    source: S,
    cache: CacheStore<S::Handle>,
    pending: PendingQueue<S>,
    running: Option<Loader<S>>,
}

impl<S: Source> ResourceSystem<S> {
    pub fn new(source: S) -> Self {
        ResourceSystem {
            source,
            cache: CacheStore::new(),
            pending: PendingQueue::new(),
            running: None,
        }
    }

    /// Submits a load task. If the task's key is already cached, its
    /// callback fires right here with the cached bundle; otherwise the task
    /// waits in the queue until the loader frees up.
    pub fn load(&mut self, task: LoadTask<S>) {
        if let Some(handles) = self.cache.get(task.key()) {
            task.complete(handles);
            return;
        }

        self.pending.push(task);
    }

    /// Evicts the bundle cached under `path` and hands its handles back to
    /// the source, last loaded first. Handles the source retains are evicted
    /// without a release. Unknown paths are a no-op.
    pub fn unload<T: AsRef<str>>(&mut self, path: T) {
        let handles = self.cache.remove(path.as_ref().trim());
        Self::release_bundle(&mut self.source, handles);
    }

    /// Evicts every cached bundle in the order their keys were first
    /// populated, releasing handles like `unload` does.
    pub fn unload_all(&mut self) {
        let entries = self.cache.remove_all();
        info!("Unloads {} cached bundles.", entries.len());

        for (_, handles) in entries {
            Self::release_bundle(&mut self.source, handles);
        }
    }

    /// Drops every queued task and abandons the in-flight load, if any.
    /// Pending completion callbacks are never invoked. The cache is left
    /// untouched.
    pub fn stop(&mut self) {
        info!("Stops loading; drops {} queued tasks.", self.pending.len());
        self.pending.clear();

        if let Some(loader) = self.running.take() {
            loader.unload(&mut self.source);
        }
    }

    /// Drives loading forward one tick. With no load in flight, queued tasks
    /// drain in submission order; tasks whose key got cached in the meantime
    /// complete inline from the cache, and the first task that actually
    /// needs the source becomes the new flight. The flight is then polled
    /// once, and dropped when it reports completion.
    pub fn advance(&mut self) {
        if self.running.is_none() {
            while let Some(task) = self.pending.pop() {
                if let Some(handles) = self.cache.get(task.key()) {
                    task.complete(handles);
                    continue;
                }

                self.running = Some(Loader::begin(task, &mut self.source));
                break;
            }
        }

        let done = match self.running.as_mut() {
            Some(loader) => loader.step(&mut self.cache),
            None => false,
        };

        if done {
            self.running = None;
        }
    }

    /// Looks up the bundle cached under `path`.
    pub fn cached<T: AsRef<str>>(&self, path: T) -> Option<&[S::Handle]> {
        self.cache.get(path.as_ref().trim())
    }

    pub fn is_cached<T: AsRef<str>>(&self, path: T) -> bool {
        self.cached(path).is_some()
    }

    pub fn cache(&self) -> &CacheStore<S::Handle> {
        &self.cache
    }

    /// The number of tasks waiting for the loader.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns true while a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.running.is_some()
    }

    /// Returns true when nothing is in flight and nothing is queued.
    pub fn is_idle(&self) -> bool {
        !self.is_loading() && self.pending.is_empty()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn release_bundle(source: &mut S, mut handles: Bundle<S::Handle>) {
        while let Some(handle) = handles.pop() {
            if !source.is_retained(&handle) {
                source.release(handle);
            }
        }
    }
}
