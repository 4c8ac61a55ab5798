//! A single load request submitted to the engine.

use crate::source::Source;

/// Describes one load: where to look, how to load it, and what to do with
/// the result. Tasks are built with the chainable setters and handed to
/// `ResourceSystem::load`.
pub struct LoadTask<S: Source> {
    /// The path to load. Leading and trailing whitespace is ignored, and a
    /// blank path queries the whole source.
    pub path: String,
    /// Narrows what the path should resolve to, when the source supports it.
    pub kind: Option<S::Kind>,
    /// Load without blocking, polled across ticks. Ignored for blank paths,
    /// which always take the blocking bulk query.
    pub use_async: bool,
    /// Keep the loaded handles in the cache under this task's key.
    pub cache: bool,
    pub(crate) completed: Option<Box<dyn FnOnce(&[S::Handle])>>,
}

impl<S: Source> LoadTask<S> {
    /// Creates a task loading the resources under `path`.
    pub fn new<T: Into<String>>(path: T) -> Self {
        LoadTask {
            path: path.into(),
            kind: None,
            use_async: false,
            cache: false,
            completed: None,
        }
    }

    /// Narrows the load to resources of `kind`.
    pub fn kind(mut self, kind: S::Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Requests poll driven loading instead of blocking.
    pub fn use_async(mut self, use_async: bool) -> Self {
        self.use_async = use_async;
        self
    }

    /// Requests that the result stays cached under this task's key.
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Attaches a completion callback. It receives the loaded handles
    /// exactly once, or never if the engine is stopped first.
    pub fn completed<F>(mut self, func: F) -> Self
    where
        F: FnOnce(&[S::Handle]) + 'static,
    {
        self.completed = Some(Box::new(func));
        self
    }

    /// The normalized cache key of this task.
    pub fn key(&self) -> &str {
        self.path.trim()
    }

    /// Returns true if this task queries the whole source instead of a named
    /// path.
    pub fn loads_everything(&self) -> bool {
        self.key().is_empty()
    }

    pub(crate) fn complete(mut self, handles: &[S::Handle]) {
        if let Some(func) = self.completed.take() {
            func(handles);
        }
    }
}
