//! The seam between the loading engine and whatever actually owns resource
//! data.

/// A poll driven loading operation issued by `Source::load_async`. The engine
/// checks the completion status with `is_done` once per tick, and consumes
/// the operation with `finish` once it reports done.
pub trait AsyncLoad {
    type Handle;

    /// Returns true once the operation has settled and `finish` will not
    /// block.
    fn is_done(&self) -> bool;

    /// Consumes the operation, yielding the loaded handle if anything
    /// matched the requested path.
    fn finish(self) -> Option<Self::Handle>;
}

/// Where resources come from. Implementors hand out opaque handles; the
/// engine never looks inside them, it only caches them and eventually gives
/// them back through `release`.
pub trait Source {
    /// An opaque, owned reference to one loaded resource.
    type Handle;

    /// An optional tag narrowing what a path should resolve to, like an
    /// asset type or a file extension.
    type Kind;

    /// The poll driven counterpart of `load`.
    type Async: AsyncLoad<Handle = Self::Handle>;

    /// Loads everything under `path`, blocking until done. An empty path
    /// queries the whole source. Missing paths and failed reads resolve to
    /// an empty list.
    fn load(&mut self, path: &str, kind: Option<&Self::Kind>) -> Vec<Self::Handle>;

    /// Starts loading the single resource at `path` without blocking. The
    /// engine never calls this with an empty path.
    fn load_async(&mut self, path: &str, kind: Option<&Self::Kind>) -> Self::Async;

    /// Takes back a handle the engine no longer tracks. Called at most once
    /// per handle it obtained.
    fn release(&mut self, handle: Self::Handle);

    /// Returns true for handles that must survive eviction. Retained handles
    /// are still dropped from the cache on unload, but never passed to
    /// `release`.
    fn is_retained(&self, _: &Self::Handle) -> bool {
        false
    }
}
