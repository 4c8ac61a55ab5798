//! Drives a single load task to completion.

use crate::cache::CacheStore;
use crate::source::{AsyncLoad, Source};
use crate::task::LoadTask;

/// What a loader is waiting on. Blocking backend calls resolve into `Ok`
/// right away; poll driven calls park in `NotReady` until the operation
/// reports done.
pub enum Fetch<S: Source> {
    NotReady(S::Async),
    Ok(Vec<S::Handle>),
}

/// The single in-flight load. Created when a task leaves the queue, stepped
/// once per tick, and dropped once `step` reports completion.
pub struct Loader<S: Source> {
    task: LoadTask<S>,
    fetch: Option<Fetch<S>>,
}

impl<S: Source> Loader<S> {
    /// Starts loading `task`. Load-everything tasks always take the blocking
    /// bulk query, whatever their `use_async` flag says.
    pub fn begin(task: LoadTask<S>, source: &mut S) -> Self {
        debug!("Starts loading '{}'.", task.key());

        let fetch = if task.use_async && !task.loads_everything() {
            Fetch::NotReady(source.load_async(task.key(), task.kind.as_ref()))
        } else {
            Fetch::Ok(source.load(task.key(), task.kind.as_ref()))
        };

        Loader {
            task,
            fetch: Some(fetch),
        }
    }

    /// Polls the load once, returning true when the task has finished and
    /// this loader can be dropped. Finishing populates `cache` when the task
    /// asked for it and non-empty results arrived, then fires the completion
    /// callback with the loaded batch. Stepping a finished loader is a
    /// contract violation.
    pub fn step(&mut self, cache: &mut CacheStore<S::Handle>) -> bool {
        let fetch = match self.fetch.take() {
            Some(fetch) => fetch,
            None => {
                debug_assert!(false, "stepped a loader that already finished");
                return true;
            }
        };

        let handles = match fetch {
            Fetch::NotReady(op) => {
                if !op.is_done() {
                    self.fetch = Some(Fetch::NotReady(op));
                    return false;
                }

                op.finish().into_iter().collect()
            }
            Fetch::Ok(handles) => handles,
        };

        debug!(
            "Finishes loading '{}' with {} handles.",
            self.task.key(),
            handles.len()
        );

        let completed = self.task.completed.take();
        if self.task.cache && !handles.is_empty() {
            let fresh = cache.put(self.task.key(), handles);
            if let Some(func) = completed {
                func(fresh);
            }
        } else if let Some(func) = completed {
            // Handles that were not cached are dropped once the callback
            // returns.
            func(&handles);
        }

        true
    }

    /// Abandons the load without finalizing it, handing any handles obtained
    /// so far back to the source. The completion callback is never invoked.
    pub fn unload(self, source: &mut S) {
        match self.fetch {
            Some(Fetch::NotReady(op)) => {
                if op.is_done() {
                    if let Some(handle) = op.finish() {
                        source.release(handle);
                    }
                }
            }
            Some(Fetch::Ok(mut handles)) => {
                while let Some(handle) = handles.pop() {
                    source.release(handle);
                }
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Calls {
        loads: Vec<String>,
        async_loads: Vec<String>,
        releases: Vec<u32>,
    }

    struct FakeOp {
        done: Rc<Cell<bool>>,
        handle: u32,
    }

    impl AsyncLoad for FakeOp {
        type Handle = u32;

        fn is_done(&self) -> bool {
            self.done.get()
        }

        fn finish(self) -> Option<u32> {
            Some(self.handle)
        }
    }

    struct FakeSource {
        batch: Vec<u32>,
        calls: Rc<RefCell<Calls>>,
        done: Rc<Cell<bool>>,
    }

    impl FakeSource {
        fn new(batch: Vec<u32>) -> (Self, Rc<RefCell<Calls>>, Rc<Cell<bool>>) {
            let calls = Rc::new(RefCell::new(Calls::default()));
            let done = Rc::new(Cell::new(false));
            let source = FakeSource {
                batch,
                calls: calls.clone(),
                done: done.clone(),
            };

            (source, calls, done)
        }
    }

    impl Source for FakeSource {
        type Handle = u32;
        type Kind = ();
        type Async = FakeOp;

        fn load(&mut self, path: &str, _: Option<&()>) -> Vec<u32> {
            self.calls.borrow_mut().loads.push(path.to_string());
            self.batch.clone()
        }

        fn load_async(&mut self, path: &str, _: Option<&()>) -> FakeOp {
            self.calls.borrow_mut().async_loads.push(path.to_string());
            FakeOp {
                done: self.done.clone(),
                handle: self.batch[0],
            }
        }

        fn release(&mut self, handle: u32) {
            self.calls.borrow_mut().releases.push(handle);
        }
    }

    #[test]
    fn blocking_load_finishes_in_one_step() {
        let (mut source, calls, _) = FakeSource::new(vec![7, 8]);
        let mut cache = CacheStore::new();

        let got = Rc::new(RefCell::new(Vec::new()));
        let sink = got.clone();
        let task: LoadTask<FakeSource> = LoadTask::new("a")
            .cache(true)
            .completed(move |handles| sink.borrow_mut().extend_from_slice(handles));

        let mut loader = Loader::begin(task, &mut source);
        assert!(loader.step(&mut cache));

        assert_eq!(calls.borrow().loads, vec!["a".to_string()]);
        assert_eq!(*got.borrow(), vec![7, 8]);
        assert_eq!(cache.get("a"), Some(&[7, 8][..]));
    }

    #[test]
    fn async_load_waits_for_the_operation() {
        let (mut source, calls, done) = FakeSource::new(vec![3]);
        let mut cache = CacheStore::new();

        let task: LoadTask<FakeSource> = LoadTask::new("b").use_async(true).cache(true);
        let mut loader = Loader::begin(task, &mut source);

        assert!(!loader.step(&mut cache));
        assert!(!loader.step(&mut cache));
        assert!(cache.is_empty());

        done.set(true);
        assert!(loader.step(&mut cache));

        assert_eq!(cache.get("b"), Some(&[3][..]));
        assert_eq!(calls.borrow().async_loads, vec!["b".to_string()]);
        assert!(calls.borrow().loads.is_empty());
    }

    #[test]
    fn load_everything_ignores_the_async_flag() {
        let (mut source, calls, _) = FakeSource::new(vec![1]);
        let mut cache = CacheStore::new();

        let task: LoadTask<FakeSource> = LoadTask::new("   ").use_async(true);
        let mut loader = Loader::begin(task, &mut source);
        assert!(loader.step(&mut cache));

        assert_eq!(calls.borrow().loads, vec![String::new()]);
        assert!(calls.borrow().async_loads.is_empty());
    }

    #[test]
    fn empty_results_are_never_cached() {
        let (mut source, _, _) = FakeSource::new(Vec::new());
        let mut cache = CacheStore::new();

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let task: LoadTask<FakeSource> = LoadTask::new("missing")
            .cache(true)
            .completed(move |handles| {
                assert!(handles.is_empty());
                flag.set(true);
            });

        let mut loader = Loader::begin(task, &mut source);
        assert!(loader.step(&mut cache));
        assert!(fired.get());
        assert!(cache.is_empty());
    }

    #[test]
    fn unload_releases_blocking_results_in_reverse() {
        let (mut source, calls, _) = FakeSource::new(vec![1, 2, 3]);

        let task: LoadTask<FakeSource> =
            LoadTask::new("a").completed(|_| panic!("must never fire"));
        let loader = Loader::begin(task, &mut source);
        loader.unload(&mut source);

        assert_eq!(calls.borrow().releases, vec![3, 2, 1]);
    }

    #[test]
    fn unload_handles_async_operations() {
        let (mut source, calls, done) = FakeSource::new(vec![9]);

        // Unresolved operations are dropped without a release.
        let task: LoadTask<FakeSource> = LoadTask::new("a").use_async(true);
        Loader::begin(task, &mut source).unload(&mut source);
        assert!(calls.borrow().releases.is_empty());

        // Resolved ones hand their handle back.
        let task: LoadTask<FakeSource> = LoadTask::new("a").use_async(true);
        let loader = Loader::begin(task, &mut source);
        done.set(true);
        loader.unload(&mut source);
        assert_eq!(calls.borrow().releases, vec![9]);
    }
}
