//! The FIFO of load tasks waiting for the loader to free up.

use std::collections::VecDeque;

use crate::source::Source;
use crate::task::LoadTask;

/// Holds submitted tasks in submission order until the engine drains them,
/// one per flight.
pub struct PendingQueue<S: Source> {
    tasks: VecDeque<LoadTask<S>>,
}

impl<S: Source> Default for PendingQueue<S> {
    fn default() -> Self {
        PendingQueue {
            tasks: VecDeque::new(),
        }
    }
}

impl<S: Source> PendingQueue<S> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, task: LoadTask<S>) {
        self.tasks.push_back(task);
    }

    pub fn pop(&mut self) -> Option<LoadTask<S>> {
        self.tasks.pop_front()
    }

    /// Drops every queued task, completion callbacks included.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
