//! # Satchel
//!
//! `satchel` is a small, deterministic loading and caching engine for named
//! resource bundles. It serializes loads against a backend of your choice,
//! caches whatever comes back under normalized path keys, and is driven by a
//! single per-tick call.
//!
//! - At most one load is in flight at any time; everything else waits in a
//!   FIFO queue.
//! - Results are cached per key, and repeated loads complete synchronously
//!   from the cache without touching the backend again.
//! - Backends plug in through the [`Source`] trait, blocking or poll driven,
//!   and hand out whatever opaque handle type suits them.
//! - A blank path is the load-everything query.
//!
//! ## Example
//!
//! ```rust
//! use satchel::{AsyncLoad, LoadTask, ResourceSystem, Source};
//!
//! // A backend that stamps out string handles.
//! struct Stamps;
//!
//! struct Ready(Option<String>);
//!
//! impl AsyncLoad for Ready {
//!     type Handle = String;
//!
//!     fn is_done(&self) -> bool {
//!         true
//!     }
//!
//!     fn finish(self) -> Option<String> {
//!         self.0
//!     }
//! }
//!
//! impl Source for Stamps {
//!     type Handle = String;
//!     type Kind = ();
//!     type Async = Ready;
//!
//!     fn load(&mut self, path: &str, _: Option<&()>) -> Vec<String> {
//!         vec![format!("<{}>", path)]
//!     }
//!
//!     fn load_async(&mut self, path: &str, _: Option<&()>) -> Ready {
//!         Ready(Some(format!("<{}>", path)))
//!     }
//!
//!     fn release(&mut self, _: String) {}
//! }
//!
//! let mut res = ResourceSystem::new(Stamps);
//! res.load(LoadTask::new("fonts/mono").cache(true));
//! res.advance();
//!
//! assert_eq!(res.cached("fonts/mono"), Some(&["<fonts/mono>".to_string()][..]));
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod cache;
pub mod dir;
pub mod errors;
pub mod prelude;
pub mod queue;
pub mod source;
pub mod system;
pub mod task;

mod loader;

pub use self::cache::{Bundle, CacheStore};
pub use self::dir::{Blob, Directory};
pub use self::errors::{Error, Result};
pub use self::source::{AsyncLoad, Source};
pub use self::system::ResourceSystem;
pub use self::task::LoadTask;
