//! The most commonly used types, ready for glob import.

pub use crate::dir::{Blob, Directory};
pub use crate::source::{AsyncLoad, Source};
pub use crate::system::ResourceSystem;
pub use crate::task::LoadTask;
