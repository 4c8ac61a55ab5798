//! A directory backed resource source.
//!
//! `Directory` serves files under a root directory as opaque `Blob` handles.
//! A named path resolves to the file at that path, or to every file under it
//! when it names a subdirectory; the blank load-everything query walks the
//! whole tree. Traversal is sorted, so bundles come out in a stable order on
//! every platform. The optional kind tag filters by file extension.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};
use crate::source::{AsyncLoad, Source};

/// A file loaded from a `Directory`: the bytes, and the path they came from
/// relative to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub path: PathBuf,
    pub bytes: Box<[u8]>,
}

/// A directory load in flight. Local reads resolve eagerly, so the operation
/// reports done from the first poll.
pub struct DirLoad {
    handle: Option<Blob>,
}

impl AsyncLoad for DirLoad {
    type Handle = Blob;

    fn is_done(&self) -> bool {
        true
    }

    fn finish(self) -> Option<Blob> {
        self.handle
    }
}

pub struct Directory {
    root: PathBuf,
}

impl Directory {
    /// Creates a resource source rooted at `root`, which must be a readable
    /// directory.
    pub fn new<T: Into<PathBuf>>(root: T) -> Result<Self> {
        let root = root.into();
        info!("Creates directory based resource source at {:?}.", root);

        let metadata = fs::metadata(&root)?;
        if metadata.is_dir() {
            Ok(Directory { root })
        } else {
            Err(Error::NotDirectory(root))
        }
    }

    fn collect(&self, dir: &Path, ext: Option<&str>, out: &mut Vec<Blob>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("{:?}", err);
                return;
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(err) => warn!("{:?}", err),
            }
        }

        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.collect(&path, ext, out);
            } else {
                self.read(&path, ext, out);
            }
        }
    }

    fn read(&self, path: &Path, ext: Option<&str>, out: &mut Vec<Blob>) {
        if let Some(ext) = ext {
            if path.extension().and_then(OsStr::to_str) != Some(ext) {
                return;
            }
        }

        match fs::read(path) {
            Ok(bytes) => {
                let path = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
                out.push(Blob {
                    path,
                    bytes: bytes.into(),
                });
            }
            Err(err) => warn!("{:?}", err),
        }
    }
}

impl Source for Directory {
    type Handle = Blob;
    type Kind = String;
    type Async = DirLoad;

    fn load(&mut self, path: &str, kind: Option<&String>) -> Vec<Blob> {
        let ext = kind.map(String::as_str);
        let target = if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        };

        let mut out = Vec::new();
        if target.is_dir() {
            self.collect(&target, ext, &mut out);
        } else if target.is_file() {
            self.read(&target, ext, &mut out);
        }

        out
    }

    fn load_async(&mut self, path: &str, kind: Option<&String>) -> DirLoad {
        let ext = kind.map(String::as_str);
        let target = self.root.join(path);

        let mut out = Vec::new();
        if target.is_file() {
            self.read(&target, ext, &mut out);
        }

        DirLoad { handle: out.pop() }
    }

    fn release(&mut self, _: Blob) {}
}
