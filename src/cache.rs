//! An insertion ordered store of loaded resource bundles.

use std::mem;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use inlinable_string::InlinableString;
use smallvec::SmallVec;

/// The handles loaded under a single key, in completion order. Nearly every
/// key resolves to a single handle.
pub type Bundle<H> = SmallVec<[H; 1]>;

/// Maps normalized path keys to the handle bundles loaded under them. Entries
/// iterate in the order their keys were first populated, so bulk eviction is
/// deterministic.
#[derive(Debug)]
pub struct CacheStore<H> {
    entries: IndexMap<InlinableString, Bundle<H>, FxBuildHasher>,
}

impl<H> Default for CacheStore<H> {
    fn default() -> Self {
        CacheStore {
            entries: IndexMap::default(),
        }
    }
}

impl<H> CacheStore<H> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Looks up the bundle cached under `key`.
    pub fn get(&self, key: &str) -> Option<&[H]> {
        self.entries.get(&InlinableString::from(key)).map(|v| &v[..])
    }

    /// Stores `handles` under `key`, appending when the key is already
    /// populated. Returns the freshly appended slice.
    pub fn put(&mut self, key: &str, handles: Vec<H>) -> &[H] {
        let entry = self
            .entries
            .entry(InlinableString::from(key))
            .or_insert_with(Bundle::new);

        let start = entry.len();
        entry.extend(handles);
        &entry[start..]
    }

    /// Removes the bundle cached under `key`, empty when the key is not
    /// populated.
    pub fn remove(&mut self, key: &str) -> Bundle<H> {
        self.entries
            .shift_remove(&InlinableString::from(key))
            .unwrap_or_else(Bundle::new)
    }

    /// Removes every bundle, yielding them in the order their keys were
    /// first populated.
    pub fn remove_all(&mut self) -> Vec<(InlinableString, Bundle<H>)> {
        let entries = mem::replace(&mut self.entries, IndexMap::default());
        entries.into_iter().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&InlinableString::from(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let mut cache = CacheStore::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);

        cache.put("a", vec![1, 2]);
        assert_eq!(cache.get("a"), Some(&[1, 2][..]));
        assert!(cache.contains("a"));
        assert_eq!(cache.len(), 1);

        assert_eq!(&cache.remove("a")[..], &[1, 2][..]);
        assert!(cache.is_empty());
        assert!(cache.remove("a").is_empty());
    }

    #[test]
    fn put_appends_and_returns_the_new_batch() {
        let mut cache = CacheStore::new();
        assert_eq!(cache.put("a", vec![1]), &[1][..]);
        assert_eq!(cache.put("a", vec![2, 3]), &[2, 3][..]);
        assert_eq!(cache.get("a"), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn removal_follows_insertion_order() {
        let mut cache = CacheStore::new();
        cache.put("b", vec![1]);
        cache.put("a", vec![2]);
        cache.put("c", vec![3]);
        cache.remove("a");
        cache.put("a", vec![4]);

        let keys: Vec<_> = cache
            .remove_all()
            .into_iter()
            .map(|(key, _)| key.to_string())
            .collect();

        assert_eq!(keys, vec!["b", "c", "a"]);
        assert!(cache.is_empty());
    }
}
