use std::collections::HashMap;
use std::rc::Rc;

/// Name-keyed cache of shared handles for one resource kind.
///
/// Keys are unique within a cache but not across caches: a vertex shader cache and
/// a fragment shader cache may both hold `"basic"`.
#[derive(Debug)]
pub struct ResourceCache<T> {
    kind: &'static str,
    entries: HashMap<String, Rc<T>>,
}

impl<T> ResourceCache<T> {
    /// Creates an empty cache. `kind` names the resource kind in diagnostics.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[inline]
    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns a new share of the handle under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Rc<T>> {
        self.entries.get(key).map(Rc::clone)
    }

    /// Inserts `handle` under `key` unless the key is already taken.
    ///
    /// Accepts either a bare resource (the cache becomes its first owner) or an
    /// `Rc` the caller already shares. Returns `false` and leaves the cache
    /// unchanged when `key` is empty or already registered.
    pub fn register(&mut self, key: impl Into<String>, handle: impl Into<Rc<T>>) -> bool {
        let key = key.into();

        if key.is_empty() {
            log::warn!("{} registered with an empty key; ignoring", self.kind);
            return false;
        }

        if self.entries.contains_key(&key) {
            log::warn!("{} with \"{}\" key already exists", self.kind, key);
            return false;
        }

        log::debug!("registered {} \"{}\"", self.kind, key);
        self.entries.insert(key, handle.into());
        true
    }

    /// Removes the entry under `key`. Returns whether one was present.
    ///
    /// Shares handed out by `get` are unaffected; the resource is dropped once the
    /// last of them goes away.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            log::debug!("deleted {} \"{}\"", self.kind, key);
        }
        removed.is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Drops the cache's share of every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
