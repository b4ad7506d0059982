//! Thread-safe key/value map with a one-way write lock.

mod error;

pub use error::RegistryError;

use std::{
    fmt::Debug,
    hash::Hash,
    sync::atomic::{AtomicBool, Ordering},
};

use dashmap::{mapref::entry::Entry, DashMap};

/// Internally synchronized map. Callers never lock; each key's insertion or
/// removal is atomic with respect to concurrent readers.
pub struct Registry<K: Eq + Hash, V> {
    map: DashMap<K, V>,
    locked: AtomicBool,
}

impl<K: Eq + Hash + Clone + Debug, V> Registry<K, V> {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            locked: AtomicBool::new(false),
        }
    }

    /// Inserts a value under a fresh key
    pub fn register(&self, key: K, value: V) -> Result<(), RegistryError> {
        self.register_with_init(key, value, |_| {})
    }

    /// Inserts a value under a fresh key, running `init` on it first. The
    /// entry stays locked while `init` runs, so no reader ever observes the
    /// value before it is initialized.
    pub fn register_with_init<F: FnOnce(&mut V)>(
        &self,
        key: K,
        mut value: V,
        init: F,
    ) -> Result<(), RegistryError> {
        self.check_locked()?;
        match self.map.entry(key) {
            Entry::Occupied(entry) => Err(RegistryError::AlreadyRegistered {
                key: format!("{:?}", entry.key()),
            }),
            Entry::Vacant(entry) => {
                init(&mut value);
                entry.insert(value);
                Ok(())
            }
        }
    }

    /// Inserts or replaces. Returns the replaced value.
    pub fn insert(&self, key: K, value: V) -> Result<Option<V>, RegistryError> {
        self.insert_with_init(key, value, |_| {})
    }

    /// Inserts or replaces, running `init` before the value becomes visible.
    /// Returns the replaced value.
    pub fn insert_with_init<F: FnOnce(&mut V)>(
        &self,
        key: K,
        mut value: V,
        init: F,
    ) -> Result<Option<V>, RegistryError> {
        self.check_locked()?;
        match self.map.entry(key) {
            Entry::Occupied(mut entry) => {
                init(&mut value);
                Ok(Some(entry.insert(value)))
            }
            Entry::Vacant(entry) => {
                init(&mut value);
                entry.insert(value);
                Ok(None)
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Runs `f` against the value under `key`, holding a read guard
    pub fn with<R, F: FnOnce(&V) -> R>(&self, key: &K, f: F) -> Option<R> {
        self.map.get(key).map(|value| f(value.value()))
    }

    /// Runs `f` against the value under `key`, holding a write guard
    pub fn with_mut<R, F: FnOnce(&mut V) -> R>(&self, key: &K, f: F) -> Option<R> {
        self.map.get_mut(key).map(|mut value| f(value.value_mut()))
    }

    /// Runs `f` against the value under `key`, first inserting `default()`
    /// when the key is vacant. A new value becomes visible only after `f`
    /// returns.
    pub fn with_mut_or_insert<R, D: FnOnce() -> V, F: FnOnce(&mut V) -> R>(
        &self,
        key: K,
        default: D,
        f: F,
    ) -> Result<R, RegistryError> {
        match self.map.entry(key) {
            Entry::Occupied(mut entry) => Ok(f(entry.get_mut())),
            Entry::Vacant(entry) => {
                self.check_locked()?;
                let mut value = default();
                let result = f(&mut value);
                entry.insert(value);
                Ok(result)
            }
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.map.remove(key).map(|(_, value)| value)
    }

    pub fn keys(&self) -> Vec<K> {
        self.map.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Visits every entry. Must not write to this registry from inside `f`.
    pub fn for_each<F: FnMut(&K, &V)>(&self, mut f: F) {
        for entry in self.map.iter() {
            f(entry.key(), entry.value());
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    /// Forbids any further writes. There is no way back.
    pub fn lock(&self) {
        self.locked.store(true, Ordering::Release);
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    fn check_locked(&self) -> Result<(), RegistryError> {
        if self.is_locked() {
            return Err(RegistryError::Locked);
        }
        Ok(())
    }
}

impl<K: Eq + Hash + Clone + Debug, V: Clone> Registry<K, V> {
    pub fn get(&self, key: &K) -> Option<V> {
        self.map.get(key).map(|value| value.value().clone())
    }

    pub fn values(&self) -> Vec<V> {
        self.map.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl<K: Eq + Hash + Clone + Debug, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
