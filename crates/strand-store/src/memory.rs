use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use strand_types::Digest;
use tracing::debug;

use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::traits::StringStore;

/// An entry plus the sequence number it was inserted under.
#[derive(Debug)]
struct Slot {
    seq: u64,
    entry: Entry,
}

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<Digest, Slot>,
    next_seq: u64,
}

impl Inner {
    fn put(&mut self, entry: Entry) -> Entry {
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(id = %entry.id.short_hex(), seq, "stored string");
        self.slots.insert(
            entry.id,
            Slot {
                seq,
                entry: entry.clone(),
            },
        );
        entry
    }
}

/// In-memory, HashMap-based string store.
///
/// All entries live behind a single `RwLock`, so every operation is
/// serialized against writers. Entries are cloned on read. Enumeration
/// returns entries in insertion order.
#[derive(Default)]
pub struct InMemoryStringStore {
    inner: RwLock<Inner>,
}

impl InMemoryStringStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all entries from the store.
    pub fn clear(&self) {
        self.write().slots.clear();
    }

    // A panic while holding the lock cannot leave a half-written entry
    // behind, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StringStore for InMemoryStringStore {
    fn get_by_id(&self, id: &Digest) -> StoreResult<Option<Entry>> {
        Ok(self.read().slots.get(id).map(|slot| slot.entry.clone()))
    }

    fn insert(&self, value: &str) -> StoreResult<Entry> {
        let entry = Entry::new(value);
        let mut inner = self.write();
        if let Some(existing) = inner.slots.get(&entry.id) {
            return Ok(existing.entry.clone());
        }
        Ok(inner.put(entry))
    }

    fn create(&self, value: &str) -> StoreResult<Entry> {
        let entry = Entry::new(value);
        let mut inner = self.write();
        if inner.slots.contains_key(&entry.id) {
            return Err(StoreError::DuplicateEntry(entry.id));
        }
        Ok(inner.put(entry))
    }

    fn remove_by_id(&self, id: &Digest) -> StoreResult<bool> {
        let removed = self.write().slots.remove(id).is_some();
        if removed {
            debug!(id = %id.short_hex(), "removed string");
        }
        Ok(removed)
    }

    fn all(&self) -> StoreResult<Vec<Entry>> {
        let inner = self.read();
        let mut slots: Vec<&Slot> = inner.slots.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        Ok(slots.into_iter().map(|slot| slot.entry.clone()).collect())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read().slots.len())
    }
}

impl std::fmt::Debug for InMemoryStringStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().slots.len();
        f.debug_struct("InMemoryStringStore")
            .field("entry_count", &count)
            .finish()
    }
}
