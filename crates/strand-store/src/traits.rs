use strand_crypto::ContentHasher;
use strand_types::Digest;

use crate::entry::Entry;
use crate::error::StoreResult;

/// Content-addressed string store.
///
/// All implementations must satisfy these invariants:
/// - An entry is keyed by the digest of its value; equal values map to one
///   entry.
/// - Entries are immutable. The only mutation after insertion is removal of
///   a whole entry.
/// - Every operation completes fully or fails without touching the store.
///
/// Lookups take the raw value and hash it; the `_by_id` variants take a
/// digest directly.
pub trait StringStore: Send + Sync {
    /// Look up an entry by digest.
    fn get_by_id(&self, id: &Digest) -> StoreResult<Option<Entry>>;

    /// Insert `value`, returning the stored entry.
    ///
    /// If the value is already present the existing entry is returned
    /// untouched, so its `created_at` is the time of first insertion.
    fn insert(&self, value: &str) -> StoreResult<Entry>;

    /// Insert `value`, failing with `DuplicateEntry` if it is already present.
    ///
    /// The existence check and the insert happen atomically.
    fn create(&self, value: &str) -> StoreResult<Entry>;

    /// Remove an entry by digest. Returns `true` if the entry existed.
    fn remove_by_id(&self, id: &Digest) -> StoreResult<bool>;

    /// Snapshot of all entries in insertion order.
    fn all(&self) -> StoreResult<Vec<Entry>>;

    /// Number of stored entries.
    fn len(&self) -> StoreResult<usize> {
        Ok(self.all()?.len())
    }

    /// Returns `true` if the store holds no entries.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Whether an entry for `value` exists.
    fn contains(&self, value: &str) -> StoreResult<bool> {
        Ok(self.get(value)?.is_some())
    }

    /// Look up the entry for `value`.
    fn get(&self, value: &str) -> StoreResult<Option<Entry>> {
        self.get_by_id(&ContentHasher::digest(value))
    }

    /// Remove the entry for `value`. Removing an absent value is a no-op
    /// that returns `false`.
    fn remove(&self, value: &str) -> StoreResult<bool> {
        self.remove_by_id(&ContentHasher::digest(value))
    }
}
