//! Content-addressed string storage for Strand.
//!
//! Every submitted string is stored once, keyed by the SHA-256 digest of its
//! bytes, alongside a fixed set of properties derived from it at insertion
//! time.
//!
//! # Types
//!
//! - [`Properties`] -- length, palindrome flag, word count, character counts
//! - [`Entry`] -- a stored string with its properties and creation time
//!
//! # Storage Backends
//!
//! All backends implement the [`StringStore`] trait:
//!
//! - [`InMemoryStringStore`] -- `HashMap`-based store behind one `RwLock`
//!
//! # Design Rules
//!
//! 1. Entries are immutable once written; equal strings share one entry.
//! 2. Properties are computed once, at insertion, and never recomputed.
//! 3. Enumeration is in insertion order.
//! 4. Nothing is persisted beyond the lifetime of the store instance.

pub mod entry;
pub mod error;
pub mod memory;
pub mod properties;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use entry::Entry;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStringStore;
pub use properties::Properties;
pub use traits::StringStore;
