//! Foundation types for Strand.
//!
//! Every other Strand crate depends on `strand-types` for the content
//! identifier that keys the string store.
//!
//! # Key Types
//!
//! - [`Digest`]: content-addressed identifier (SHA-256, lowercase hex on the wire)
//! - [`TypeError`]: parse failures for identifiers

pub mod digest;
pub mod error;

pub use digest::{Digest, DIGEST_LEN};
pub use error::TypeError;
