//! Cryptographic primitives for Strand.
//!
//! Provides the SHA-256 content hasher that derives a string's [`Digest`].
//! Hashing wraps an established library; there is no custom cryptography.
//!
//! [`Digest`]: strand_types::Digest

pub mod hasher;

pub use hasher::ContentHasher;
