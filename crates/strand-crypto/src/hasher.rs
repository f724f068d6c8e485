use sha2::{Digest as _, Sha256};
use strand_types::Digest;

/// SHA-256 content hasher.
///
/// The digest of a string is the SHA-256 hash of its UTF-8 bytes with no
/// prefix or domain tag, so a stored string's ID matches what `sha256sum`
/// prints for the same bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Digest::from_hash(hasher.finalize().into())
    }

    /// Digest of a string value.
    pub fn digest(value: &str) -> Digest {
        Self::hash(value.as_bytes())
    }

    /// Verify that a value produces the expected digest.
    pub fn verify(value: &str, expected: &Digest) -> bool {
        Self::digest(value) == *expected
    }
}
