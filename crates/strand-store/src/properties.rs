//! Derived string properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strand_crypto::ContentHasher;
use strand_types::Digest;

/// Properties derived from a string value.
///
/// Every field is a pure function of the value: computing the properties of
/// the same string twice yields identical output, including the order of
/// `character_frequency_map` when serialized.
///
/// Characters are Unicode scalar values. No grapheme segmentation or locale
/// rules are applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Number of characters in the value.
    pub length: usize,
    /// Whether the lower-cased character sequence reads the same reversed.
    pub is_palindrome: bool,
    /// Number of distinct characters.
    pub unique_characters: usize,
    /// Number of whitespace-delimited, non-empty tokens.
    pub word_count: usize,
    /// SHA-256 digest of the value. Equal to the owning entry's ID.
    #[serde(rename = "sha256_hash", alias = "content_hash")]
    pub content_hash: Digest,
    /// Occurrence count of every character, whitespace and punctuation included.
    pub character_frequency_map: BTreeMap<char, usize>,
}

impl Properties {
    /// Compute the full property set for `value`.
    pub fn compute(value: &str) -> Self {
        let character_frequency_map = character_frequency(value);
        Self {
            length: value.chars().count(),
            is_palindrome: is_palindrome(value),
            unique_characters: character_frequency_map.len(),
            word_count: word_count(value),
            content_hash: ContentHasher::digest(value),
            character_frequency_map,
        }
    }
}

/// Case-insensitive palindrome check. Whitespace and punctuation are
/// compared like any other character. The empty string is a palindrome.
pub fn is_palindrome(value: &str) -> bool {
    let folded: Vec<char> = value.to_lowercase().chars().collect();
    folded.iter().eq(folded.iter().rev())
}

/// Count of whitespace-delimited tokens; 0 for an empty or blank string.
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// Occurrences of each character in `value`.
pub fn character_frequency(value: &str) -> BTreeMap<char, usize> {
    let mut map = BTreeMap::new();
    for c in value.chars() {
        *map.entry(c).or_insert(0) += 1;
    }
    map
}
