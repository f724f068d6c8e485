//! Structured filter predicates.

use serde::{Deserialize, Serialize};
use strand_store::Entry;

use crate::error::{QueryError, QueryResult};

/// Raw, unvalidated filter fields as they arrive in a query string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl FilterParams {
    /// Validate every present field and build the typed predicate set.
    ///
    /// A single malformed field fails the whole request.
    pub fn parse(&self) -> QueryResult<PredicateSet> {
        Ok(PredicateSet {
            is_palindrome: self
                .is_palindrome
                .as_deref()
                .map(parse_bool)
                .transpose()?,
            min_length: self
                .min_length
                .as_deref()
                .map(|v| parse_count("min_length", v))
                .transpose()?,
            max_length: self
                .max_length
                .as_deref()
                .map(|v| parse_count("max_length", v))
                .transpose()?,
            word_count: self
                .word_count
                .as_deref()
                .map(|v| parse_count("word_count", v))
                .transpose()?,
            contains_character: self
                .contains_character
                .as_deref()
                .map(parse_char)
                .transpose()?,
        })
    }
}

fn parse_bool(raw: &str) -> QueryResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(QueryError::invalid("is_palindrome", raw)),
    }
}

fn parse_count(field: &'static str, raw: &str) -> QueryResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| QueryError::invalid(field, raw))
}

fn parse_char(raw: &str) -> QueryResult<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(QueryError::invalid("contains_character", raw)),
    }
}

/// Validated filter criteria. Every present field must hold for an entry to
/// match; absent fields place no constraint.
///
/// Serializes with absent fields omitted, which is the form echoed back to
/// clients as `filters_applied` / `parsed_filters`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl PredicateSet {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `entry` satisfies every present predicate.
    pub fn matches(&self, entry: &Entry) -> bool {
        let p = &entry.properties;
        self.is_palindrome.map_or(true, |want| p.is_palindrome == want)
            && self.min_length.map_or(true, |min| p.length >= min)
            && self.max_length.map_or(true, |max| p.length <= max)
            && self.word_count.map_or(true, |n| p.word_count == n)
            && self
                .contains_character
                .map_or(true, |c| entry.value.contains(c))
    }

    /// Fail if the length bounds exclude every possible string.
    pub fn check_bounds(&self) -> QueryResult<()> {
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min > max => Err(QueryError::ConflictingFilters(format!(
                "min_length {min} is greater than max_length {max}"
            ))),
            _ => Ok(()),
        }
    }
}
