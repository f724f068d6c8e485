//! Conjunctive filtering of stored entries.

use serde::{Deserialize, Serialize};
use strand_store::Entry;
use tracing::debug;

use crate::error::QueryResult;
use crate::predicate::{FilterParams, PredicateSet};

/// Entries that passed a filter, with the predicates that were applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub data: Vec<Entry>,
    pub count: usize,
    pub filters_applied: PredicateSet,
}

/// Validate raw filter fields, then filter `entries` by them.
pub fn apply(
    params: &FilterParams,
    entries: impl IntoIterator<Item = Entry>,
) -> QueryResult<FilterOutcome> {
    let predicates = params.parse()?;
    Ok(evaluate(predicates, entries))
}

/// Keep the entries that satisfy every present predicate, in input order.
pub fn evaluate(
    predicates: PredicateSet,
    entries: impl IntoIterator<Item = Entry>,
) -> FilterOutcome {
    let data: Vec<Entry> = entries
        .into_iter()
        .filter(|entry| predicates.matches(entry))
        .collect();
    debug!(matched = data.len(), filters = ?predicates, "filtered entries");
    FilterOutcome {
        count: data.len(),
        data,
        filters_applied: predicates,
    }
}
