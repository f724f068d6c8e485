//! Filtering and query resolution over stored strings.
//!
//! Two entry points produce a [`PredicateSet`]:
//!
//! - [`FilterParams::parse`] validates structured filter fields from a
//!   request's query string.
//! - [`Translator::translate`] maps a fixed set of English phrasings to
//!   predicates, checking rules in a fixed precedence order.
//!
//! [`filter::evaluate`] then keeps the entries satisfying every predicate.

pub mod error;
pub mod filter;
pub mod predicate;
pub mod translator;

pub use error::{QueryError, QueryResult};
pub use filter::{apply, evaluate, FilterOutcome};
pub use predicate::{FilterParams, PredicateSet};
pub use translator::{PatternRule, PhraseRule, QueryRule, Translator};
