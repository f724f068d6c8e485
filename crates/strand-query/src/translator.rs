//! Natural-language query translation.
//!
//! A [`Translator`] holds an ordered list of [`QueryRule`]s. The query is
//! lower-cased and the first rule whose trigger phrases all occur in it
//! decides the result, so earlier rules shadow later ones. If that rule
//! cannot extract its operands, the query is rejected; later rules are not
//! consulted.

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::predicate::PredicateSet;

// ---------------------------------------------------------------------------
// QueryRule trait
// ---------------------------------------------------------------------------

/// One recognized phrasing.
///
/// Rules receive the lower-cased query. The trait is object-safe so rules
/// can be stored in a `Vec<Box<dyn QueryRule>>`.
pub trait QueryRule: Send + Sync {
    /// Short identifier, used in logs and precedence tests.
    fn name(&self) -> &str;

    /// Whether this rule claims the query.
    fn matches(&self, query: &str) -> bool;

    /// Build the predicate set for a query this rule claimed.
    fn extract(&self, query: &str) -> QueryResult<PredicateSet>;
}

// ---------------------------------------------------------------------------
// PhraseRule
// ---------------------------------------------------------------------------

/// A fixed phrase that always maps to the same predicates.
pub struct PhraseRule {
    name: &'static str,
    phrase: &'static str,
    predicates: PredicateSet,
}

impl PhraseRule {
    pub fn new(name: &'static str, phrase: &'static str, predicates: PredicateSet) -> Self {
        Self {
            name,
            phrase,
            predicates,
        }
    }
}

impl QueryRule for PhraseRule {
    fn name(&self) -> &str {
        self.name
    }

    fn matches(&self, query: &str) -> bool {
        query.contains(self.phrase)
    }

    fn extract(&self, _query: &str) -> QueryResult<PredicateSet> {
        Ok(self.predicates.clone())
    }
}

// ---------------------------------------------------------------------------
// PatternRule
// ---------------------------------------------------------------------------

type BuildFn = fn(&Captures<'_>) -> QueryResult<PredicateSet>;

/// Trigger phrases plus a regex whose captures become predicates.
pub struct PatternRule {
    name: &'static str,
    triggers: &'static [&'static str],
    pattern: Regex,
    build: BuildFn,
}

impl PatternRule {
    pub fn new(
        name: &'static str,
        triggers: &'static [&'static str],
        pattern: &str,
        build: BuildFn,
    ) -> QueryResult<Self> {
        Ok(Self {
            name,
            triggers,
            pattern: Regex::new(pattern)?,
            build,
        })
    }
}

impl QueryRule for PatternRule {
    fn name(&self) -> &str {
        self.name
    }

    fn matches(&self, query: &str) -> bool {
        self.triggers.iter().all(|t| query.contains(t))
    }

    fn extract(&self, query: &str) -> QueryResult<PredicateSet> {
        let caps = self
            .pattern
            .captures(query)
            .ok_or_else(|| QueryError::UnparseableQuery(query.to_string()))?;
        (self.build)(&caps)
    }
}

fn number(caps: &Captures<'_>, group: usize) -> QueryResult<Option<usize>> {
    match caps.get(group) {
        None => Ok(None),
        Some(m) => m
            .as_str()
            .parse()
            .map(Some)
            .map_err(|_| QueryError::UnparseableQuery(caps[0].to_string())),
    }
}

fn required_number(caps: &Captures<'_>, group: usize) -> QueryResult<usize> {
    number(caps, group)?.ok_or_else(|| QueryError::UnparseableQuery(caps[0].to_string()))
}

fn letter(caps: &Captures<'_>, group: usize) -> QueryResult<char> {
    caps.get(group)
        .and_then(|m| m.as_str().chars().next())
        .ok_or_else(|| QueryError::UnparseableQuery(caps[0].to_string()))
}

/// "longer than N" means at least N+1 characters.
fn above(n: usize) -> QueryResult<usize> {
    n.checked_add(1)
        .ok_or_else(|| QueryError::UnparseableQuery(format!("longer than {n}")))
}

/// "shorter than N" means at most N-1 characters.
fn below(n: usize) -> QueryResult<usize> {
    n.checked_sub(1).ok_or_else(|| {
        QueryError::ConflictingFilters("no string is shorter than 0 characters".into())
    })
}

fn longer_than(caps: &Captures<'_>) -> QueryResult<PredicateSet> {
    Ok(PredicateSet {
        min_length: Some(above(required_number(caps, 1)?)?),
        max_length: number(caps, 2)?.map(below).transpose()?,
        ..Default::default()
    })
}

fn shorter_than(caps: &Captures<'_>) -> QueryResult<PredicateSet> {
    Ok(PredicateSet {
        max_length: Some(below(required_number(caps, 1)?)?),
        min_length: number(caps, 2)?.map(above).transpose()?,
        ..Default::default()
    })
}

fn containing_letter(caps: &Captures<'_>) -> QueryResult<PredicateSet> {
    Ok(PredicateSet {
        contains_character: Some(letter(caps, 1)?),
        ..Default::default()
    })
}

fn exact_words(caps: &Captures<'_>) -> QueryResult<PredicateSet> {
    Ok(PredicateSet {
        word_count: Some(required_number(caps, 1)?),
        ..Default::default()
    })
}

fn length_between(caps: &Captures<'_>) -> QueryResult<PredicateSet> {
    Ok(PredicateSet {
        min_length: Some(required_number(caps, 1)?),
        max_length: Some(required_number(caps, 2)?),
        ..Default::default()
    })
}

fn palindromes_containing(caps: &Captures<'_>) -> QueryResult<PredicateSet> {
    Ok(PredicateSet {
        contains_character: Some(letter(caps, 1)?),
        is_palindrome: Some(true),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// Maps free-text queries to predicate sets through an ordered rule list.
pub struct Translator {
    rules: Vec<Box<dyn QueryRule>>,
}

impl Translator {
    /// Create a translator with no rules. Every query is unparseable until
    /// rules are added with [`Self::add_rule`].
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a translator with the standard rule list, in precedence order:
    ///
    /// 1. "all single word palindromic strings"
    /// 2. "strings longer than N", optionally "... shorter than M"
    /// 3. "strings shorter than N", optionally "... longer than M"
    /// 4. "palindromic strings that contain the first vowel"
    /// 5. "strings containing the letter X"
    /// 6. "all palindromic strings"
    /// 7. "strings with exactly N word(s)"
    /// 8. "strings between N and M characters"
    /// 9. "strings that contain 'X' and are palindromes"
    pub fn with_default_rules() -> QueryResult<Self> {
        let mut translator = Self::new();
        translator.add_rule(Box::new(PhraseRule::new(
            "single_word_palindromes",
            "all single word palindromic strings",
            PredicateSet {
                word_count: Some(1),
                is_palindrome: Some(true),
                ..Default::default()
            },
        )));
        translator.add_rule(Box::new(PatternRule::new(
            "longer_than",
            &["strings longer than"],
            r"longer than (\d+)(?:.*?shorter than (\d+))?",
            longer_than,
        )?));
        translator.add_rule(Box::new(PatternRule::new(
            "shorter_than",
            &["strings shorter than"],
            r"shorter than (\d+)(?:.*?longer than (\d+))?",
            shorter_than,
        )?));
        translator.add_rule(Box::new(PhraseRule::new(
            "palindromes_with_first_vowel",
            "palindromic strings that contain the first vowel",
            PredicateSet {
                is_palindrome: Some(true),
                contains_character: Some('a'),
                ..Default::default()
            },
        )));
        translator.add_rule(Box::new(PatternRule::new(
            "containing_letter",
            &["strings containing the letter"],
            r"containing the letter ([a-z0-9_])",
            containing_letter,
        )?));
        translator.add_rule(Box::new(PhraseRule::new(
            "all_palindromes",
            "all palindromic strings",
            PredicateSet {
                is_palindrome: Some(true),
                ..Default::default()
            },
        )));
        translator.add_rule(Box::new(PatternRule::new(
            "exact_word_count",
            &["strings with exactly"],
            r"with exactly (\d+) words?",
            exact_words,
        )?));
        translator.add_rule(Box::new(PatternRule::new(
            "length_between",
            &["strings between", "and", "characters"],
            r"between (\d+) and (\d+) characters",
            length_between,
        )?));
        translator.add_rule(Box::new(PatternRule::new(
            "palindromes_containing",
            &["strings that contain", "and are palindromes"],
            r#"contain ['"]?([a-z0-9_])['"]? and are palindromes"#,
            palindromes_containing,
        )?));
        Ok(translator)
    }

    /// Append a rule. It takes precedence below every rule already present.
    pub fn add_rule(&mut self, rule: Box<dyn QueryRule>) {
        self.rules.push(rule);
    }

    /// Rule names in precedence order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Translate a free-text query into a predicate set.
    ///
    /// Fails with `UnparseableQuery` when the query is blank, no rule claims
    /// it, or the claiming rule cannot extract its operands; fails with
    /// `ConflictingFilters` when the resulting length bounds are inverted.
    pub fn translate(&self, query: &str) -> QueryResult<PredicateSet> {
        let unparseable = || QueryError::UnparseableQuery(query.to_string());
        let lowered = query.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(unparseable());
        }

        let rule = self
            .rules
            .iter()
            .find(|r| r.matches(&lowered))
            .ok_or_else(unparseable)?;
        let predicates = rule.extract(&lowered).map_err(|e| match e {
            QueryError::UnparseableQuery(_) => unparseable(),
            other => other,
        })?;
        if predicates.is_empty() {
            return Err(unparseable());
        }
        predicates.check_bounds()?;

        debug!(rule = rule.name(), filters = ?predicates, "translated query");
        Ok(predicates)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn translator() -> Translator {
        Translator::with_default_rules().unwrap()
    }

    fn translate(query: &str) -> QueryResult<PredicateSet> {
        translator().translate(query)
    }

    fn set() -> PredicateSet {
        PredicateSet::default()
    }

    // -----------------------------------------------------------------------
    // Recognized phrasings
    // -----------------------------------------------------------------------

    #[test]
    fn single_word_palindromes() {
        assert_eq!(
            translate("all single word palindromic strings").unwrap(),
            PredicateSet {
                word_count: Some(1),
                is_palindrome: Some(true),
                ..set()
            }
        );
    }

    #[test]
    fn longer_than() {
        assert_eq!(
            translate("strings longer than 5").unwrap(),
            PredicateSet {
                min_length: Some(6),
                ..set()
            }
        );
    }

    #[test]
    fn shorter_than() {
        assert_eq!(
            translate("strings shorter than 5").unwrap(),
            PredicateSet {
                max_length: Some(4),
                ..set()
            }
        );
    }

    #[test]
    fn longer_and_shorter_combine() {
        assert_eq!(
            translate("strings longer than 2 and shorter than 9").unwrap(),
            PredicateSet {
                min_length: Some(3),
                max_length: Some(8),
                ..set()
            }
        );
        assert_eq!(
            translate("strings shorter than 9 but longer than 2").unwrap(),
            PredicateSet {
                min_length: Some(3),
                max_length: Some(8),
                ..set()
            }
        );
    }

    #[test]
    fn first_vowel_palindromes() {
        assert_eq!(
            translate("palindromic strings that contain the first vowel").unwrap(),
            PredicateSet {
                is_palindrome: Some(true),
                contains_character: Some('a'),
                ..set()
            }
        );
    }

    #[test]
    fn containing_letter() {
        assert_eq!(
            translate("strings containing the letter z").unwrap(),
            PredicateSet {
                contains_character: Some('z'),
                ..set()
            }
        );
    }

    #[test]
    fn letter_operands_are_ascii_word_characters() {
        assert_eq!(
            translate("strings containing the letter 7").unwrap(),
            PredicateSet {
                contains_character: Some('7'),
                ..set()
            }
        );
        for query in [
            "strings containing the letter é",
            "strings that contain 'ß' and are palindromes",
        ] {
            assert_eq!(
                translate(query),
                Err(QueryError::UnparseableQuery(query.to_string()))
            );
        }
    }

    #[test]
    fn all_palindromes() {
        assert_eq!(
            translate("all palindromic strings").unwrap(),
            PredicateSet {
                is_palindrome: Some(true),
                ..set()
            }
        );
    }

    #[test]
    fn exact_word_count_singular_and_plural() {
        for (query, n) in [
            ("strings with exactly 1 word", 1),
            ("strings with exactly 3 words", 3),
        ] {
            assert_eq!(
                translate(query).unwrap(),
                PredicateSet {
                    word_count: Some(n),
                    ..set()
                }
            );
        }
    }

    #[test]
    fn length_between() {
        assert_eq!(
            translate("strings between 2 and 8 characters").unwrap(),
            PredicateSet {
                min_length: Some(2),
                max_length: Some(8),
                ..set()
            }
        );
    }

    #[test]
    fn palindromes_containing_quoted_or_bare_letter() {
        let expected = PredicateSet {
            contains_character: Some('x'),
            is_palindrome: Some(true),
            ..set()
        };
        assert_eq!(
            translate("strings that contain 'x' and are palindromes").unwrap(),
            expected
        );
        assert_eq!(
            translate("strings that contain \"x\" and are palindromes").unwrap(),
            expected
        );
        assert_eq!(
            translate("strings that contain x and are palindromes").unwrap(),
            expected
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            translate("  Show me ALL Palindromic Strings please ").unwrap(),
            translate("all palindromic strings").unwrap()
        );
        assert_eq!(
            translate("Strings Containing The Letter Q").unwrap().contains_character,
            Some('q')
        );
    }

    // -----------------------------------------------------------------------
    // Failures
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_query_is_unparseable() {
        assert_eq!(
            translate("xyzzy"),
            Err(QueryError::UnparseableQuery("xyzzy".into()))
        );
    }

    #[test]
    fn blank_query_is_unparseable() {
        for query in ["", "   "] {
            assert!(matches!(
                translate(query),
                Err(QueryError::UnparseableQuery(_))
            ));
        }
    }

    #[test]
    fn claimed_query_without_operand_is_unparseable() {
        // The "longer than" rule claims the query; later rules are not tried.
        assert_eq!(
            translate("strings longer than ten"),
            Err(QueryError::UnparseableQuery("strings longer than ten".into()))
        );
        assert!(translate("strings with exactly some words").is_err());
        assert!(translate("strings between 2 and 8 words and characters").is_err());
    }

    #[test]
    fn inverted_bounds_conflict() {
        assert!(matches!(
            translate("strings longer than 10 and strings shorter than 5"),
            Err(QueryError::ConflictingFilters(_))
        ));
        assert!(matches!(
            translate("strings between 8 and 2 characters"),
            Err(QueryError::ConflictingFilters(_))
        ));
    }

    #[test]
    fn shorter_than_zero_conflicts() {
        assert!(matches!(
            translate("strings shorter than 0"),
            Err(QueryError::ConflictingFilters(_))
        ));
    }

    #[test]
    fn adjacent_bounds_do_not_conflict() {
        assert_eq!(
            translate("strings longer than 3 and shorter than 5").unwrap(),
            PredicateSet {
                min_length: Some(4),
                max_length: Some(4),
                ..set()
            }
        );
    }

    #[test]
    fn overflowing_number_is_unparseable() {
        assert!(matches!(
            translate("strings with exactly 99999999999999999999999 words"),
            Err(QueryError::UnparseableQuery(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Precedence
    // -----------------------------------------------------------------------

    #[test]
    fn default_rule_order() {
        assert_eq!(
            translator().rule_names(),
            [
                "single_word_palindromes",
                "longer_than",
                "shorter_than",
                "palindromes_with_first_vowel",
                "containing_letter",
                "all_palindromes",
                "exact_word_count",
                "length_between",
                "palindromes_containing",
            ]
        );
    }

    #[test]
    fn length_rule_shadows_palindrome_containment() {
        assert_eq!(
            translate("strings longer than 2 or strings that contain 'z' and are palindromes")
                .unwrap(),
            PredicateSet {
                min_length: Some(3),
                ..set()
            }
        );
    }

    #[test]
    fn all_palindromes_shadows_word_count() {
        assert_eq!(
            translate("all palindromic strings with exactly 2 words").unwrap(),
            PredicateSet {
                is_palindrome: Some(true),
                ..set()
            }
        );
    }

    #[test]
    fn single_word_phrase_is_not_read_as_all_palindromes() {
        let parsed = translate("all single word palindromic strings").unwrap();
        assert_eq!(parsed.word_count, Some(1));
    }

    #[test]
    fn empty_translator_parses_nothing() {
        let empty = Translator::new();
        assert!(empty.rule_names().is_empty());
        assert!(matches!(
            empty.translate("all palindromic strings"),
            Err(QueryError::UnparseableQuery(_))
        ));
    }

    #[test]
    fn custom_rules_append_after_defaults() {
        let mut t = translator();
        t.add_rule(Box::new(PhraseRule::new(
            "everything",
            "everything",
            PredicateSet {
                min_length: Some(0),
                ..set()
            },
        )));
        assert_eq!(t.rule_names().last(), Some(&"everything"));
        assert_eq!(t.translate("everything").unwrap().min_length, Some(0));
        // Earlier rules still win.
        assert_eq!(
            t.translate("everything: all palindromic strings").unwrap(),
            PredicateSet {
                is_palindrome: Some(true),
                ..set()
            }
        );
    }

    proptest! {
        #[test]
        fn longer_than_is_n_plus_one(n in 0usize..100_000) {
            let parsed = translate(&format!("strings longer than {n}")).unwrap();
            prop_assert_eq!(parsed.min_length, Some(n + 1));
            prop_assert_eq!(parsed.max_length, None);
        }

        #[test]
        fn between_orders_bounds(a in 0usize..1000, b in 0usize..1000) {
            let result = translate(&format!("strings between {a} and {b} characters"));
            if a <= b {
                prop_assert_eq!(result.unwrap().min_length, Some(a));
            } else {
                prop_assert!(matches!(result, Err(QueryError::ConflictingFilters(_))), "expected conflict");
            }
        }
    }
}
