//! Phrase/query builder
//!
//! Normalizes user keywords and paper metadata into a search request that
//! satisfies the provider's cardinality rules. Pure: no I/O.

use super::SearchError;
use crate::graph::{Paper, UserInputs};
use tracing::{debug, warn};

/// Minimum number of phrases the provider accepts
pub const MIN_PHRASES: usize = 3;
/// Maximum number of phrases the provider accepts
pub const MAX_PHRASES: usize = 10;
/// Queries shorter than this are treated as absent, not as an error
pub const MIN_QUERY_CHARS: usize = 50;
/// Queries longer than this are truncated
pub const MAX_QUERY_CHARS: usize = 5000;

/// A normalized search request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    /// 3–10 phrases, case-insensitively deduplicated, first occurrence order
    pub phrases: Vec<String>,
    /// Query text satisfying the 50–5000 char rule, when one survives
    pub query: Option<String>,
}

/// Build search terms from a root paper and optional user inputs.
///
/// User keywords come first. When fewer than [`MIN_PHRASES`] remain after
/// deduplication, phrases are padded deterministically from paper metadata:
/// the title, then each field of study, then the publication type, stopping
/// as soon as the minimum is reached. Padding that still leaves fewer than
/// the minimum fails with [`SearchError::InsufficientPhrases`].
pub fn build_search_terms(root: &Paper, inputs: &UserInputs) -> Result<SearchTerms, SearchError> {
    let mut phrases: Vec<String> = Vec::new();
    for keyword in &inputs.keywords {
        push_unique(&mut phrases, keyword);
    }
    let supplied = phrases.len();

    if phrases.len() < MIN_PHRASES {
        pad_from_paper(&mut phrases, root);
    }
    if phrases.len() < MIN_PHRASES {
        return Err(SearchError::InsufficientPhrases {
            supplied,
            required: MIN_PHRASES,
        });
    }
    phrases.truncate(MAX_PHRASES);

    Ok(SearchTerms {
        phrases,
        query: normalize_query(inputs.query_text.as_deref()),
    })
}

/// Pad phrases from paper metadata in priority order until the minimum
/// is reached: title, fields of study, publication type.
fn pad_from_paper(phrases: &mut Vec<String>, paper: &Paper) {
    push_unique(phrases, &paper.title);
    for field in &paper.fields_of_study {
        if phrases.len() >= MIN_PHRASES {
            return;
        }
        push_unique(phrases, field);
    }
    if phrases.len() < MIN_PHRASES {
        if let Some(kind) = &paper.publication_type {
            push_unique(phrases, kind);
        }
    }
}

/// Append a trimmed phrase unless empty or a case-insensitive duplicate
fn push_unique(phrases: &mut Vec<String>, candidate: &str) {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return;
    }
    let lowered = candidate.to_lowercase();
    if phrases.iter().any(|p| p.to_lowercase() == lowered) {
        return;
    }
    phrases.push(candidate.to_string());
}

/// Apply the provider's query length rules: too short is absent, too long
/// is truncated on a char boundary.
fn normalize_query(query: Option<&str>) -> Option<String> {
    let query = query?.trim();
    let chars = query.chars().count();
    if chars < MIN_QUERY_CHARS {
        if chars > 0 {
            debug!(chars, "query below minimum length; falling back to phrase-only search");
        }
        return None;
    }
    if chars > MAX_QUERY_CHARS {
        warn!(chars, max = MAX_QUERY_CHARS, "query above maximum length; truncating");
        return Some(query.chars().take(MAX_QUERY_CHARS).collect());
    }
    Some(query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Paper {
        Paper::new("root", "Spectral Graph Methods")
            .with_fields_of_study(["Computer Science", "Physics"])
            .with_publication_type("journal")
    }

    #[test]
    fn user_keywords_pass_through_when_enough() {
        let inputs = UserInputs::new().with_keywords(["alpha", "beta", "gamma", "delta"]);
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(terms.phrases, vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn single_keyword_pads_title_then_first_field() {
        // One keyword: padding pulls the title and the first field of
        // study, then stops at three.
        let inputs = UserInputs::new().with_keywords(["alpha"]);
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(
            terms.phrases,
            vec!["alpha", "Spectral Graph Methods", "Computer Science"]
        );
    }

    #[test]
    fn duplicate_title_is_skipped_during_padding() {
        let inputs = UserInputs::new().with_keywords(["spectral graph methods"]);
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(
            terms.phrases,
            vec!["spectral graph methods", "Computer Science", "Physics"]
        );
    }

    #[test]
    fn dedup_is_case_insensitive_and_keeps_first_occurrence() {
        let inputs = UserInputs::new().with_keywords(["Alpha", "beta", "ALPHA", "gamma"]);
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(terms.phrases, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn phrase_count_is_capped_at_ten() {
        let keywords: Vec<String> = (0..15).map(|i| format!("kw{i}")).collect();
        let inputs = UserInputs::new().with_keywords(keywords);
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(terms.phrases.len(), MAX_PHRASES);
        assert_eq!(terms.phrases[0], "kw0");
    }

    #[test]
    fn bare_paper_without_metadata_fails_with_counts() {
        let paper = Paper::new("p", "");
        let inputs = UserInputs::new().with_keywords(["only-one"]);
        let err = build_search_terms(&paper, &inputs).unwrap_err();
        match err {
            SearchError::InsufficientPhrases { supplied, required } => {
                assert_eq!(supplied, 1);
                assert_eq!(required, MIN_PHRASES);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn publication_type_completes_the_minimum() {
        let paper = Paper::new("p", "Lone Title").with_publication_type("conference");
        let inputs = UserInputs::new().with_keywords(["alpha"]);
        let terms = build_search_terms(&paper, &inputs).unwrap();
        assert_eq!(terms.phrases, vec!["alpha", "Lone Title", "conference"]);
    }

    #[test]
    fn short_query_is_treated_as_absent() {
        let inputs = UserInputs::new()
            .with_keywords(["alpha", "beta", "gamma"])
            .with_query_text("too short");
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(terms.query, None);
    }

    #[test]
    fn query_at_minimum_length_survives() {
        let query = "q".repeat(MIN_QUERY_CHARS);
        let inputs = UserInputs::new()
            .with_keywords(["alpha", "beta", "gamma"])
            .with_query_text(query.clone());
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(terms.query, Some(query));
    }

    #[test]
    fn over_long_query_is_truncated() {
        let inputs = UserInputs::new()
            .with_keywords(["alpha", "beta", "gamma"])
            .with_query_text("q".repeat(MAX_QUERY_CHARS + 100));
        let terms = build_search_terms(&root(), &inputs).unwrap();
        assert_eq!(terms.query.unwrap().chars().count(), MAX_QUERY_CHARS);
    }

    #[test]
    fn no_phrase_output_contains_case_insensitive_duplicates() {
        let inputs = UserInputs::new().with_keywords(["Physics", "alpha", "beta"]);
        let terms = build_search_terms(&root(), &inputs).unwrap();
        let lowered: std::collections::HashSet<String> =
            terms.phrases.iter().map(|p| p.to_lowercase()).collect();
        assert_eq!(lowered.len(), terms.phrases.len());
    }
}
