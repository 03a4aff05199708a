//! Fuzzy matching behind a trait.
//!
//! A [`FuzzyMatcher`] only scores. Ordering and tie-breaking are decided by
//! the picker, so any scorer can be dropped in without changing what users
//! see for equal scores.

use nucleo_matcher::{
    Config, Matcher, Utf32Str,
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
};
use thiserror::Error;

/// One matching haystack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Position of the haystack in the slice passed to [`FuzzyMatcher::rank`].
    pub index: usize,
    /// Higher is better.
    pub score: u32,
    /// Char positions in the haystack that matched, ascending.
    pub indices: Vec<usize>,
}

/// Errors a matcher may report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The query could not be compiled.
    #[error("invalid query `{query}`: {reason}")]
    InvalidQuery {
        /// The rejected query.
        query: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The backing scorer is not usable.
    #[error("matcher unavailable: {0}")]
    Unavailable(String),
}

/// Scores a query against a list of haystacks.
pub trait FuzzyMatcher: Send {
    /// Return every haystack that matches `query`, in any order.
    fn rank(&mut self, query: &str, haystacks: &[&str]) -> Result<Vec<Match>, MatchError>;
}

/// Default matcher powered by nucleo-matcher.
///
/// Smart case (a query with uppercase letters is case sensitive) and smart
/// unicode normalization. Whitespace in the query separates atoms that must
/// all match.
pub struct NucleoMatcher {
    matcher: Matcher,
}

impl std::fmt::Debug for NucleoMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NucleoMatcher").finish_non_exhaustive()
    }
}

impl Default for NucleoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NucleoMatcher {
    /// Creates a matcher with default settings.
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }
}

impl FuzzyMatcher for NucleoMatcher {
    fn rank(&mut self, query: &str, haystacks: &[&str]) -> Result<Vec<Match>, MatchError> {
        let pattern = Pattern::new(query, CaseMatching::Smart, Normalization::Smart, AtomKind::Fuzzy);

        let mut buf = Vec::new();
        let mut hits = Vec::new();
        let mut matches = Vec::new();
        for (index, haystack) in haystacks.iter().enumerate() {
            hits.clear();
            let utf32 = Utf32Str::new(haystack, &mut buf);
            let Some(score) = pattern.indices(utf32, &mut self.matcher, &mut hits) else {
                continue;
            };
            let mut indices: Vec<usize> = hits.iter().map(|&i| i as usize).collect();
            indices.sort_unstable();
            indices.dedup();
            matches.push(Match {
                index,
                score,
                indices,
            });
        }
        Ok(matches)
    }
}
