//! The two ranking algorithms producing a filtered view of the pool.
//!
//! Both algorithms are full recomputations over the store — no state is
//! reused from the previous pass. That keeps tier ordering a pure function
//! of (pool, query, config) and makes repeated passes idempotent.

use crate::store::CandidateStore;
use crate::types::{FilteredView, MatchAlgorithm, MatchConfig, Score, Tier};
use smallvec::SmallVec;
use tracing::debug;

/// Run the configured algorithm over the pool.
pub fn filter(store: &CandidateStore, query: &str, config: &MatchConfig) -> FilteredView {
    let view = match config.algorithm {
        MatchAlgorithm::Exact => exact_match(store, query, config),
        MatchAlgorithm::Fuzzy => fuzzy_match(store, query, config),
    };
    debug!(
        query,
        pool = store.len(),
        matched = view.len(),
        "filter pass"
    );
    view
}

/// Candidate text under the active case rule. The lowercase side is cached
/// on the candidate at load time.
#[inline]
fn haystack<'a>(candidate: &'a crate::types::Candidate, case_sensitive: bool) -> &'a str {
    if case_sensitive {
        &candidate.display
    } else {
        &candidate.display_lower
    }
}

/// Tokenized substring matching with four-way tiering: verbatim-equal
/// matches first, then high-priority prefixes, prefixes, substrings.
/// Feed order is preserved within each tier.
fn exact_match(store: &CandidateStore, query: &str, config: &MatchConfig) -> FilteredView {
    let folded;
    let query: &str = if config.case_sensitive {
        query
    } else {
        folded = query.to_lowercase();
        &folded
    };

    let tokens: SmallVec<[&str; 4]> = query.split_whitespace().collect();
    let first_token = tokens.first().copied().unwrap_or("");

    let mut exact: Vec<u32> = Vec::new();
    let mut hp_prefix: Vec<u32> = Vec::new();
    let mut prefix: Vec<u32> = Vec::new();
    let mut substring: Vec<u32> = Vec::new();

    for candidate in store.candidates() {
        let hay = haystack(candidate, config.case_sensitive);
        let all_tokens_match = tokens.iter().all(|token| hay.contains(token));
        if !all_tokens_match && !config.assume_prefiltered {
            continue;
        }
        // With sorting disabled every match counts as exact, which keeps
        // the view in feed order.
        if tokens.is_empty() || !config.sort || hay == query {
            exact.push(candidate.id);
        } else if candidate.high_priority && hay.starts_with(first_token) {
            hp_prefix.push(candidate.id);
        } else if hay.starts_with(first_token) {
            prefix.push(candidate.id);
        } else {
            substring.push(candidate.id);
        }
    }

    let mut indices = Vec::with_capacity(
        exact.len() + hp_prefix.len() + prefix.len() + substring.len(),
    );
    let mut scores = Vec::with_capacity(indices.capacity());
    for (ids, tier) in [
        (exact, Tier::Exact),
        (hp_prefix, Tier::HighPriority),
        (prefix, Tier::Prefix),
        (substring, Tier::Substring),
    ] {
        scores.resize(scores.len() + ids.len(), Score { tier, rank: 0.0 });
        indices.extend(ids);
    }
    FilteredView::from_parts(indices, scores)
}

/// Greedy leftmost subsequence walk. Returns the char indices of the first
/// matched char and of the char completing the query, or `None` when the
/// query cannot be completed.
fn subsequence_span(hay: &str, needle: &[char]) -> Option<(usize, usize)> {
    let mut pending = needle.iter();
    let mut want = *pending.next()?;
    let mut start = None;
    for (at, c) in hay.chars().enumerate() {
        if c != want {
            continue;
        }
        if start.is_none() {
            start = Some(at);
        }
        match pending.next() {
            Some(&next) => want = next,
            None => return Some((start.unwrap_or(at), at)),
        }
    }
    None
}

/// Rank for a completed subsequence match. Lower is better: matches that
/// start early and span tightly rank first.
#[inline]
fn rank_score(start: usize, end: usize, query_len: usize) -> f64 {
    let span = (end - start + 1) as f64;
    ((start + 2) as f64).ln() + span - query_len as f64
}

struct FuzzyMatch {
    id: u32,
    high_priority: bool,
    exact: bool,
    rank: f64,
}

/// Subsequence matching with rank scoring. With sorting enabled the view
/// is exact matches, then high-priority candidates, then everything else
/// ascending by rank (feed order breaks ties via the stable sort).
fn fuzzy_match(store: &CandidateStore, query: &str, config: &MatchConfig) -> FilteredView {
    let folded;
    let query: &str = if config.case_sensitive {
        query
    } else {
        folded = query.to_lowercase();
        &folded
    };
    let needle: Vec<char> = query.chars().collect();

    if needle.is_empty() {
        // Trivial match: everything, in feed order, unscored.
        let indices: Vec<u32> = store.candidates().iter().map(|c| c.id).collect();
        let scores = vec![
            Score {
                tier: Tier::Ranked,
                rank: 0.0,
            };
            indices.len()
        ];
        return FilteredView::from_parts(indices, scores);
    }

    let mut matches: Vec<FuzzyMatch> = Vec::new();
    for candidate in store.candidates() {
        let hay = haystack(candidate, config.case_sensitive);
        let Some((start, end)) = subsequence_span(hay, &needle) else {
            continue;
        };
        matches.push(FuzzyMatch {
            id: candidate.id,
            high_priority: candidate.high_priority,
            exact: hay == query,
            rank: rank_score(start, end, needle.len()),
        });
    }

    let mut indices = Vec::with_capacity(matches.len());
    let mut scores = Vec::with_capacity(matches.len());

    if config.sort {
        // Stable: equal ranks keep feed order.
        matches.sort_by(|a, b| a.rank.total_cmp(&b.rank));
        for pass in [Tier::Exact, Tier::HighPriority, Tier::Ranked] {
            for m in &matches {
                let tier = if m.exact {
                    Tier::Exact
                } else if m.high_priority {
                    Tier::HighPriority
                } else {
                    Tier::Ranked
                };
                if tier == pass {
                    indices.push(m.id);
                    scores.push(Score { tier, rank: m.rank });
                }
            }
        }
    } else {
        for m in matches {
            indices.push(m.id);
            scores.push(Score {
                tier: Tier::Ranked,
                rank: m.rank,
            });
        }
    }

    FilteredView::from_parts(indices, scores)
}
