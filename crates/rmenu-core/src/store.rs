//! Owns the flat, stable-indexed candidate pool.

use crate::priority::PriorityIndex;
use crate::types::Candidate;
use tracing::debug;

/// How feed lines are split into display and output text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Split each line at this character into `(display, output)`.
    pub delimiter: Option<char>,
    /// Split at the last occurrence instead of the first.
    pub reverse_split: bool,
}

/// The full candidate pool. All other components hold ids or view
/// positions into it, never owned copies.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    candidates: Vec<Candidate>,
}

impl CandidateStore {
    /// Build the pool from feed lines. Ids follow feed order. Empty input
    /// yields an empty store, not an error.
    pub fn load<I, S>(lines: I, options: &LoadOptions, priority: &PriorityIndex) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<Candidate> = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| build_candidate(index as u32, line.into(), options, priority))
            .collect();
        debug!(count = candidates.len(), "loaded candidate pool");
        Self { candidates }
    }

    /// Replace the entire pool. Ids restart from zero, so any previously
    /// computed view or selection keyed by old ids is meaningless; the
    /// session clears them.
    pub fn refresh<I, S>(&mut self, lines: I, options: &LoadOptions, priority: &PriorityIndex)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::load(lines, options, priority);
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&Candidate> {
        self.candidates.get(id as usize)
    }

    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn build_candidate(
    id: u32,
    line: String,
    options: &LoadOptions,
    priority: &PriorityIndex,
) -> Candidate {
    let (display, output) = match options.delimiter {
        Some(delimiter) => {
            let at = if options.reverse_split {
                line.rfind(delimiter)
            } else {
                line.find(delimiter)
            };
            match at {
                Some(at) => {
                    let display = line[..at].to_owned();
                    let output = line[at + delimiter.len_utf8()..].to_owned();
                    (display, output)
                }
                // A line without the delimiter is not malformed.
                None => (line.clone(), line),
            }
        }
        None => (line.clone(), line),
    };

    let high_priority = priority.contains(&display);
    let display_lower = display.to_lowercase();

    Candidate {
        id,
        display,
        display_lower,
        output,
        high_priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[&str]) -> CandidateStore {
        CandidateStore::load(
            lines.iter().copied(),
            &LoadOptions::default(),
            &PriorityIndex::default(),
        )
    }

    #[test]
    fn ids_follow_feed_order() {
        let store = plain(&["alpha", "beta", "gamma"]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().display, "alpha");
        assert_eq!(store.get(2).unwrap().display, "gamma");
        assert_eq!(store.get(1).unwrap().id, 1);
    }

    #[test]
    fn empty_input_yields_empty_store() {
        let store = plain(&[]);
        assert!(store.is_empty());
    }

    #[test]
    fn no_delimiter_means_display_equals_output() {
        let store = plain(&["run firefox"]);
        let c = store.get(0).unwrap();
        assert_eq!(c.display, "run firefox");
        assert_eq!(c.output, "run firefox");
    }

    #[test]
    fn delimiter_splits_at_first_occurrence() {
        let options = LoadOptions {
            delimiter: Some('\t'),
            reverse_split: false,
        };
        let store =
            CandidateStore::load(["Web Browser\tfirefox\textra"], &options, &PriorityIndex::default());
        let c = store.get(0).unwrap();
        assert_eq!(c.display, "Web Browser");
        assert_eq!(c.output, "firefox\textra");
    }

    #[test]
    fn reverse_split_uses_last_occurrence() {
        let options = LoadOptions {
            delimiter: Some(':'),
            reverse_split: true,
        };
        let store = CandidateStore::load(["a:b:c"], &options, &PriorityIndex::default());
        let c = store.get(0).unwrap();
        assert_eq!(c.display, "a:b");
        assert_eq!(c.output, "c");
    }

    #[test]
    fn missing_delimiter_in_line_is_not_an_error() {
        let options = LoadOptions {
            delimiter: Some('\t'),
            reverse_split: false,
        };
        let store = CandidateStore::load(["no tabs here"], &options, &PriorityIndex::default());
        let c = store.get(0).unwrap();
        assert_eq!(c.display, c.output);
    }

    #[test]
    fn priority_tagging_uses_display_text() {
        let options = LoadOptions {
            delimiter: Some('\t'),
            reverse_split: false,
        };
        let priority = PriorityIndex::new(["Web Browser"], &crate::types::MatchConfig::default());
        let store = CandidateStore::load(
            ["Web Browser\tfirefox", "Mail\tmutt"],
            &options,
            &priority,
        );
        assert!(store.get(0).unwrap().high_priority);
        assert!(!store.get(1).unwrap().high_priority);
    }

    #[test]
    fn refresh_reassigns_ids_from_new_feed() {
        let mut store = plain(&["old0", "old1"]);
        store.refresh(
            ["new0", "new1", "new2"],
            &LoadOptions::default(),
            &PriorityIndex::default(),
        );
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().display, "new0");
        assert_eq!(store.get(2).unwrap().id, 2);
    }
}
