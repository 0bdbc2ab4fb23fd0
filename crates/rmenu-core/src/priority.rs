//! Sorted lookup tagging candidates as high priority.

use crate::types::MatchConfig;

/// Binary-searchable list of display texts that should be promoted in
/// ranking. The comparison rule is taken from the match configuration at
/// build time, so index and engine always fold case the same way.
#[derive(Debug, Clone, Default)]
pub struct PriorityIndex {
    keys: Vec<String>,
    case_sensitive: bool,
}

impl PriorityIndex {
    /// Build the index from user-supplied entries. Duplicates are kept;
    /// binary search tolerates adjacent equal keys.
    pub fn new<I, S>(entries: I, config: &MatchConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let case_sensitive = config.case_sensitive;
        let mut keys: Vec<String> = entries
            .into_iter()
            .map(|e| {
                if case_sensitive {
                    e.as_ref().to_owned()
                } else {
                    e.as_ref().to_lowercase()
                }
            })
            .collect();
        keys.sort_unstable();
        Self {
            keys,
            case_sensitive,
        }
    }

    /// The case rule the keys were folded and sorted under.
    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn contains(&self, display: &str) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        if self.case_sensitive {
            self.keys.binary_search_by(|k| k.as_str().cmp(display)).is_ok()
        } else {
            let folded = display.to_lowercase();
            self.keys
                .binary_search_by(|k| k.as_str().cmp(folded.as_str()))
                .is_ok()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(case_sensitive: bool) -> MatchConfig {
        MatchConfig {
            case_sensitive,
            ..MatchConfig::default()
        }
    }

    #[test]
    fn case_sensitive_lookup() {
        let index = PriorityIndex::new(["firefox", "mutt"], &config(true));
        assert!(index.case_sensitive());
        assert!(index.contains("firefox"));
        assert!(!index.contains("Firefox"));
        assert!(!index.contains("chromium"));
    }

    #[test]
    fn case_insensitive_lookup() {
        let index = PriorityIndex::new(["FireFox", "Mutt"], &config(false));
        assert!(!index.case_sensitive());
        assert!(index.contains("firefox"));
        assert!(index.contains("FIREFOX"));
        assert!(!index.contains("chromium"));
    }

    #[test]
    fn duplicates_do_not_break_search() {
        let index = PriorityIndex::new(["a", "a", "a", "b", "b"], &config(true));
        assert!(index.contains("a"));
        assert!(index.contains("b"));
        assert!(!index.contains("c"));
    }

    #[test]
    fn empty_index_disables_promotion() {
        let index = PriorityIndex::default();
        assert!(index.is_empty());
        assert!(!index.contains("anything"));
    }
}
