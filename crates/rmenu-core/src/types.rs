/// One selectable item from the candidate feed.
///
/// Candidates are immutable once loaded; ranking state lives in the
/// [`FilteredView`] produced per filter pass, not on the candidate.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Feed-order id, stable within one pool generation. Reassigned from
    /// zero whenever the pool is refreshed from a dynamic source.
    pub id: u32,
    /// Text the engine matches against and the host renders.
    pub display: String,
    /// Cached casefold of `display` for case-insensitive passes.
    pub display_lower: String,
    /// Text emitted on confirm. Equals `display` unless a delimiter split
    /// the feed line.
    pub output: String,
    /// Tagged from the priority index at load time.
    pub high_priority: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchAlgorithm {
    /// Whitespace tokens, each a substring; four-way tiering.
    #[default]
    Exact,
    /// Greedy leftmost subsequence with a rank score.
    Fuzzy,
}

/// Immutable matching configuration passed into every filter pass.
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub algorithm: MatchAlgorithm,
    pub case_sensitive: bool,
    /// When disabled, matches stay in feed order and tiering is skipped.
    pub sort: bool,
    /// Signal immediate termination when a pass yields exactly one match.
    pub instant_return: bool,
    /// Keep candidates that fail token filtering. Only meaningful when a
    /// dynamic source already filtered the pool by the query.
    pub assume_prefiltered: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            algorithm: MatchAlgorithm::Exact,
            case_sensitive: true,
            sort: true,
            instant_return: false,
            assume_prefiltered: false,
        }
    }
}

/// Priority bucket a match landed in. Within a tier, feed order is
/// preserved (fuzzy `Ranked` entries are ordered by rank instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Exact,
    HighPriority,
    Prefix,
    Substring,
    Ranked,
}

/// Per-match ranking record, parallel to the view's index list.
#[derive(Debug, Clone, Copy)]
pub struct Score {
    pub tier: Tier,
    /// Fuzzy rank, lower is better. Zero outside fuzzy scoring.
    pub rank: f64,
}

/// Ordered subset of candidate ids currently matching the query, with a
/// parallel score array. Rebuilt from scratch on every query change.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    indices: Vec<u32>,
    scores: Vec<Score>,
}

impl FilteredView {
    pub(crate) fn from_parts(indices: Vec<u32>, scores: Vec<Score>) -> Self {
        debug_assert_eq!(indices.len(), scores.len());
        Self { indices, scores }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Candidate id at a view position.
    #[inline]
    pub fn get(&self, position: usize) -> Option<u32> {
        self.indices.get(position).copied()
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn score(&self, position: usize) -> Option<&Score> {
        self.scores.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Score)> {
        self.indices.iter().copied().zip(self.scores.iter())
    }
}

/// Page boundaries over the filtered view, all in view positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First position of the previous page. Equals `start` on the first
    /// page, so paging up from page zero lands on the page head.
    pub prev: usize,
    /// First position of the current page.
    pub start: usize,
    /// First position of the next page, `None` when the tail fits.
    pub next: Option<usize>,
}

/// Display geometry constraints consumed by the paginator.
///
/// `lines > 0` selects grid mode: pages hold `lines * max(columns, 1)`
/// items, width is ignored. `lines == 0` selects linear mode: pages are
/// bounded by pixel width after subtracting the reserved widths.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geometry {
    pub lines: u32,
    pub columns: u32,
    pub width: u32,
    pub prompt_width: u32,
    pub input_width: u32,
    pub left_indicator_width: u32,
    pub right_indicator_width: u32,
    pub counter_width: u32,
}

impl Geometry {
    pub fn grid(lines: u32, columns: u32) -> Self {
        Self {
            lines,
            columns,
            ..Self::default()
        }
    }

    pub fn linear(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Pixels left for candidate text in linear mode.
    pub fn linear_capacity(&self) -> u32 {
        self.width.saturating_sub(
            self.prompt_width
                + self.input_width
                + self.left_indicator_width
                + self.right_indicator_width
                + self.counter_width,
        )
    }
}

/// Width measurement collaborator, backed by the host's font/render layer.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> u32;
}

/// Fixed advance per char. Sufficient for grids, terminals and tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub char_width: u32,
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.char_width
    }
}
