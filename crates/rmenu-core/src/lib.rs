//! rmenu-core - candidate filtering, ranking and paging for text menus
//!
//! This crate is the engine behind an interactive single-line/grid text
//! selector: on every keystroke it re-filters a candidate pool against the
//! query, orders the matches into priority tiers, windows them to the
//! display geometry and tracks cursor plus multi-select state. Rendering,
//! keyboard decoding and configuration parsing are the host's problem.

pub mod error;
pub mod matcher;
pub mod paginate;
pub mod priority;
pub mod select;
pub mod session;
pub mod source;
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use matcher::filter;
pub use priority::PriorityIndex;
pub use select::SelectionSet;
pub use session::{QueryOutcome, Session};
pub use source::{CandidateSource, CommandSource};
pub use store::{CandidateStore, LoadOptions};
pub use types::{
    Candidate, FilteredView, Geometry, MatchAlgorithm, MatchConfig, MonospaceMeasure, Score,
    TextMeasure, Tier, Window,
};
