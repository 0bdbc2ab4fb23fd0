//! Window computation over the filtered view.
//!
//! Pure given its inputs; the session re-invokes it after every re-filter
//! and every cursor jump that crosses a page boundary.

use crate::store::CandidateStore;
use crate::types::{FilteredView, Geometry, TextMeasure, Window};

/// Compute the page starting at view position `curr`.
///
/// Grid mode counts one slot per item against `lines * max(columns, 1)`.
/// Linear mode accumulates measured text widths, each clamped to the
/// remaining capacity so a single overwide candidate still occupies one
/// full page instead of none.
///
/// The forward walk from `curr` stops at the first position whose
/// accumulated cost exceeds capacity; that position is `next`. The
/// backward walk accumulates the cost of each left neighbor and stops
/// before the neighbor that would overflow, leaving `prev` at the first
/// position of the previous page (`curr` itself on the first page).
///
/// A degenerate linear capacity of zero clamps every item's cost to
/// zero, so the accumulated cost never exceeds capacity and the whole
/// view lands on a single page. Nothing is rendered into zero pixels
/// anyway, and treating the view as one page keeps every position
/// reachable instead of trapping the cursor.
pub fn window(
    curr: usize,
    view: &FilteredView,
    store: &CandidateStore,
    geometry: &Geometry,
    measure: &dyn TextMeasure,
) -> Window {
    debug_assert!(curr < view.len());

    let grid = geometry.lines > 0;
    let capacity: u64 = if grid {
        u64::from(geometry.lines) * u64::from(geometry.columns.max(1))
    } else {
        u64::from(geometry.linear_capacity())
    };

    let cost = |position: usize| -> u64 {
        if grid {
            return 1;
        }
        let text = view
            .get(position)
            .and_then(|id| store.get(id))
            .map_or("", |c| c.display.as_str());
        u64::from(measure.text_width(text)).min(capacity)
    };

    let mut accumulated = 0u64;
    let mut next = None;
    for position in curr..view.len() {
        accumulated += cost(position);
        if accumulated > capacity {
            next = Some(position);
            break;
        }
    }

    let mut accumulated = 0u64;
    let mut prev = curr;
    while prev > 0 {
        accumulated += cost(prev - 1);
        if accumulated > capacity {
            break;
        }
        prev -= 1;
    }

    Window {
        prev,
        start: curr,
        next,
    }
}
