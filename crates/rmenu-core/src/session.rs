//! One interactive selection session: pool, view, cursor, window and
//! multi-select state, driven by one method call per input event.

use crate::matcher;
use crate::paginate;
use crate::priority::PriorityIndex;
use crate::select::SelectionSet;
use crate::source::CandidateSource;
use crate::store::{CandidateStore, LoadOptions};
use crate::types::{Candidate, FilteredView, Geometry, MatchConfig, TextMeasure, Window};
use tracing::{debug, warn};

/// What the host should do after a query change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    Continue,
    /// Exactly one match with instant-return configured: confirm this
    /// candidate id and terminate.
    InstantSelect(u32),
}

/// Single-threaded, run-to-completion selection state. There is exactly
/// one control flow per session, so no interior locking exists; hosts
/// that add typeahead prefetching must serialize view swaps themselves.
pub struct Session {
    store: CandidateStore,
    priority: PriorityIndex,
    config: MatchConfig,
    load_options: LoadOptions,
    geometry: Geometry,
    measure: Box<dyn TextMeasure>,
    source: Option<Box<dyn CandidateSource>>,
    selection: SelectionSet,
    query: String,
    view: FilteredView,
    cursor: Option<usize>,
    window: Option<Window>,
}

impl Session {
    pub fn new<I, S>(
        lines: I,
        priority: PriorityIndex,
        config: MatchConfig,
        load_options: LoadOptions,
        geometry: Geometry,
        measure: Box<dyn TextMeasure>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !priority.is_empty() && priority.case_sensitive() != config.case_sensitive {
            warn!(
                index_case_sensitive = priority.case_sensitive(),
                config_case_sensitive = config.case_sensitive,
                "priority index was built under a different case rule than the match config"
            );
        }
        let store = CandidateStore::load(lines, &load_options, &priority);
        let mut session = Self {
            store,
            priority,
            config,
            load_options,
            geometry,
            measure,
            source: None,
            selection: SelectionSet::new(),
            query: String::new(),
            view: FilteredView::default(),
            cursor: None,
            window: None,
        };
        session.refilter();
        session
    }

    /// Attach a dynamic source; the pool is regenerated on every query
    /// change from then on.
    pub fn with_source(mut self, source: Box<dyn CandidateSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Re-filter against a new query, resetting cursor and window.
    ///
    /// With a dynamic source attached this first regenerates the pool,
    /// which reassigns ids and clears the selection set. A source error
    /// propagates without touching any session state; a source producing
    /// no lines keeps the previous pool.
    pub fn set_query(&mut self, query: &str) -> crate::Result<QueryOutcome> {
        if let Some(source) = &mut self.source {
            let lines = source.generate(query)?;
            if lines.is_empty() {
                warn!(query, "dynamic source produced no candidates, keeping pool");
            } else {
                self.store
                    .refresh(lines, &self.load_options, &self.priority);
                self.selection.clear();
            }
        }

        self.query.clear();
        self.query.push_str(query);
        self.refilter();

        if self.config.instant_return
            && self.view.len() == 1
            && let Some(id) = self.view.get(0)
        {
            debug!(id, "single match with instant return");
            return Ok(QueryOutcome::InstantSelect(id));
        }
        Ok(QueryOutcome::Continue)
    }

    /// Swap in new display constraints.
    ///
    /// The page anchor is kept where possible; when the new page can no
    /// longer reach the cursor (a shrink), the page re-anchors on the
    /// cursor so it always stays within the window.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        let Some(window) = self.window else { return };
        self.set_page(window.start);
        if let Some(cursor) = self.cursor
            && let Some(window) = self.window
            && (cursor < window.start || window.next.is_some_and(|next| cursor >= next))
        {
            self.set_page(cursor);
        }
    }

    fn refilter(&mut self) {
        self.view = matcher::filter(&self.store, &self.query, &self.config);
        if self.view.is_empty() {
            self.cursor = None;
            self.window = None;
        } else {
            self.cursor = Some(0);
            self.set_page(0);
        }
    }

    fn set_page(&mut self, start: usize) {
        self.window = Some(paginate::window(
            start,
            &self.view,
            &self.store,
            &self.geometry,
            self.measure.as_ref(),
        ));
    }

    /// Step the cursor forward; crossing into the next page repages.
    pub fn move_next(&mut self) {
        let Some(cursor) = self.cursor else { return };
        if cursor + 1 >= self.view.len() {
            return;
        }
        let moved = cursor + 1;
        self.cursor = Some(moved);
        if let Some(window) = self.window
            && window.next == Some(moved)
        {
            self.set_page(moved);
        }
    }

    /// Step the cursor backward; leaving the page head repages to `prev`.
    pub fn move_prev(&mut self) {
        let Some(cursor) = self.cursor else { return };
        if cursor == 0 {
            return;
        }
        let moved = cursor - 1;
        self.cursor = Some(moved);
        if let Some(window) = self.window
            && moved < window.start
        {
            self.set_page(window.prev);
        }
    }

    /// Grid-only: one column left, `lines` positions back. Refuses a
    /// partial column step.
    pub fn column_left(&mut self) {
        if self.geometry.lines == 0 || self.geometry.columns <= 1 {
            return;
        }
        let Some(cursor) = self.cursor else { return };
        let Some(moved) = cursor.checked_sub(self.geometry.lines as usize) else {
            return;
        };
        self.cursor = Some(moved);
        if let Some(window) = self.window
            && moved < window.start
        {
            self.set_page(window.prev);
        }
    }

    /// Grid-only: one column right, `lines` positions forward. Refuses a
    /// partial column step.
    pub fn column_right(&mut self) {
        if self.geometry.lines == 0 || self.geometry.columns <= 1 {
            return;
        }
        let Some(cursor) = self.cursor else { return };
        let moved = cursor + self.geometry.lines as usize;
        if moved >= self.view.len() {
            return;
        }
        self.cursor = Some(moved);
        if let Some(window) = self.window
            && let Some(next) = window.next
            && moved >= next
        {
            self.set_page(next);
        }
    }

    pub fn home(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.cursor = Some(0);
        self.set_page(0);
    }

    /// Jump to the last candidate. Pages are computed forward-biased, so
    /// the last page is aligned by walking windows from the tail until
    /// the remainder fits.
    pub fn end(&mut self) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        self.cursor = Some(len - 1);
        let on_last_page = matches!(self.window, Some(w) if w.next.is_none());
        if on_last_page {
            return;
        }
        let mut start = len - 1;
        self.set_page(start);
        if let Some(window) = self.window {
            start = window.prev;
            self.set_page(start);
        }
        while let Some(window) = self.window
            && window.next.is_some()
            && start + 1 < len
        {
            start += 1;
            self.set_page(start);
        }
    }

    pub fn page_down(&mut self) {
        if let Some(window) = self.window
            && let Some(next) = window.next
        {
            self.cursor = Some(next);
            self.set_page(next);
        }
    }

    /// On the first page `prev == start`, so this lands on the page head.
    pub fn page_up(&mut self) {
        if let Some(window) = self.window {
            self.cursor = Some(window.prev);
            self.set_page(window.prev);
        }
    }

    /// Toggle multi-select membership of the cursor candidate.
    pub fn toggle_selection(&mut self) {
        if let Some(id) = self.cursor_id() {
            let selected = self.selection.toggle(id);
            debug!(id, selected, "toggled selection");
        }
    }

    #[inline]
    pub fn is_selected(&self, id: u32) -> bool {
        self.selection.contains(id)
    }

    /// Final output: previously toggled candidates in slot order, the
    /// cursor candidate last (never duplicated).
    pub fn confirm(&self) -> Vec<&Candidate> {
        let cursor_id = self.cursor_id();
        let mut out: Vec<&Candidate> = self
            .selection
            .iter()
            .filter(|id| Some(*id) != cursor_id)
            .filter_map(|id| self.store.get(id))
            .collect();
        if let Some(candidate) = cursor_id.and_then(|id| self.store.get(id)) {
            out.push(candidate);
        }
        out
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn filtered(&self) -> &FilteredView {
        &self.view
    }

    #[inline]
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    #[inline]
    pub fn cursor_position(&self) -> Option<usize> {
        self.cursor
    }

    fn cursor_id(&self) -> Option<u32> {
        self.cursor.and_then(|position| self.view.get(position))
    }

    pub fn cursor(&self) -> Option<&Candidate> {
        self.cursor_id().and_then(|id| self.store.get(id))
    }

    pub fn candidate(&self, id: u32) -> Option<&Candidate> {
        self.store.get(id)
    }

    /// Candidates on the current page, for rendering.
    pub fn visible(&self) -> impl Iterator<Item = &Candidate> {
        let range = match self.window {
            Some(window) => window.start..window.next.unwrap_or(self.view.len()),
            None => 0..0,
        };
        self.view.indices()[range]
            .iter()
            .filter_map(|&id| self.store.get(id))
    }
}
