//! # GreetingList Component
//!
//! Scrollable view of the greeting rows.
//!
//! ## Responsibilities
//!
//! - Display the projection's row descriptors
//! - Manage scrolling and the keyboard cursor
//! - Hit testing for mouse clicks
//! - Cache row heights so a toggle never triggers a relayout
//!
//! ## Architecture
//!
//! `GreetingList` is a transient component (created each frame) that wraps
//! `&'a mut GreetingListState` (persistent state) and the projection's rows
//! (props). Only rows inside the visible range, plus half a viewport of
//! buffer either side, are turned into widgets.
//!
//! Row heights depend on text and width only, and a row's text never changes
//! within one store generation. The cache is therefore invalidated by a width
//! change or a new generation, never by selection.
//!
//! ## Content Coordinates
//!
//! Offsets and prefix heights are `usize`, so a list may be taller than
//! `u16::MAX` lines. Only the visible window is handed to the `ScrollView`,
//! translated to window-local `u16` coordinates, and the scrollbar is drawn
//! separately against the full content height.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::projection::RowDescriptor;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::Greeting;
use crate::tui::event::TuiEvent;

/// High-level events emitted by the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// The row at this position was activated from the keyboard.
    Activate(usize),
}

/// Layout, scroll and cursor state for the greeting list.
/// Must be persisted in the parent TuiState.
pub struct GreetingListState {
    /// Content line shown at the top of the viewport
    pub scroll_offset: usize,
    /// Scroll state of the window drawn last frame (window-local)
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// Row under the keyboard cursor
    pub cursor: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for GreetingListState {
    fn default() -> Self {
        Self::new()
    }
}

impl GreetingListState {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            cursor: None,
            viewport_height: 0,
        }
    }

    /// Number of rows as of the last layout pass.
    pub fn row_count(&self) -> usize {
        self.layout.heights.len()
    }

    fn max_scroll(&self) -> usize {
        self.layout
            .total_height()
            .saturating_sub(usize::from(self.viewport_height))
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Drop a cursor that points past the end (after a re-seed shrank the list).
    pub fn clamp_cursor(&mut self) {
        let count = self.row_count();
        self.cursor = match self.cursor {
            Some(_) if count == 0 => None,
            Some(i) if i >= count => Some(count - 1),
            other => other,
        };
    }

    /// Scroll the viewport so the cursor row is fully visible.
    /// If the row is taller than the viewport, align its top edge.
    pub fn scroll_to_cursor(&mut self) {
        let Some(idx) = self.cursor else {
            return;
        };
        let Some((item_top, item_bottom)) = self.layout.row_span(idx) else {
            return;
        };
        let viewport = usize::from(self.viewport_height);

        if item_top < self.scroll_offset {
            self.scroll_offset = item_top;
        } else if item_bottom > self.scroll_offset + viewport {
            self.scroll_offset = item_bottom.saturating_sub(viewport);
        }
    }

    /// Move the cursor by `delta` rows.
    ///
    /// An unset cursor sits just above the first row, so the first step down
    /// lands on row 0 and End or PgDn still travel their full distance.
    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.row_count();
        if count == 0 {
            self.cursor = None;
            return;
        }
        let next = match self.cursor {
            Some(i) => i.saturating_add_signed(delta),
            None => delta.max(1).unsigned_abs() - 1,
        };
        self.cursor = Some(next.min(count - 1));
        self.scroll_to_cursor();
    }

    /// Map a y coordinate relative to the list's top edge to a row position.
    pub fn hit_test(&self, relative_y: u16) -> Option<usize> {
        if relative_y >= self.viewport_height {
            return None;
        }
        let content_y = self.scroll_offset.saturating_add(usize::from(relative_y));
        self.layout.row_at(content_y)
    }
}

/// Window-local coordinates never exceed the viewport plus its buffer, but a
/// single pathological row could; clip rather than wrap.
fn clip_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Scrollable greeting view component.
/// Created fresh each frame with references to state and data.
pub struct GreetingList<'a> {
    pub state: &'a mut GreetingListState,
    pub rows: &'a [RowDescriptor],
    /// Store generation the rows belong to
    pub generation: u64,
}

impl<'a> GreetingList<'a> {
    pub fn new(state: &'a mut GreetingListState, rows: &'a [RowDescriptor], generation: u64) -> Self {
        Self {
            state,
            rows,
            generation,
        }
    }
}

impl<'a> Component for GreetingList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Update Layout Cache (only on width/generation change)
        let layout = &mut self.state.layout;
        if !layout.is_valid(self.rows.len(), content_width, self.generation) {
            layout.heights = self
                .rows
                .iter()
                .map(|row| Greeting::calculate_height(&row.text, content_width))
                .collect();
            layout.rebuild_prefix_heights();
            layout.update_metadata(self.rows.len(), content_width, self.generation);
        }

        // 2. Clamp scroll and cursor against the (possibly new) content
        self.state.viewport_height = area.height;
        self.state.clamp_cursor();
        self.state.clamp_scroll();

        let offset = self.state.scroll_offset;
        let layout = &self.state.layout;
        let visible_range = layout.visible_range(offset, area.height);
        let window_top = layout.row_span(visible_range.start).map_or(0, |(top, _)| top);
        let window_bottom = visible_range
            .end
            .checked_sub(1)
            .and_then(|last| layout.row_span(last))
            .map_or(window_top, |(_, bottom)| bottom);
        let total_height = layout.total_height();

        // 3. Render visible rows into a window-sized ScrollView
        let mut scroll_view =
            ScrollView::new(Size::new(content_width, clip_u16(window_bottom - window_top)))
                .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
                .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let Some((top, bottom)) = layout.row_span(i) else {
                break;
            };
            let row_rect = Rect::new(
                0,
                clip_u16(top - window_top),
                content_width,
                clip_u16(bottom - top),
            );
            let is_cursor = self.state.cursor == Some(i);
            scroll_view.render_widget(Greeting::new(&self.rows[i], is_cursor), row_rect);
        }

        self.state.scroll_state.set_offset(Position {
            x: 0,
            y: clip_u16(offset.saturating_sub(window_top)),
        });
        let list_area = Rect {
            width: content_width,
            ..area
        };
        frame.render_stateful_widget(scroll_view, list_area, &mut self.state.scroll_state);

        // 4. Scrollbar against the full content height
        let mut scrollbar_state = ScrollbarState::new(self.state.max_scroll())
            .position(offset)
            .viewport_content_length(usize::from(area.height));
        if total_height > 0 {
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut scrollbar_state,
            );
        }
    }
}

/// EventHandler is implemented on `GreetingListState` rather than `GreetingList`
/// because `GreetingList` is recreated each frame and can't hold state.
impl EventHandler for GreetingListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = (self.viewport_height / 2).max(1) as isize;
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.move_cursor(-page);
                None
            }
            TuiEvent::ScrollPageDown => {
                self.move_cursor(page);
                None
            }
            TuiEvent::CursorUp => {
                self.move_cursor(-1);
                None
            }
            TuiEvent::CursorDown => {
                self.move_cursor(1);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = None;
                self.move_cursor(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.move_cursor(isize::MAX);
                None
            }
            TuiEvent::Activate => self.cursor.map(ListEvent::Activate),
            _ => None,
        }
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running bottom edge of each row, in content lines
    pub prefix_heights: Vec<usize>,
    row_count: usize,
    content_width: u16,
    generation: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            row_count: 0,
            content_width: 0,
            generation: 0,
        }
    }

    /// True when cached heights still describe rows of this generation at this width.
    pub fn is_valid(&self, row_count: usize, content_width: u16, generation: u64) -> bool {
        self.content_width == content_width
            && self.generation == generation
            && self.row_count == row_count
            && self.heights.len() == row_count
    }

    pub fn update_metadata(&mut self, row_count: usize, content_width: u16, generation: u64) {
        self.row_count = row_count;
        self.content_width = content_width;
        self.generation = generation;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0usize, |acc, &h| {
                *acc += usize::from(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> usize {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// `(top, bottom)` content coordinates of row `idx`, bottom exclusive.
    pub fn row_span(&self, idx: usize) -> Option<(usize, usize)> {
        let bottom = *self.prefix_heights.get(idx)?;
        let top = if idx == 0 { 0 } else { self.prefix_heights[idx - 1] };
        Some((top, bottom))
    }

    pub fn row_at(&self, content_y: usize) -> Option<usize> {
        let idx = self.prefix_heights.partition_point(|&end| end <= content_y);
        (idx < self.prefix_heights.len()).then_some(idx)
    }

    pub fn visible_range(
        &self,
        scroll_offset: usize,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let viewport = usize::from(viewport_height);
        let buffer = viewport / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::render_list;
    use crate::core::store::ItemStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn cache_with(heights: Vec<u16>) -> LayoutCache {
        let mut cache = LayoutCache::new();
        let count = heights.len();
        cache.heights = heights;
        cache.rebuild_prefix_heights();
        cache.update_metadata(count, 80, 1);
        cache
    }

    fn state_with(heights: Vec<u16>, viewport_height: u16) -> GreetingListState {
        let mut state = GreetingListState::new();
        state.layout = cache_with(heights);
        state.viewport_height = viewport_height;
        state
    }

    #[test]
    fn test_layout_cache_validity() {
        let cache = cache_with(vec![2; 5]);
        assert!(cache.is_valid(5, 80, 1));
        // Width changed
        assert!(!cache.is_valid(5, 40, 1));
        // Store re-initialized
        assert!(!cache.is_valid(5, 80, 2));
        // Row count changed
        assert!(!cache.is_valid(6, 80, 1));
    }

    #[test]
    fn test_row_span_and_row_at() {
        let cache = cache_with(vec![2, 3, 2]);
        assert_eq!(cache.row_span(0), Some((0, 2)));
        assert_eq!(cache.row_span(1), Some((2, 5)));
        assert_eq!(cache.row_span(3), None);
        assert_eq!(cache.row_at(0), Some(0));
        assert_eq!(cache.row_at(4), Some(1));
        assert_eq!(cache.row_at(5), Some(2));
        assert_eq!(cache.row_at(7), None);
        assert_eq!(cache.total_height(), 7);
    }

    #[test]
    fn test_visible_range_is_bounded() {
        let cache = cache_with(vec![2; 1000]);
        let range = cache.visible_range(0, 20);
        assert_eq!(range.start, 0);
        // 20 rows of viewport plus 10 lines of buffer, never the whole list
        assert!(range.end <= 16);

        let range = cache.visible_range(1000, 20);
        assert!(range.start >= 490 && range.end <= 516);
    }

    #[test]
    fn test_cursor_movement_clamps() {
        let mut state = state_with(vec![2; 3], 10);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.cursor, Some(0));
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.cursor, Some(2));
        state.handle_event(&TuiEvent::CursorHome);
        assert_eq!(state.cursor, Some(0));
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.cursor, Some(0));
        state.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(state.cursor, Some(2));
    }

    #[test]
    fn test_end_and_page_down_without_cursor() {
        let mut state = state_with(vec![2; 100], 10);
        state.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(state.cursor, Some(99));
        assert_eq!(state.scroll_offset, 190);

        let mut state = state_with(vec![2; 100], 10);
        state.handle_event(&TuiEvent::ScrollPageDown);
        // Half a viewport is 5 rows; an unset cursor counts as above row 0
        assert_eq!(state.cursor, Some(4));

        let mut state = state_with(vec![2; 100], 10);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.cursor, Some(0));
    }

    #[test]
    fn test_layout_taller_than_u16() {
        let cache = cache_with(vec![2; 40_000]);
        assert_eq!(cache.total_height(), 80_000);
        assert_eq!(cache.row_span(32_767), Some((65_534, 65_536)));
        assert_eq!(cache.row_span(39_999), Some((79_998, 80_000)));
        assert_eq!(cache.row_at(79_999), Some(39_999));

        let range = cache.visible_range(79_990, 10);
        assert!(range.contains(&39_999));
        assert!(range.start > 39_980);
    }

    #[test]
    fn test_rows_past_u16_lines_are_reachable() {
        let mut state = state_with(vec![2; 40_000], 10);
        state.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(state.scroll_offset, 79_990);
        assert_eq!(state.hit_test(9), Some(39_999));
        assert_eq!(state.hit_test(0), Some(39_995));
    }

    #[test]
    fn test_render_bottom_of_very_long_list() {
        let store = ItemStore::with_labels((0..40_000).map(|i| format!("Hello Android #{i}")));
        let rows = render_list(&store.snapshot());
        let mut state = GreetingListState::new();
        state.scroll_offset = usize::MAX;

        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| GreetingList::new(&mut state, &rows, 1).render(f, f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert_eq!(state.scroll_offset, 79_990);
        assert!(text.contains("Hello Hello Android #39999!"));
        assert!(!text.contains("Hello Hello Android #0!"));
    }

    #[test]
    fn test_activate_emits_cursor_position() {
        let mut state = state_with(vec![2; 3], 10);
        assert_eq!(state.handle_event(&TuiEvent::Activate), None);
        state.cursor = Some(1);
        assert_eq!(state.handle_event(&TuiEvent::Activate), Some(ListEvent::Activate(1)));
    }

    #[test]
    fn test_cursor_scrolls_into_view() {
        let mut state = state_with(vec![2; 100], 10);
        state.cursor = Some(0);
        for _ in 0..20 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        // Row 20 spans 40..42; its bottom must sit at the viewport's bottom edge
        assert_eq!(state.scroll_offset, 32);
    }

    #[test]
    fn test_hit_test_accounts_for_scroll() {
        let mut state = state_with(vec![2; 100], 10);
        assert_eq!(state.hit_test(3), Some(1));
        state.scroll_offset = 10;
        assert_eq!(state.hit_test(3), Some(6));
        assert_eq!(state.hit_test(10), None);
    }

    #[test]
    fn test_clamp_cursor_after_shrink() {
        let mut state = state_with(vec![2; 2], 10);
        state.cursor = Some(7);
        state.clamp_cursor();
        assert_eq!(state.cursor, Some(1));
    }

    #[test]
    fn test_render_shows_first_rows() {
        let store = ItemStore::with_labels((0..50).map(|i| format!("Hello Android #{i}")));
        let rows = render_list(&store.snapshot());
        let mut state = GreetingListState::new();

        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| GreetingList::new(&mut state, &rows, 1).render(f, f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Hello Hello Android #0!"));
        assert!(!text.contains("Hello Hello Android #49!"));
        assert_eq!(state.row_count(), 50);
        assert_eq!(state.viewport_height, 10);
    }
}
