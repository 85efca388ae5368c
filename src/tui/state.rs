//! Application state.

use ratatui::layout::Rect;
use ratatui::widgets::TableState as RatatuiTableState;

use crate::model::AssetSnapshot;
use crate::provider::FeedPhase;
use crate::view::sort::{SortKey, SortSelection, request_sort};

/// Clickable zone of one column header, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderZone {
    pub key: SortKey,
    /// First column of the zone (inclusive).
    pub x_start: u16,
    /// Last column of the zone (inclusive).
    pub x_end: u16,
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// Feed lifecycle as of the last provider poll.
    pub phase: FeedPhase,
    /// Latest dataset, replaced wholesale on every feed message.
    pub snapshot: Option<AssetSnapshot>,
    /// Current sort selection; `None` renders feed order.
    pub sort: Option<SortSelection>,
    /// Selected row index in the rendered order.
    pub selected: usize,
    /// Feed endpoint, for the status line.
    pub endpoint: String,
    /// Terminal row of the table header, set during render for hit testing.
    pub header_row_y: Option<u16>,
    /// Header click zones, set during render.
    pub header_zones: Vec<HeaderZone>,
    /// Ratatui table state (enables auto-scrolling of the selection).
    pub table_state: RatatuiTableState,
}

impl AppState {
    pub fn new(endpoint: String) -> Self {
        Self {
            phase: FeedPhase::Connecting,
            snapshot: None,
            sort: None,
            selected: 0,
            endpoint,
            header_row_y: None,
            header_zones: Vec::new(),
            table_state: RatatuiTableState::default(),
        }
    }

    /// Applies a header activation for `key`.
    pub fn request_sort(&mut self, key: SortKey) {
        self.sort = Some(request_sort(self.sort, key));
    }

    /// Maps a terminal click position to a header activation.
    /// Returns `true` if a header was hit.
    pub fn click_header(&mut self, x: u16, y: u16) -> bool {
        if self.header_row_y != Some(y) {
            return false;
        }
        let hit = self
            .header_zones
            .iter()
            .find(|zone| x >= zone.x_start && x <= zone.x_end)
            .map(|zone| zone.key);
        match hit {
            Some(key) => {
                self.request_sort(key);
                true
            }
            None => false,
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        self.selected = self.selected.saturating_add(1);
    }

    pub fn page_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn page_down(&mut self, n: usize) {
        self.selected = self.selected.saturating_add(n);
    }

    pub fn home(&mut self) {
        self.selected = 0;
    }

    pub fn end(&mut self) {
        self.selected = usize::MAX;
    }

    /// Clamps the selection to the rendered row count and syncs the ratatui
    /// table state so the widget scrolls the selection into view.
    pub fn resolve_selection(&mut self, row_count: usize) {
        if row_count == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.selected = self.selected.min(row_count - 1);
            self.table_state.select(Some(self.selected));
        }
    }

    /// Records the header geometry from the last render.
    pub fn set_header_geometry(&mut self, header_area: Rect, zones: Vec<HeaderZone>) {
        self.header_row_y = Some(header_area.y);
        self.header_zones = zones;
    }
}
