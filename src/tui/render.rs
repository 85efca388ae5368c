//! Rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::provider::FeedPhase;
use crate::view::assets::build_asset_view;
use crate::view::sort::SortKey;

use super::state::{AppState, HeaderZone};
use super::style::Styles;

/// Fixed widths of the numeric columns; the name column takes the rest.
const CHANGE_WIDTH: u16 = 20;
const PRICE_WIDTH: u16 = 20;
/// Default ratatui table column spacing.
const COLUMN_SPACING: u16 = 1;

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Status bar
        Constraint::Min(5),    // Table / placeholder
        Constraint::Length(1), // Help line
    ])
    .split(area);

    render_status_bar(frame, chunks[0], state);

    match (&state.phase, state.snapshot.is_some()) {
        (FeedPhase::Failed(message), _) => {
            // Terminal state: replaces the table entirely.
            let message = message.clone();
            render_centered(frame, chunks[1], &message, Styles::error());
        }
        (_, false) => {
            render_centered(frame, chunks[1], "Connecting to feed...", Styles::dim());
        }
        (_, true) => render_table(frame, chunks[1], state),
    }

    render_help_line(frame, chunks[2]);
}

fn phase_line(state: &AppState) -> Line<'static> {
    let phase = match &state.phase {
        FeedPhase::Connecting => Span::raw("connecting"),
        FeedPhase::Live => {
            let snapshot = state.snapshot.as_ref();
            let count = snapshot.map_or(0, |s| s.assets.len());
            let updated = snapshot
                .and_then(|s| chrono::DateTime::from_timestamp(s.timestamp, 0))
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            Span::raw(format!("live | {count} assets | updated {updated}"))
        }
        FeedPhase::Reconnecting { attempt } => {
            Span::styled(format!("reconnecting (attempt {attempt})"), Styles::reconnect())
        }
        FeedPhase::Failed(_) => Span::styled("error", Styles::error()),
    };
    Line::from(vec![
        Span::raw(" coinwatch | "),
        Span::raw(state.endpoint.clone()),
        Span::raw(" | "),
        phase,
    ])
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let paragraph = Paragraph::new(phase_line(state)).style(Styles::header());
    frame.render_widget(paragraph, area);
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str, style: ratatui::style::Style) {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, vertical[1]);
}

/// Column widths for the given inner table width: numeric columns fixed,
/// name takes the remainder.
fn column_widths(inner_width: u16) -> [u16; 3] {
    let fixed = CHANGE_WIDTH + PRICE_WIDTH + 2 * COLUMN_SPACING;
    let name = inner_width.saturating_sub(fixed);
    [name, CHANGE_WIDTH, PRICE_WIDTH]
}

/// Header click zones for the given inner area and column widths.
fn header_zones(inner: Rect, widths: [u16; 3]) -> Vec<HeaderZone> {
    let mut zones = Vec::with_capacity(3);
    let mut x = inner.x;
    for (&key, &width) in SortKey::all().iter().zip(widths.iter()) {
        if width > 0 {
            zones.push(HeaderZone {
                key,
                x_start: x,
                x_end: x + width - 1,
            });
        }
        x += width + COLUMN_SPACING;
    }
    zones
}

fn render_table(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let Some(snapshot) = state.snapshot.as_ref() else {
        return;
    };
    let view = build_asset_view(snapshot, state.sort);

    let block = Block::default()
        .title(" Cryptocurrency Prices ")
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);

    let widths = column_widths(inner.width);
    // The header is the first row inside the block.
    state.set_header_geometry(
        Rect::new(inner.x, inner.y, inner.width, 1),
        header_zones(inner, widths),
    );
    state.resolve_selection(view.rows.len());

    let header = Row::new(
        view.headers
            .iter()
            .map(|h| Span::styled(h.clone(), Styles::table_header())),
    )
    .style(Styles::table_header())
    .height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            let change_style = if row.change_negative {
                Styles::change_down()
            } else {
                Styles::change_up()
            };
            Row::new(vec![
                Span::raw(row.name.clone()),
                Span::styled(row.change_text.clone(), change_style),
                Span::raw(row.price_text.clone()),
            ])
            .height(1)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(widths[0]),
            Constraint::Length(widths[1]),
            Constraint::Length(widths[2]),
        ],
    )
    .header(header)
    .column_spacing(COLUMN_SPACING)
    .block(block)
    .row_highlight_style(Styles::selected());

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

fn render_help_line(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled(" q", Styles::default()),
        Span::styled(" quit  ", Styles::dim()),
        Span::styled("n/c/p", Styles::default()),
        Span::styled(" sort column (click header works too)  ", Styles::dim()),
        Span::styled("↑/↓", Styles::default()),
        Span::styled(" move", Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}
