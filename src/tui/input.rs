//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::state::AppState;
use crate::view::sort::SortKey;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Result of handling an input event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Column sort: mnemonic keys and column numbers
        KeyCode::Char('n') | KeyCode::Char('1') => {
            state.request_sort(SortKey::Name);
            KeyAction::None
        }
        KeyCode::Char('c') | KeyCode::Char('2') => {
            state.request_sort(SortKey::ChangePercent24Hr);
            KeyAction::None
        }
        KeyCode::Char('p') | KeyCode::Char('3') => {
            state.request_sort(SortKey::PriceUsd);
            KeyAction::None
        }

        // Row navigation
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_up();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_down();
            KeyAction::None
        }
        KeyCode::PageUp => {
            state.page_up(PAGE_SIZE);
            KeyAction::None
        }
        KeyCode::PageDown => {
            state.page_down(PAGE_SIZE);
            KeyAction::None
        }
        KeyCode::Home => {
            state.home();
            KeyAction::None
        }
        KeyCode::End => {
            state.end();
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

/// Handles mouse input: left click on a column header sorts by that column,
/// scroll wheel moves the selection.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let _ = state.click_header(mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => state.select_up(),
        MouseEventKind::ScrollDown => state.select_down(),
        _ => {}
    }
}
