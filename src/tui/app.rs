//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::provider::SnapshotProvider;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::AppState;

/// Puts the terminal into raw mode with the alternate screen and mouse
/// capture, and undoes all of it on drop. Dropping covers every exit path
/// of the main loop, an early `?` and a panic included.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }

    fn restore() -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = Self::restore();
    }
}

/// Main TUI application.
pub struct App {
    provider: Box<dyn SnapshotProvider>,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App over the given provider.
    pub fn new(provider: Box<dyn SnapshotProvider>) -> Self {
        let state = AppState::new(provider.endpoint().to_string());
        Self {
            provider,
            state,
            should_quit: false,
        }
    }

    /// Runs the TUI application until quit.
    ///
    /// The provider (and with it the feed subscription) is dropped when this
    /// returns, whatever the exit path: teardown releases the subscription
    /// unconditionally.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        // Initial poll so the first frame may already have data.
        self.poll_feed();

        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => self.poll_feed(),
                Ok(Event::Key(key)) => {
                    if handle_key(&mut self.state, key) == KeyAction::Quit {
                        self.should_quit = true;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(&mut self.state, mouse),
                Ok(Event::Resize(_)) => {
                    // Geometry is recomputed on the next draw.
                }
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Drains the provider and mirrors its phase and dataset into the UI
    /// state. The sort selection is untouched: it persists across dataset
    /// replacements.
    fn poll_feed(&mut self) {
        self.provider.advance();
        self.state.phase = self.provider.phase();
        self.state.snapshot = self.provider.current().cloned();
    }
}
