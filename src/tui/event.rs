//! Terminal event pump.
//!
//! A dedicated thread polls crossterm with the tick rate as timeout: input
//! events are forwarded as they arrive, and a quiet interval produces a
//! `Tick`, which is what drives data refresh in the main loop.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for data refresh.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Mouse input, used for header clicks.
    Mouse(MouseEvent),
    /// Terminal resize (width).
    Resize(u16),
}

impl Event {
    fn from_crossterm(evt: CrosstermEvent) -> Option<Self> {
        match evt {
            CrosstermEvent::Key(key) => Some(Event::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Resize(width, _) => Some(Event::Resize(width)),
            _ => None,
        }
    }
}

/// Polls terminal events on its own thread and exposes them as a channel.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept alive to prevent channel closure.
    _tx: Sender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                let sent = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read().ok().and_then(Event::from_crossterm) {
                        Some(evt) => event_tx.send(evt),
                        None => continue,
                    }
                } else {
                    // Quiet interval: refresh tick.
                    event_tx.send(Event::Tick)
                };
                if sent.is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Receives the next event, blocking until one is available.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
