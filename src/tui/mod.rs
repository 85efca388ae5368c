//! Terminal User Interface for the live price table.
//!
//! The main loop polls the provider on ticks, turns the snapshot into a view
//! model, and renders a sortable table. Column headers react to keyboard
//! shortcuts and mouse clicks.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;

pub use app::App;
pub use state::AppState;
