//! UI-agnostic view state and view models.
//!
//! `sort` holds the user's column selection; `assets` derives the ordered
//! table rows from a snapshot plus that selection. The TUI maps the result to
//! ratatui widgets and never sorts on its own.

pub mod assets;
pub mod sort;
