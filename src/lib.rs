//! coinwatch - live cryptocurrency price table for the terminal.
//!
//! This library provides the pieces behind the `coinwatch` binary:
//! - `feed` - SSE subscription to the asset price endpoint
//! - `provider` - data-source abstraction between the feed and the UI
//! - `view` - sort state and UI-agnostic table view models
//! - `tui` - interactive ratatui frontend

pub mod feed;
pub mod model;
pub mod provider;
pub mod tui;
pub mod view;
