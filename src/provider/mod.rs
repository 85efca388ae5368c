//! Provider abstraction between the feed and the UI.
//!
//! The TUI polls a [`SnapshotProvider`] once per tick and renders whatever
//! phase and dataset it reports. [`LiveProvider`] is backed by the real feed
//! subscription; [`ScriptedProvider`] replays fixed snapshots for tests.

mod live;
mod scripted;

pub use live::LiveProvider;
pub use scripted::ScriptedProvider;

use crate::model::AssetSnapshot;

/// Lifecycle of the feed as seen by the UI.
///
/// `Failed` is terminal: once entered, no later message changes it and the
/// dataset stops updating. `Reconnecting` keeps the last dataset on screen
/// while the transport recovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    /// No data yet.
    Connecting,
    /// Dataset present and updating.
    Live,
    /// Transport dropped; retrying.
    Reconnecting { attempt: u32 },
    /// Subscription ended with an error. No way out short of a restart.
    Failed(String),
}

impl FeedPhase {
    pub fn is_failed(&self) -> bool {
        matches!(self, FeedPhase::Failed(_))
    }
}

/// Data source for the TUI.
pub trait SnapshotProvider {
    /// Drains pending feed messages into the current state.
    fn advance(&mut self);

    /// The latest dataset, if any has arrived.
    fn current(&self) -> Option<&AssetSnapshot>;

    /// Current feed lifecycle phase.
    fn phase(&self) -> FeedPhase;

    /// Endpoint description for the status line.
    fn endpoint(&self) -> &str;
}
