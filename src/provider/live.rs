//! Live provider backed by the feed subscriber thread.

use std::sync::mpsc::Receiver;

use crate::feed::{self, FeedConfig, FeedHandle, FeedMessage};
use crate::model::AssetSnapshot;

use super::{FeedPhase, SnapshotProvider};

/// Drains the feed channel and tracks the subscription lifecycle.
///
/// Dropping the provider drops the receiver and the feed handle, which stops
/// the subscriber thread; nothing can mutate state after that.
pub struct LiveProvider {
    endpoint: String,
    rx: Receiver<FeedMessage>,
    _handle: FeedHandle,
    current: Option<AssetSnapshot>,
    phase: FeedPhase,
}

impl LiveProvider {
    /// Starts a subscription to `config.url`.
    pub fn connect(config: FeedConfig) -> Self {
        let endpoint = config.url.clone();
        let (handle, rx) = feed::spawn(config);
        Self::from_channel(endpoint, rx, handle)
    }

    fn from_channel(endpoint: String, rx: Receiver<FeedMessage>, handle: FeedHandle) -> Self {
        Self {
            endpoint,
            rx,
            _handle: handle,
            current: None,
            phase: FeedPhase::Connecting,
        }
    }

    fn apply(&mut self, message: FeedMessage) {
        // Failed latches: later messages are not authoritative.
        if self.phase.is_failed() {
            return;
        }
        match message {
            FeedMessage::Snapshot(snapshot) => {
                self.current = Some(snapshot);
                self.phase = FeedPhase::Live;
            }
            FeedMessage::Reconnecting { attempt, .. } => {
                self.phase = FeedPhase::Reconnecting { attempt };
            }
            FeedMessage::Failed(err) => {
                self.phase = FeedPhase::Failed(err.to_string());
            }
        }
    }
}

impl SnapshotProvider for LiveProvider {
    fn advance(&mut self) {
        // Non-blocking drain; with a slow tick the snapshots coalesce and the
        // last one wins, which is exactly wholesale replacement.
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
        }
    }

    fn current(&self) -> Option<&AssetSnapshot> {
        self.current.as_ref()
    }

    fn phase(&self) -> FeedPhase {
        self.phase.clone()
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
