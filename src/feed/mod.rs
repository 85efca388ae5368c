//! Live feed subscription.
//!
//! The feed is a server-push (SSE) endpoint delivering full asset snapshots.
//! A background thread owns the HTTP stream and sends parsed messages over a
//! channel; the UI side drains that channel once per tick.

mod sse;
mod subscriber;

pub use sse::EventParser;
#[cfg(test)]
pub(crate) use subscriber::detached_handle;
pub use subscriber::{FeedHandle, spawn};

use std::time::Duration;

use crate::model::AssetSnapshot;

/// Errors raised by the feed subscription.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Payload was not the expected `{ "data": [...] }` JSON. Terminal:
    /// after one of these the subscription stops treating the stream as
    /// authoritative.
    #[error("failed to decode feed message: {0}")]
    Decode(#[from] serde_json::Error),

    /// Connection-level failure from the HTTP client.
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("feed endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// I/O error while reading the response body.
    #[error("feed stream read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Server closed the stream.
    #[error("feed stream ended")]
    StreamClosed,
}

impl FeedError {
    /// Terminal errors end the subscription for good; the rest are
    /// transport-level and eligible for reconnection.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedError::Decode(_))
    }
}

/// Messages from the subscriber thread to the UI.
#[derive(Debug)]
pub enum FeedMessage {
    /// A decoded snapshot; replaces the previous dataset entirely.
    Snapshot(AssetSnapshot),
    /// Transport dropped; the subscriber will retry after `delay`.
    Reconnecting { attempt: u32, delay: Duration },
    /// Subscription is over. No further messages follow.
    Failed(FeedError),
}

/// Feed subscription settings.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// SSE endpoint URL.
    pub url: String,
    /// Reconnect on transport failures. Decode failures never reconnect.
    pub reconnect: bool,
}
