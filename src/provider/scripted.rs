//! Scripted provider: replays a fixed sequence of snapshots.
//!
//! The test and demo counterpart of [`super::LiveProvider`], playing the role
//! mock data plays for a real collector. Each `advance` applies the next
//! queued snapshot; once the script is exhausted the last dataset stays.

use std::collections::VecDeque;

use crate::model::AssetSnapshot;

use super::{FeedPhase, SnapshotProvider};

pub struct ScriptedProvider {
    endpoint: String,
    script: VecDeque<AssetSnapshot>,
    current: Option<AssetSnapshot>,
}

impl ScriptedProvider {
    pub fn new(snapshots: impl IntoIterator<Item = AssetSnapshot>) -> Self {
        Self {
            endpoint: "scripted://feed".to_string(),
            script: snapshots.into_iter().collect(),
            current: None,
        }
    }
}

impl SnapshotProvider for ScriptedProvider {
    fn advance(&mut self) {
        if let Some(next) = self.script.pop_front() {
            self.current = Some(next);
        }
    }

    fn current(&self) -> Option<&AssetSnapshot> {
        self.current.as_ref()
    }

    fn phase(&self) -> FeedPhase {
        if self.current.is_some() {
            FeedPhase::Live
        } else {
            FeedPhase::Connecting
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Asset;

    fn snapshot(name: &str) -> AssetSnapshot {
        AssetSnapshot {
            timestamp: 0,
            assets: vec![Asset {
                name: name.to_string(),
                ..Asset::default()
            }],
        }
    }

    #[test]
    fn replays_in_order_and_holds_the_last() {
        let mut provider = ScriptedProvider::new([snapshot("a"), snapshot("b")]);
        assert_eq!(provider.phase(), FeedPhase::Connecting);

        provider.advance();
        assert_eq!(provider.current().unwrap().assets[0].name, "a");
        assert_eq!(provider.phase(), FeedPhase::Live);

        provider.advance();
        assert_eq!(provider.current().unwrap().assets[0].name, "b");

        provider.advance();
        assert_eq!(provider.current().unwrap().assets[0].name, "b");
    }
}
