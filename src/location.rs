//! Current-position capability used to tag devices with coordinates.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Source of the device operator's current position.
pub trait PositionProvider: Send + Sync {
    /// Latest known position, or `None` if location access is unavailable.
    fn current(&self) -> Option<Coordinates>;
}

/// A provider that always answers with the same position.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

impl PositionProvider for FixedPosition {
    fn current(&self) -> Option<Coordinates> {
        self.0
    }
}

/// Position fed continuously by a location watch.
///
/// The feeding side keeps the [`PositionFeed`]; readers see the most recent
/// fix without polling the source themselves.
#[derive(Debug, Clone)]
pub struct WatchedPosition {
    rx: watch::Receiver<Option<Coordinates>>,
}

#[derive(Debug)]
pub struct PositionFeed {
    tx: watch::Sender<Option<Coordinates>>,
}

impl WatchedPosition {
    pub fn channel() -> (PositionFeed, WatchedPosition) {
        let (tx, rx) = watch::channel(None);
        (PositionFeed { tx }, WatchedPosition { rx })
    }
}

impl PositionFeed {
    pub fn update(&self, position: Coordinates) {
        self.tx.send_replace(Some(position));
    }

    /// Marks the position as lost (permission revoked, no signal).
    pub fn lose(&self) {
        self.tx.send_replace(None);
    }
}

impl PositionProvider for WatchedPosition {
    fn current(&self) -> Option<Coordinates> {
        *self.rx.borrow()
    }
}
