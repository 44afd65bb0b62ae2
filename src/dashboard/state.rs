// View-state container for a mounted dashboard
//
// One writer (the telemetry subscriber) and any number of readers. Readers
// always see the latest value; no history is kept.

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::telemetry::{ConnectionStatus, StreamEvent, TelemetrySnapshot};

/// Everything the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub snapshot: TelemetrySnapshot,
    pub status: ConnectionStatus,
}

impl ViewState {
    /// Apply one subscriber event.
    ///
    /// # Returns
    /// `true` if readers should be notified.
    ///
    /// # Notes
    /// - A snapshot replaces every field; omitted fields become absent
    /// - Malformed frames leave the state untouched
    /// - Once `Disconnected`, every later event is ignored
    pub fn apply(&mut self, event: &StreamEvent) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        match event {
            StreamEvent::Opened => {
                if self.status == ConnectionStatus::Connecting {
                    self.status = ConnectionStatus::Connected;
                    true
                } else {
                    false
                }
            }
            StreamEvent::Snapshot(snapshot) => {
                self.snapshot = snapshot.clone();
                true
            }
            StreamEvent::Malformed { .. } => false,
            StreamEvent::Closed { .. } => {
                self.status = ConnectionStatus::Disconnected;
                true
            }
        }
    }
}

/// Owned, watch-backed store for [`ViewState`].
pub struct ViewStateStore {
    tx: watch::Sender<ViewState>,
}

impl ViewStateStore {
    /// Empty snapshot, status `Connecting`.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ViewState::default());
        Self { tx }
    }

    /// Reduce `event` into the current state, notifying readers on change.
    pub fn dispatch(&self, event: &StreamEvent) -> bool {
        self.tx.send_if_modified(|state| state.apply(event))
    }

    pub fn current(&self) -> ViewState {
        self.tx.borrow().clone()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.tx.borrow().status
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    /// Stream yielding the current state, then each subsequent change.
    pub fn updates(&self) -> WatchStream<ViewState> {
        WatchStream::new(self.tx.subscribe())
    }
}

impl Default for ViewStateStore {
    fn default() -> Self {
        Self::new()
    }
}
