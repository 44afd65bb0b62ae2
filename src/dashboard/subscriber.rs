//! Live telemetry subscriber.
//!
//! Opens exactly one websocket to the health-data stream and feeds every
//! frame into the dashboard's [`ViewStateStore`]. There is no reconnect: once
//! the socket closes, for any reason, the subscriber task ends and the store
//! stays `Disconnected`.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use log::{info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::Message;
use url::Url;

use crate::telemetry::{
    decode_snapshot, CloseReason, DecodeError, StreamEvent, SubscriberStats,
    SubscriberStatsSnapshot, TelemetrySnapshot,
};

use super::state::ViewStateStore;

/// Owner of a running subscription.
///
/// Dropping the handle closes the socket in the background; [`close`]
/// does the same and waits for the task to finish.
///
/// [`close`]: SubscriptionHandle::close
pub struct SubscriptionHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    stats: Arc<SubscriberStats>,
}

impl SubscriptionHandle {
    pub fn stats(&self) -> SubscriberStatsSnapshot {
        self.stats.snapshot()
    }

    /// Close the socket proactively and wait for the task to exit.
    pub async fn close(mut self) -> SubscriberStatsSnapshot {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!("[Subscriber] Task ended abnormally: {}", err);
            }
        }
        self.stats.snapshot()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Spawn the subscriber task on the current tokio runtime.
///
/// # Panics
/// Panics if called outside a tokio runtime, like `tokio::spawn`.
pub fn spawn_subscriber(url: Url, store: Arc<ViewStateStore>) -> SubscriptionHandle {
    let stats = Arc::new(SubscriberStats::default());
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(run_subscription(
        url,
        store,
        Arc::clone(&stats),
        shutdown_rx,
    ));

    SubscriptionHandle {
        shutdown: Some(shutdown_tx),
        task: Some(task),
        stats,
    }
}

async fn run_subscription(
    url: Url,
    store: Arc<ViewStateStore>,
    stats: Arc<SubscriberStats>,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!("[Subscriber] Connecting to {}", url);

    let connected = tokio::select! {
        _ = &mut shutdown => {
            close(&store, CloseReason::Unmounted);
            return;
        }
        result = tokio_tungstenite::connect_async(url.as_str()) => result,
    };

    let ws_stream = match connected {
        Ok((ws_stream, _response)) => ws_stream,
        Err(err) => {
            warn!("[Subscriber] Handshake with {} failed: {}", url, err);
            close(&store, CloseReason::Handshake);
            return;
        }
    };

    info!("[Subscriber] Connected to {}", url);
    store.dispatch(&StreamEvent::Opened);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                if let Err(err) = write.send(Message::Close(None)).await {
                    tracing::debug!(error = %err, "close frame not delivered");
                }
                close(&store, CloseReason::Unmounted);
                break;
            }
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    stats.record_frame();
                    handle_frame(&store, &stats, decode_snapshot(&text));
                }
                Some(Ok(Message::Binary(bytes))) => {
                    stats.record_frame();
                    handle_frame(&store, &stats, Err(DecodeError::Binary { len: bytes.len() }));
                }
                Some(Ok(Message::Close(frame))) => {
                    info!("[Subscriber] Server closed the stream: {:?}", frame);
                    close(&store, CloseReason::Normal);
                    break;
                }
                // Ping/pong are answered by tungstenite itself
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!("[Subscriber] Stream error: {}", err);
                    close(&store, CloseReason::Error);
                    break;
                }
                None => {
                    info!("[Subscriber] Stream ended");
                    close(&store, CloseReason::Normal);
                    break;
                }
            }
        }
    }
}

fn handle_frame(
    store: &ViewStateStore,
    stats: &SubscriberStats,
    decoded: Result<TelemetrySnapshot, DecodeError>,
) {
    match decoded {
        Ok(snapshot) => {
            tracing::debug!(
                progress_score = ?snapshot.progress_score,
                hrv = ?snapshot.hrv,
                "telemetry snapshot received"
            );
            stats.record_snapshot();
            store.dispatch(&StreamEvent::Snapshot(snapshot));
        }
        Err(err) => {
            warn!("[Subscriber] Dropping malformed frame: {}", err);
            stats.record_decode_failure();
            store.dispatch(&StreamEvent::Malformed {
                reason: err.to_string(),
            });
        }
    }
}

fn close(store: &ViewStateStore, reason: CloseReason) {
    tracing::info!(?reason, "telemetry stream closed");
    store.dispatch(&StreamEvent::Closed { reason });
}
