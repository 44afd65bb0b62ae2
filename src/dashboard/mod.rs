//! Monitoring dashboard: one mounted instance owns one telemetry
//! subscription and one view-state store.
//!
//! Mounting opens the stream; unmounting (or dropping) closes it. Nothing
//! outlives the instance and nothing is shared between instances.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::config::EndpointConfig;
use crate::error::ConfigError;
use crate::render::DashboardView;
use crate::telemetry::{ConnectionStatus, SubscriberStatsSnapshot};

pub mod state;
pub mod subscriber;

pub use state::{ViewState, ViewStateStore};
pub use subscriber::{spawn_subscriber, SubscriptionHandle};

/// A mounted monitoring dashboard.
pub struct Dashboard {
    store: Arc<ViewStateStore>,
    subscription: SubscriptionHandle,
}

impl Dashboard {
    /// Mount the dashboard and start streaming.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidUrl` if the websocket base cannot form a
    /// valid stream URL. Connection failures are not errors here: they show
    /// up as `Disconnected` in the view state.
    pub fn mount(endpoints: &EndpointConfig) -> Result<Self, ConfigError> {
        let url = endpoints.health_stream_url()?;
        let store = Arc::new(ViewStateStore::new());
        let subscription = spawn_subscriber(url, Arc::clone(&store));
        Ok(Self {
            store,
            subscription,
        })
    }

    pub fn state(&self) -> ViewState {
        self.store.current()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.store.status()
    }

    /// View model for the current state.
    pub fn view(&self) -> DashboardView {
        DashboardView::from_state(&self.store.current())
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.store.subscribe()
    }

    pub fn updates(&self) -> WatchStream<ViewState> {
        self.store.updates()
    }

    pub fn stats(&self) -> SubscriberStatsSnapshot {
        self.subscription.stats()
    }

    /// Close the stream and discard the view state.
    pub async fn unmount(self) -> SubscriberStatsSnapshot {
        self.subscription.close().await
    }
}
