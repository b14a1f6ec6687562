//! `LiveHub`: owns the warnings topic manager and the two background
//! tasks that feed it — the bus consumer and the 60 s expiry sweep.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};

use nwws_bus::AmqpConsumer;
use nwws_store::WarningStore;

use crate::error::HubError;
use crate::manager::WarningManager;

const SWEEP_INTERVAL: StdDuration = StdDuration::from_secs(60);

pub struct LiveHub {
    pub warnings: Arc<WarningManager>,
    started_at: DateTime<Utc>,
}

impl LiveHub {
    /// Loads the currently-active warnings from `store`, then spawns
    /// the bus-forwarding and expiry-sweep background tasks.
    pub async fn start<WS: WarningStore>(store: &WS, mut consumer: AmqpConsumer) -> Result<Arc<Self>, HubError> {
        let now = Utc::now();
        let active = store.find_all_active(now).await?;
        tracing::info!(count = active.len(), "loaded active warnings");

        let manager = Arc::new(WarningManager::new(active));
        let hub = Arc::new(Self {
            warnings: manager.clone(),
            started_at: now,
        });

        let bus_manager = manager.clone();
        tokio::spawn(async move {
            while let Some(result) = consumer.recv().await {
                match result {
                    Ok(envelope) => bus_manager.handle_update(envelope).await,
                    Err(err) => tracing::warn!(error = %err, "dropping malformed bus envelope"),
                }
            }
            tracing::warn!("bus consumer stream ended");
        });

        let sweep_manager = manager.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                sweep_manager.check_expired(Utc::now()).await;
            }
        });

        Ok(hub)
    }

    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}
