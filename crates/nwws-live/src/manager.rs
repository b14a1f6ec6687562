//! `WarningManager`: the single `warnings` topic's in-memory view plus
//! its subscriber set, guarded by one mutex held for the duration of
//! every operation so a subscriber snapshot is always consistent.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use nwws_model::{Envelope, EnvelopeKind, Warning};

pub type ClientId = Uuid;

/// Bounded so a stalled client can't back the whole hub up; a full
/// channel means the send is dropped with a logged warning rather than
/// blocking every other subscriber.
pub const CLIENT_CHANNEL_CAPACITY: usize = 64;

struct Row {
    ends: DateTime<Utc>,
    data: serde_json::Value,
}

struct Inner {
    rows: HashMap<String, Row>,
    subscribers: HashMap<ClientId, mpsc::Sender<Envelope>>,
}

pub struct WarningManager {
    inner: Mutex<Inner>,
}

impl WarningManager {
    pub fn new(initial: Vec<Warning>) -> Self {
        let rows = initial
            .into_iter()
            .map(|w| {
                (
                    w.composite_id(),
                    Row {
                        ends: w.ends,
                        data: w.to_wire_json(),
                    },
                )
            })
            .collect();
        Self {
            inner: Mutex::new(Inner {
                rows,
                subscribers: HashMap::new(),
            }),
        }
    }

    /// Applies one bus envelope to the view, then forwards it verbatim
    /// to every subscriber.
    pub async fn handle_update(&self, envelope: Envelope) {
        let mut inner = self.inner.lock().await;
        match envelope.kind {
            EnvelopeKind::Delete => {
                inner.rows.remove(&envelope.id);
            }
            EnvelopeKind::New | EnvelopeKind::Update => {
                let ends = envelope
                    .data
                    .get("ends")
                    .and_then(|v| v.as_str())
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .map(|dt| dt.with_timezone(&Utc));
                if let Some(ends) = ends {
                    inner.rows.insert(
                        envelope.id.clone(),
                        Row {
                            ends,
                            data: envelope.data.clone(),
                        },
                    );
                }
            }
            EnvelopeKind::Init => {}
        }
        Self::broadcast(&mut inner, envelope);
    }

    /// Removes every row whose `ends` has already passed, publishing a
    /// `DELETE` envelope for each before dropping it.
    pub async fn check_expired(&self, now: DateTime<Utc>) {
        let mut inner = self.inner.lock().await;
        let expired: Vec<String> = inner
            .rows
            .iter()
            .filter(|(_, row)| row.ends < now)
            .map(|(id, _)| id.clone())
            .collect();

        for id in expired {
            let Some(row) = inner.rows.remove(&id) else { continue };
            let envelope = Envelope::new(EnvelopeKind::Delete, "warnings", id, row.data);
            Self::broadcast(&mut inner, envelope);
        }
    }

    /// Registers `client` and returns the snapshot to send as its
    /// `INIT` envelope.
    pub async fn subscribe(&self, client: ClientId, sender: mpsc::Sender<Envelope>) -> Envelope {
        let mut inner = self.inner.lock().await;
        let snapshot: Vec<serde_json::Value> = inner.rows.values().map(|r| r.data.clone()).collect();
        inner.subscribers.insert(client, sender);
        Envelope::new(EnvelopeKind::Init, "warnings", "init", serde_json::Value::Array(snapshot))
    }

    pub async fn unsubscribe(&self, client: ClientId) {
        self.inner.lock().await.subscribers.remove(&client);
    }

    fn broadcast(inner: &mut Inner, envelope: Envelope) {
        inner.subscribers.retain(|client, sender| match sender.try_send(envelope.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(%client, "client channel full, dropping envelope");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use nwws_model::VtecAction;
    use std::collections::HashMap as StdHashMap;

    fn warning(id: &str, ends: DateTime<Utc>) -> Warning {
        Warning {
            row_id: 1,
            event: nwws_model::EventId::new("KRAH", "SV", "W", 1, 2026),
            action: VtecAction::New,
            zones: vec!["WYC001".into()],
            polygon: None,
            motion: None,
            tags: StdHashMap::new(),
            current: true,
            title: id.to_string(),
            is_emergency: false,
            is_pds: false,
            expires_initial: ends,
            ends,
            created_at: ends,
            updated_at: ends,
        }
    }

    #[tokio::test]
    async fn subscribe_returns_full_snapshot() {
        let now = Utc::now();
        let manager = WarningManager::new(vec![warning("a", now + Duration::hours(1))]);
        let (tx, _rx) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
        let init = manager.subscribe(Uuid::now_v7(), tx).await;
        assert_eq!(init.kind, EnvelopeKind::Init);
        assert_eq!(init.data.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn expiry_sweep_publishes_delete_and_removes_row() {
        let now = Utc::now();
        let manager = WarningManager::new(vec![warning("a", now - Duration::seconds(1))]);
        let client = Uuid::now_v7();
        let (tx, mut rx) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
        manager.subscribe(client, tx).await;

        manager.check_expired(now).await;

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.kind, EnvelopeKind::Delete);

        let (tx2, _rx2) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
        let init = manager.subscribe(Uuid::now_v7(), tx2).await;
        assert!(init.data.as_array().unwrap().is_empty());
        manager.unsubscribe(client).await;
    }
}
