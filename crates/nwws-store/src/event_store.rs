//! The `EventStore` trait boundary over the `vtec.events` /
//! `vtec.ugcs` / `vtec.updates` tables (`SPEC_FULL.md` section 6). The
//! real backend is PostGIS-backed and lives outside this crate; the
//! in-memory implementation here exists so the engine is independently
//! testable.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use nwws_model::{EventId, VtecAction, VtecEvent, VtecUgcBinding, VtecUpdate};

use crate::error::StoreError;

pub trait EventStore: Send + Sync {
    fn find_event(&self, id: &EventId) -> impl std::future::Future<Output = Result<Option<VtecEvent>, StoreError>> + Send;

    fn create_event(&self, event: VtecEvent) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    fn update_event_times(
        &self,
        id: &EventId,
        expires: DateTime<Utc>,
        ends: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    fn update_event_flags(
        &self,
        id: &EventId,
        is_emergency: bool,
        is_pds: bool,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    fn append_update(&self, update: VtecUpdate) -> impl std::future::Future<Output = Result<i64, StoreError>> + Send;

    /// Bindings currently in force for `id`: `action NOT IN (CAN, UPG)
    /// AND expires > not_before`, matching `findCurrentVTECEventUGCs`.
    fn find_current_bindings(
        &self,
        id: &EventId,
        not_before: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<VtecUgcBinding>, StoreError>> + Send;

    fn insert_binding(&self, binding: VtecUgcBinding) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    fn delete_binding(&self, id: &EventId, zone: &str) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    fn bulk_update_bindings(
        &self,
        id: &EventId,
        zones: &[String],
        expires: DateTime<Utc>,
        ends: DateTime<Utc>,
        action: VtecAction,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct BindingKey(EventId, String);

#[derive(Default)]
struct Inner {
    events: HashMap<EventId, VtecEvent>,
    bindings: HashMap<BindingKey, VtecUgcBinding>,
    updates: Vec<VtecUpdate>,
}

/// Reference `EventStore` backed by process memory. Not persistent, not
/// transactional across calls — the engine's own per-product
/// bookkeeping supplies the transactional boundary in tests.
#[derive(Default)]
pub struct InMemoryEventStore {
    inner: Mutex<Inner>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryEventStore {
    async fn find_event(&self, id: &EventId) -> Result<Option<VtecEvent>, StoreError> {
        Ok(self.inner.lock().unwrap().events.get(id).cloned())
    }

    async fn create_event(&self, event: VtecEvent) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.events.contains_key(&event.id) {
            return Err(StoreError::Conflict(event.id.plain()));
        }
        inner.events.insert(event.id.clone(), event);
        Ok(())
    }

    async fn update_event_times(&self, id: &EventId, expires: DateTime<Utc>, ends: DateTime<Utc>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let event = inner.events.get_mut(id).ok_or(StoreError::NotFound)?;
        event.expires = expires;
        event.ends = ends;
        Ok(())
    }

    async fn update_event_flags(&self, id: &EventId, is_emergency: bool, is_pds: bool, updated_at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let event = inner.events.get_mut(id).ok_or(StoreError::NotFound)?;
        event.is_emergency = is_emergency;
        event.is_pds = is_pds;
        event.updated_at = updated_at;
        Ok(())
    }

    async fn append_update(&self, update: VtecUpdate) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.updates.push(update);
        Ok(inner.updates.len() as i64)
    }

    async fn find_current_bindings(&self, id: &EventId, not_before: DateTime<Utc>) -> Result<Vec<VtecUgcBinding>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bindings
            .values()
            .filter(|b| &b.event == id && !matches!(b.action, VtecAction::Can | VtecAction::Upg) && b.expires > not_before)
            .cloned()
            .collect())
    }

    async fn insert_binding(&self, binding: VtecUgcBinding) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let key = BindingKey(binding.event.clone(), binding.zone.clone());
        inner.bindings.insert(key, binding);
        Ok(())
    }

    async fn delete_binding(&self, id: &EventId, zone: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.bindings.remove(&BindingKey(id.clone(), zone.to_string()));
        Ok(())
    }

    async fn bulk_update_bindings(
        &self,
        id: &EventId,
        zones: &[String],
        expires: DateTime<Utc>,
        ends: DateTime<Utc>,
        action: VtecAction,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        for zone in zones {
            let key = BindingKey(id.clone(), zone.clone());
            if let Some(binding) = inner.bindings.get_mut(&key) {
                binding.expires = expires;
                binding.ends = ends;
                binding.action = action;
            }
        }
        Ok(())
    }
}
