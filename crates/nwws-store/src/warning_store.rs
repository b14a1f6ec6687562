//! The `WarningStore` trait boundary over the `warnings.warnings`
//! table. See `SPEC_FULL.md` section 4.9 for the projection algorithm
//! this supports.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use nwws_model::{EventId, Warning};

use crate::error::StoreError;

pub trait WarningStore: Send + Sync {
    fn find_current(&self, event: &EventId) -> impl std::future::Future<Output = Result<Vec<Warning>, StoreError>> + Send;

    fn insert(&self, warning: Warning) -> impl std::future::Future<Output = Result<i64, StoreError>> + Send;

    fn set_current(&self, row_id: i64, current: bool, updated_at: DateTime<Utc>) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Every active warning, for `LiveHub` startup load:
    /// `action NOT IN (CAN, EXP, UPG) AND ends > now AND current = true`.
    fn find_all_active(&self, now: DateTime<Utc>) -> impl std::future::Future<Output = Result<Vec<Warning>, StoreError>> + Send;
}

#[derive(Default)]
struct Inner {
    rows: Vec<Warning>,
    next_id: i64,
}

#[derive(Default)]
pub struct InMemoryWarningStore {
    inner: Mutex<Inner>,
}

impl InMemoryWarningStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WarningStore for InMemoryWarningStore {
    async fn find_current(&self, event: &EventId) -> Result<Vec<Warning>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().filter(|w| &w.event == event && w.current).cloned().collect())
    }

    async fn insert(&self, mut warning: Warning) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        warning.row_id = inner.next_id;
        let id = warning.row_id;
        inner.rows.push(warning);
        Ok(id)
    }

    async fn set_current(&self, row_id: i64, current: bool, updated_at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner.rows.iter_mut().find(|w| w.row_id == row_id).ok_or(StoreError::NotFound)?;
        row.current = current;
        row.updated_at = updated_at;
        Ok(())
    }

    async fn find_all_active(&self, now: DateTime<Utc>) -> Result<Vec<Warning>, StoreError> {
        use nwws_model::VtecAction;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .filter(|w| w.current && w.ends > now && !matches!(w.action, VtecAction::Can | VtecAction::Exp | VtecAction::Upg))
            .cloned()
            .collect())
    }
}
