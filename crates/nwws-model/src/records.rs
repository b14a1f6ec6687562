use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::Polygon;
use crate::ids::EventId;
use crate::product::SegmentMotion;
use crate::vtec::{VtecAction, VtecClass};

/// Persistent VTEC event row. Identity is [`EventId`]; never deleted
/// once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VtecEvent {
    pub id: EventId,
    pub class: VtecClass,
    pub issued: DateTime<Utc>,
    pub start: Option<DateTime<Utc>>,
    pub expires: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub ends_initial: DateTime<Utc>,
    pub title: String,
    pub is_emergency: bool,
    pub is_pds: bool,
    pub updated_at: DateTime<Utc>,
}

/// A per-zone binding within one event's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VtecUgcBinding {
    pub event: EventId,
    pub zone: String,
    pub issued: DateTime<Utc>,
    pub start: Option<DateTime<Utc>>,
    pub expires: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub ends_initial: DateTime<Utc>,
    pub action: VtecAction,
}

/// Append-only audit row: one per VTEC descriptor processed in one
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VtecUpdate {
    pub event: EventId,
    pub action: VtecAction,
    pub product_text: String,
    pub polygon: Option<Polygon>,
    pub motion: Option<SegmentMotion>,
    pub tags: HashMap<String, String>,
    pub zones: Vec<String>,
    pub created_at: DateTime<Utc>,
}
