use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::Polygon;
use crate::ids::EventId;
use crate::product::SegmentMotion;
use crate::vtec::VtecAction;

/// The denormalized, client-facing warning projection. One canonical
/// struct backs the transactional row, the bus wire form, and the live
/// view (see the "Collapsed model note" in `SPEC_FULL.md` section 3);
/// [`Warning::to_wire_json`] is the one place geometry gets flattened to
/// GeoJSON strings for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub row_id: i64,
    pub event: EventId,
    pub action: VtecAction,
    pub zones: Vec<String>,
    pub polygon: Option<Polygon>,
    pub motion: Option<SegmentMotion>,
    pub tags: HashMap<String, String>,
    pub current: bool,
    pub title: String,
    pub is_emergency: bool,
    pub is_pds: bool,
    pub expires_initial: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warning {
    pub fn composite_id(&self) -> String {
        self.event.composite(self.row_id)
    }

    /// Body of the `data` field of a published envelope: every field
    /// verbatim except `polygon`/`motion`, which are flattened to
    /// GeoJSON strings per the wire contract.
    pub fn to_wire_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.composite_id(),
            "event": self.event.plain(),
            "action": self.action,
            "zones": self.zones,
            "geom": self.polygon.as_ref().map(Polygon::to_geojson),
            "location": self.motion.as_ref().map(|m| m.points.to_geojson()),
            "tags": self.tags,
            "current": self.current,
            "title": self.title,
            "is_emergency": self.is_emergency,
            "is_pds": self.is_pds,
            "expires_initial": self.expires_initial,
            "ends": self.ends,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }
}
