use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ugc::UgcType;

/// A county/zone/fire-zone record as loaded into [`ZoneLookup`]'s
/// in-memory index. Geometry is kept opaque (already-serialized
/// GeoJSON/WKT from the store) since this crate does not depend on a
/// spatial library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub code: String,
    pub state: String,
    pub kind: UgcType,
    pub number: String,
    pub area: Option<String>,
    pub geometry: Option<String>,
    pub cwa: Vec<String>,
    pub is_marine: bool,
    pub is_fire: bool,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
}

impl Zone {
    pub fn is_active(&self) -> bool {
        self.valid_to.is_none()
    }
}
