//! `ZoneLookup`: an in-memory index from UGC code to [`Zone`], loaded
//! once at startup from a [`ZoneSource`]. Grounded on
//! `SPEC_FULL.md` section 4.7 and the source's `GetUGCs`.

use std::collections::HashMap;

use nwws_model::{UgcBlock, UgcType, Zone};

use crate::error::StoreError;

pub trait ZoneSource: Send + Sync {
    fn load_all(&self) -> impl std::future::Future<Output = Result<Vec<Zone>, StoreError>> + Send;
}

#[derive(Default)]
pub struct InMemoryZoneSource {
    zones: Vec<Zone>,
}

impl InMemoryZoneSource {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }
}

impl ZoneSource for InMemoryZoneSource {
    async fn load_all(&self) -> Result<Vec<Zone>, StoreError> {
        Ok(self.zones.clone())
    }
}

pub struct ZoneLookup {
    by_code: HashMap<String, Zone>,
    by_state_kind: HashMap<(String, UgcType), Vec<Zone>>,
}

impl ZoneLookup {
    pub async fn load(source: &impl ZoneSource) -> Result<Self, StoreError> {
        let zones = source.load_all().await?;
        Ok(Self::from_zones(zones))
    }

    pub fn from_zones(zones: Vec<Zone>) -> Self {
        let mut by_code = HashMap::new();
        let mut by_state_kind: HashMap<(String, UgcType), Vec<Zone>> = HashMap::new();
        for zone in zones {
            by_state_kind
                .entry((zone.state.clone(), zone.kind))
                .or_default()
                .push(zone.clone());
            by_code.insert(zone.code.clone(), zone);
        }
        Self { by_code, by_state_kind }
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Zone> {
        self.by_code.get(code)
    }

    /// Expands a segment's UGC block into concrete, currently-known
    /// zones. `is_fire` forces every entry's type to `Fire`, matching
    /// the source rule that a fire-weather (`FW`) VTEC phenomena
    /// overrides the UGC block's own county/zone letter. Unknown codes
    /// are skipped silently; a wildcard area (`000`/`ALL`) expands to
    /// every active zone of that state and type.
    pub fn expand_segment_ugc(&self, block: &UgcBlock, is_fire: bool) -> Vec<Zone> {
        let mut out = Vec::new();
        for entry in &block.entries {
            let kind = if is_fire { UgcType::Fire } else { entry.kind };
            if entry.is_wildcard() {
                if let Some(zones) = self.by_state_kind.get(&(entry.state.clone(), kind)) {
                    out.extend(zones.iter().filter(|z| z.is_active()).cloned());
                }
                continue;
            }
            let code = format!("{}{}{}", entry.state, kind.letter(), entry.area);
            if let Some(zone) = self.by_code.get(&code) {
                out.push(zone.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nwws_model::{UgcEntry};

    fn zone(code: &str, state: &str, kind: UgcType, area: &str) -> Zone {
        Zone {
            id: 1,
            code: code.to_string(),
            state: state.to_string(),
            kind,
            number: area.to_string(),
            area: None,
            geometry: None,
            cwa: vec![],
            is_marine: false,
            is_fire: kind == UgcType::Fire,
            valid_from: Utc::now(),
            valid_to: None,
        }
    }

    #[test]
    fn expands_concrete_and_wildcard_codes() {
        let lookup = ZoneLookup::from_zones(vec![
            zone("WYZ001", "WY", UgcType::Zone, "001"),
            zone("WYZ002", "WY", UgcType::Zone, "002"),
        ]);
        let block = UgcBlock {
            entries: vec![
                UgcEntry { state: "WY".into(), kind: UgcType::Zone, area: "001".into() },
                UgcEntry { state: "WY".into(), kind: UgcType::Zone, area: "999".into() },
            ],
            expires: Utc::now(),
        };
        let zones = lookup.expand_segment_ugc(&block, false);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].code, "WYZ001");

        let wildcard_block = UgcBlock {
            entries: vec![UgcEntry { state: "WY".into(), kind: UgcType::Zone, area: "ALL".into() }],
            expires: Utc::now(),
        };
        let all = lookup.expand_segment_ugc(&wildcard_block, false);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn fire_phenomena_forces_fire_type() {
        let lookup = ZoneLookup::from_zones(vec![zone("WYF001", "WY", UgcType::Fire, "001")]);
        let block = UgcBlock {
            entries: vec![UgcEntry { state: "WY".into(), kind: UgcType::Zone, area: "001".into() }],
            expires: Utc::now(),
        };
        let zones = lookup.expand_segment_ugc(&block, true);
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].code, "WYF001");
    }
}
