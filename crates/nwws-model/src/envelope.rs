use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope kind, both the bus message `type` property and the
/// WebSocket payload `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvelopeKind {
    New,
    Update,
    Delete,
    /// Live-hub-only: the full current view sent once on subscribe.
    /// Never published to the bus.
    Init,
}

/// The envelope shape published to the message bus and forwarded
/// verbatim (plus `Init`) to WebSocket subscribers, per `SPEC_FULL.md`
/// section 6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: EnvelopeKind,
    pub product: String,
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn new(kind: EnvelopeKind, product: impl Into<String>, id: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind,
            product: product.into(),
            id: id.into(),
            timestamp: Utc::now(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_kind_serializes_uppercase() {
        let json = serde_json::to_string(&EnvelopeKind::New).unwrap();
        assert_eq!(json, "\"NEW\"");
    }

    #[test]
    fn envelope_round_trips() {
        let env = Envelope::new(EnvelopeKind::Delete, "warnings", "KRAH-SV-W-0175-2025-1", serde_json::json!({}));
        let text = serde_json::to_string(&env).unwrap();
        let back: Envelope = serde_json::from_str(&text).unwrap();
        assert_eq!(back.kind, EnvelopeKind::Delete);
        assert_eq!(back.product, "warnings");
    }
}
