//! Ingress envelope shape, per `SPEC_FULL.md` section 6: `{issued,
//! ttaaii, cccc, awips, text}` on the raw queue. Framing-agnostic —
//! this binary reads one JSON object per line from stdin, which is
//! enough to drive the pipeline without a live NWWS-OI feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nwws_model::AwipsId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngressEnvelope {
    pub issued: DateTime<Utc>,
    pub ttaaii: String,
    pub cccc: String,
    pub awips: String,
    pub text: String,
}

impl IngressEnvelope {
    /// Splits the six-character `awips` field (`TORRAH`) into the
    /// 3-letter category plus NWSLI `AwipsId`, when it's that shape.
    /// A shorter or malformed value falls back to letting the text
    /// parser find its own AWIPS header.
    pub fn awips_id(&self) -> Option<AwipsId> {
        if self.awips.len() != 6 {
            return None;
        }
        let (category, nwsli) = self.awips.split_at(3);
        Some(AwipsId {
            category: category.to_string(),
            nwsli: nwsli.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_six_character_awips_id() {
        let env = IngressEnvelope {
            issued: Utc::now(),
            ttaaii: "WFUS53".to_string(),
            cccc: "KRAH".to_string(),
            awips: "TORRAH".to_string(),
            text: String::new(),
        };
        let id = env.awips_id().unwrap();
        assert_eq!(id.category, "TOR");
        assert_eq!(id.nwsli, "RAH");
    }

    #[test]
    fn malformed_awips_field_yields_none() {
        let env = IngressEnvelope {
            issued: Utc::now(),
            ttaaii: String::new(),
            cccc: String::new(),
            awips: "TOO-SHORT".to_string(),
            text: String::new(),
        };
        assert!(env.awips_id().is_none());
    }
}
