use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::{MultiPoint, Polygon};
use crate::ugc::UgcBlock;
use crate::vtec::VtecDescriptor;

/// The WMO abbreviated heading line: `DDDD## CCCC DDHHMM [BBB]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmoHeader {
    /// `DDDD##`, e.g. `WWUS53`.
    pub ttaaii: String,
    /// Four-letter originating office, e.g. `KRAH`.
    pub office: String,
    /// Day/hour/minute as written on the line, unparsed (`021504`).
    pub ddhhmm: String,
    /// Correction/amendment suffix, when present.
    pub bbb: Option<String>,
}

impl WmoHeader {
    /// `true` when `bbb` begins with `A` (amendment) or `C` (correction),
    /// the marker the engine uses to permit a zone-binding replacement on
    /// an otherwise-duplicate `NEW`.
    pub fn is_correction(&self) -> bool {
        self.bbb
            .as_deref()
            .and_then(|b| b.chars().next())
            .is_some_and(|c| c == 'A' || c == 'C')
    }
}

/// The AWIPS product identifier: a 3-letter category plus a 3-character
/// NWSLI, e.g. `TORRAH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwipsId {
    pub category: String,
    pub nwsli: String,
}

impl AwipsId {
    pub fn code(&self) -> String {
        format!("{}{}", self.category, self.nwsli)
    }
}

/// One segment of a product, delimited by a `$$` line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Segment {
    pub raw: String,
    pub vtec: Vec<VtecDescriptor>,
    pub ugc: Option<UgcBlock>,
    pub expires: Option<DateTime<Utc>>,
    pub polygon: Option<Polygon>,
    pub tml: Option<SegmentMotion>,
    pub tags: HashMap<String, String>,
}

impl Segment {
    pub fn is_warning_bearing(&self) -> bool {
        !self.vtec.is_empty()
    }
}

/// The `TIME...MOT...LOC` block for a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMotion {
    pub time: DateTime<Utc>,
    pub direction_deg: u16,
    pub speed: u32,
    pub speed_unit: String,
    pub points: MultiPoint,
}

/// A fully assembled AWIPS text product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub raw: String,
    pub wmo: Option<WmoHeader>,
    pub awips: Option<AwipsId>,
    pub issued: Option<DateTime<Utc>>,
    pub segments: Vec<Segment>,
}

impl Product {
    pub fn is_correction(&self) -> bool {
        self.wmo.as_ref().is_some_and(WmoHeader::is_correction)
    }
}
