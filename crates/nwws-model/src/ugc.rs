use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UgcType {
    County,
    Zone,
    /// Forced in place of `County`/`Zone` when the owning VTEC's
    /// phenomena is fire weather (`FW`).
    Fire,
}

impl UgcType {
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::County),
            'Z' => Some(Self::Zone),
            'F' => Some(Self::Fire),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::County => 'C',
            Self::Zone => 'Z',
            Self::Fire => 'F',
        }
    }
}

/// One `(state, type, area)` triple inside a UGC block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UgcEntry {
    pub state: String,
    pub kind: UgcType,
    /// Three-digit area code, or the literal `000`/`ALL` sentinel
    /// meaning "every zone of this type in this state".
    pub area: String,
}

impl UgcEntry {
    pub fn is_wildcard(&self) -> bool {
        self.area == "000" || self.area == "ALL"
    }

    /// The concrete lookup code, e.g. `WYZ001`. Meaningless for a
    /// wildcard entry — callers must check [`Self::is_wildcard`] first.
    pub fn code(&self) -> String {
        format!("{}{}{}", self.state, self.kind.letter(), self.area)
    }
}

/// The full UGC block of a segment: an ordered entry list plus the
/// shared expiry timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UgcBlock {
    pub entries: Vec<UgcEntry>,
    pub expires: DateTime<Utc>,
}
