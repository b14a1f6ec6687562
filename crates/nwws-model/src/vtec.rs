use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EventId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VtecClass {
    Operational,
    Test,
    Experimental,
    ExperimentalOperational,
}

impl VtecClass {
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'O' => Some(Self::Operational),
            'T' => Some(Self::Test),
            'E' => Some(Self::Experimental),
            'X' => Some(Self::ExperimentalOperational),
            _ => None,
        }
    }
}

/// VTEC action codes, the closed set validated by [`crate::vtec`]'s
/// parser. `Rou` ("routine") and class [`VtecClass::Test`] descriptors
/// are filtered before the engine ever sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VtecAction {
    New,
    Con,
    Exa,
    Ext,
    Exb,
    Upg,
    Can,
    Exp,
    Rou,
    Cor,
}

impl VtecAction {
    pub fn from_str_code(s: &str) -> Option<Self> {
        Some(match s {
            "NEW" => Self::New,
            "CON" => Self::Con,
            "EXA" => Self::Exa,
            "EXT" => Self::Ext,
            "EXB" => Self::Exb,
            "UPG" => Self::Upg,
            "CAN" => Self::Can,
            "EXP" => Self::Exp,
            "ROU" => Self::Rou,
            "COR" => Self::Cor,
            _ => return None,
        })
    }

    /// Actions under which a zone binding is considered newly-opened
    /// (step 9 of the engine algorithm).
    pub fn opens_bindings(self) -> bool {
        matches!(self, Self::New | Self::Exb | Self::Exa)
    }

    /// Actions that terminate a warning's currency (the projector
    /// marks `current=false` and emits `DELETE`).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Can | Self::Upg | Self::Exp)
    }
}

/// One parsed `x.xxx.xxxx.xx.x.####.######T####Z-######T####Z` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VtecDescriptor {
    pub class: VtecClass,
    pub action: VtecAction,
    pub office: String,
    pub phenomena: String,
    pub significance: String,
    pub event_number: u32,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl VtecDescriptor {
    /// Builds the event identity, given the resolved year (see
    /// `VTECEngine::resolve_year`, which is where the end-of-year
    /// correction lives — this constructor just assembles the tuple).
    pub fn event_id(&self, year: i32) -> EventId {
        EventId::new(
            self.office.clone(),
            self.phenomena.clone(),
            self.significance.clone(),
            self.event_number,
            year,
        )
    }

    /// `true` for descriptors the engine skips outright (test class or
    /// routine action), per step 1 of the engine algorithm.
    pub fn is_skipped(&self) -> bool {
        self.class == VtecClass::Test || self.action == VtecAction::Rou
    }
}
