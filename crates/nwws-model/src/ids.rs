//! Identity types shared by [`crate::vtec`], [`crate::warning`], and the
//! bus/live crates that publish warnings by composite id.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed event id: {0}")]
    MalformedEventId(String),
}

/// Natural key of a VTEC event: `(office, phenomena, significance,
/// event_number, year)`. Stable across the event's whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    pub office: String,
    pub phenomena: String,
    pub significance: String,
    pub event_number: u32,
    pub year: i32,
}

impl EventId {
    pub fn new(
        office: impl Into<String>,
        phenomena: impl Into<String>,
        significance: impl Into<String>,
        event_number: u32,
        year: i32,
    ) -> Self {
        Self {
            office: office.into(),
            phenomena: phenomena.into(),
            significance: significance.into(),
            event_number,
            year,
        }
    }

    /// The wire/display form: `KRAH-SV-W-0175-2025`.
    pub fn plain(&self) -> String {
        format!(
            "{}-{}-{}-{:04}-{}",
            self.office, self.phenomena, self.significance, self.event_number, self.year
        )
    }

    /// The composite form used for every published envelope and bus
    /// `message-id` property: the event id plus a row-level discriminator.
    /// Standardized here per the design decision resolving the source's
    /// two disagreeing id conventions (see `DESIGN.md`).
    pub fn composite(&self, row_id: i64) -> String {
        format!("{}-{}", self.plain(), row_id)
    }

    pub fn parse_plain(s: &str) -> Result<Self, ModelError> {
        let parts: Vec<&str> = s.split('-').collect();
        let [office, phenomena, significance, evno, year] = parts.as_slice() else {
            return Err(ModelError::MalformedEventId(s.to_string()));
        };
        let event_number: u32 = evno
            .parse()
            .map_err(|_| ModelError::MalformedEventId(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ModelError::MalformedEventId(s.to_string()))?;
        Ok(Self::new(*office, *phenomena, *significance, event_number, year))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())
    }
}
