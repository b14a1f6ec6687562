#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
//! Parser for NWS AWIPS text products.
//!
//! [`assembler::assemble`] is the single entry point: it drives the WMO
//! header, AWIPS header, issuance time, UGC, VTEC, polygon, motion, and
//! hazard-tag sub-parsers and returns a [`nwws_model::Product`] plus a
//! [`assembler::ParseReport`] of non-fatal findings. Every sub-parser
//! module is also public so callers (and tests) can exercise one piece
//! in isolation.

mod assembler;
mod awips;
mod error;
mod issuance;
mod latlon;
mod tags;
mod timezone;
mod tml;
mod ugc;
mod vtec;
pub mod vocab;
mod wmo;

pub use assembler::{assemble, ParseReport};
pub use error::{ParseError, ParseIssue};
pub use vocab::{phenomena_name, significance_name};

pub mod parsers {
    //! Re-export of individual sub-parsers for callers that only need
    //! one piece (e.g. the engine re-parsing a polygon from an audit
    //! row).
    pub use crate::awips::find as find_awips;
    pub use crate::issuance::find_and_parse as find_issuance;
    pub use crate::latlon::find_and_parse as find_polygon;
    pub use crate::tags::parse as parse_tags;
    pub use crate::tml::find_and_parse as find_motion;
    pub use crate::ugc::find_and_parse as find_ugc;
    pub use crate::vtec::parse_all as parse_vtec;
    pub use crate::wmo::find_and_parse as find_wmo;
}
