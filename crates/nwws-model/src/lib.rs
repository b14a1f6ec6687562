#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
//! Shared data model for the AWIPS text product parser and the VTEC
//! warning engine.
//!
//! Every type here is plain data: no I/O, no locking, no async. The
//! parser crate produces [`Product`] values; the engine crate consumes
//! them and produces [`Warning`] projections; the bus and live crates
//! move [`Envelope`]s between processes.

pub mod envelope;
pub mod geometry;
pub mod ids;
pub mod product;
pub mod records;
pub mod ugc;
pub mod vtec;
pub mod warning;
pub mod zone;

pub use envelope::{Envelope, EnvelopeKind};
pub use geometry::{MultiPoint, Point, Polygon};
pub use ids::{EventId, ModelError};
pub use product::{AwipsId, Product, Segment, SegmentMotion, WmoHeader};
pub use records::{VtecEvent, VtecUgcBinding, VtecUpdate};
pub use ugc::{UgcBlock, UgcEntry, UgcType};
pub use vtec::{VtecAction, VtecClass, VtecDescriptor};
pub use warning::Warning;
pub use zone::Zone;
