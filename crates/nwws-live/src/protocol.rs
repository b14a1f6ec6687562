//! The client→server half of the WebSocket protocol. Every
//! server→client frame is just a forwarded [`nwws_model::Envelope`].

use serde::{Deserialize, Serialize};

/// `{"type":"SUBSCRIBE"|"UNSUBSCRIBE","topics":[...]}`. `"warnings"` is
/// the only topic this hub understands today; unknown topic names are
/// ignored rather than rejected, so a client can ask for a future topic
/// without breaking against an older server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ClientMessage {
    Subscribe { topics: Vec<String> },
    Unsubscribe { topics: Vec<String> },
}

pub const TOPIC_WARNINGS: &str = "warnings";

/// Frames longer than this are rejected and the session is closed.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;
