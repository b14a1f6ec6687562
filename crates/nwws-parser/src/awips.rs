//! AWIPS product identifier: a line with exactly six uppercase
//! alphanumerics, the first three a product category and the last
//! three an NWSLI.

use once_cell::sync::Lazy;
use regex::Regex;

use nwws_model::AwipsId;

static AWIPS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([A-Z0-9]{3})([A-Z0-9]{3})[ \t]*$").unwrap());

/// Returns `None` (the `NoAWIPS` sentinel) rather than an error: the
/// assembler lets callers inject an AWIPS id from out-of-band metadata
/// when the product text itself doesn't carry one.
pub fn find(text: &str) -> Option<AwipsId> {
    AWIPS_RE.captures(text).map(|caps| AwipsId {
        category: caps[1].to_string(),
        nwsli: caps[2].to_string(),
    })
}
