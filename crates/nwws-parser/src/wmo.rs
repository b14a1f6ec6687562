//! WMO abbreviated heading line: `DDDD## CCCC DDHHMM [BBB]`.
//! Grounded on the source's `ParseWMO`/`FindWMO` pair.

use once_cell::sync::Lazy;
use regex::Regex;

use nwws_model::WmoHeader;

use crate::error::ParseError;

static WMO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([A-Z]{4}[0-9]{2})\s([A-Z]{4})\s([0-9]{6})(?:\s([A-Z]{3}))?\s*$").unwrap()
});

/// Finds and parses the first WMO line in `text`.
pub fn find_and_parse(text: &str) -> Result<WmoHeader, ParseError> {
    let caps = WMO_RE
        .captures(text)
        .ok_or(ParseError::MissingWmo)?;
    Ok(WmoHeader {
        ttaaii: caps[1].to_string(),
        office: caps[2].to_string(),
        ddhhmm: caps[3].to_string(),
        bbb: caps.get(4).map(|m| m.as_str().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_header() {
        let wmo = find_and_parse("WWUS53 KRAH 261200\nTORRAH\n").unwrap();
        assert_eq!(wmo.ttaaii, "WWUS53");
        assert_eq!(wmo.office, "KRAH");
        assert_eq!(wmo.ddhhmm, "261200");
        assert!(wmo.bbb.is_none());
    }

    #[test]
    fn parses_correction_suffix() {
        let wmo = find_and_parse("WWUS53 KRAH 261200 CCA\n").unwrap();
        assert_eq!(wmo.bbb.as_deref(), Some("CCA"));
        assert!(wmo.is_correction());
    }

    #[test]
    fn missing_wmo_is_an_error() {
        assert_eq!(find_and_parse("no header here"), Err(ParseError::MissingWmo));
    }
}
