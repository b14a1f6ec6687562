//! Fixed timezone abbreviation table used when decoding the issuance
//! time string. NWS products never carry a UTC offset directly; the
//! abbreviation is looked up against this closed set instead of being
//! resolved through the IANA database, matching the source directive's
//! own fixed table (no DST inference beyond what the table encodes).

use chrono::FixedOffset;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::ParseError;

fn hours(h: i32) -> FixedOffset {
    FixedOffset::east_opt(h * 3600).expect("timezone offset in range")
}

static TIMEZONES: Lazy<HashMap<&'static str, FixedOffset>> = Lazy::new(|| {
    HashMap::from([
        ("GMT", hours(0)),
        ("UTC", hours(0)),
        ("ADT", hours(-3)),
        ("AST", hours(-4)),
        ("EST", hours(-5)),
        ("EDT", hours(-4)),
        ("CST", hours(-6)),
        ("CDT", hours(-5)),
        ("MST", hours(-7)),
        ("MDT", hours(-6)),
        ("PST", hours(-8)),
        ("PDT", hours(-7)),
        ("AKST", hours(-9)),
        ("AKDT", hours(-8)),
        ("HST", hours(-10)),
        ("SST", hours(-11)),
        ("CHST", hours(10)),
    ])
});

pub fn lookup(abbrev: &str) -> Result<FixedOffset, ParseError> {
    TIMEZONES
        .get(abbrev)
        .copied()
        .ok_or_else(|| ParseError::UnknownTimezone(abbrev.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_zones() {
        assert_eq!(lookup("EST").unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(lookup("CHST").unwrap().local_minus_utc(), 10 * 3600);
    }

    #[test]
    fn rejects_unknown_zone() {
        assert!(lookup("ZZZ").is_err());
    }
}
