//! VTEC (Valid Time Event Code) lines: `/k.aaa.cccc.pp.s.####.
//! yymmddThhnnZ-yymmddThhnnZ/`. Grounded on the closed-set validation
//! contract of `SPEC_FULL.md` section 4.4.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use nwws_model::{VtecAction, VtecClass, VtecDescriptor};

use crate::error::ParseError;
use crate::vocab::{phenomena_name, significance_name};

static VTEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/([A-Z])\.([A-Z]{3,})\.([A-Z]{4})\.([A-Z]{2})\.([A-Z])\.(\d+)\.(\d{6}T\d{4}Z)-(\d{6}T\d{4}Z)/").unwrap()
});

fn parse_timestamp(raw: &str) -> Result<Option<DateTime<Utc>>, ParseError> {
    if raw == "000000T0000Z" {
        return Ok(None);
    }
    let bytes = raw.as_bytes();
    if bytes.len() != 12 {
        return Err(ParseError::MalformedVtec(raw.to_string()));
    }
    let year: i32 = raw[0..2].parse().map_err(|_| ParseError::MalformedVtec(raw.to_string()))?;
    let month: u32 = raw[2..4].parse().map_err(|_| ParseError::MalformedVtec(raw.to_string()))?;
    let day: u32 = raw[4..6].parse().map_err(|_| ParseError::MalformedVtec(raw.to_string()))?;
    let hour: u32 = raw[7..9].parse().map_err(|_| ParseError::MalformedVtec(raw.to_string()))?;
    let minute: u32 = raw[9..11].parse().map_err(|_| ParseError::MalformedVtec(raw.to_string()))?;
    let dt = Utc
        .with_ymd_and_hms(2000 + year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| ParseError::MalformedVtec(raw.to_string()))?;
    Ok(Some(dt))
}

/// Parses every VTEC line present in `text`, in document order.
/// A single malformed descriptor is reported but does not prevent the
/// others from being collected — callers pass the issue list up to the
/// assembler's per-product report.
pub fn parse_all(text: &str) -> (Vec<VtecDescriptor>, Vec<ParseError>) {
    let mut out = Vec::new();
    let mut errors = Vec::new();

    for caps in VTEC_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap().as_str().to_string();
        let class = match VtecClass::from_letter(caps[1].chars().next().unwrap()) {
            Some(c) => c,
            None => {
                errors.push(ParseError::UnknownVtecField { field: "class", value: caps[1].to_string() });
                continue;
            }
        };
        let action = match VtecAction::from_str_code(&caps[2]) {
            Some(a) => a,
            None => {
                errors.push(ParseError::UnknownVtecField { field: "action", value: caps[2].to_string() });
                continue;
            }
        };
        let phenomena = &caps[4];
        if phenomena_name(phenomena).is_none() {
            errors.push(ParseError::UnknownVtecField { field: "phenomena", value: phenomena.to_string() });
            continue;
        }
        let significance = &caps[5];
        if significance_name(significance).is_none() {
            errors.push(ParseError::UnknownVtecField { field: "significance", value: significance.to_string() });
            continue;
        }
        let event_number: u32 = match caps[6].parse() {
            Ok(n) => n,
            Err(_) => {
                errors.push(ParseError::MalformedVtec(whole));
                continue;
            }
        };
        let start = match parse_timestamp(&caps[7]) {
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        let end = match parse_timestamp(&caps[8]) {
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        out.push(VtecDescriptor {
            class,
            action,
            office: caps[3].to_string(),
            phenomena: caps[4].to_string(),
            significance: significance.to_string(),
            event_number,
            start,
            end,
        });
    }

    (out, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_new_tornado_warning() {
        let (descs, errs) = parse_all("/O.NEW.KRAH.SV.W.0175.250626T2336Z-250627T0015Z/");
        assert!(errs.is_empty());
        assert_eq!(descs.len(), 1);
        let d = &descs[0];
        assert_eq!(d.office, "KRAH");
        assert_eq!(d.phenomena, "SV");
        assert_eq!(d.significance, "W");
        assert_eq!(d.event_number, 175);
        assert_eq!(d.action, VtecAction::New);
        assert!(d.end.is_some());
    }

    #[test]
    fn absent_start_is_none() {
        let (descs, _) = parse_all("/O.CAN.KRAH.SV.W.0175.000000T0000Z-250627T0015Z/");
        assert!(descs[0].start.is_none());
    }

    #[test]
    fn unknown_action_is_reported_not_fatal() {
        let (descs, errs) = parse_all("/O.ZZZ.KRAH.SV.W.0175.000000T0000Z-250627T0015Z/");
        assert!(descs.is_empty());
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn unknown_phenomena_is_reported_not_fatal() {
        let (descs, errs) = parse_all("/O.NEW.KRAH.ZZ.W.0001.250626T2336Z-250627T0015Z/");
        assert!(descs.is_empty());
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn unknown_class_is_reported_not_silently_dropped() {
        let (descs, errs) = parse_all("/Q.NEW.KRAH.SV.W.0175.250626T2336Z-250627T0015Z/");
        assert!(descs.is_empty());
        assert_eq!(errs.len(), 1);
    }
}
