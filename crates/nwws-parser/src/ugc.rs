//! UGC (Universal Geographic Code) block: a hyphen-separated run of
//! state/type/area tokens terminated by a shared `DDHHMM` expiry.
//! Grounded on the regex/range-expansion contract of `SPEC_FULL.md`
//! section 4.3.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use nwws_model::{UgcBlock, UgcEntry, UgcType};

use crate::error::ParseError;

static UGC_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{2}[CZ][0-9]{3}").unwrap());
static UGC_TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{6}-").unwrap());
static FULL_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]{2})([CZF])(.+)$").unwrap());

fn expand_area(spec: &str) -> Result<Vec<String>, ParseError> {
    if spec == "ALL" {
        return Ok(vec!["ALL".to_string()]);
    }
    if let Some((lo, hi)) = spec.split_once('>') {
        let lo: u32 = lo.parse().map_err(|_| ParseError::MalformedUgc(spec.to_string()))?;
        let hi: u32 = hi.parse().map_err(|_| ParseError::MalformedUgc(spec.to_string()))?;
        if lo > hi {
            return Err(ParseError::MalformedUgc(spec.to_string()));
        }
        return Ok((lo..=hi).map(|n| format!("{n:03}")).collect());
    }
    if spec.len() != 3 || !spec.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::MalformedUgc(spec.to_string()));
    }
    Ok(vec![spec.to_string()])
}

/// Finds the UGC block in `text`, if any, and expands it. Returns
/// `Ok(None)` when no UGC-shaped text is present (not every segment
/// carries one).
pub fn find_and_parse(text: &str) -> Result<Option<UgcBlock>, ParseError> {
    let Some(start_m) = UGC_START_RE.find(text) else {
        return Ok(None);
    };
    let rest = &text[start_m.start()..];
    let Some(time_m) = UGC_TIME_RE.find(rest) else {
        return Err(ParseError::MalformedUgc(rest.chars().take(40).collect()));
    };
    let block = &rest[..time_m.end()];
    parse_block(block).map(Some)
}

fn parse_block(block: &str) -> Result<UgcBlock, ParseError> {
    let stripped: String = block.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tokens: Vec<&str> = stripped.split('-').filter(|t| !t.is_empty()).collect();
    let time_token = tokens.pop().ok_or_else(|| ParseError::MalformedUgc(stripped.clone()))?;
    if time_token.len() != 6 || !time_token.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::MalformedUgc(stripped.clone()));
    }

    let mut entries = Vec::new();
    let mut current_state = String::new();
    let mut current_kind = UgcType::Zone;

    for tok in tokens {
        let area_spec;
        if let Some(caps) = FULL_TOKEN_RE.captures(tok) {
            current_state = caps[1].to_string();
            current_kind = UgcType::from_letter(caps[2].chars().next().unwrap())
                .ok_or_else(|| ParseError::MalformedUgc(tok.to_string()))?;
            area_spec = caps[3].to_string();
        } else {
            if current_state.is_empty() {
                return Err(ParseError::MalformedUgc(tok.to_string()));
            }
            area_spec = tok.to_string();
        }
        for area in expand_area(&area_spec)? {
            entries.push(UgcEntry {
                state: current_state.clone(),
                kind: current_kind,
                area,
            });
        }
    }

    Ok(UgcBlock {
        entries,
        expires: parse_ddhhmm_placeholder(time_token)?,
    })
}

/// Parses the `DDHHMM` expiry as a bare day/hour/minute in the current
/// UTC month/year. `merge_with_issuance` replaces the month/year with
/// the product's once the full issuance time is known, matching the
/// source's two-pass `MergeUGCTime` approach.
fn parse_ddhhmm_placeholder(ddhhmm: &str) -> Result<DateTime<Utc>, ParseError> {
    let now = Utc::now();
    build_ddhhmm(ddhhmm, now.year(), now.month())
}

fn build_ddhhmm(ddhhmm: &str, year: i32, month: u32) -> Result<DateTime<Utc>, ParseError> {
    if ddhhmm == "123456" {
        return Ok(Utc::now());
    }
    let day: u32 = ddhhmm[0..2].parse().map_err(|_| ParseError::MalformedUgc(ddhhmm.to_string()))?;
    let hour: u32 = ddhhmm[2..4].parse().map_err(|_| ParseError::MalformedUgc(ddhhmm.to_string()))?;
    let minute: u32 = ddhhmm[4..6].parse().map_err(|_| ParseError::MalformedUgc(ddhhmm.to_string()))?;
    Utc.with_ymd_and_hms(year, month, day.max(1), hour, minute, 0)
        .single()
        .ok_or_else(|| ParseError::MalformedUgc(ddhhmm.to_string()))
}

/// Replaces a placeholder expiry's month/year with the product's
/// issuance month/year, advancing one month on end-of-month rollover
/// (the UGC day is earlier than the issuance day within the same
/// calendar position), per `SPEC_FULL.md` section 4.1 step 5.
pub fn merge_with_issuance(block: &mut UgcBlock, issued: DateTime<Utc>) -> Result<(), ParseError> {
    let day = block.expires.day();
    let hour = block.expires.hour();
    let minute = block.expires.minute();
    let ddhhmm = format!("{day:02}{hour:02}{minute:02}");

    let mut year = issued.year();
    let mut month = issued.month();
    if day < issued.day() {
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    block.expires = build_ddhhmm(&ddhhmm, year, month)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_ranges_and_singles() {
        let block = find_and_parse("WYZ001>020-021-022>030-035-081700-").unwrap().unwrap();
        let areas: Vec<&str> = block.entries.iter().map(|e| e.area.as_str()).collect();
        assert_eq!(areas.len(), 31);
        assert_eq!(areas[0], "001");
        assert_eq!(areas[19], "020");
        assert_eq!(areas[20], "021");
        assert_eq!(areas.last().unwrap(), &"035");
        assert!(block.entries.iter().all(|e| e.state == "WY" && e.kind == UgcType::Zone));
    }

    #[test]
    fn multi_state_block() {
        let block = find_and_parse("WYC001>020-021-022>030-035-FLC020-202200-").unwrap().unwrap();
        let wy_count = block.entries.iter().filter(|e| e.state == "WY").count();
        let fl: Vec<&str> = block
            .entries
            .iter()
            .filter(|e| e.state == "FL")
            .map(|e| e.area.as_str())
            .collect();
        assert_eq!(wy_count, 31);
        assert_eq!(fl, vec!["020"]);
    }

    #[test]
    fn no_ugc_present_is_none() {
        assert!(find_and_parse("plain text with no codes").unwrap().is_none());
    }

    #[test]
    fn sentinel_expiry_uses_now_instead_of_failing() {
        let before = Utc::now();
        let block = find_and_parse("WYZ001-123456-").unwrap().unwrap();
        let after = Utc::now();
        assert!(block.expires >= before && block.expires <= after);
    }
}
