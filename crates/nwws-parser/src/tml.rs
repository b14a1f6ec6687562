//! `TIME...MOT...LOC` motion/location block:
//! `TIME...MOT...LOC HHMMZ DDDDEG SSUNIT LAT LON [LAT LON ...]`.
//! Grounded on `SPEC_FULL.md` section 4.5.

use chrono::{DateTime, TimeZone, Utc};

use nwws_model::{MultiPoint, Point, SegmentMotion};

use crate::error::ParseError;
use crate::latlon::apply_west_bias;

const MARKER: &str = "TIME...MOT...LOC";

fn decode_point(lat_digits: &str, lon_digits: &str) -> Result<Point, ParseError> {
    if ![4usize, 5].contains(&lat_digits.len()) || ![4usize, 5].contains(&lon_digits.len()) {
        return Err(ParseError::MalformedMotion(format!("{lat_digits} {lon_digits}")));
    }
    let lat: f64 = lat_digits
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedMotion(lat_digits.to_string()))?
        / 100.0;
    let mut lon: f64 = lon_digits
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedMotion(lon_digits.to_string()))?
        / 100.0;
    let was_large = lon >= 180.0;
    apply_west_bias(std::slice::from_mut(&mut lon));
    if !was_large {
        lon = -lon;
    }
    Ok(Point::new(lat, lon))
}

/// Finds the motion block and decodes it against `issued` (whose
/// calendar date supplies the year/month/day for the block's bare
/// `HHMMZ` time token).
pub fn find_and_parse(text: &str, issued: DateTime<Utc>) -> Result<Option<SegmentMotion>, ParseError> {
    let Some(start) = text.find(MARKER) else {
        return Ok(None);
    };
    let rest = &text[start + MARKER.len()..];
    // Continuation is limited to letters, digits, and whitespace, matching
    // the source grammar's `[A-Za-z0-9 ]*` continuation-line class: the
    // first punctuation character (a tag's `...`, a `/`, `$$`) ends the
    // block instead of requiring a blank line.
    let block_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == ' ' || c == '\n'))
        .unwrap_or(rest.len());
    let collapsed: String = rest[..block_end].split_whitespace().collect::<Vec<_>>().join(" ");
    let tokens: Vec<&str> = collapsed.split(' ').filter(|t| !t.is_empty()).collect();

    if tokens.len() < 3 {
        return Err(ParseError::MalformedMotion(collapsed));
    }

    let time_token = tokens[0];
    let direction_token = tokens[1];
    let speed_token = tokens[2];

    let hhmm = time_token.trim_end_matches('Z');
    if hhmm.len() != 4 {
        return Err(ParseError::MalformedMotion(time_token.to_string()));
    }
    let hour: u32 = hhmm[0..2].parse().map_err(|_| ParseError::MalformedMotion(time_token.to_string()))?;
    let minute: u32 = hhmm[2..4].parse().map_err(|_| ParseError::MalformedMotion(time_token.to_string()))?;
    let time = Utc
        .with_ymd_and_hms(issued.date_naive().year(), issued.date_naive().month(), issued.date_naive().day(), hour, minute, 0)
        .single()
        .ok_or_else(|| ParseError::MalformedMotion(time_token.to_string()))?;

    let direction_digits = direction_token.trim_end_matches("DEG");
    let direction_deg: u16 = direction_digits
        .parse()
        .map_err(|_| ParseError::MalformedMotion(direction_token.to_string()))?;

    let digit_prefix_len = speed_token.chars().take_while(|c| c.is_ascii_digit()).count();
    if digit_prefix_len == 0 {
        return Err(ParseError::MalformedMotion(speed_token.to_string()));
    }
    let (speed_digits, speed_unit) = speed_token.split_at(digit_prefix_len);
    let speed: u32 = speed_digits
        .parse()
        .map_err(|_| ParseError::MalformedMotion(speed_token.to_string()))?;

    let mut points = Vec::new();
    let mut i = 3;
    while i + 1 < tokens.len() {
        points.push(decode_point(tokens[i], tokens[i + 1])?);
        i += 2;
    }

    Ok(Some(SegmentMotion {
        time,
        direction_deg,
        speed,
        speed_unit: speed_unit.to_string(),
        points: MultiPoint(points),
    }))
}

use chrono::Datelike;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn parses_full_motion_block() {
        let issued = Utc.with_ymd_and_hms(2025, 6, 26, 23, 0, 0).unwrap();
        let text = "TIME...MOT...LOC 2336Z 270DEG 25KT 3500 9700 3600 9700\n$$";
        let motion = find_and_parse(text, issued).unwrap().unwrap();
        assert_eq!(motion.direction_deg, 270);
        assert_eq!(motion.speed, 25);
        assert_eq!(motion.speed_unit, "KT");
        assert_eq!(motion.points.0.len(), 2);
        assert_eq!(motion.points.0[0].lat, 35.00);
        assert_eq!(motion.points.0[0].lon, -97.00);
    }

    #[test]
    fn no_block_is_none() {
        let issued = Utc.with_ymd_and_hms(2025, 6, 26, 23, 0, 0).unwrap();
        assert!(find_and_parse("plain text", issued).unwrap().is_none());
    }
}
