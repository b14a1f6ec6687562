//! Issuance timestamp line: either `HHMM UTC Mon Jan D YYYY` or
//! `H(H)MM AM|PM TZ Mon Jan D YYYY`, with an optional weekday
//! abbreviation ahead of the month name.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::timezone;

static ISSUANCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(\d{1,4})\s*(AM|PM)?\s+([A-Z]{2,4})\s+(?:[A-Za-z]{3}\s+)?([A-Za-z]{3})\s+(\d{1,2})\s+(\d{4})\s*$",
    )
    .unwrap()
});

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    let upper = name.to_uppercase();
    MONTHS.iter().position(|m| *m == upper).map(|i| i as u32 + 1)
}

fn split_hour_minute(digits: &str) -> Option<(u32, u32)> {
    match digits.len() {
        1 | 2 => Some((digits.parse().ok()?, 0)),
        3 => {
            let (h, m) = digits.split_at(1);
            Some((h.parse().ok()?, m.parse().ok()?))
        }
        4 => {
            let (h, m) = digits.split_at(2);
            Some((h.parse().ok()?, m.parse().ok()?))
        }
        _ => None,
    }
}

/// Parses the issuance time string into a UTC instant.
pub fn find_and_parse(text: &str) -> Result<DateTime<Utc>, ParseError> {
    let caps = ISSUANCE_RE
        .captures(text)
        .ok_or_else(|| ParseError::MalformedIssuanceTime(text.lines().next().unwrap_or("").to_string()))?;

    let whole = caps.get(0).unwrap().as_str().to_string();
    let digits = &caps[1];
    let ampm = caps.get(2).map(|m| m.as_str());
    let tz_abbrev = &caps[3];
    let month_name = &caps[4];
    let day: u32 = caps[5].parse().map_err(|_| ParseError::MalformedIssuanceTime(whole.clone()))?;
    let year: i32 = caps[6].parse().map_err(|_| ParseError::MalformedIssuanceTime(whole.clone()))?;

    let (mut hour, minute) = split_hour_minute(digits).ok_or_else(|| ParseError::MalformedIssuanceTime(whole.clone()))?;

    if let Some(meridiem) = ampm {
        hour %= 12;
        if meridiem.eq_ignore_ascii_case("PM") {
            hour += 12;
        }
    }

    let month = month_number(month_name).ok_or_else(|| ParseError::MalformedIssuanceTime(whole.clone()))?;
    let offset = timezone::lookup(tz_abbrev)?;

    let naive_date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::MalformedIssuanceTime(whole.clone()))?;
    let naive_time = naive_date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| ParseError::MalformedIssuanceTime(whole.clone()))?;

    let local = offset
        .from_local_datetime(&naive_time)
        .single()
        .ok_or_else(|| ParseError::MalformedIssuanceTime(whole.clone()))?;
    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_24h_utc_form() {
        let dt = find_and_parse("1200 UTC Thu Jun 26 2025").unwrap();
        assert_eq!(dt.hour(), 12);
        assert_eq!(dt.year(), 2025);
    }

    #[test]
    fn parses_12h_local_form() {
        let dt = find_and_parse("800 AM EDT Thu Jun 26 2025").unwrap();
        // 8 AM EDT == 1200 UTC
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn rejects_garbage() {
        assert!(find_and_parse("not a timestamp").is_err());
    }
}
