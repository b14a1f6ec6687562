//! `LAT...LON` polygon lines: runs of 4/5-digit coordinate components
//! (pairs of lat, lon) or 8-digit packed (lat,lon) groups. Grounded on
//! `SPEC_FULL.md` section 4.2 and testable property 5 (longitude sign).

use once_cell::sync::Lazy;
use regex::Regex;

use nwws_model::{Point, Polygon};

use crate::error::ParseError;

static BLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)LAT\.\.\.LON([0-9\s]*)").unwrap());
static GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Wraps a longitude magnitude (not yet signed) that is `>= 180` back
/// into range by subtracting a full turn, leaving values already in
/// range untouched. Shared by [`decode_lon`] and the TML parser.
pub fn apply_west_bias(values: &mut [f64]) {
    for v in values.iter_mut() {
        if *v >= 180.0 {
            *v -= 360.0;
        }
    }
}

fn parse_magnitude(digits: &str, error_ctx: &str) -> Result<f64, ParseError> {
    let n: f64 = digits
        .parse()
        .map_err(|_| ParseError::BadCoordinate(error_ctx.to_string()))?;
    Ok(n / 100.0)
}

fn decode_lat(digits: &str) -> Result<f64, ParseError> {
    parse_magnitude(digits, digits)
}

fn decode_lon(digits: &str) -> Result<f64, ParseError> {
    let mut magnitude = parse_magnitude(digits, digits)?;
    let was_large = magnitude >= 180.0;
    apply_west_bias(std::slice::from_mut(&mut magnitude));
    Ok(if was_large { magnitude } else { -magnitude })
}

/// Longitude decode for the 8-digit packed `LAT...LON` form only: a
/// magnitude under `50.00` is a wrapped value (the packed form never
/// writes a longitude magnitude that small on its own) and gets a full
/// 100-degree turn added back before negating. The 4/5-digit form never
/// applies this rule.
fn decode_lon_packed(digits: &str) -> Result<f64, ParseError> {
    let mut magnitude = parse_magnitude(digits, digits)?;
    if magnitude < 50.0 {
        magnitude += 100.0;
    }
    Ok(-magnitude)
}

/// Finds the `LAT...LON` block and decodes it into a polygon, closing
/// the ring if the first and last vertices differ. Returns `Ok(None)`
/// when no such block is present.
pub fn find_and_parse(text: &str) -> Result<Option<Polygon>, ParseError> {
    let Some(caps) = BLOCK_RE.captures(text) else {
        return Ok(None);
    };
    let body = &caps[1];
    let groups: Vec<&str> = GROUP_RE.find_iter(body).map(|m| m.as_str()).collect();
    if groups.is_empty() {
        return Ok(None);
    }

    let mut points = Vec::new();
    let mut i = 0;
    while i < groups.len() {
        let g = groups[i];
        match g.len() {
            4 | 5 => {
                if i + 1 >= groups.len() {
                    return Err(ParseError::BadCoordinate(g.to_string()));
                }
                let lat = decode_lat(g)?;
                let lon = decode_lon(groups[i + 1])?;
                points.push(Point::new(lat, lon));
                i += 2;
            }
            8 => {
                let (lat_digits, lon_digits) = g.split_at(4);
                let lat = decode_lat(lat_digits)?;
                let lon = decode_lon_packed(lon_digits)?;
                points.push(Point::new(lat, lon));
                i += 1;
            }
            _ => return Err(ParseError::BadCoordinate(g.to_string())),
        }
    }

    let mut polygon = Polygon(points);
    polygon.close();
    Ok(Some(polygon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_basic_polygon_and_closes_ring() {
        let text = "LAT...LON 3500 9700 3600 9700 3600 9600 3500 9600";
        let polygon = find_and_parse(text).unwrap().unwrap();
        assert!(polygon.is_closed());
        assert_eq!(polygon.0.len(), 5);
        assert_eq!(polygon.0[0].lat, 35.00);
        assert_eq!(polygon.0[0].lon, -97.00);
    }

    #[test]
    fn negates_longitude_west_bias() {
        let text = "LAT...LON 3500 17999 3600 17999";
        let polygon = find_and_parse(text).unwrap().unwrap();
        assert_eq!(polygon.0[0].lon, -179.99);
    }

    #[test]
    fn west_bias_wraps_over_180() {
        let mut v = vec![181.00, 179.00];
        apply_west_bias(&mut v);
        assert_eq!(v[0], -179.00);
        assert_eq!(v[1], 179.00);
    }

    #[test]
    fn eight_digit_groups() {
        let text = "LAT...LON 35009700 36009700";
        let polygon = find_and_parse(text).unwrap().unwrap();
        assert_eq!(polygon.0[0].lat, 35.00);
        assert_eq!(polygon.0[0].lon, -97.00);
    }

    #[test]
    fn eight_digit_longitude_under_50_wraps_east_hemisphere() {
        let text = "LAT...LON 35004500 36004500";
        let polygon = find_and_parse(text).unwrap().unwrap();
        assert_eq!(polygon.0[0].lat, 35.00);
        assert_eq!(polygon.0[0].lon, -145.00);
    }

    #[test]
    fn no_block_is_none() {
        assert!(find_and_parse("nothing here").unwrap().is_none());
    }
}
