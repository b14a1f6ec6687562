//! Polygon and motion/location geometry, kept as plain coordinate lists.
//!
//! This crate does not depend on a spatial library: polygons are either
//! read directly off a `LAT...LON` line or, for the zone-union case,
//! handed to the store as an opaque request and returned as an opaque
//! GeoJSON string. [`Polygon`] only ever holds vertex data this process
//! parsed itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon(pub Vec<Point>);

impl Polygon {
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Appends the first vertex to close the ring if it is not already
    /// closed. A polygon with fewer than two vertices is left as-is.
    pub fn close(&mut self) {
        if self.0.len() >= 2 && !self.is_closed() {
            let first = self.0[0];
            self.0.push(first);
        }
    }

    /// GeoJSON `Polygon` geometry, serialized to a string per the wire
    /// contract in `SPEC_FULL.md` section 6.
    pub fn to_geojson(&self) -> String {
        let ring: Vec<[f64; 2]> = self.0.iter().map(|p| [p.lon, p.lat]).collect();
        serde_json::json!({ "type": "Polygon", "coordinates": [ring] }).to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint(pub Vec<Point>);

impl MultiPoint {
    pub fn to_geojson(&self) -> String {
        let coords: Vec<[f64; 2]> = self.0.iter().map(|p| [p.lon, p.lat]).collect();
        serde_json::json!({ "type": "MultiPoint", "coordinates": coords }).to_string()
    }
}
