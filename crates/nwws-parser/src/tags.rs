//! Hazard tags: free-text `NAME...VALUE` lines carrying structured
//! threat information (tornado/hail/wind/flood/etc). Grounded on
//! `pkg/awips/tags.go`'s `tags` table; tags whose value falls outside
//! the declared `Possibles` set are recorded as an anomaly but the
//! value is still kept.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

struct TagSpec {
    key: &'static str,
    pattern: &'static str,
    possibles: Option<&'static [&'static str]>,
}

static TAG_SPECS: &[TagSpec] = &[
    TagSpec { key: "tornado", pattern: r"TORNADO\.\.\.([A-Z ]+)", possibles: Some(&["POSSIBLE", "RADAR INDICATED", "OBSERVED"]) },
    TagSpec {
        key: "damage",
        pattern: r"(TORNADO|THUNDERSTORM|FLASH FLOOD) DAMAGE THREAT\.\.\.([A-Z ]+)",
        possibles: Some(&["CONSIDERABLE", "DESTRUCTIVE", "CATASTROPHIC"]),
    },
    TagSpec { key: "hailThreat", pattern: r"HAIL THREAT\.\.\.([A-Z ]+)", possibles: Some(&["RADAR INDICATED", "OBSERVED"]) },
    TagSpec { key: "hail", pattern: r".*(HAIL|MAX HAIL SIZE)\.\.\.[><.0-9]+\s?IN", possibles: None },
    TagSpec { key: "windThreat", pattern: r"WIND THREAT\.\.\.([A-Z ]+)", possibles: Some(&["RADAR INDICATED", "OBSERVED"]) },
    TagSpec { key: "wind", pattern: r".*(WIND|MAX WIND GUST)\.\.\.[><.0-9]+\s?(MPH|KTS)", possibles: None },
    TagSpec { key: "flashFlood", pattern: r"FLASH FLOOD\.\.\.([A-Z ]+)", possibles: Some(&["RADAR INDICATED", "OBSERVED"]) },
    TagSpec { key: "expectedRainfall", pattern: r"EXPECTED RAINFALL RATE\.\.\.(.)+", possibles: None },
    TagSpec { key: "damFailure", pattern: r"(DAM|LEVEE) FAILURE\.\.\.(.)+", possibles: Some(&["IMMINENT", "OCCURRING"]) },
    TagSpec { key: "spout", pattern: r".*(LANDSPOUT|WATERSPOUT)\.\.\.(.)+", possibles: Some(&["POSSIBLE", "OBSERVED"]) },
    TagSpec { key: "snowSquall", pattern: r"SNOW SQUALL\.\.\.([A-Z ]+)", possibles: Some(&["RADAR INDICATED", "OBSERVED"]) },
    TagSpec { key: "snowSquallImpact", pattern: r"SNOW SQUALL IMPACT\.\.\.([A-Z ]+)", possibles: Some(&["SIGNIFICANT"]) },
];

struct CompiledTag {
    key: &'static str,
    regex: Regex,
    possibles: Option<&'static [&'static str]>,
}

static COMPILED_TAGS: Lazy<Vec<CompiledTag>> = Lazy::new(|| {
    TAG_SPECS
        .iter()
        .map(|spec| CompiledTag { key: spec.key, regex: Regex::new(spec.pattern).unwrap(), possibles: spec.possibles })
        .collect()
});

/// Anomalies are tags whose value fell outside the declared
/// `Possibles` set. The tag is still kept in the returned map; callers
/// that want to log the anomaly separately can check this list.
pub struct TagReport {
    pub tags: HashMap<String, String>,
    pub anomalies: Vec<(String, String)>,
}

pub fn parse(text: &str) -> TagReport {
    let mut tags = HashMap::new();
    let mut anomalies = Vec::new();

    for tag in COMPILED_TAGS.iter() {
        let Some(m) = tag.regex.find(text) else { continue };
        let Some((_, value)) = m.as_str().split_once("...") else { continue };
        let value = value.trim().to_string();

        if let Some(possibles) = tag.possibles {
            if !possibles.contains(&value.as_str()) {
                anomalies.push((tag.key.to_string(), value.clone()));
            }
        }
        tags.insert(tag.key.to_string(), value);
    }

    TagReport { tags, anomalies }
}
