//! Emergency/PDS ("particularly dangerous situation") detection. Both
//! are headline flags the source reads off free-text segment markers
//! rather than a dedicated VTEC field.

use std::collections::HashMap;

pub fn detect_emergency(segment_raw: &str, tags: &HashMap<String, String>) -> bool {
    segment_raw.contains("TORNADO EMERGENCY") || tags.values().any(|v| v == "CATASTROPHIC")
}

pub fn detect_pds(segment_raw: &str) -> bool {
    segment_raw.contains("PARTICULARLY DANGEROUS SITUATION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_tornado_emergency_marker() {
        assert!(detect_emergency("...TORNADO EMERGENCY FOR DOWNTOWN...", &HashMap::new()));
    }

    #[test]
    fn detects_catastrophic_tag_value() {
        let mut tags = HashMap::new();
        tags.insert("damage".to_string(), "CATASTROPHIC".to_string());
        assert!(detect_emergency("ordinary text", &tags));
    }

    #[test]
    fn detects_pds_marker() {
        assert!(detect_pds("THIS IS A PARTICULARLY DANGEROUS SITUATION"));
        assert!(!detect_pds("ordinary text"));
    }
}
