//! Warning titles, including the special-casing of section 4.4: fire
//! weather and marine significance get their own base title, and any
//! emergency flag overrides the significance word entirely.

use nwws_model::VtecDescriptor;
use nwws_parser::{phenomena_name, significance_name};

/// Composes `PhenomenaString() + " " + SignificanceString()` from the
/// closed phenomena/significance tables, with the fire-weather and
/// marine overrides applied ahead of the significance word and an
/// emergency flag replacing it outright. Falls back to the raw codes
/// when either table lookup misses (VTEC validation should have
/// already rejected those descriptors, but a title is still owed).
pub fn event_title(descriptor: &VtecDescriptor, is_emergency: bool) -> String {
    let phenomena = if descriptor.phenomena == "FW" && descriptor.significance == "W" {
        "Red Flag"
    } else if descriptor.phenomena == "MA" && descriptor.significance == "W" {
        "Special Marine"
    } else {
        phenomena_name(&descriptor.phenomena).unwrap_or(&descriptor.phenomena)
    };

    if is_emergency {
        return format!("{phenomena} Emergency");
    }

    let significance = significance_name(&descriptor.significance).unwrap_or(&descriptor.significance);
    format!("{phenomena} {significance}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwws_model::{VtecAction, VtecClass};

    fn descriptor(phenomena: &str, significance: &str) -> VtecDescriptor {
        VtecDescriptor {
            class: VtecClass::Operational,
            action: VtecAction::New,
            office: "KRAH".into(),
            phenomena: phenomena.into(),
            significance: significance.into(),
            event_number: 1,
            start: None,
            end: None,
        }
    }

    #[test]
    fn fire_weather_gets_red_flag_title() {
        assert_eq!(event_title(&descriptor("FW", "W"), false), "Red Flag Warning");
    }

    #[test]
    fn marine_gets_special_marine_title() {
        assert_eq!(event_title(&descriptor("MA", "W"), false), "Special Marine Warning");
    }

    #[test]
    fn emergency_overrides_significance_word() {
        assert_eq!(event_title(&descriptor("TO", "W"), true), "Tornado Emergency");
    }

    #[test]
    fn watch_and_advisory_compose_from_the_full_tables() {
        assert_eq!(event_title(&descriptor("WS", "A"), false), "Winter Storm Watch");
        assert_eq!(event_title(&descriptor("WW", "Y"), false), "Winter Weather Advisory");
    }

    #[test]
    fn unknown_phenomena_falls_back_to_code() {
        assert_eq!(event_title(&descriptor("ZZ", "Y"), false), "ZZ Advisory");
    }
}
