//! Closed-set VTEC vocabulary: phenomena and significance code → display
//! name. Grounded on `pkg/awips/vtec.go`'s `VTECPhenomena`/
//! `VTECSignificance` maps. [`vtec`](crate::vtec) uses
//! [`phenomena_name`] to reject an unrecognized phenomena letter pair;
//! the engine's title builder uses both lookups to compose a warning's
//! display title.

/// `None` for any code outside the 67-entry closed set NWS assigns to
/// VTEC phenomena.
pub fn phenomena_name(code: &str) -> Option<&'static str> {
    Some(match code {
        "AF" => "Ashfall",
        "AS" => "Air Stagnation",
        "BH" => "Beach Hazard",
        "BS" => "Blowing Snow",
        "BW" => "Brisk Wind",
        "BZ" => "Blizzard",
        "CF" => "Coastal Flood",
        "CW" => "Cold Weather",
        "DF" => "Debris Flow",
        "DS" => "Dust Storm",
        "DU" => "Blowing Dust",
        "EC" => "Extreme Cold",
        "EH" => "Excessive Heat",
        "EW" => "Extreme Wind",
        "FA" => "Flood",
        "FF" => "Flash Flood",
        "FG" => "Dense Fog",
        "FL" => "Flood",
        "FR" => "Frost",
        "FW" => "Fire Weather",
        "FZ" => "Freeze",
        "UP" => "Freezing Spray",
        "GL" => "Gale",
        "HF" => "Hurricane Force Wind",
        "HI" => "Inland Hurricane",
        "HS" => "Heavy Snow",
        "HT" => "Heat",
        "HU" => "Hurricane",
        "HW" => "High Wind",
        "HY" => "Hydrologic",
        "HZ" => "Hard Freeze",
        "IP" => "Sleet",
        "IS" => "Ice Storm",
        "LB" => "Lake Effect Snow and Blowing Snow",
        "LE" => "Lake Effect Snow",
        "LO" => "Low Water",
        "LS" => "Lakeshore Flood",
        "LW" => "Lake Wind",
        "MA" => "Marine",
        "MF" => "Marine Dense Fog",
        "MH" => "Marine Ashfall",
        "MS" => "Marine Dense Smoke",
        "RB" => "Small Craft for Rough",
        "RP" => "Rip Currents",
        "SB" => "Snow and Blowing",
        "SC" => "Small Craft",
        "SE" => "Hazardous Seas",
        "SI" => "Small Craft for Winds",
        "SM" => "Dense Smoke",
        "SN" => "Snow",
        "SQ" => "Snow Squall",
        "SR" => "Storm",
        "SS" => "Storm Surge",
        "SU" => "High Surf",
        "SV" => "Severe Thunderstorm",
        "SW" => "Small Craft for Hazardous Seas",
        "TI" => "Inland Tropical Storm",
        "TO" => "Tornado",
        "TR" => "Tropical Storm",
        "TS" => "Tsunami",
        "TY" => "Typhoon",
        "WC" => "Wind Chill",
        "WI" => "Wind",
        "WS" => "Winter Storm",
        "WW" => "Winter Weather",
        "XH" => "Extreme Heat",
        "ZF" => "Freezing Fog",
        "ZR" => "Freezing Rain",
        _ => return None,
    })
}

/// `None` for any letter outside the 7-entry closed set NWS assigns to
/// VTEC significance.
pub fn significance_name(code: &str) -> Option<&'static str> {
    Some(match code {
        "W" => "Warning",
        "Y" => "Advisory",
        "A" => "Watch",
        "S" => "Statement",
        "O" => "Outlook",
        "N" => "Synopsis",
        "F" => "Forecast",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_phenomena_resolves() {
        assert_eq!(phenomena_name("TO"), Some("Tornado"));
        assert_eq!(phenomena_name("WS"), Some("Winter Storm"));
    }

    #[test]
    fn unknown_phenomena_is_none() {
        assert_eq!(phenomena_name("ZZ"), None);
    }

    #[test]
    fn known_significance_resolves() {
        assert_eq!(significance_name("W"), Some("Warning"));
        assert_eq!(significance_name("Y"), Some("Advisory"));
    }
}
