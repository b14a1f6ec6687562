//! `TextScanner`/`ProductAssembler`: composes the header and per-segment
//! parsers into a [`Product`]. Grounded on `SPEC_FULL.md` section 4.1.

use chrono::Utc;

use nwws_model::{AwipsId, Product, Segment};

use crate::error::{ParseError, ParseIssue};
use crate::{awips, issuance, latlon, tags, ugc, vtec, wmo};

/// Non-fatal findings collected while assembling one product. Callers
/// (the engine, the ingest binary) log these; none of them prevent the
/// product from being usable.
#[derive(Debug, Default, Clone)]
pub struct ParseReport {
    pub issues: Vec<ParseIssue>,
}

impl ParseReport {
    fn push(&mut self, segment_index: Option<usize>, error: ParseError) {
        self.issues.push(ParseIssue { segment_index, error });
    }
}

const MIN_SEGMENT_LEN: usize = 20;

fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim() == "$$" {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        segments.push(current);
    }
    segments
        .into_iter()
        .filter(|s| s.trim().len() >= MIN_SEGMENT_LEN)
        .collect()
}

fn parse_segment(raw: String, issued: Option<chrono::DateTime<Utc>>, index: usize, report: &mut ParseReport) -> Segment {
    let (vtec_descriptors, vtec_errors) = vtec::parse_all(&raw);
    for err in vtec_errors {
        report.push(Some(index), err);
    }

    let mut ugc_block = match ugc::find_and_parse(&raw) {
        Ok(block) => block,
        Err(err) => {
            report.push(Some(index), err);
            None
        }
    };
    if let (Some(block), Some(issued)) = (ugc_block.as_mut(), issued) {
        if let Err(err) = ugc::merge_with_issuance(block, issued) {
            report.push(Some(index), err);
        }
    }

    let polygon = match latlon::find_and_parse(&raw) {
        Ok(p) => p,
        Err(err) => {
            report.push(Some(index), err);
            None
        }
    };

    let tml = match tml::find_and_parse(&raw, issued.unwrap_or_else(Utc::now)) {
        Ok(t) => t,
        Err(err) => {
            report.push(Some(index), err);
            None
        }
    };

    let tag_report = tags::parse(&raw);
    for (key, value) in &tag_report.anomalies {
        report.push(
            Some(index),
            ParseError::UnknownVtecField { field: "tag", value: format!("{key}={value}") },
        );
    }

    let expires = ugc_block
        .as_ref()
        .map(|b| b.expires)
        .unwrap_or_else(Utc::now);

    Segment {
        raw,
        vtec: vtec_descriptors,
        ugc: ugc_block,
        expires: Some(expires),
        polygon,
        tml,
        tags: tag_report.tags,
    }
}

use crate::tml;

/// Assembles `text` into a [`Product`]. Fails only when no WMO line is
/// present; every other defect is collected into the returned
/// [`ParseReport`] instead of aborting.
pub fn assemble(text: &str, awips_override: Option<AwipsId>) -> Result<(Product, ParseReport), ParseError> {
    let mut report = ParseReport::default();

    let wmo_header = wmo::find_and_parse(text)?;

    let awips_id = awips::find(text).or(awips_override);

    let issued = match issuance::find_and_parse(text) {
        Ok(dt) => Some(dt),
        Err(err) => {
            report.push(None, err);
            None
        }
    };

    let segments: Vec<Segment> = split_segments(text)
        .into_iter()
        .enumerate()
        .map(|(i, raw)| parse_segment(raw, issued, i, &mut report))
        .collect();

    let product = Product {
        raw: text.to_string(),
        wmo: Some(wmo_header),
        awips: awips_id,
        issued,
        segments,
    };

    Ok((product, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "WWUS53 KRAH 262336\nTORRAH\n1136 PM EDT Thu Jun 26 2025\n\nNCZ001-022-270015-\n/O.NEW.KRAH.SV.W.0175.250626T2336Z-250627T0015Z/\nSEVERE THUNDERSTORM WARNING FOR...\nTHE NATIONAL WEATHER SERVICE HAS ISSUED A WARNING\nLAT...LON 3500 9700 3600 9700 3600 9600 3500 9600\nTIME...MOT...LOC 2336Z 270DEG 25KT 3550 9650\nTORNADO...RADAR INDICATED\n$$\n";

    #[test]
    fn assembles_full_product() {
        let (product, report) = assemble(SAMPLE, None).unwrap();
        assert_eq!(product.wmo.as_ref().unwrap().office, "KRAH");
        assert_eq!(product.awips.as_ref().unwrap().code(), "TORRAH");
        assert_eq!(product.segments.len(), 1);
        let seg = &product.segments[0];
        assert_eq!(seg.vtec.len(), 1);
        assert!(seg.ugc.is_some());
        assert!(seg.polygon.is_some());
        assert!(seg.tml.is_some());
        assert_eq!(seg.tags.get("tornado").unwrap(), "RADAR INDICATED");
        assert!(report.issues.is_empty());
    }

    #[test]
    fn missing_wmo_fails_hard() {
        assert!(assemble("no header at all", None).is_err());
    }

    #[test]
    fn short_trailing_segment_is_dropped() {
        let text = format!("{SAMPLE}short\n$$\n");
        let (product, _) = assemble(&text, None).unwrap();
        assert_eq!(product.segments.len(), 1);
    }
}
