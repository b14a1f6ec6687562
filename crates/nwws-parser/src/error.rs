use thiserror::Error;

/// The parser's error taxonomy, restricted to the `MalformedInput` and
/// `SemanticAnomaly` categories of `SPEC_FULL.md` section 7 — the
/// parser never touches infrastructure, so it never produces a
/// `TransientInfra`/`FatalInfra` variant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("no WMO header found in product")]
    MissingWmo,

    #[error("malformed WMO line: {0}")]
    MalformedWmo(String),

    #[error("unrecognized timezone abbreviation: {0}")]
    UnknownTimezone(String),

    #[error("malformed issuance time string: {0}")]
    MalformedIssuanceTime(String),

    #[error("malformed UGC block: {0}")]
    MalformedUgc(String),

    #[error("malformed VTEC line: {0}")]
    MalformedVtec(String),

    #[error("unrecognized VTEC field `{field}`: `{value}`")]
    UnknownVtecField { field: &'static str, value: String },

    #[error("malformed coordinate group `{0}`: must be 4, 5, or 8 digits")]
    BadCoordinate(String),

    #[error("malformed TIME...MOT...LOC block: {0}")]
    MalformedMotion(String),
}

/// A non-fatal finding collected during assembly. The assembler never
/// aborts on one of these; they accumulate on [`crate::Product`]'s
/// companion [`ParseReport`](crate::assembler::ParseReport) for the
/// caller (and, ultimately, the structured log) to inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseIssue {
    pub segment_index: Option<usize>,
    pub error: ParseError,
}
