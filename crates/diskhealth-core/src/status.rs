//! Attribute status and the legacy when-failed indicator
//!
//! `smartctl` reports a free-text `when_failed` column for ATA attributes.
//! It is decoded once, at deserialization, into [`WhenFailed`] so the
//! annotator matches on a closed set instead of comparing strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel reported while an attribute is below its manufacturer threshold.
pub const WHEN_FAILED_FAILING_NOW: &str = "FAILING_NOW";

/// Sentinel reported when an attribute crossed its threshold at some point.
pub const WHEN_FAILED_IN_THE_PAST: &str = "IN_THE_PAST";

/// Derived health status of a single attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeStatus {
    #[default]
    Unset,
    Passed,
    Warning,
    Failed,
}

impl AttributeStatus {
    pub fn is_unset(&self) -> bool {
        matches!(self, AttributeStatus::Unset)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeStatus::Unset => "unset",
            AttributeStatus::Passed => "passed",
            AttributeStatus::Warning => "warning",
            AttributeStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for AttributeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded `when_failed` indicator
///
/// Unrecognized values keep their original text so they serialize back
/// unchanged, but the annotator leaves them unclassified.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WhenFailed {
    #[default]
    None,
    FailingNow,
    FailedInPast,
    Unrecognized(String),
}

impl WhenFailed {
    /// Decode a raw indicator, ignoring ASCII case and surrounding whitespace
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            WhenFailed::None
        } else if trimmed.eq_ignore_ascii_case(WHEN_FAILED_FAILING_NOW) {
            WhenFailed::FailingNow
        } else if trimmed.eq_ignore_ascii_case(WHEN_FAILED_IN_THE_PAST) {
            WhenFailed::FailedInPast
        } else {
            WhenFailed::Unrecognized(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WhenFailed::None => "",
            WhenFailed::FailingNow => WHEN_FAILED_FAILING_NOW,
            WhenFailed::FailedInPast => WHEN_FAILED_IN_THE_PAST,
            WhenFailed::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for WhenFailed {
    fn from(raw: String) -> Self {
        WhenFailed::parse(&raw)
    }
}

impl From<&str> for WhenFailed {
    fn from(raw: &str) -> Self {
        WhenFailed::parse(raw)
    }
}

impl From<WhenFailed> for String {
    fn from(value: WhenFailed) -> Self {
        match value {
            WhenFailed::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}
