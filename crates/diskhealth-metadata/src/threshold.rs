//! Observed-threshold rule for a single ATA attribute
//!
//! Each attribute carries buckets of observed values with the annual
//! failure rate measured for drives whose value fell in that bucket.
//! The bucket the current value falls in decides the status.

use diskhealth_core::{AtaAttribute, AttributeStatus, ThresholdRule};
use serde::{Deserialize, Serialize};

/// Failure rate at or above which a critical attribute fails
pub const CRITICAL_FAILURE_RATE: f64 = 0.10;

/// Failure rate at or above which a non-critical attribute fails
pub const FAILURE_RATE: f64 = 0.20;

/// Failure rate at or above which a non-critical attribute warns
pub const WARNING_FAILURE_RATE: f64 = 0.10;

pub const REASON_CRITICAL_FAILURE_RATE: &str =
    "Observed Failure Rate for Critical Attribute is greater than 10%";
pub const REASON_FAILURE_RATE: &str = "Observed Failure Rate for Attribute is greater than 20%";
pub const REASON_WARNING_FAILURE_RATE: &str =
    "Observed Failure Rate for Attribute is greater than 10%";
pub const REASON_UNKNOWN_CRITICAL: &str =
    "Could not determine Observed Failure Rate for Critical Attribute";

/// Which reading of the attribute the thresholds are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    Raw,
    Normalized,
    Transformed,
}

/// Direction in which the attribute value is healthier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ideal {
    Low,
    High,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// A bucket of observed values and the failure rate seen in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedThreshold {
    pub low: i64,
    pub high: i64,
    pub annual_failure_rate: f64,
    /// Confidence interval of the failure rate
    #[serde(default)]
    pub error_interval: Vec<f64>,
}

impl ObservedThreshold {
    pub fn new(low: i64, high: i64, annual_failure_rate: f64) -> Self {
        Self {
            low,
            high,
            annual_failure_rate,
            error_interval: Vec::new(),
        }
    }

    /// Buckets are half-open `(low, high]`, except a single-value bucket
    /// `[v, v]` which matches exactly `v`.
    pub fn contains(&self, value: i64) -> bool {
        (self.low == self.high && value == self.low) || (self.low < value && value <= self.high)
    }
}

/// Threshold metadata of one ATA attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtaAttributeMetadata {
    pub id: i32,
    pub display_name: String,
    #[serde(default)]
    pub ideal: Ideal,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_type: DisplayType,
    #[serde(default)]
    pub observed_thresholds: Vec<ObservedThreshold>,
}

impl AtaAttributeMetadata {
    pub fn new(id: i32, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            ideal: Ideal::Unspecified,
            critical: false,
            description: String::new(),
            display_type: DisplayType::Raw,
            observed_thresholds: Vec::new(),
        }
    }

    /// Mark the attribute as critical
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = display_type;
        self
    }

    pub fn with_threshold(mut self, threshold: ObservedThreshold) -> Self {
        self.observed_thresholds.push(threshold);
        self
    }

    /// The reading the thresholds are compared against
    pub fn observed_value(&self, attribute: &AtaAttribute) -> i64 {
        match self.display_type {
            DisplayType::Raw => attribute.raw_value,
            DisplayType::Normalized => attribute.value,
            DisplayType::Transformed => attribute.transformed_value,
        }
    }

    /// First bucket containing `value`
    pub fn bucket_for(&self, value: i64) -> Option<&ObservedThreshold> {
        self.observed_thresholds.iter().find(|t| t.contains(value))
    }

    fn classify(&self, failure_rate: f64) -> (AttributeStatus, &'static str) {
        if self.critical {
            if failure_rate >= CRITICAL_FAILURE_RATE {
                return (AttributeStatus::Failed, REASON_CRITICAL_FAILURE_RATE);
            }
        } else if failure_rate >= FAILURE_RATE {
            return (AttributeStatus::Failed, REASON_FAILURE_RATE);
        } else if failure_rate >= WARNING_FAILURE_RATE {
            return (AttributeStatus::Warning, REASON_WARNING_FAILURE_RATE);
        }
        (AttributeStatus::Passed, "")
    }
}

impl ThresholdRule for AtaAttributeMetadata {
    fn apply(&self, attribute: &mut AtaAttribute) {
        let value = self.observed_value(attribute);
        match self.bucket_for(value) {
            Some(bucket) => {
                attribute.failure_rate = Some(bucket.annual_failure_rate);
                let (status, reason) = self.classify(bucket.annual_failure_rate);
                attribute.set_status(status, reason);
            }
            None if self.critical => {
                attribute.set_status(AttributeStatus::Warning, REASON_UNKNOWN_CRITICAL);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reallocated() -> AtaAttributeMetadata {
        AtaAttributeMetadata::new(5, "Reallocated Sectors Count")
            .critical()
            .with_threshold(ObservedThreshold::new(0, 0, 0.025))
            .with_threshold(ObservedThreshold::new(1, 1, 0.027))
            .with_threshold(ObservedThreshold::new(1, 4, 0.07))
            .with_threshold(ObservedThreshold::new(4, 16, 0.12))
    }

    fn load_cycles() -> AtaAttributeMetadata {
        AtaAttributeMetadata::new(193, "Load Cycle Count")
            .with_threshold(ObservedThreshold::new(0, 1000, 0.02))
            .with_threshold(ObservedThreshold::new(1000, 10000, 0.11))
            .with_threshold(ObservedThreshold::new(10000, 100000, 0.25))
    }

    fn attribute(raw: i64) -> AtaAttribute {
        AtaAttribute::new(5, "Reallocated_Sector_Ct").with_raw_value(raw)
    }

    #[test]
    fn test_bucket_bounds() {
        let exact = ObservedThreshold::new(1, 1, 0.0);
        assert!(exact.contains(1));
        assert!(!exact.contains(2));

        let range = ObservedThreshold::new(1, 4, 0.0);
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }

    #[test]
    fn test_critical_low_rate_passes() {
        let mut attr = attribute(1);
        reallocated().apply(&mut attr);
        assert_eq!(attr.status, AttributeStatus::Passed);
        assert_eq!(attr.failure_rate, Some(0.027));
        assert!(attr.status_reason.is_empty());
    }

    #[test]
    fn test_critical_high_rate_fails() {
        let mut attr = attribute(10);
        reallocated().apply(&mut attr);
        assert_eq!(attr.status, AttributeStatus::Failed);
        assert_eq!(attr.status_reason, REASON_CRITICAL_FAILURE_RATE);
    }

    #[test]
    fn test_critical_out_of_range_warns() {
        let mut attr = attribute(5000);
        reallocated().apply(&mut attr);
        assert_eq!(attr.status, AttributeStatus::Warning);
        assert_eq!(attr.status_reason, REASON_UNKNOWN_CRITICAL);
        assert_eq!(attr.failure_rate, None);
    }

    #[test]
    fn test_non_critical_tiers() {
        let rule = load_cycles();

        let mut low = attribute(500);
        rule.apply(&mut low);
        assert_eq!(low.status, AttributeStatus::Passed);

        let mut mid = attribute(5000);
        rule.apply(&mut mid);
        assert_eq!(mid.status, AttributeStatus::Warning);
        assert_eq!(mid.status_reason, REASON_WARNING_FAILURE_RATE);

        let mut high = attribute(50000);
        rule.apply(&mut high);
        assert_eq!(high.status, AttributeStatus::Failed);
        assert_eq!(high.status_reason, REASON_FAILURE_RATE);
    }

    #[test]
    fn test_non_critical_out_of_range_untouched() {
        let mut attr = attribute(1_000_000);
        load_cycles().apply(&mut attr);
        assert!(attr.status.is_unset());
    }

    #[test]
    fn test_display_type_selects_reading() {
        let rule = AtaAttributeMetadata::new(1, "Read Error Rate")
            .with_display_type(DisplayType::Normalized)
            .with_threshold(ObservedThreshold::new(0, 50, 0.3));

        let mut attr = AtaAttribute::new(1, "Raw_Read_Error_Rate")
            .with_value(40)
            .with_raw_value(900);
        rule.apply(&mut attr);
        assert_eq!(attr.status, AttributeStatus::Failed);
    }
}
