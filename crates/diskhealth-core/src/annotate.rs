//! Threshold annotation of the current ATA snapshot
//!
//! Status precedence for each attribute:
//!
//! ```text
//! when_failed indicator → threshold rule → default "passed"
//! ```
//!
//! A later step overwrites an earlier one, except the default which only
//! fills an attribute nothing else classified.

use crate::data_model::{AtaAttribute, Device};
use crate::status::{AttributeStatus, WhenFailed};

pub const REASON_FAILING_NOW: &str = "Attribute is failing manufacturer SMART threshold";
pub const REASON_FAILED_IN_PAST: &str =
    "Attribute has previously failed manufacturer SMART threshold";

/// Per-attribute rule that classifies an observed value against thresholds
pub trait ThresholdRule {
    /// Decide and record the observed-threshold status on `attribute`.
    /// Leaving the status untouched means the rule has no opinion.
    fn apply(&self, attribute: &mut AtaAttribute);
}

/// Read-only lookup of threshold rules by ATA attribute id
pub trait ThresholdTable: Send + Sync {
    fn rule(&self, attribute_id: i32) -> Option<&dyn ThresholdRule>;
}

/// A table with no entries; only the when-failed indicator applies
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThresholds;

impl ThresholdTable for NoThresholds {
    fn rule(&self, _attribute_id: i32) -> Option<&dyn ThresholdRule> {
        None
    }
}

impl Device {
    /// Annotate the ATA attributes of the current snapshot with a status.
    ///
    /// Call after [`Device::compact`]. Devices that are not ATA are left
    /// untouched: observed thresholds only exist for ATA attributes.
    pub fn annotate<T: ThresholdTable + ?Sized>(&mut self, table: &T) {
        if !self.is_ata() {
            return;
        }

        let wwn = self.wwn().to_string();
        let Some(current) = self.current_snapshot_mut() else {
            return;
        };

        tracing::debug!(
            wwn = %wwn,
            attributes = current.ata_attributes.len(),
            "applying threshold metadata"
        );

        for attribute in current.ata_attributes.iter_mut() {
            annotate_attribute(attribute, table);
        }
    }
}

fn annotate_attribute<T: ThresholdTable + ?Sized>(attribute: &mut AtaAttribute, table: &T) {
    match attribute.when_failed {
        WhenFailed::FailingNow => {
            attribute.set_status(AttributeStatus::Failed, REASON_FAILING_NOW);
        }
        WhenFailed::FailedInPast => {
            attribute.set_status(AttributeStatus::Warning, REASON_FAILED_IN_PAST);
        }
        WhenFailed::None | WhenFailed::Unrecognized(_) => {}
    }

    if let Some(rule) = table.rule(attribute.attribute_id) {
        rule.apply(attribute);
        tracing::trace!(
            attribute_id = attribute.attribute_id,
            status = %attribute.status,
            "threshold rule applied"
        );
    }

    if attribute.status.is_unset() {
        attribute.set_status(AttributeStatus::Passed, "");
    }
}
