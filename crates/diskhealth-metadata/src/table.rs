//! Threshold table keyed by ATA attribute id
//!
//! Tables are YAML documents holding a list of attribute entries:
//!
//! ```yaml
//! - id: 5
//!   display_name: Reallocated Sectors Count
//!   ideal: low
//!   critical: true
//!   display_type: raw
//!   observed_thresholds:
//!     - { low: 0, high: 0, annual_failure_rate: 0.025 }
//! ```

use crate::error::MetadataError;
use crate::threshold::AtaAttributeMetadata;
use diskhealth_core::{ThresholdRule, ThresholdTable};
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup of ATA attribute metadata
#[derive(Debug, Clone, Default)]
pub struct AtaMetadataTable {
    entries: HashMap<i32, AtaAttributeMetadata>,
}

impl AtaMetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting duplicate ids and malformed buckets
    pub fn from_entries(
        entries: impl IntoIterator<Item = AtaAttributeMetadata>,
    ) -> Result<Self, MetadataError> {
        let mut table = Self::new();
        for entry in entries {
            validate(&entry)?;
            if entry.critical && entry.observed_thresholds.is_empty() {
                tracing::warn!(
                    attribute_id = entry.id,
                    "critical attribute has no observed thresholds; it will always warn"
                );
            }
            if table.entries.contains_key(&entry.id) {
                return Err(MetadataError::DuplicateAttribute(entry.id));
            }
            table.entries.insert(entry.id, entry);
        }
        Ok(table)
    }

    /// Load a table from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, MetadataError> {
        let entries: Vec<AtaAttributeMetadata> = serde_yaml::from_str(yaml)?;
        Self::from_entries(entries)
    }

    /// Load a table from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_yaml(&yaml)?;
        tracing::info!(path = %path.display(), entries = table.len(), "loaded ATA metadata");
        Ok(table)
    }

    pub fn get(&self, attribute_id: i32) -> Option<&AtaAttributeMetadata> {
        self.entries.get(&attribute_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attribute ids in ascending order
    pub fn ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl ThresholdTable for AtaMetadataTable {
    fn rule(&self, attribute_id: i32) -> Option<&dyn ThresholdRule> {
        self.get(attribute_id).map(|m| m as &dyn ThresholdRule)
    }
}

fn validate(entry: &AtaAttributeMetadata) -> Result<(), MetadataError> {
    for bucket in &entry.observed_thresholds {
        if bucket.low > bucket.high {
            return Err(MetadataError::InvertedBucket {
                id: entry.id,
                low: bucket.low,
                high: bucket.high,
            });
        }
        if !(0.0..=1.0).contains(&bucket.annual_failure_rate) {
            return Err(MetadataError::InvalidFailureRate {
                id: entry.id,
                rate: bucket.annual_failure_rate,
            });
        }
    }
    Ok(())
}
