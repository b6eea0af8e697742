//! Built-in ATA threshold table
use crate::table::AtaMetadataTable;
use once_cell::sync::Lazy;

static ATA_METADATA_YAML: &str = include_str!("../data/ata_metadata.yaml");

static ATA_METADATA: Lazy<AtaMetadataTable> = Lazy::new(|| {
    AtaMetadataTable::from_yaml(ATA_METADATA_YAML).expect("embedded ATA metadata is valid")
});

/// Process-wide table of observed thresholds for common ATA attributes
pub fn ata_metadata() -> &'static AtaMetadataTable {
    &ATA_METADATA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = ata_metadata();
        assert_eq!(
            table.ids(),
            vec![1, 5, 9, 10, 12, 187, 188, 194, 196, 197, 198, 199]
        );
    }

    #[test]
    fn test_critical_attributes() {
        let table = ata_metadata();
        for id in [5, 10, 187, 188, 197, 198] {
            let entry = table.get(id).unwrap();
            assert!(entry.critical, "attribute {} should be critical", id);
            assert!(!entry.observed_thresholds.is_empty());
        }
        assert!(!table.get(194).unwrap().critical);
    }

    #[test]
    fn test_zero_reading_is_healthy_everywhere() {
        let table = ata_metadata();
        for id in table.ids() {
            let entry = table.get(id).unwrap();
            if let Some(bucket) = entry.bucket_for(0) {
                assert!(bucket.annual_failure_rate < 0.10, "attribute {}", id);
            }
        }
    }
}
