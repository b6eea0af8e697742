//! File-based round trip through the batch pipeline.

use std::io::Write;
use std::sync::Arc;

use diskhealth_cli::{process_devices, read_collector_payloads, read_devices, render_devices};
use diskhealth_metadata::{ata_metadata, AtaMetadataTable};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn write_json(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

fn export() -> Value {
    json!([
        {
            "wwn": "0x5000c500a1b2c3d4",
            "device_protocol": "ATA",
            "smart_results": [
                { "date": "2024-04-03T00:00:00Z", "ata_attributes": [
                    { "attribute_id": 5, "raw_value": 40 },
                    { "attribute_id": 9, "raw_value": 20000, "when_failed": "" }
                ] },
                { "date": "2024-04-02T00:00:00Z", "ata_attributes": [
                    { "attribute_id": 5, "raw_value": 12 },
                    { "attribute_id": 9, "raw_value": 19976 }
                ] },
                { "date": "2024-04-01T00:00:00Z", "ata_attributes": [
                    { "attribute_id": 9, "raw_value": 19952 }
                ] }
            ]
        },
        {
            "wwn": "eui.0025385b71b07e2d",
            "device_protocol": "NVMe",
            "smart_results": [
                { "date": "2024-04-03T00:00:00Z", "nvme_attributes": [{ "attribute_id": "media_errors", "value": 0 }] },
                { "date": "2024-04-02T00:00:00Z", "nvme_attributes": [{ "attribute_id": "media_errors", "value": 0 }] }
            ]
        }
    ])
}

#[tokio::test]
async fn test_export_round_trip() {
    let input = write_json(&export());
    let devices = read_devices(input.path()).unwrap();
    assert_eq!(devices.len(), 2);

    let processed = process_devices(
        devices,
        Default::default(),
        Arc::new(ata_metadata().clone()),
        4,
    )
    .await
    .unwrap();

    let rendered: Value = serde_json::from_str(&render_devices(&processed).unwrap()).unwrap();

    let ata = &rendered[0]["smart_results"];
    assert_eq!(ata.as_array().unwrap().len(), 1);
    assert_eq!(ata[0]["ata_attributes"][0]["status"], "failed");
    assert_eq!(ata[0]["ata_attributes"][0]["history"][0]["raw_value"], 12);
    assert_eq!(ata[0]["ata_attributes"][1]["status"], "passed");
    assert_eq!(ata[0]["ata_attributes"][1]["history"].as_array().unwrap().len(), 2);

    let nvme = &rendered[1]["smart_results"][0]["nvme_attributes"][0];
    assert_eq!(nvme["status"], "unset");
    assert_eq!(nvme["history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_collector_payload_applied_by_wwn() {
    let input = write_json(&export());
    let collector = write_json(&json!({
        "0x5000c500a1b2c3d4": {
            "device": { "name": "/dev/sdb", "type": "sat", "protocol": "ATA" },
            "vendor": "",
            "firmware_version": "SN04",
            "user_capacity": { "bytes": 8001563222016i64 },
            "rotation_rate": 7200
        },
        "0xdeadbeef": { "firmware_version": "unused" }
    }));

    let devices = read_devices(input.path()).unwrap();
    let payloads = read_collector_payloads(collector.path()).unwrap();
    assert_eq!(payloads.len(), 2);

    let processed = process_devices(devices, payloads, Arc::new(AtaMetadataTable::new()), 1)
        .await
        .unwrap();

    assert_eq!(processed[0].firmware, "SN04");
    assert_eq!(processed[0].rotation_speed, 7200);
    assert_eq!(processed[0].capacity, 8001563222016);
    assert!(processed[1].firmware.is_empty());
}

#[test]
fn test_missing_input_reports_path() {
    let err = read_devices(std::path::Path::new("/nonexistent/devices.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/devices.json"));
}
