//! Data Model: Device, Snapshot and per-protocol attributes
use crate::status::{AttributeStatus, WhenFailed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport protocol reported by the collector
///
/// Anything other than ATA, SCSI or NVMe decodes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceProtocol {
    Ata,
    Scsi,
    Nvme,
    #[default]
    Unknown,
}

impl DeviceProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProtocol::Ata => "ATA",
            DeviceProtocol::Scsi => "SCSI",
            DeviceProtocol::Nvme => "NVMe",
            DeviceProtocol::Unknown => "",
        }
    }
}

impl From<&str> for DeviceProtocol {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            p if p.eq_ignore_ascii_case("ATA") => DeviceProtocol::Ata,
            p if p.eq_ignore_ascii_case("SCSI") => DeviceProtocol::Scsi,
            p if p.eq_ignore_ascii_case("NVMe") => DeviceProtocol::Nvme,
            _ => DeviceProtocol::Unknown,
        }
    }
}

impl From<String> for DeviceProtocol {
    fn from(raw: String) -> Self {
        DeviceProtocol::from(raw.as_str())
    }
}

impl From<DeviceProtocol> for String {
    fn from(protocol: DeviceProtocol) -> Self {
        protocol.as_str().to_string()
    }
}

impl fmt::Display for DeviceProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A storage device and its SMART snapshots, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// World Wide Name; fixed once the device is created
    wwn: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub interface_type: String,
    #[serde(default)]
    pub interface_speed: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub firmware: String,
    /// Rotation rate in RPM, 0 for solid state devices
    #[serde(default, rename = "rotational_speed")]
    pub rotation_speed: i64,
    /// Capacity in bytes
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub form_factor: String,
    #[serde(default)]
    pub smart_support: bool,
    #[serde(default)]
    pub device_protocol: DeviceProtocol,
    /// Value passed to `smartctl -d` when querying the device
    #[serde(default)]
    pub device_type: String,

    /// SMART reads ordered newest first. After compaction at most one remains.
    #[serde(default, rename = "smart_results")]
    pub snapshots: Vec<Snapshot>,
}

impl Device {
    pub fn new(wwn: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            wwn: wwn.into(),
            created_at: now,
            updated_at: now,
            device_name: String::new(),
            manufacturer: String::new(),
            model_name: String::new(),
            interface_type: String::new(),
            interface_speed: String::new(),
            serial_number: String::new(),
            firmware: String::new(),
            rotation_speed: 0,
            capacity: 0,
            form_factor: String::new(),
            smart_support: false,
            device_protocol: DeviceProtocol::Unknown,
            device_type: String::new(),
            snapshots: Vec::new(),
        }
    }

    /// Set the protocol
    pub fn with_protocol(mut self, protocol: DeviceProtocol) -> Self {
        self.device_protocol = protocol;
        self
    }

    /// Append a snapshot. Callers append newest first.
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshots.push(snapshot);
        self
    }

    pub fn wwn(&self) -> &str {
        &self.wwn
    }

    pub fn is_ata(&self) -> bool {
        self.device_protocol == DeviceProtocol::Ata
    }

    pub fn is_scsi(&self) -> bool {
        self.device_protocol == DeviceProtocol::Scsi
    }

    pub fn is_nvme(&self) -> bool {
        self.device_protocol == DeviceProtocol::Nvme
    }

    /// The most recent snapshot, if any
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn current_snapshot_mut(&mut self) -> Option<&mut Snapshot> {
        self.snapshots.first_mut()
    }
}

/// One point-in-time SMART read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the collector captured this read
    #[serde(rename = "date")]
    pub captured_at: DateTime<Utc>,

    /// Overall SMART self-assessment
    #[serde(default)]
    pub smart_status_passed: bool,
    /// Temperature in Celsius
    #[serde(default)]
    pub temperature: i64,
    #[serde(default)]
    pub power_on_hours: i64,
    #[serde(default)]
    pub power_cycle_count: i64,

    #[serde(default)]
    pub ata_attributes: Vec<AtaAttribute>,
    #[serde(default)]
    pub nvme_attributes: Vec<NvmeAttribute>,
    #[serde(default)]
    pub scsi_attributes: Vec<ScsiAttribute>,
}

impl Snapshot {
    pub fn new(captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            smart_status_passed: true,
            temperature: 0,
            power_on_hours: 0,
            power_cycle_count: 0,
            ata_attributes: Vec::new(),
            nvme_attributes: Vec::new(),
            scsi_attributes: Vec::new(),
        }
    }

    pub fn with_ata(mut self, attribute: AtaAttribute) -> Self {
        self.ata_attributes.push(attribute);
        self
    }

    pub fn with_nvme(mut self, attribute: NvmeAttribute) -> Self {
        self.nvme_attributes.push(attribute);
        self
    }

    pub fn with_scsi(mut self, attribute: ScsiAttribute) -> Self {
        self.scsi_attributes.push(attribute);
        self
    }

    /// Whether no attribute of any kind was recorded
    pub fn is_empty(&self) -> bool {
        self.ata_attributes.is_empty()
            && self.nvme_attributes.is_empty()
            && self.scsi_attributes.is_empty()
    }
}

/// ATA SMART attribute, keyed by its numeric id (1-255)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AtaAttribute {
    pub attribute_id: i32,
    #[serde(default)]
    pub name: String,
    /// Normalized value (usually 1-253, higher is better)
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub worst: i64,
    /// Manufacturer threshold for the normalized value
    #[serde(default, rename = "thresh")]
    pub threshold: i64,
    #[serde(default)]
    pub raw_value: i64,
    #[serde(default)]
    pub raw_string: String,
    #[serde(default)]
    pub when_failed: WhenFailed,
    #[serde(default)]
    pub transformed_value: i64,

    #[serde(default)]
    pub status: AttributeStatus,
    #[serde(default)]
    pub status_reason: String,
    /// Annual failure rate of the observed-threshold bucket the value fell in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_rate: Option<f64>,

    /// Earlier readings, newest first
    #[serde(default)]
    pub history: Vec<AtaAttribute>,
}

impl AtaAttribute {
    pub fn new(attribute_id: i32, name: impl Into<String>) -> Self {
        Self {
            attribute_id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    pub fn with_raw_value(mut self, raw_value: i64) -> Self {
        self.raw_value = raw_value;
        self.raw_string = raw_value.to_string();
        self
    }

    pub fn with_when_failed(mut self, when_failed: impl Into<WhenFailed>) -> Self {
        self.when_failed = when_failed.into();
        self
    }

    /// Record a status verdict together with its reason
    pub fn set_status(&mut self, status: AttributeStatus, reason: impl Into<String>) {
        self.status = status;
        self.status_reason = reason.into();
    }
}

/// NVMe health log field, keyed by its name (e.g. `media_errors`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NvmeAttribute {
    pub attribute_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default, rename = "thresh")]
    pub threshold: i64,
    #[serde(default)]
    pub transformed_value: i64,

    #[serde(default)]
    pub status: AttributeStatus,
    #[serde(default)]
    pub status_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_rate: Option<f64>,

    #[serde(default)]
    pub history: Vec<NvmeAttribute>,
}

impl NvmeAttribute {
    pub fn new(attribute_id: impl Into<String>, value: i64) -> Self {
        let attribute_id = attribute_id.into();
        Self {
            name: attribute_id.clone(),
            attribute_id,
            value,
            ..Default::default()
        }
    }
}

/// SCSI error counter or log page field, keyed by its name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScsiAttribute {
    pub attribute_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default, rename = "thresh")]
    pub threshold: i64,
    #[serde(default)]
    pub transformed_value: i64,

    #[serde(default)]
    pub status: AttributeStatus,
    #[serde(default)]
    pub status_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_rate: Option<f64>,

    #[serde(default)]
    pub history: Vec<ScsiAttribute>,
}

impl ScsiAttribute {
    pub fn new(attribute_id: impl Into<String>, value: i64) -> Self {
        let attribute_id = attribute_id.into();
        Self {
            name: attribute_id.clone(),
            attribute_id,
            value,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_protocol_from_str() {
        assert_eq!(DeviceProtocol::from("ATA"), DeviceProtocol::Ata);
        assert_eq!(DeviceProtocol::from("nvme"), DeviceProtocol::Nvme);
        assert_eq!(DeviceProtocol::from("SCSI"), DeviceProtocol::Scsi);
        assert_eq!(DeviceProtocol::from("SAT"), DeviceProtocol::Unknown);
    }

    #[test]
    fn test_device_deserializes_with_defaults() {
        let device: Device = serde_json::from_value(json!({
            "wwn": "0x5000c500673e6b5f",
            "device_protocol": "NVMe",
            "smart_results": [{
                "date": "2024-01-02T03:04:05Z",
                "nvme_attributes": [{ "attribute_id": "media_errors", "value": 0 }]
            }]
        }))
        .unwrap();

        assert_eq!(device.wwn(), "0x5000c500673e6b5f");
        assert!(device.is_nvme());
        let snapshot = device.current_snapshot().unwrap();
        assert_eq!(snapshot.nvme_attributes.len(), 1);
        assert!(snapshot.nvme_attributes[0].history.is_empty());
        assert!(snapshot.nvme_attributes[0].status.is_unset());
    }

    #[test]
    fn test_unknown_protocol_deserializes() {
        let device: Device = serde_json::from_value(json!({
            "wwn": "0x1",
            "device_protocol": "SAT"
        }))
        .unwrap();
        assert_eq!(device.device_protocol, DeviceProtocol::Unknown);
        assert!(device.snapshots.is_empty());
    }

    #[test]
    fn test_ata_attribute_decodes_when_failed() {
        let attribute: AtaAttribute = serde_json::from_value(json!({
            "attribute_id": 5,
            "when_failed": "in_the_past",
            "thresh": 36
        }))
        .unwrap();
        assert_eq!(attribute.when_failed, WhenFailed::FailedInPast);
        assert_eq!(attribute.threshold, 36);
    }
}
