//! Collector payload mapping
//!
//! The collector ships the `smartctl --json` info section for each device.
//! Only the fields describing the device itself are copied here; payload
//! validation is the collector's job.

use crate::data_model::{Device, DeviceProtocol};
use serde::{Deserialize, Serialize};

/// Device information section of a collector payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartInfo {
    pub device: DeviceInfo,
    pub vendor: String,
    pub model_name: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub user_capacity: UserCapacity,
    pub rotation_rate: i64,
    pub form_factor: FormFactor,
    pub interface_speed: InterfaceSpeed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub name: String,
    pub info_name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub protocol: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCapacity {
    pub blocks: i64,
    pub bytes: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFactor {
    pub ata_value: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSpeed {
    pub max: LinkSpeed,
    pub current: LinkSpeed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSpeed {
    pub sata_value: i64,
    pub string: String,
    pub units_per_second: i64,
    pub bits_per_unit: i64,
}

impl Device {
    /// Copy collector-reported device details onto this device.
    ///
    /// An empty vendor keeps the manufacturer already on record.
    pub fn update_from_collector(&mut self, info: &SmartInfo) {
        self.interface_speed = info.interface_speed.current.string.clone();
        self.firmware = info.firmware_version.clone();
        self.rotation_speed = info.rotation_rate;
        self.capacity = info.user_capacity.bytes;
        self.form_factor = info.form_factor.name.clone();
        self.device_protocol = DeviceProtocol::from(info.device.protocol.as_str());
        self.device_type = info.device.device_type.clone();
        if !info.vendor.is_empty() {
            self.manufacturer = info.vendor.clone();
        }
    }
}
