//! diskhealth metadata: observed-threshold rules for ATA attributes
//!
//! Provides the threshold table consumed by
//! [`Device::annotate`](diskhealth_core::Device::annotate): a built-in
//! table compiled into the binary, or one loaded from YAML.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use diskhealth_core::{AtaAttribute, AttributeStatus, Device, DeviceProtocol, Snapshot};
//! use diskhealth_metadata::ata_metadata;
//!
//! let mut device = Device::new("0x5000c500673e6b5f")
//!     .with_protocol(DeviceProtocol::Ata)
//!     .with_snapshot(Snapshot::new(Utc::now()).with_ata(
//!         AtaAttribute::new(197, "Current_Pending_Sector").with_raw_value(4),
//!     ));
//!
//! device.compact();
//! device.annotate(ata_metadata());
//!
//! assert_eq!(device.snapshots[0].ata_attributes[0].status, AttributeStatus::Failed);
//! ```

pub mod ata;
pub mod error;
pub mod table;
pub mod threshold;

pub use ata::ata_metadata;
pub use error::MetadataError;
pub use table::AtaMetadataTable;
pub use threshold::{AtaAttributeMetadata, DisplayType, Ideal, ObservedThreshold};
