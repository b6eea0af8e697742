//! diskhealth core: device model, history compaction and status annotation
//!
//! A device is read from storage with every SMART snapshot, newest first.
//!
//! ```text
//! Device{snapshots: [S0, S1, S2]} → compact() → Device{snapshots: [S0]}
//!                                                  └─ attribute.history = [S1, S2]
//!                                 → annotate(table) → attribute.status / status_reason
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use diskhealth_core::{AtaAttribute, AttributeStatus, Device, DeviceProtocol, NoThresholds, Snapshot};
//!
//! let mut device = Device::new("0x5000c500673e6b5f")
//!     .with_protocol(DeviceProtocol::Ata)
//!     .with_snapshot(Snapshot::new(Utc::now()).with_ata(AtaAttribute::new(5, "Reallocated_Sector_Ct").with_raw_value(10)))
//!     .with_snapshot(Snapshot::new(Utc::now()).with_ata(AtaAttribute::new(5, "Reallocated_Sector_Ct").with_raw_value(20)));
//!
//! device.compact();
//! device.annotate(&NoThresholds);
//!
//! let attribute = &device.snapshots[0].ata_attributes[0];
//! assert_eq!(attribute.history.len(), 1);
//! assert_eq!(attribute.status, AttributeStatus::Passed);
//! ```

pub mod annotate;
pub mod collector;
pub mod data_model;
pub mod history;
pub mod status;

pub use annotate::{NoThresholds, ThresholdRule, ThresholdTable};
pub use collector::SmartInfo;
pub use data_model::{AtaAttribute, Device, DeviceProtocol, NvmeAttribute, ScsiAttribute, Snapshot};
pub use history::{redistribute, HistoryEntry};
pub use status::{AttributeStatus, WhenFailed};
