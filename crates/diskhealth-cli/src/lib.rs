//! Batch processing of device health records
//!
//! Reads devices as the persistence layer exports them (every snapshot,
//! newest first), optionally refreshes device details from collector
//! payloads, then compacts and annotates each device on its own task.

use anyhow::{Context, Result};
use diskhealth_core::{Device, SmartInfo};
use diskhealth_metadata::AtaMetadataTable;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Collector payloads keyed by device WWN
pub type CollectorPayloads = HashMap<String, SmartInfo>;

/// Apply the collector payload (if any), compact, then annotate one device
pub fn process_device(
    mut device: Device,
    info: Option<&SmartInfo>,
    table: &AtaMetadataTable,
) -> Device {
    if let Some(info) = info {
        device.update_from_collector(info);
    }
    device.compact();
    device.annotate(table);
    device
}

/// Process every device with at most `workers` running at once.
///
/// Each task owns its device until it hands it back. Output order matches
/// input order.
pub async fn process_devices(
    devices: Vec<Device>,
    mut payloads: CollectorPayloads,
    table: Arc<AtaMetadataTable>,
    workers: usize,
) -> Result<Vec<Device>> {
    let total = devices.len();
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = JoinSet::new();

    for (index, device) in devices.into_iter().enumerate() {
        let info = payloads.remove(device.wwn());
        let table = Arc::clone(&table);
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .context("worker pool closed")?;

        tasks.spawn(async move {
            let device = process_device(device, info.as_ref(), &table);
            drop(permit);
            (index, device)
        });
    }

    let mut processed: Vec<Option<Device>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, device) = joined.context("device task panicked")?;
        processed[index] = Some(device);
    }

    if !payloads.is_empty() {
        tracing::warn!(
            unmatched = payloads.len(),
            "collector payloads without a matching device were ignored"
        );
    }

    Ok(processed.into_iter().flatten().collect())
}

/// Load devices from a JSON array
pub fn read_devices(path: &Path) -> Result<Vec<Device>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading devices from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing devices in {}", path.display()))
}

/// Load collector payloads from a JSON object keyed by WWN
pub fn read_collector_payloads(path: &Path) -> Result<CollectorPayloads> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading collector payloads from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing collector payloads in {}", path.display()))
}

/// Serialize devices as pretty JSON
pub fn render_devices(devices: &[Device]) -> Result<String> {
    serde_json::to_string_pretty(devices).context("serializing devices")
}
