//! History compaction
//!
//! A device is loaded with every stored SMART read, newest first. Compaction
//! keeps only the newest read and hangs the older readings of each attribute
//! off that attribute's `history`, so a consumer gets one current snapshot
//! plus a per-attribute trail.

use crate::data_model::{AtaAttribute, Device, NvmeAttribute, ScsiAttribute};
use std::collections::HashMap;
use std::hash::Hash;

/// An attribute that can carry earlier readings of itself
pub trait HistoryEntry: Sized {
    /// Identifier unique within one snapshot's collection
    type Id: Eq + Hash + Clone;

    fn history_id(&self) -> &Self::Id;

    fn history_mut(&mut self) -> &mut Vec<Self>;
}

impl HistoryEntry for AtaAttribute {
    type Id = i32;

    fn history_id(&self) -> &i32 {
        &self.attribute_id
    }

    fn history_mut(&mut self) -> &mut Vec<Self> {
        &mut self.history
    }
}

impl HistoryEntry for NvmeAttribute {
    type Id = String;

    fn history_id(&self) -> &String {
        &self.attribute_id
    }

    fn history_mut(&mut self) -> &mut Vec<Self> {
        &mut self.history
    }
}

impl HistoryEntry for ScsiAttribute {
    type Id = String;

    fn history_id(&self) -> &String {
        &self.attribute_id
    }

    fn history_mut(&mut self) -> &mut Vec<Self> {
        &mut self.history
    }
}

/// Group historical readings by id and attach each group to the matching
/// current attribute.
///
/// `historical` yields one collection per older snapshot, newest first; each
/// group keeps that order. Current attributes without older readings keep
/// their (empty) history. Nothing is grouped when `current` is empty.
pub fn redistribute<A, I>(current: &mut [A], historical: I)
where
    A: HistoryEntry,
    I: IntoIterator<Item = Vec<A>>,
{
    if current.is_empty() {
        return;
    }

    let mut grouped: HashMap<A::Id, Vec<A>> = HashMap::new();
    for readings in historical {
        for reading in readings {
            grouped
                .entry(reading.history_id().clone())
                .or_default()
                .push(reading);
        }
    }

    for attribute in current.iter_mut() {
        if let Some(readings) = grouped.remove(attribute.history_id()) {
            *attribute.history_mut() = readings;
        }
    }
}

impl Device {
    /// Collapse all snapshots into the newest one.
    ///
    /// Requires `snapshots` ordered newest first. With zero or one snapshot
    /// this does nothing, so compacting twice is the same as compacting once.
    pub fn compact(&mut self) {
        if self.snapshots.len() <= 1 {
            return;
        }

        let historical = self.snapshots.split_off(1);
        tracing::debug!(
            wwn = %self.wwn(),
            historical = historical.len(),
            "compacting snapshot history"
        );

        let mut ata = Vec::with_capacity(historical.len());
        let mut nvme = Vec::with_capacity(historical.len());
        let mut scsi = Vec::with_capacity(historical.len());
        for snapshot in historical {
            ata.push(snapshot.ata_attributes);
            nvme.push(snapshot.nvme_attributes);
            scsi.push(snapshot.scsi_attributes);
        }

        let current = &mut self.snapshots[0];
        redistribute(&mut current.ata_attributes, ata);
        redistribute(&mut current.nvme_attributes, nvme);
        redistribute(&mut current.scsi_attributes, scsi);
    }
}
