//! Boundary to the roster that owns groups and time-slots.
//!
//! The timeline engine only reads groups and slots and asks the roster to
//! create or delete slots. A roster may confirm a request immediately by
//! returning the created slot (or `true` for a deletion), or leave it pending
//! and confirm later through the engine's `add_shift`/`remove_shift`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::roster::{Group, GroupId, SlotId, TimeSlot};

/// External collaborator consumed by the timeline engine.
pub trait RosterCollaborator {
    /// Groups in display order
    fn list_groups(&self) -> Vec<Group>;

    fn list_time_slots(&self) -> Vec<TimeSlot>;

    /// Request a new slot. `Ok(Some(slot))` confirms it, `Ok(None)` leaves it pending.
    fn create_time_slot(
        &mut self,
        group: GroupId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Option<TimeSlot>>;

    /// Request deletion. `Ok(true)` confirms it, `Ok(false)` leaves it pending.
    fn delete_time_slot(&mut self, id: SlotId) -> Result<bool>;

    /// Ask the renderer to repaint from the current engine state.
    fn request_redraw(&mut self);
}

/// Serializable snapshot of a roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub groups: Vec<Group>,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

/// Synchronous in-process roster that confirms every request immediately.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    groups: Vec<Group>,
    slots: Vec<TimeSlot>,
    redraw_requests: usize,
}

impl InMemoryRoster {
    pub fn new(groups: Vec<Group>, slots: Vec<TimeSlot>) -> Self {
        Self {
            groups,
            slots,
            redraw_requests: 0,
        }
    }

    pub fn from_snapshot(snapshot: RosterSnapshot) -> Self {
        Self::new(snapshot.groups, snapshot.slots)
    }

    /// Load a JSON roster snapshot
    pub fn load_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster {}", path.display()))?;
        let snapshot: RosterSnapshot = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse roster {}", path.display()))?;
        log::info!(
            "Loaded roster with {} group(s) and {} slot(s)",
            snapshot.groups.len(),
            snapshot.slots.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            groups: self.groups.clone(),
            slots: self.slots.clone(),
        }
    }

    /// Number of redraws requested so far.
    pub fn redraw_requests(&self) -> usize {
        self.redraw_requests
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }
}

impl RosterCollaborator for InMemoryRoster {
    fn list_groups(&self) -> Vec<Group> {
        self.groups.clone()
    }

    fn list_time_slots(&self) -> Vec<TimeSlot> {
        self.slots.clone()
    }

    fn create_time_slot(
        &mut self,
        group: GroupId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Option<TimeSlot>> {
        if !self.groups.iter().any(|g| g.id == group) {
            anyhow::bail!("Unknown group {}", group);
        }
        let slot = TimeSlot::new(group, start, end).map_err(anyhow::Error::msg)?;
        self.slots.push(slot.clone());
        Ok(Some(slot))
    }

    fn delete_time_slot(&mut self, id: SlotId) -> Result<bool> {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        if self.slots.len() == before {
            anyhow::bail!("Unknown time-slot {}", id);
        }
        Ok(true)
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }
}
