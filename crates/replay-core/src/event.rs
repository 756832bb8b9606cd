//! Decoded replay events.

use serde::{Deserialize, Serialize};

use crate::event_type::EventCategory;
use crate::types::{ControlGroupIndex, PlayerId, UnitId};

/// One timestamped occurrence recorded during a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Raw timestamp in the recording's internal clock.
    pub second: u32,
    /// The player the event is attributed to.
    pub player_id: PlayerId,
    /// Category-specific payload.
    pub kind: EventKind,
}

impl Event {
    /// Returns the category tag of this event.
    #[must_use]
    pub const fn category(&self) -> EventCategory {
        match self.kind {
            EventKind::PlayerStats(_) => EventCategory::StatSnapshot,
            EventKind::Command { .. } => EventCategory::Command,
            EventKind::Selection { .. } => EventCategory::Selection,
            EventKind::ControlGroup { .. } => EventCategory::ControlGroup,
            EventKind::GetControlGroup { .. } => EventCategory::GetControlGroup,
        }
    }

    /// Returns the stat snapshot payload, if this is a snapshot event.
    #[must_use]
    pub const fn player_stats(&self) -> Option<&PlayerStats> {
        match &self.kind {
            EventKind::PlayerStats(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Category-specific event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Periodic economy snapshot.
    PlayerStats(PlayerStats),
    /// An ability was issued.
    Command {
        ability_name: String,
        /// Whether the ability places a structure.
        #[serde(default)]
        is_build: bool,
    },
    /// The active selection changed.
    Selection {
        /// Units in the active selection after the event.
        #[serde(default)]
        units: Vec<UnitId>,
    },
    /// A control group was modified.
    ControlGroup {
        group: ControlGroupIndex,
        update: GroupUpdate,
    },
    /// A control group was recalled into the active selection.
    GetControlGroup { group: ControlGroupIndex },
}

/// How a control-group event changes its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupUpdate {
    /// Replace the group with the active selection.
    Set,
    /// Append the active selection to the group.
    Add,
    /// Empty the group.
    Delete,
    /// Like `Set`, removing the units from every other group first.
    SetAndSteal,
    /// Like `Add`, removing the units from every other group first.
    AddAndSteal,
}

impl GroupUpdate {
    /// Whether the update pulls its units out of other groups.
    #[must_use]
    pub const fn steals(self) -> bool {
        matches!(self, Self::SetAndSteal | Self::AddAndSteal)
    }
}

/// Counters carried by a stat snapshot.
///
/// Lost counters are cumulative from match start; the rest are instantaneous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub minerals_current: u32,
    pub vespene_current: u32,
    pub minerals_collection_rate: u32,
    pub vespene_collection_rate: u32,
    pub workers_active_count: u32,
    pub minerals_used_active_forces: u32,
    pub vespene_used_active_forces: u32,
    pub minerals_lost: u32,
    pub vespene_lost: u32,
    pub food_used: u32,
    pub food_made: u32,
}
