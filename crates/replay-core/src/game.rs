//! Match metadata and the fully materialized event list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::event::{Event, PlayerStats};
use crate::types::{PlayerId, Race, ReplayName};

/// One decoded match, read-only for the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Name of the recording the match came from.
    pub replay_name: ReplayName,
    /// Declared real-world duration in seconds.
    pub length: f64,
    /// Participants.
    pub players: Vec<Player>,
    /// Events in recording order.
    pub events: Vec<Event>,
}

/// Per-player metadata supplied by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pid: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub race: Race,
    /// Average APM per internal-clock minute.
    #[serde(default)]
    pub apm: BTreeMap<u32, f64>,
    /// Running average APM over the whole match.
    #[serde(default)]
    pub avg_apm: f64,
}

impl Match {
    /// Looks up a participant by id.
    #[must_use]
    pub fn player(&self, pid: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.pid == pid)
    }

    /// Iterates the human participants.
    pub fn humans(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_human)
    }

    /// Iterates the events attributed to one player.
    pub fn events_for(&self, pid: PlayerId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.player_id == pid)
    }

    /// Iterates stat snapshots of every player as `(second, stats)`.
    pub fn stat_snapshots(&self) -> impl Iterator<Item = (u32, &PlayerStats)> {
        self.events
            .iter()
            .filter_map(|e| e.player_stats().map(|stats| (e.second, stats)))
    }
}
