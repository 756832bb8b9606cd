//! Control group reconstruction.
//!
//! Replays record how groups change, not what they contain. The history is
//! rebuilt with a single left fold over the match's events in timestamp order:
//! each human player carries an explicit selection state (active selection
//! plus groups 0-9), and every control-group event appends a snapshot of
//! groups 1-9 keyed by the event's raw timestamp.

use std::collections::{BTreeMap, HashMap};

use crate::event::{Event, EventKind, GroupUpdate};
use crate::game::Match;
use crate::types::{ControlGroupIndex, PlayerId, UnitId};

const GROUP_SLOTS: usize = 10;

/// Contents of groups 1-9 at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSnapshot {
    groups: [Vec<UnitId>; GROUP_SLOTS - 1],
}

impl GroupSnapshot {
    /// Units in a numbered group. Slot 0 is never tracked and reads empty.
    #[must_use]
    pub fn units(&self, group: ControlGroupIndex) -> &[UnitId] {
        if !group.is_numbered() {
            return &[];
        }
        &self.groups[usize::from(group.value()) - 1]
    }

    /// Number of groups holding at least one unit.
    #[must_use]
    pub fn active_groups(&self) -> usize {
        self.groups.iter().filter(|units| !units.is_empty()).count()
    }
}

/// Selection state of one player while folding.
#[derive(Debug, Clone, Default)]
struct SelectionState {
    active: Vec<UnitId>,
    groups: [Vec<UnitId>; GROUP_SLOTS],
}

impl SelectionState {
    fn apply(&mut self, kind: &EventKind) {
        match kind {
            EventKind::Selection { units } => {
                self.active.clone_from(units);
            }
            EventKind::GetControlGroup { group } => {
                self.active.clone_from(&self.groups[usize::from(group.value())]);
            }
            EventKind::ControlGroup { group, update } => {
                let target = usize::from(group.value());
                if update.steals() {
                    for (slot, units) in self.groups.iter_mut().enumerate() {
                        if slot != target {
                            units.retain(|unit| !self.active.contains(unit));
                        }
                    }
                }

                let units = &mut self.groups[target];
                match update {
                    GroupUpdate::Set | GroupUpdate::SetAndSteal => units.clone_from(&self.active),
                    GroupUpdate::Add | GroupUpdate::AddAndSteal => {
                        for unit in &self.active {
                            if !units.contains(unit) {
                                units.push(*unit);
                            }
                        }
                    }
                    GroupUpdate::Delete => units.clear(),
                }
            }
            EventKind::PlayerStats(_) | EventKind::Command { .. } => {}
        }
    }

    fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            groups: std::array::from_fn(|slot| self.groups[slot + 1].clone()),
        }
    }
}

/// Fold accumulator: live state plus emitted snapshots per player.
#[derive(Debug, Default)]
struct Tracker {
    states: HashMap<PlayerId, SelectionState>,
    history: HashMap<PlayerId, BTreeMap<u32, GroupSnapshot>>,
}

impl Tracker {
    fn track(mut self, pid: PlayerId) -> Self {
        let state = SelectionState::default();
        self.history
            .entry(pid)
            .or_default()
            .insert(0, state.snapshot());
        self.states.insert(pid, state);
        self
    }

    fn step(mut self, event: &Event) -> Self {
        let Some(state) = self.states.get_mut(&event.player_id) else {
            return self;
        };

        state.apply(&event.kind);
        if matches!(event.kind, EventKind::ControlGroup { .. }) {
            self.history
                .entry(event.player_id)
                .or_default()
                .insert(event.second, state.snapshot());
        }
        self
    }
}

/// Per-player control group snapshots for one match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlGroupHistory {
    players: HashMap<PlayerId, BTreeMap<u32, GroupSnapshot>>,
}

impl ControlGroupHistory {
    /// Replays the match's selection events for every human player.
    pub fn build(game: &Match) -> Self {
        let mut ordered: Vec<&Event> = game.events.iter().collect();
        ordered.sort_by_key(|event| event.second);

        let tracker = game
            .humans()
            .map(|player| player.pid)
            .fold(Tracker::default(), Tracker::track);
        let tracker = ordered.into_iter().fold(tracker, Tracker::step);

        tracing::debug!(
            replay = %game.replay_name,
            players = tracker.history.len(),
            snapshots = tracker.history.values().map(BTreeMap::len).sum::<usize>(),
            "rebuilt control group history"
        );

        Self {
            players: tracker.history,
        }
    }

    /// Whether the player's groups were tracked.
    #[must_use]
    pub fn is_tracked(&self, pid: PlayerId) -> bool {
        self.players.contains_key(&pid)
    }

    /// Snapshot recorded for the player at a raw timestamp.
    #[must_use]
    pub fn snapshot(&self, pid: PlayerId, second: u32) -> Option<&GroupSnapshot> {
        self.players.get(&pid)?.get(&second)
    }
}
