//! Flat per-player statistics records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game::{Match, Player};
use crate::interval::Phases;
use crate::types::PlayerId;

/// One statistic value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    /// No data for this phase.
    Missing,
    Count(u64),
    Number(f64),
    /// Most and second most frequent names.
    Pair(Option<String>, Option<String>),
}

impl From<f64> for StatValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for StatValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

impl From<usize> for StatValue {
    fn from(value: usize) -> Self {
        Self::Count(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

impl From<(Option<String>, Option<String>)> for StatValue {
    fn from((first, second): (Option<String>, Option<String>)) -> Self {
        Self::Pair(first, second)
    }
}

/// Named statistics, keyed `{metric}_{phase}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatMap(BTreeMap<String, StatValue>);

impl StatMap {
    /// Inserts one key per phase for the metric `stem`.
    pub fn insert_phases<V: Into<StatValue>>(&mut self, stem: &str, values: Phases<V>) {
        for (phase, value) in values {
            self.0
                .insert(format!("{stem}_{}", phase.suffix()), value.into());
        }
    }

    /// Looks up a statistic by its full key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Moves every statistic of `other` into this map.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }
}

/// All statistics of one player in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub replay_name: String,
    pub player_username: String,
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub stats: StatMap,
}

impl StatisticsRecord {
    /// Creates an empty record for `player` in `game`.
    #[must_use]
    pub fn new(game: &Match, player: &Player) -> Self {
        Self {
            replay_name: game.replay_name.to_string(),
            player_username: player.name.clone(),
            player_id: player.pid,
            stats: StatMap::default(),
        }
    }

    /// Looks up a statistic by its full key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StatValue> {
        self.stats.get(key)
    }

    /// Numeric value of a statistic, `None` if missing or non-numeric.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "counts are small group tallies"
    )]
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            StatValue::Number(value) => Some(*value),
            StatValue::Count(value) => Some(*value as f64),
            StatValue::Missing | StatValue::Pair(..) => None,
        }
    }
}
