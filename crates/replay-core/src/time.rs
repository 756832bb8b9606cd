//! Conversion from the recording's internal clock to real match time.
//!
//! Tracker timestamps drift from wall-clock time. The drift is assumed to be
//! linear, so the last stat snapshot is pinned to the declared match length
//! and every other timestamp is scaled by the same factor.

use crate::error::AnalysisError;
use crate::game::Match;

/// Linear mapping from internal seconds to real seconds for one match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    last_internal: u32,
    duration: f64,
}

impl TimeScale {
    /// Derives the scale from the match's final stat snapshot.
    pub fn for_match(game: &Match) -> Result<Self, AnalysisError> {
        let last_internal = game
            .stat_snapshots()
            .last()
            .map(|(second, _)| second)
            .ok_or_else(|| AnalysisError::NoStatSnapshots {
                replay: game.replay_name.to_string(),
            })?;

        if last_internal == 0 {
            return Err(AnalysisError::ZeroInternalClock {
                replay: game.replay_name.to_string(),
            });
        }

        Ok(Self {
            last_internal,
            duration: game.length,
        })
    }

    /// Declared match length in real seconds.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Corrected real time of a raw event timestamp.
    #[must_use]
    pub fn real_time(&self, second: u32) -> f64 {
        self.rescale(f64::from(second))
    }

    /// Applies the scale to any quantity measured on the internal clock.
    ///
    /// Unit-agnostic: internal minutes come back as real minutes.
    #[must_use]
    pub fn rescale(&self, internal: f64) -> f64 {
        internal / f64::from(self.last_internal) * self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, EventKind, PlayerStats};
    use crate::types::ReplayName;

    fn match_with(length: f64, events: Vec<Event>) -> Match {
        Match {
            replay_name: ReplayName::new("scale.SC2Replay").unwrap(),
            length,
            players: Vec::new(),
            events,
        }
    }

    fn snapshot(second: u32, player_id: u8) -> Event {
        Event {
            second,
            player_id,
            kind: EventKind::PlayerStats(PlayerStats::default()),
        }
    }

    fn selection(second: u32) -> Event {
        Event {
            second,
            player_id: 1,
            kind: EventKind::Selection { units: Vec::new() },
        }
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "endpoints map exactly")]
    fn last_snapshot_maps_to_declared_length() {
        let game = match_with(
            600.0,
            vec![snapshot(0, 1), snapshot(400, 2), snapshot(840, 1), selection(900)],
        );
        let scale = TimeScale::for_match(&game).unwrap();

        assert_eq!(scale.real_time(840), 600.0);
        assert_eq!(scale.real_time(0), 0.0);
        assert!((scale.real_time(420) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn events_after_last_snapshot_extend_past_length() {
        let game = match_with(100.0, vec![snapshot(50, 1), selection(60)]);
        let scale = TimeScale::for_match(&game).unwrap();
        assert!((scale.real_time(60) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn rescale_is_unit_agnostic() {
        let game = match_with(700.0, vec![snapshot(1400, 1)]);
        let scale = TimeScale::for_match(&game).unwrap();
        assert!((scale.rescale(10.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn missing_snapshots_is_an_error() {
        let game = match_with(100.0, vec![selection(10)]);
        assert_eq!(
            TimeScale::for_match(&game),
            Err(AnalysisError::NoStatSnapshots {
                replay: "scale.SC2Replay".to_string()
            })
        );
    }

    #[test]
    fn zero_internal_clock_is_an_error() {
        let game = match_with(100.0, vec![snapshot(0, 1)]);
        assert!(matches!(
            TimeScale::for_match(&game),
            Err(AnalysisError::ZeroInternalClock { .. })
        ));
    }
}
