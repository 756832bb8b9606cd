//! Per-match analysis driver.
//!
//! The time scale, phase windows and control-group history are derived once
//! per match and shared read-only by the three aggregators.

use rayon::prelude::*;

use crate::catalog::AbilityCatalog;
use crate::command::command_stats;
use crate::control_group::ControlGroupHistory;
use crate::economy::economy_stats;
use crate::error::AnalysisError;
use crate::game::Match;
use crate::interval::PhaseWindows;
use crate::record::StatisticsRecord;
use crate::selection::selection_stats;
use crate::time::TimeScale;
use crate::types::PlayerId;

/// Everything the aggregators need about one match.
#[derive(Debug, Clone)]
pub struct MatchContext<'a> {
    pub game: &'a Match,
    pub catalog: &'a AbilityCatalog,
    pub scale: TimeScale,
    pub windows: PhaseWindows,
    pub groups: ControlGroupHistory,
}

impl<'a> MatchContext<'a> {
    /// Derives the shared per-match state.
    pub fn new(game: &'a Match, catalog: &'a AbilityCatalog) -> Result<Self, AnalysisError> {
        let scale = TimeScale::for_match(game)?;
        let windows = PhaseWindows::for_duration(scale.duration());
        let groups = ControlGroupHistory::build(game);

        Ok(Self {
            game,
            catalog,
            scale,
            windows,
            groups,
        })
    }
}

/// Computes the statistics record of one player.
pub fn analyze_player(
    ctx: &MatchContext<'_>,
    pid: PlayerId,
) -> Result<StatisticsRecord, AnalysisError> {
    let player = ctx
        .game
        .player(pid)
        .ok_or_else(|| AnalysisError::UnknownPlayer {
            replay: ctx.game.replay_name.to_string(),
            player_id: pid,
        })?;

    let mut record = StatisticsRecord::new(ctx.game, player);
    record.stats.merge(economy_stats(ctx, player)?);
    record.stats.merge(command_stats(ctx, player)?);
    record.stats.merge(selection_stats(ctx, player)?);

    tracing::debug!(
        replay = %ctx.game.replay_name,
        player_id = pid,
        stats = record.stats.len(),
        "analyzed player"
    );
    Ok(record)
}

/// Computes one record per player, in player order.
pub fn analyze_match(
    game: &Match,
    catalog: &AbilityCatalog,
) -> Result<Vec<StatisticsRecord>, AnalysisError> {
    let ctx = MatchContext::new(game, catalog)?;
    game.players
        .iter()
        .map(|player| analyze_player(&ctx, player.pid))
        .collect()
}

/// Analyses independent matches in parallel.
///
/// Results keep the input order; a failing match does not affect the others.
pub fn analyze_matches(
    games: &[Match],
    catalog: &AbilityCatalog,
) -> Vec<Result<Vec<StatisticsRecord>, AnalysisError>> {
    games
        .par_iter()
        .map(|game| analyze_match(game, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::event::{Event, EventKind, GroupUpdate, PlayerStats};
    use crate::game::Player;
    use crate::record::StatValue;
    use crate::types::{ControlGroupIndex, Race, ReplayName};

    fn stats(minerals: u32) -> PlayerStats {
        PlayerStats {
            minerals_current: minerals,
            vespene_current: 0,
            minerals_collection_rate: 800,
            vespene_collection_rate: 200,
            workers_active_count: 30,
            minerals_used_active_forces: 0,
            vespene_used_active_forces: 0,
            minerals_lost: 0,
            vespene_lost: 0,
            food_used: 40,
            food_made: 46,
        }
    }

    fn event(second: u32, player_id: PlayerId, kind: EventKind) -> Event {
        Event {
            second,
            player_id,
            kind,
        }
    }

    fn player(pid: PlayerId, name: &str, race: Race) -> Player {
        Player {
            pid,
            name: name.to_string(),
            is_human: true,
            race,
            apm: BTreeMap::from([(1, 90.0), (6, 120.0)]),
            avg_apm: 105.0,
        }
    }

    fn sample_match(name: &str) -> Match {
        Match {
            replay_name: ReplayName::new(name).unwrap(),
            length: 500.0,
            players: vec![player(1, "alpha", Race::Protoss), player(2, "beta", Race::Zerg)],
            events: vec![
                event(0, 1, EventKind::PlayerStats(stats(50))),
                event(0, 2, EventKind::PlayerStats(stats(50))),
                event(30, 1, EventKind::Selection { units: vec![1, 2] }),
                event(
                    31,
                    1,
                    EventKind::ControlGroup {
                        group: ControlGroupIndex::new(1).unwrap(),
                        update: GroupUpdate::Set,
                    },
                ),
                event(
                    40,
                    1,
                    EventKind::Command {
                        ability_name: "Blink".to_string(),
                        is_build: false,
                    },
                ),
                event(
                    45,
                    2,
                    EventKind::Command {
                        ability_name: "InjectLarva".to_string(),
                        is_build: false,
                    },
                ),
                event(100, 1, EventKind::PlayerStats(stats(150))),
                event(100, 2, EventKind::PlayerStats(stats(80))),
                event(500, 1, EventKind::PlayerStats(stats(400))),
                event(500, 2, EventKind::PlayerStats(stats(90))),
            ],
        }
    }

    #[test]
    fn one_record_per_player_with_every_metric() {
        let records = analyze_match(&sample_match("two.SC2Replay"), &AbilityCatalog::default())
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].player_username, "alpha");
        assert_eq!(records[1].player_id, 2);
        // 12 economy, 4 command and 4 selection metrics over four phases.
        assert_eq!(records[0].stats.len(), 80);
        assert!(records.iter().all(|r| r.replay_name == "two.SC2Replay"));
    }

    #[test]
    fn five_hundred_second_match() {
        let records = analyze_match(&sample_match("e2e.SC2Replay"), &AbilityCatalog::default())
            .unwrap();
        let alpha = &records[0];

        assert_eq!(alpha.number("unspent_minerals_avg_whole"), Some(200.0));
        assert_eq!(alpha.number("unspent_minerals_avg_early"), Some(100.0));
        assert_eq!(alpha.get("unspent_minerals_avg_mid"), Some(&StatValue::Missing));
        assert_eq!(alpha.number("unspent_minerals_avg_late"), Some(400.0));
        assert_eq!(alpha.number("max_active_groups_early"), Some(1.0));
        assert_eq!(alpha.number("special_ability_ratio_early"), Some(1.0));
    }

    #[test]
    fn repeated_analysis_is_byte_identical() {
        let game = sample_match("same.SC2Replay");
        let catalog = AbilityCatalog::default();

        let first = serde_json::to_string(&analyze_match(&game, &catalog).unwrap()).unwrap();
        let second = serde_json::to_string(&analyze_match(&game, &catalog).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_player_is_an_error() {
        let game = sample_match("unknown.SC2Replay");
        let catalog = AbilityCatalog::default();
        let ctx = MatchContext::new(&game, &catalog).unwrap();

        assert_eq!(
            analyze_player(&ctx, 7).unwrap_err(),
            AnalysisError::UnknownPlayer {
                replay: "unknown.SC2Replay".to_string(),
                player_id: 7,
            }
        );
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let mut broken = sample_match("broken.SC2Replay");
        broken
            .events
            .retain(|e| e.category() != crate::event_type::EventCategory::StatSnapshot);
        let games = vec![sample_match("a.SC2Replay"), broken, sample_match("c.SC2Replay")];

        let results = analyze_matches(&games, &AbilityCatalog::default());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap()[0].replay_name, "a.SC2Replay");
        assert!(matches!(
            results[1],
            Err(AnalysisError::NoStatSnapshots { .. })
        ));
        assert_eq!(results[2].as_ref().unwrap()[0].replay_name, "c.SC2Replay");
    }
}
