//! Macroeconomic indicators from stat snapshots.

use crate::analysis::MatchContext;
use crate::error::AnalysisError;
use crate::event::PlayerStats;
use crate::game::Player;
use crate::interval::{Phase, Sample, TimeSeries};
use crate::record::StatMap;
use crate::reduce;

/// A snapshot column, raw or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    MineralsCurrent,
    VespeneCurrent,
    UnspentResources,
    WorkersActive,
    MineralsCollectionRate,
    VespeneCollectionRate,
    ResourceCollectionRate,
    ArmyValue,
    MineralsLost,
    VespeneLost,
}

impl Column {
    fn value(self, stats: &PlayerStats) -> f64 {
        match self {
            Self::MineralsCurrent => f64::from(stats.minerals_current),
            Self::VespeneCurrent => f64::from(stats.vespene_current),
            Self::UnspentResources => {
                f64::from(stats.minerals_current) + f64::from(stats.vespene_current)
            }
            Self::WorkersActive => f64::from(stats.workers_active_count),
            Self::MineralsCollectionRate => f64::from(stats.minerals_collection_rate),
            Self::VespeneCollectionRate => f64::from(stats.vespene_collection_rate),
            Self::ResourceCollectionRate => {
                f64::from(stats.minerals_collection_rate)
                    + f64::from(stats.vespene_collection_rate)
            }
            Self::ArmyValue => {
                f64::from(stats.minerals_used_active_forces)
                    + f64::from(stats.vespene_used_active_forces)
            }
            Self::MineralsLost => f64::from(stats.minerals_lost),
            Self::VespeneLost => f64::from(stats.vespene_lost),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduction {
    Mean,
    Total,
}

/// Column-backed indicators: key stem, source column, reducer.
const INDICATORS: [(&str, Column, Reduction); 10] = [
    ("unspent_minerals_avg", Column::MineralsCurrent, Reduction::Mean),
    ("unspent_vespene_avg", Column::VespeneCurrent, Reduction::Mean),
    ("unspent_resources_avg", Column::UnspentResources, Reduction::Mean),
    ("active_workers_avg", Column::WorkersActive, Reduction::Mean),
    ("mineral_collection_rate_avg", Column::MineralsCollectionRate, Reduction::Mean),
    ("vespene_collection_rate_avg", Column::VespeneCollectionRate, Reduction::Mean),
    ("resource_collection_rate_avg", Column::ResourceCollectionRate, Reduction::Mean),
    ("army_value_avg", Column::ArmyValue, Reduction::Mean),
    ("lost_minerals_totals", Column::MineralsLost, Reduction::Total),
    ("lost_vespene_totals", Column::VespeneLost, Reduction::Total),
];

/// Supply is capped when no more supply is available than is in use.
const fn supply_capped(stats: &PlayerStats) -> bool {
    stats.food_made <= stats.food_used
}

fn reduce_column(rows: &[Sample<PlayerStats>], column: Column, reduction: Reduction) -> Option<f64> {
    match reduction {
        Reduction::Mean => reduce::mean(rows.iter().map(|row| column.value(&row.value))),
        Reduction::Total => reduce::last_value(rows).map(|stats| column.value(&stats)),
    }
}

/// Spending quotient from a phase's average unspent resources and income.
///
/// Undefined when either input is missing or zero.
pub fn spending_quotient(unspent: Option<f64>, collection_rate: Option<f64>) -> Option<f64> {
    match (unspent, collection_rate) {
        (Some(unspent), Some(rate)) if unspent != 0.0 && rate != 0.0 => {
            Some(35.0f64.mul_add(0.00137f64.mul_add(rate, -unspent.ln()), 240.0))
        }
        _ => None,
    }
}

/// The player's snapshots on the corrected time axis.
///
/// A final snapshot identical to the one before it, timestamp included, is a
/// duplicate record and is dropped.
fn snapshot_table(
    ctx: &MatchContext<'_>,
    player: &Player,
) -> Result<TimeSeries<PlayerStats>, AnalysisError> {
    let mut snapshots: Vec<(u32, PlayerStats)> = ctx
        .game
        .events_for(player.pid)
        .filter_map(|event| event.player_stats().map(|stats| (event.second, *stats)))
        .collect();

    if snapshots.is_empty() {
        return Err(AnalysisError::MissingPlayerStats {
            player_id: player.pid,
        });
    }

    if matches!(snapshots.as_slice(), [.., previous, last] if previous == last) {
        tracing::debug!(player_id = player.pid, "dropping duplicate final snapshot");
        snapshots.pop();
    }

    Ok(TimeSeries::from_samples(
        snapshots
            .into_iter()
            .map(|(second, stats)| (ctx.scale.real_time(second), stats)),
    ))
}

/// Computes the twelve economy indicators for every phase.
pub fn economy_stats(ctx: &MatchContext<'_>, player: &Player) -> Result<StatMap, AnalysisError> {
    let table = snapshot_table(ctx, player)?;
    let phases = table.partition(&ctx.windows);

    tracing::debug!(
        player_id = player.pid,
        snapshots = table.len(),
        early = phases[Phase::Early].len(),
        "computing economy indicators"
    );

    let mut stats = StatMap::default();
    for (stem, column, reduction) in INDICATORS {
        let values = phases
            .clone()
            .map(|rows| reduce_column(rows, column, reduction));
        stats.insert_phases(stem, values);
    }

    let capped = phases.clone().map(|rows| {
        let flags: Vec<Sample<bool>> = rows
            .iter()
            .map(|row| Sample {
                time: row.time,
                value: supply_capped(&row.value),
            })
            .collect();
        reduce::capped_duration(&flags)
    });
    stats.insert_phases("time_supply_capped", capped);

    let spending = phases.map(|rows| {
        spending_quotient(
            reduce_column(rows, Column::UnspentResources, Reduction::Mean),
            reduce_column(rows, Column::ResourceCollectionRate, Reduction::Mean),
        )
    });
    stats.insert_phases("spending_qs", spending);

    Ok(stats)
}
