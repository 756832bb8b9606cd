//! Selection and control-group usage per phase.

use std::collections::BTreeSet;

use crate::analysis::MatchContext;
use crate::error::AnalysisError;
use crate::event_type::EventCategory;
use crate::game::Player;
use crate::interval::{Phases, Sample, TimeSeries};
use crate::record::StatMap;
use crate::reduce;

/// Raw timestamp and category of one selection-related event.
type Action = (u32, EventCategory);

/// Distinct raw timestamps of the rows in any of `categories`.
fn distinct_seconds(rows: &[Sample<Action>], categories: &[EventCategory]) -> BTreeSet<u32> {
    rows.iter()
        .filter(|row| categories.contains(&row.value.1))
        .map(|row| row.value.0)
        .collect()
}

fn seconds_ratio(rows: &[Sample<Action>], subset: EventCategory, union: &[EventCategory]) -> f64 {
    reduce::ratio(
        distinct_seconds(rows, &[subset]).len(),
        distinct_seconds(rows, union).len(),
    )
}

fn action_table(ctx: &MatchContext<'_>, player: &Player) -> TimeSeries<Action> {
    TimeSeries::from_samples(
        ctx.game
            .events_for(player.pid)
            .filter(|event| event.category() != EventCategory::StatSnapshot)
            .map(|event| {
                (
                    ctx.scale.real_time(event.second),
                    (event.second, event.category()),
                )
            }),
    )
}

/// Largest number of non-empty groups seen at the window's control-group events.
fn max_active_groups(
    ctx: &MatchContext<'_>,
    player: &Player,
    rows: &[Sample<Action>],
) -> Result<usize, AnalysisError> {
    let mut max = 0;
    for second in distinct_seconds(rows, &[EventCategory::ControlGroup]) {
        let snapshot = ctx.groups.snapshot(player.pid, second).ok_or(
            AnalysisError::MissingGroupSnapshot {
                player_id: player.pid,
                second,
            },
        )?;
        max = max.max(snapshot.active_groups());
    }
    Ok(max)
}

/// Computes control-group and selection statistics for every phase.
pub fn selection_stats(ctx: &MatchContext<'_>, player: &Player) -> Result<StatMap, AnalysisError> {
    let table = action_table(ctx, player);
    let phases = table.partition(&ctx.windows);

    tracing::debug!(
        player_id = player.pid,
        tracked = ctx.groups.is_tracked(player.pid),
        actions = table.len(),
        "computing selection statistics"
    );

    let active = if ctx.groups.is_tracked(player.pid) {
        phases
            .clone()
            .map(|rows| max_active_groups(ctx, player, rows))
            .transpose()?
    } else {
        Phases::from_fn(|_| 0)
    };

    let mut stats = StatMap::default();
    stats.insert_phases("max_active_groups", active);
    stats.insert_phases(
        "ctrl_grp_ratio",
        phases.clone().map(|rows| {
            seconds_ratio(
                rows,
                EventCategory::ControlGroup,
                &[
                    EventCategory::Command,
                    EventCategory::Selection,
                    EventCategory::ControlGroup,
                ],
            )
        }),
    );

    let recall_union = [EventCategory::GetControlGroup, EventCategory::Selection];
    stats.insert_phases(
        "get_ctrl_grp_ratio",
        phases
            .clone()
            .map(|rows| seconds_ratio(rows, EventCategory::GetControlGroup, &recall_union)),
    );
    stats.insert_phases(
        "select_ratio",
        phases.map(|rows| seconds_ratio(rows, EventCategory::Selection, &recall_union)),
    );
    Ok(stats)
}
