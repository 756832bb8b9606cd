//! Command and ability usage per phase.

use crate::analysis::MatchContext;
use crate::catalog::{self, ATTACK_ABILITY};
use crate::error::AnalysisError;
use crate::event::EventKind;
use crate::game::Player;
use crate::interval::{EARLY_END, MID_END, Phase, Phases, Sample, TimeSeries};
use crate::record::StatMap;
use crate::reduce;

/// Decimal places kept for the attack ratio.
const ATTACK_RATIO_DECIMALS: i32 = 3;

/// A classified command.
#[derive(Debug, Clone, Copy)]
struct CommandRow<'a> {
    ability: &'a str,
    is_build: bool,
    special: bool,
}

impl CommandRow<'_> {
    fn is_common(&self) -> bool {
        !self.is_build && catalog::is_common(self.ability)
    }

    fn is_attack(&self) -> bool {
        self.is_common() && self.ability == ATTACK_ABILITY
    }
}

/// APM phase bounds in real minutes.
const fn apm_bucket(minute: f64) -> Option<Phase> {
    let early = EARLY_END / 60.0;
    let mid = MID_END / 60.0;
    if minute < 0.0 {
        None
    } else if minute < early {
        Some(Phase::Early)
    } else if minute < mid {
        Some(Phase::Mid)
    } else {
        Some(Phase::Late)
    }
}

/// APM per phase.
///
/// The per-minute table is keyed on the internal clock, so each minute is
/// rescaled before bucketing. The whole-match value is the running average.
fn apm(ctx: &MatchContext<'_>, player: &Player) -> Phases<f64> {
    if !player.is_human {
        return Phases::from_fn(|_| 0.0);
    }

    let buckets: Vec<(Phase, f64)> = player
        .apm
        .iter()
        .filter_map(|(&minute, &value)| {
            apm_bucket(ctx.scale.rescale(f64::from(minute))).map(|phase| (phase, value))
        })
        .collect();

    Phases::from_fn(|phase| match phase {
        Phase::Whole => player.avg_apm,
        _ => reduce::mean(
            buckets
                .iter()
                .filter(|(bucket, _)| *bucket == phase)
                .map(|(_, value)| *value),
        )
        .unwrap_or(0.0),
    })
}

fn command_table<'a>(
    ctx: &MatchContext<'a>,
    player: &Player,
) -> Result<TimeSeries<CommandRow<'a>>, AnalysisError> {
    // An unknown race fails even when the player issued no commands.
    ctx.catalog.abilities(player.race)?;

    let rows = ctx
        .game
        .events_for(player.pid)
        .filter_map(|event| match &event.kind {
            EventKind::Command {
                ability_name,
                is_build,
            } => Some((event.second, ability_name, *is_build)),
            _ => None,
        })
        .map(|(second, ability_name, is_build)| {
            let special = ctx.catalog.is_special(player.race, ability_name)?;
            Ok((
                ctx.scale.real_time(second),
                CommandRow {
                    ability: ability_name.as_str(),
                    is_build,
                    special,
                },
            ))
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(TimeSeries::from_samples(rows))
}

fn special_ratio(rows: &[Sample<CommandRow<'_>>]) -> f64 {
    let special = rows.iter().filter(|row| row.value.special).count();
    reduce::ratio(special, rows.len())
}

fn preferred_specials(rows: &[Sample<CommandRow<'_>>]) -> (Option<String>, Option<String>) {
    reduce::top_two(
        rows.iter()
            .filter(|row| row.value.special)
            .map(|row| row.value.ability),
    )
}

fn attack_ratio(rows: &[Sample<CommandRow<'_>>]) -> f64 {
    let common = rows.iter().filter(|row| row.value.is_common()).count();
    let attacks = rows.iter().filter(|row| row.value.is_attack()).count();
    reduce::round_to(reduce::ratio(attacks, common), ATTACK_RATIO_DECIMALS)
}

/// Computes APM and ability usage statistics for every phase.
pub fn command_stats(ctx: &MatchContext<'_>, player: &Player) -> Result<StatMap, AnalysisError> {
    let table = command_table(ctx, player)?;
    let phases = table.partition(&ctx.windows);

    tracing::debug!(
        player_id = player.pid,
        race = %player.race,
        commands = table.len(),
        "computing command statistics"
    );

    let mut stats = StatMap::default();
    stats.insert_phases("apm", apm(ctx, player));
    stats.insert_phases("special_ability_ratio", phases.clone().map(special_ratio));
    stats.insert_phases(
        "preferred_special_abilities",
        phases.clone().map(preferred_specials),
    );
    stats.insert_phases("attack_ratio", phases.map(attack_ratio));
    Ok(stats)
}
