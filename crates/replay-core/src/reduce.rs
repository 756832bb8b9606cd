//! Reducers folding one phase's rows into a single statistic.
//!
//! Every reducer accepts an empty input and returns its neutral value.

use std::collections::HashMap;

use crate::interval::Sample;

/// Arithmetic mean, `None` for no values.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Value of the last row.
///
/// Cumulative counters are not re-baselined at the window start, so for a
/// later phase this is the running total since match start.
pub fn last_value<T: Copy>(rows: &[Sample<T>]) -> Option<T> {
    rows.last().map(|row| row.value)
}

/// `count / total`, 0 when `total` is 0.
#[expect(
    clippy::cast_precision_loss,
    reason = "event counts stay far below 2^52"
)]
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// The two most frequent names, most frequent first.
///
/// Ties are broken alphabetically.
pub fn top_two<'a>(names: impl IntoIterator<Item = &'a str>) -> (Option<String>, Option<String>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut names = ranked.into_iter().map(|(name, _)| name.to_string());
    (names.next(), names.next())
}

/// Total time the flag stayed raised, `None` for no rows.
///
/// A run closes at the first row where the flag drops. A run still open at
/// the last row is extended past it by the gap between the last two rows, so
/// the result depends on how densely the window was sampled.
pub fn capped_duration(rows: &[Sample<bool>]) -> Option<f64> {
    let last = rows.last()?;

    let mut total = 0.0;
    let mut run_start: Option<f64> = None;
    for row in rows {
        match (row.value, run_start) {
            (true, None) => run_start = Some(row.time),
            (false, Some(start)) => {
                total += row.time - start;
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        let last_gap = rows
            .len()
            .checked_sub(2)
            .map_or(0.0, |i| last.time - rows[i].time);
        total += last.time - start + last_gap;
    }

    Some(total)
}
