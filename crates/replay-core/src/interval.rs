//! Game phases and the partitioning of time-indexed tables into them.
//!
//! # Boundary policy
//!
//! For a match of `D` real seconds:
//!
//! | `D`              | whole    | early     | mid         | late        |
//! |------------------|----------|-----------|-------------|-------------|
//! | `D > 480`        | `[0, D]` | `[0,240)` | `[240,480)` | `[480, D]`  |
//! | `240 < D <= 480` | `[0, D]` | `[0,240)` | `[240, D]`  | empty       |
//! | `0 < D <= 240`   | `[0, D]` | `[0, D]`  | empty       | empty       |
//!
//! Windows are half-open except where they end at `D`: the last stat snapshot
//! lands exactly on `D` after time correction, so the terminal window keeps it.

use std::ops::Index;

/// End of the early game, in real seconds.
pub const EARLY_END: f64 = 240.0;

/// End of the mid game, in real seconds.
pub const MID_END: f64 = 480.0;

/// A named segment of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Whole,
    Early,
    Mid,
    Late,
}

impl Phase {
    /// All phases in reporting order.
    pub const ALL: [Self; 4] = [Self::Whole, Self::Early, Self::Mid, Self::Late];

    /// Suffix appended to statistic names.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Whole => "whole",
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Whole => 0,
            Self::Early => 1,
            Self::Mid => 2,
            Self::Late => 3,
        }
    }
}

/// One value per phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phases<T>([T; 4]);

impl<T> Phases<T> {
    /// Builds the set by evaluating `f` for each phase in order.
    pub fn from_fn(f: impl FnMut(Phase) -> T) -> Self {
        Self(Phase::ALL.map(f))
    }

    /// Transforms every value.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Phases<U> {
        Phases(self.0.map(f))
    }

    /// Iterates `(phase, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &T)> {
        Phase::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T, E> Phases<Result<T, E>> {
    /// Collects per-phase results, failing on the first error in reporting order.
    pub fn transpose(self) -> Result<Phases<T>, E> {
        let [whole, early, mid, late] = self.0;
        Ok(Phases([whole?, early?, mid?, late?]))
    }
}

impl<T> Index<Phase> for Phases<T> {
    type Output = T;

    fn index(&self, phase: Phase) -> &T {
        &self.0[phase.index()]
    }
}

impl<T> IntoIterator for Phases<T> {
    type Item = (Phase, T);
    type IntoIter = std::iter::Zip<std::array::IntoIter<Phase, 4>, std::array::IntoIter<T, 4>>;

    fn into_iter(self) -> Self::IntoIter {
        Phase::ALL.into_iter().zip(self.0)
    }
}

/// A span of real time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
    /// Whether `end` itself belongs to the window.
    pub closed: bool,
}

impl Window {
    /// Half-open window `[start, end)`.
    #[must_use]
    pub const fn half_open(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            closed: false,
        }
    }

    /// Closed window `[start, end]`.
    #[must_use]
    pub const fn closed(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            closed: true,
        }
    }

    /// Whether `time` falls inside the window.
    #[must_use]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && if self.closed { time <= self.end } else { time < self.end }
    }
}

/// The four phase windows of a match.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseWindows {
    duration: f64,
    windows: Phases<Option<Window>>,
}

impl PhaseWindows {
    /// Computes the windows for a match of `duration` real seconds.
    #[must_use]
    pub fn for_duration(duration: f64) -> Self {
        let span = |start: f64, end: f64| {
            if end >= duration {
                Window::closed(start, duration)
            } else {
                Window::half_open(start, end)
            }
        };

        let windows = if duration > MID_END {
            [
                Some(span(0.0, duration)),
                Some(span(0.0, EARLY_END)),
                Some(span(EARLY_END, MID_END)),
                Some(span(MID_END, duration)),
            ]
        } else if duration > EARLY_END {
            [
                Some(span(0.0, duration)),
                Some(span(0.0, EARLY_END)),
                Some(span(EARLY_END, duration)),
                None,
            ]
        } else if duration > 0.0 {
            [
                Some(span(0.0, duration)),
                Some(span(0.0, duration)),
                None,
                None,
            ]
        } else {
            [None; 4]
        };

        Self {
            duration,
            windows: Phases(windows),
        }
    }

    /// Match duration the windows were derived from.
    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Window of one phase, `None` if the phase does not exist.
    #[must_use]
    pub fn window(&self, phase: Phase) -> Option<Window> {
        self.windows[phase]
    }

    /// Iterates `(phase, window)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, Option<Window>)> + '_ {
        self.windows.iter().map(|(phase, window)| (phase, *window))
    }
}

/// One row of a time-indexed table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<T> {
    /// Corrected real time in seconds.
    pub time: f64,
    pub value: T,
}

/// Rows sorted by corrected real time.
///
/// Rows sharing a timestamp keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    rows: Vec<Sample<T>>,
}

impl<T> TimeSeries<T> {
    /// Builds a table from `(time, value)` pairs in any order.
    pub fn from_samples(samples: impl IntoIterator<Item = (f64, T)>) -> Self {
        let mut rows: Vec<Sample<T>> = samples
            .into_iter()
            .map(|(time, value)| Sample { time, value })
            .collect();
        rows.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { rows }
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Sample<T>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose time falls inside `window`.
    #[must_use]
    pub fn slice(&self, window: &Window) -> &[Sample<T>] {
        let start = self.rows.partition_point(|row| row.time < window.start);
        let end = if window.closed {
            self.rows.partition_point(|row| row.time <= window.end)
        } else {
            self.rows.partition_point(|row| row.time < window.end)
        };
        &self.rows[start..end.max(start)]
    }

    /// Splits the table into one sub-table per phase.
    ///
    /// Phases without a window get an empty slice.
    #[must_use]
    pub fn partition(&self, windows: &PhaseWindows) -> Phases<&[Sample<T>]> {
        Phases::from_fn(|phase| {
            windows
                .window(phase)
                .map_or(&[][..], |window| self.slice(&window))
        })
    }
}
