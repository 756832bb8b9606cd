//! Implementation of the `replay-stats windows` command.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use replay_core::{PhaseWindows, Window};

fn format_window(window: Option<Window>) -> String {
    window.map_or_else(
        || "-".to_string(),
        |w| {
            let close = if w.closed { ']' } else { ')' };
            format!("[{}, {}{close}", w.start, w.end)
        },
    )
}

/// Formats the phase windows of a match for display.
pub fn format_windows(windows: &PhaseWindows) -> String {
    let mut output = String::new();

    writeln!(output, "Phase windows for a {} s match", windows.duration()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "{:<5}  WINDOW", "PHASE").unwrap();
    for (phase, window) in windows.iter() {
        writeln!(output, "{:<5}  {}", phase.suffix(), format_window(window)).unwrap();
    }

    output
}

/// Runs the windows command.
pub fn run<W: Write>(writer: &mut W, seconds: f64) -> Result<()> {
    let windows = PhaseWindows::for_duration(seconds);
    tracing::debug!(
        seconds,
        phases = windows.iter().filter(|(_, window)| window.is_some()).count(),
        "computed phase windows"
    );
    write!(writer, "{}", format_windows(&windows))?;
    Ok(())
}
