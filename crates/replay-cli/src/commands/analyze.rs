//! Implementation of the `replay-stats analyze` command.
//!
//! Reads decoded matches from JSON files, analyses them in parallel and
//! writes every player's statistics record to the output, either as one
//! JSON array or as JSON lines.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use replay_core::{AbilityCatalog, Match, StatisticsRecord, analyze_matches};

/// Counts reported after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Records written.
    pub records: usize,
    /// Matches that could not be read or analysed.
    pub failed: usize,
}

/// Reads one decoded match.
pub fn load_match(path: &Path) -> Result<Match> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read match: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse match: {}", path.display()))
}

/// Writes records as a pretty JSON array or as one compact record per line.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[StatisticsRecord],
    json_lines: bool,
) -> Result<()> {
    if json_lines {
        for record in records {
            serde_json::to_writer(&mut *writer, record).context("failed to serialize record")?;
            writeln!(writer)?;
        }
    } else {
        serde_json::to_writer_pretty(&mut *writer, records)
            .context("failed to serialize records")?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Runs the analyze command.
///
/// A match that fails to load or analyse is logged and skipped; the
/// remaining matches still produce records.
pub fn run<W: Write>(
    writer: &mut W,
    files: &[PathBuf],
    catalog: &AbilityCatalog,
    json_lines: bool,
) -> Result<Summary> {
    let mut summary = Summary::default();

    let mut paths = Vec::with_capacity(files.len());
    let mut games = Vec::with_capacity(files.len());
    for path in files {
        match load_match(path) {
            Ok(game) => {
                paths.push(path);
                games.push(game);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "skipping match");
                summary.failed += 1;
            }
        }
    }

    let mut records = Vec::new();
    for (path, result) in paths.into_iter().zip(analyze_matches(&games, catalog)) {
        match result {
            Ok(match_records) => {
                tracing::debug!(
                    path = %path.display(),
                    players = match_records.len(),
                    "analyzed match"
                );
                records.extend(match_records);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping match");
                summary.failed += 1;
            }
        }
    }

    write_records(writer, &records, json_lines)?;
    summary.records = records.len();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use replay_core::StatValue;
    use tempfile::TempDir;

    const SHORT_MATCH: &str = include_str!("../../tests/fixtures/short_match.json");

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn analyze(files: &[PathBuf], json_lines: bool) -> (Summary, String) {
        let mut output = Vec::new();
        let summary = run(&mut output, files, &AbilityCatalog::default(), json_lines).unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_load_match_parses_fixture() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "short.json", SHORT_MATCH);

        let game = load_match(&path).unwrap();
        assert_eq!(game.replay_name.as_str(), "short_match.SC2Replay");
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.events.len(), 13);
    }

    #[test]
    fn test_analyze_writes_record_per_player() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "short.json", SHORT_MATCH);

        let (summary, output) = analyze(&[path], false);
        assert_eq!(summary, Summary { records: 2, failed: 0 });

        let records: Vec<StatisticsRecord> = serde_json::from_str(&output).unwrap();
        let alpha = &records[0];
        assert_eq!(alpha.player_username, "alpha");
        assert_eq!(alpha.number("unspent_minerals_avg_whole"), Some(150.0));
        assert_eq!(alpha.number("lost_minerals_totals_whole"), Some(50.0));
        assert_eq!(alpha.number("time_supply_capped_whole"), Some(50.0));
        assert_eq!(alpha.number("attack_ratio_whole"), Some(0.5));
        assert_eq!(alpha.number("apm_whole"), Some(90.0));
        assert_eq!(alpha.number("max_active_groups_whole"), Some(1.0));
        assert_eq!(alpha.get("unspent_minerals_avg_mid"), Some(&StatValue::Missing));

        let ai = &records[1];
        assert_eq!(ai.player_id, 2);
        assert_eq!(ai.number("apm_whole"), Some(0.0));
        assert_eq!(ai.number("max_active_groups_whole"), Some(0.0));
        assert_eq!(ai.number("special_ability_ratio_whole"), Some(1.0));
    }

    #[test]
    fn test_json_lines_output() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "short.json", SHORT_MATCH);

        let (_, output) = analyze(&[path], true);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let record: StatisticsRecord = serde_json::from_str(line).unwrap();
            assert_eq!(record.replay_name, "short_match.SC2Replay");
        }
    }

    #[test]
    fn test_failing_matches_are_skipped() {
        let dir = TempDir::new().unwrap();
        let good = write_fixture(&dir, "good.json", SHORT_MATCH);
        let malformed = write_fixture(&dir, "bad.json", "{not json");
        let no_stats = write_fixture(
            &dir,
            "empty.json",
            r#"{"replay_name": "empty.SC2Replay", "length": 60.0, "players": [], "events": []}"#,
        );
        let missing = dir.path().join("missing.json");

        let (summary, output) = analyze(&[good, malformed, no_stats, missing], false);
        assert_eq!(summary, Summary { records: 2, failed: 3 });

        let records: Vec<StatisticsRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "short.json", SHORT_MATCH);

        let (_, first) = analyze(std::slice::from_ref(&path), false);
        let (_, second) = analyze(&[path], false);
        assert_eq!(first, second);
    }
}
