//! Implementation of the `replay-stats catalog` command.

use std::io::Write;

use anyhow::{Context, Result};
use replay_core::AbilityCatalog;

/// Writes the catalog as pretty JSON.
pub fn run<W: Write>(writer: &mut W, catalog: &AbilityCatalog) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, catalog).context("failed to serialize catalog")?;
    writeln!(writer)?;
    Ok(())
}
