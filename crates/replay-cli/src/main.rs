use std::io::{BufWriter, Write, stdout};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use replay_cli::commands::{analyze, catalog, windows};
use replay_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries only command output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match command {
        Commands::Analyze { files, json_lines } => {
            if let Some(threads) = config.threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("failed to configure thread pool")?;
            }
            let catalog = config.catalog()?;
            let summary =
                analyze::run(&mut writer, files, &catalog, *json_lines || config.json_lines)?;
            writer.flush()?;

            tracing::debug!(records = summary.records, failed = summary.failed, "analysis finished");
            if summary.failed > 0 {
                bail!("{} of {} matches failed", summary.failed, files.len());
            }
        }
        Commands::Windows { seconds } => windows::run(&mut writer, *seconds)?,
        Commands::Catalog => catalog::run(&mut writer, &config.catalog()?)?,
    }

    writer.flush()?;
    Ok(())
}
