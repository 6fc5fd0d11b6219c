//! `asset-debug` - run the asset-files resolution against a path and explain the outcome.
//!
//! ```bash
//! # Resolve the sample tree (created on first run)
//! asset-debug
//!
//! # Resolve a specific directory and print a machine-readable report
//! asset-debug dist/ --json
//!
//! # Same, with the path taken from the CI input variable
//! INPUT_ASSET_FILES=dist asset-debug -v
//! ```

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use asset_files_debug::config::HarnessConfig;
use asset_files_debug::fixtures::seed_fixture_tree;
use asset_files_debug::host::{ConsoleHost, OUTPUT_FILE_ENV};
use asset_files_debug::{DebugRun, LogFacade};
use clap::Parser;

/// Debug the resolution of a CI step's asset-files input.
#[derive(Parser, Debug)]
#[command(name = "asset-debug", version)]
struct Cli {
  /// Asset file or directory. Defaults to the configured input variable, then the fixture tree.
  path: Option<PathBuf>,

  /// Harness configuration file (defaults to ./asset-debug.config.json when present)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Do not create the sample fixture tree
  #[arg(long)]
  no_fixtures: bool,

  /// Disable the coloured console prefix
  #[arg(long)]
  no_color: bool,

  /// Print the run report as JSON instead of the decorated console output
  #[arg(long)]
  json: bool,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      ConsoleHost::stdout(!cli.no_color).set_failed(format_args!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}

fn init_logging(verbose: bool) {
  let default_filter = if verbose { "debug" } else { "info" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    .format_timestamp(None)
    .init();
}

fn run(cli: &Cli) -> Result<()> {
  let cwd = env::current_dir().context("failed to determine the working directory")?;
  let mut config = match &cli.config {
    Some(path) => HarnessConfig::load(path)?,
    None => HarnessConfig::discover(&cwd),
  };
  if cli.no_fixtures {
    config.seed_fixtures = false;
  }
  if cli.no_color {
    config.color = false;
  }

  if config.seed_fixtures {
    let fixture_root = config.fixture_dir_path(&cwd);
    if seed_fixture_tree(&fixture_root)? {
      log::info!("created sample assets in {}", fixture_root.display());
    }
  }

  let input = config.select_asset_input(
    cli.path.as_deref(),
    |name: &str| env::var_os(name),
    &cwd,
  );
  let output_file = env::var_os(OUTPUT_FILE_ENV).map(PathBuf::from);

  if cli.json {
    let host = ConsoleHost::new(io::sink(), false).with_output_file(output_file);
    let report = DebugRun::new(&config, &host, LogFacade).execute(&input)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("failed to write JSON report")?;
    writeln!(stdout)?;
  } else {
    let host = ConsoleHost::stdout(config.color).with_output_file(output_file);
    host.line("Starting asset file debugging...");
    DebugRun::new(&config, &host, &host).execute(&input)?;
    host.line("Asset file debugging completed.");
  }

  Ok(())
}
