//! Matchup runner.
//!
//! Matches in-situ field measurements against Level-2 satellite swaths,
//! one pair at a time or in parallel batches.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use matchup::{FileSink, MatchupEngine};
use matchup_runner::batch::{read_links_file, resolve_links, run_batch};
use matchup_runner::config::RunnerConfig;
use matchup_runner::field_table::FieldTable;
use matchup_runner::{merge, report};
use swath_reader::NetCdfSwathSource;

#[derive(Parser, Debug)]
#[command(name = "matchup-runner")]
#[command(about = "Match field measurements against satellite swaths")]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "MATCHUP_JSON_LOGS", global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match one field measurement against one granule
    Single {
        /// Field sample identifier
        #[arg(long)]
        id: String,

        /// Granule identifier, e.g. A2019123174500
        #[arg(long)]
        granid: String,

        #[command(flatten)]
        paths: RunPaths,
    },

    /// Match every pair of a granule links file
    Batch {
        /// Headerless CSV: field id, granule id, ...
        #[arg(long, env = "MATCHUP_LINKS_FILE")]
        links_file: PathBuf,

        /// Worker threads
        #[arg(long, env = "MATCHUP_JOBS", default_value_t = 4)]
        jobs: usize,

        #[command(flatten)]
        paths: RunPaths,
    },

    /// Report the share of requested granules present as L2 files
    Report {
        /// Headerless CSV whose column 1 holds the granule id
        #[arg(long, env = "MATCHUP_LINKS_FILE")]
        links_file: PathBuf,

        /// Parent of the satellite subdirectories
        #[arg(long, env = "MATCHUP_SAT_DIR")]
        sat_dir: PathBuf,

        /// Runner configuration (YAML)
        #[arg(long, env = "MATCHUP_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Concatenate per-pair matchup files into one table
    Merge {
        /// Directory holding `<id>_<granule>.csv` files
        #[arg(long, env = "MATCHUP_DIR")]
        matchup_dir: PathBuf,

        /// Merged output file
        #[arg(long)]
        output: PathBuf,

        /// Column to sort rows by, e.g. a datetime column
        #[arg(long)]
        sort_by: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
struct RunPaths {
    /// Field table CSV
    #[arg(long, env = "MATCHUP_FIELD_FILE")]
    field_file: PathBuf,

    /// Output directory for accepted matchups
    #[arg(long, env = "MATCHUP_DIR")]
    matchup_dir: PathBuf,

    /// Parent of the satellite subdirectories
    #[arg(long, env = "MATCHUP_SAT_DIR")]
    sat_dir: PathBuf,

    /// Append-only log of rejected pairs
    #[arg(long, env = "MATCHUP_EXCLUSION_LOG")]
    exclusion_log: PathBuf,

    /// Runner configuration (YAML)
    #[arg(long, env = "MATCHUP_CONFIG")]
    config: Option<PathBuf>,
}

struct Runtime {
    table: FieldTable,
    engine: MatchupEngine,
    source: NetCdfSwathSource,
    sink: FileSink,
}

impl RunPaths {
    fn runtime(&self) -> Result<Runtime> {
        let config = RunnerConfig::load(self.config.as_deref())?;
        let table = FieldTable::from_path(&self.field_file, &config)?;
        let source = NetCdfSwathSource::new(&self.sat_dir, config.satellite_dirs.clone())
            .with_extension(config.extension.clone());
        let sink = FileSink::new(&self.matchup_dir, &self.exclusion_log);
        let engine = MatchupEngine::new(config.matchup).context("invalid matchup configuration")?;
        Ok(Runtime {
            table,
            engine,
            source,
            sink,
        })
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    match args.command {
        Command::Single { id, granid, paths } => {
            let rt = paths.runtime()?;
            let field = rt.table.field_point(&id, &granid)?;
            let outcome = rt.engine.run(&field, &rt.source, &rt.sink)?;
            info!(id = %id, granule = %granid, accepted = outcome.is_accepted(), "Matchup finished");
        }
        Command::Batch {
            links_file,
            jobs,
            paths,
        } => {
            let rt = paths.runtime()?;
            let links = read_links_file(&links_file)?;
            let fields = resolve_links(&rt.table, &links)?;
            info!(pairs = fields.len(), jobs, "Starting batch");
            let summary = run_batch(&rt.engine, &fields, &rt.source, &rt.sink, jobs)?;
            info!(summary = %summary, "Batch finished");
        }
        Command::Report {
            links_file,
            sat_dir,
            config,
        } => {
            let config = RunnerConfig::load(config.as_deref())?;
            let links = read_links_file(&links_file)?;
            report::report(&sat_dir, &config.extension, &links)?.log();
        }
        Command::Merge {
            matchup_dir,
            output,
            sort_by,
        } => {
            merge::merge_dir(&matchup_dir, &output, sort_by.as_deref())?;
        }
    }

    Ok(())
}
