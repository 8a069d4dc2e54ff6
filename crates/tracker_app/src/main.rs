//! `unfollow-tracker`: reports accounts that do not follow back, either
//! from a downloaded account-data archive or from public profile listings.

use std::io;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracker_engine::{
    reconcile_archive, ExportFormat, LogProgressSink, ParserOptions, RemoteOutcome,
    RemoteReconciler, ReqwestFetcher, TimestampZone,
};
use tracker_logging::{tracker_debug, tracker_info};

mod cli;
mod config;
mod logging;
mod render;

use cli::{Cli, Command, ExportArgs, RemoteArgs};
use config::AppConfig;
use render::OutputMode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load(cli.config.as_deref())?;

    let level_name = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let Some(level) = tracker_logging::parse_level(level_name) else {
        bail!("unknown log level {level_name:?}");
    };
    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    logging::initialize(level, log_file);
    tracker_debug!("Configuration: {:?}", config);

    match cli.command {
        Command::Export(args) => run_export(args, &config),
        Command::Remote(args) => run_remote(args, &config),
        Command::Config => {
            println!("{}", config::to_ron(&config)?);
            Ok(())
        }
    }
}

fn run_export(args: ExportArgs, config: &AppConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.archive)
        .with_context(|| format!("failed to read {}", args.archive.display()))?;
    let options = ParserOptions {
        timestamp_zone: if args.local_time {
            TimestampZone::Local
        } else {
            config.timestamp_zone
        },
    };

    let format = ExportFormat::from(args.format);
    tracker_info!(
        "Reconciling {} ({} bytes) as {}",
        args.archive.display(),
        bytes.len(),
        format
    );
    let result = reconcile_archive(&bytes, format, options).context(
        "please ensure you uploaded the correct ZIP file and selected the correct data format",
    )?;

    let request = args.view.table_query(config.per_page);
    render::render_export(&mut io::stdout().lock(), &result, &request, mode(args.view.json))?;
    Ok(())
}

fn run_remote(args: RemoteArgs, config: &AppConfig) -> anyhow::Result<()> {
    let mut settings = config.remote.remote_settings();
    if let Some(max_pages) = args.max_pages {
        settings.max_pages = max_pages;
    }
    let fetcher = ReqwestFetcher::new(config.remote.fetch_settings())?;
    let reconciler = RemoteReconciler::new(fetcher, settings);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let outcome = runtime
        .block_on(reconciler.reconcile(&args.handle, &LogProgressSink))
        .with_context(|| format!("failed to fetch listings for {}", args.handle))?;

    match outcome {
        RemoteOutcome::HandleNotFound { handle } => {
            bail!("username {handle:?} not found; please enter a valid username")
        }
        RemoteOutcome::Found(result) => {
            let request = args.view.table_query(config.per_page);
            render::render_remote(
                &mut io::stdout().lock(),
                &result,
                &request,
                mode(args.view.json),
            )?;
            Ok(())
        }
    }
}

fn mode(json: bool) -> OutputMode {
    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
