//! `micropos-seed` -- insert synthetic menu items into the backend.
//!
//! ```text
//! micropos-seed --count 20 --env staging --label
//! ```
//!
//! Settings come from `.env.{environment}` (falling back to `.env`) in the
//! config directory. In production the batch is capped at one item.
//! Ctrl-C stops the batch before the next insert.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use micropos_core::environment::Environment;
use micropos_core::logging::{self, LogConfig};
use micropos_core::settings::{resolve_environment, Settings};
use micropos_db::PostgrestClient;
use micropos_seeder::{DataSeeder, LabelDecorator};

#[derive(Debug, Parser)]
#[command(name = "micropos-seed", version, about = "Seed the menu with generated items")]
struct Cli {
    /// Number of items to insert.
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Target environment (local, development, staging, production).
    /// Defaults to `ENVIRONMENT`, then development.
    #[arg(short, long)]
    env: Option<Environment>,

    /// Prefix generated titles/descriptions with an environment label.
    #[arg(long)]
    label: bool,

    /// Directory holding the env files.
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("micropos-seed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let environment = resolve_environment(cli.env)?;
    let (settings, source) = Settings::load(&cli.config_dir, environment)
        .with_context(|| format!("Failed to load settings for {environment}"))?;

    let default_filter = if settings.debug {
        "micropos_seeder=debug,micropos_seed=debug,micropos_db=debug"
    } else {
        "micropos_seeder=info,micropos_seed=info,micropos_db=info"
    };
    logging::init(&LogConfig::from_source(&source, default_filter))?;

    tracing::info!(
        environment = %environment,
        version = %settings.version,
        count = cli.count,
        label = cli.label,
        "Starting micropos-seed"
    );

    let client = PostgrestClient::new(&settings.api_url, &settings.api_key)
        .context("Failed to create backend client")?;

    let mut seeder = DataSeeder::new(Arc::new(client), environment);
    if cli.label {
        seeder = seeder.with_decorator(LabelDecorator::for_environment(environment));
    }

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current item");
            ctrl_c_cancel.cancel();
        }
    });

    match seeder.seed_with_cancel(cli.count, &cancel).await {
        Ok(outcome) => {
            println!(
                "Seeded {} of {} items in {environment}{}",
                outcome.seeded,
                outcome.count,
                if outcome.cancelled { " (cancelled)" } else { "" }
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("{failure}");
            eprintln!("{}", serde_json::to_string_pretty(&failure.details())?);
            Ok(ExitCode::FAILURE)
        }
    }
}
