// ABOUTME: calorie-tracker - log food, estimate its nutrition with a local model, track the daily budget
// ABOUTME: Parses arguments, loads configuration, runs the tracker and maps failures to exit codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Interactive mode - prompts for one item
//! calorie-tracker
//!
//! # Single food entry
//! calorie-tracker "2 slices pizza"
//!
//! # Multiple food entries, processed in order
//! calorie-tracker "150g chicken breast" "1 cup rice"
//!
//! # Show today's entries and budget without logging anything
//! calorie-tracker --status
//!
//! # Use another model and keep the data out of git
//! calorie-tracker --model llama3.1:8b --no-sync "1 apple"
//! ```

mod commands;
mod helpers;

use clap::Parser;
use std::path::PathBuf;
use std::process::{self, ExitCode};
use std::time::Duration;
use tokio::signal;
use tracing::{debug, error};

use calorie_tracker::config::{DailyLimit, TrackerConfig};
use calorie_tracker::errors::AppResult;
use calorie_tracker::logging;
use calorie_tracker::models::LedgerDate;
use calorie_tracker::tracker::CalorieTracker;

use helpers::display;

/// Conventional exit status after SIGINT
const INTERRUPTED_EXIT_CODE: u8 = 130;

#[derive(Parser)]
#[command(
    name = "calorie-tracker",
    version,
    about = "Track your food intake using a local LLM",
    long_about = "Estimates protein, carbs, fat and calories for each food description with a \
                  locally hosted language model, appends the result to today's ledger and shows \
                  how much of the daily limit is left."
)]
struct Cli {
    /// Description(s) of the food eaten including amounts (e.g. '2 slices pizza')
    foods: Vec<String>,

    /// Daily calorie limit
    #[arg(long, value_name = "KCAL")]
    limit: Option<u32>,

    /// Estimation service endpoint
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Model used for estimation
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Directory holding the daily ledger files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Seconds to wait for each estimation reply
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Do not pull or push with git
    #[arg(long)]
    no_sync: bool,

    /// Show today's entries and summary without logging anything
    #[arg(long, conflicts_with = "foods")]
    status: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    fn config(&self) -> AppResult<TrackerConfig> {
        let mut config = TrackerConfig::from_env()?;
        if let Some(limit) = self.limit {
            config.daily_limit = DailyLimit::new(limit)?;
        }
        if let Some(endpoint) = &self.endpoint {
            config.estimator.endpoint.clone_from(endpoint);
        }
        if let Some(model) = &self.model {
            config.estimator.model.clone_from(model);
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir.clone_from(data_dir);
        }
        if let Some(secs) = self.timeout_secs {
            config.estimator.timeout = Duration::from_secs(secs);
        }
        if self.no_sync {
            config.sync.enabled = false;
        }
        config.validate()?;
        Ok(config)
    }
}

async fn run(cli: Cli) -> AppResult<u8> {
    let config = cli.config()?;
    let tracker = CalorieTracker::from_config(config)?;
    let date = LedgerDate::today();
    debug!(date = %date, status = cli.status, items = cli.foods.len(), "Starting run");

    if cli.status {
        Ok(commands::status::show(&tracker, date).await)
    } else {
        commands::log::run(&tracker, date, cli.foods).await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_from_env(cli.verbose) {
        eprintln!("⚠️  Logging unavailable: {e}");
    }

    tokio::select! {
        result = run(cli) => match result {
            Ok(code) => ExitCode::from(code),
            Err(e) => {
                error!(code = ?e.code, "Run failed: {e}");
                display::error(&e);
                ExitCode::from(e.exit_code())
            }
        },
        Ok(()) = signal::ctrl_c() => {
            display::farewell();
            // A pending stdin read would keep the runtime from shutting down
            process::exit(i32::from(INTERRUPTED_EXIT_CODE));
        }
    }
}
