//! `abal`: log weight, manage a goal weight and inspect progress.
//!
//! Usage:
//! ```bash
//! abal log 182.4                      # today
//! abal log 183.0 --date 2026-10-01    # backfill
//! abal goal set 170
//! abal progress
//! abal chart --range 90days
//! abal history
//! abal delete <entry-id>
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use abal_core::CalendarDate;
use abal_infra::{ProgressStore, StoreConfig};
use abal_observability::ObservabilityConfig;
use abal_progress::TimeRange;

#[derive(Parser)]
#[command(name = "abal", about = "Weight progress tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (defaults to ABAL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, global = true, conflicts_with = "data_dir")]
    memory: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Add a weight entry
    Log {
        weight: String,
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<CalendarDate>,
    },
    /// Delete a weight entry by id
    Delete { id: String },
    /// Manage the goal weight
    Goal {
        #[command(subcommand)]
        action: GoalCommand,
    },
    /// Show progress toward the goal
    Progress,
    /// Show the chart series for a time range
    Chart {
        /// 7days, 30days, 90days, year or all
        #[arg(long, default_value = "30days")]
        range: TimeRange,
        /// Anchor date for the window, defaults to today
        #[arg(long)]
        today: Option<CalendarDate>,
    },
    /// List entries newest first with the change from the previous one
    History,
}

#[derive(Subcommand)]
enum GoalCommand {
    Set { weight: String },
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    abal_observability::tracing::init(&ObservabilityConfig::from_env().verbose(cli.verbose));

    let config = match (&cli.data_dir, cli.memory) {
        (_, true) => StoreConfig::memory(),
        (Some(dir), false) => StoreConfig::from_env().with_data_dir(dir),
        (None, false) => StoreConfig::from_env(),
    };
    let mut session = ProgressStore::load(config.open())
        .await
        .with_context(|| format!("failed to load progress from {}", config.data_dir.display()))?;
    tracing::debug!(
        entries = session.history().len(),
        backend = ?config.backend,
        "session ready"
    );

    let output = match cli.command {
        Command::Log { weight, date } => {
            commands::log_weight(&mut session, &weight, date, cli.json).await?
        }
        Command::Delete { id } => commands::delete_entry(&mut session, &id).await?,
        Command::Goal { action } => match action {
            GoalCommand::Set { weight } => commands::set_goal(&mut session, Some(&weight)).await?,
            GoalCommand::Clear => commands::set_goal(&mut session, None).await?,
        },
        Command::Progress => {
            let state = session.goal_state();
            if cli.json {
                serde_json::to_string_pretty(&serde_json::json!({
                    "state": state,
                    "progress": state.progress(),
                }))?
            } else {
                commands::render_goal(&state.progress(), state.remaining())
            }
        }
        Command::Chart { range, today } => {
            let today = today.unwrap_or_else(CalendarDate::today);
            let series = session.chart_series(range, today);
            if cli.json {
                serde_json::to_string_pretty(&series)?
            } else {
                commands::render_chart(range, &series)
            }
        }
        Command::History => {
            let rows = session.delta_ledger();
            if cli.json {
                serde_json::to_string_pretty(&rows)?
            } else {
                commands::render_ledger(&rows)
            }
        }
    };

    println!("{output}");
    Ok(())
}
