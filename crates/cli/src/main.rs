use anyhow::{Context, Result};
use bankroll::{AccountTotals, PlayerStatus, StatusStats};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use pipeline::{FilterConfig, FilterState, FilterValue, SortOrder, SortSpec};
use records::Snapshot;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Bankroll dashboard rules from the command line
#[derive(Parser)]
#[command(name = "bankroll")]
#[command(
    about = "Query player rosters, classify spreadsheet status and total balances",
    long_about = None
)]
struct Cli {
    /// Directory holding players.json and accounts.json
    #[arg(short, long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter and sort a dataset
    Query {
        /// Dataset to query (defaults to <data-dir>/players.json)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Filter configuration JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Free-text search term
        #[arg(long, default_value = "")]
        search: String,

        /// Filter value as key=JSON, e.g. balance='{"min":50}' (repeatable)
        #[arg(long = "filter", value_parser = parse_filter_arg)]
        filters: Vec<(String, FilterValue)>,

        /// Field to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction
        #[arg(long, default_value = "asc")]
        order: SortOrder,

        /// Print only the active filters
        #[arg(long)]
        summary: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify every player's spreadsheet status
    Status {
        /// Show why each player got its status
        #[arg(long)]
        explain: bool,
    },

    /// Show balance and P&L totals
    Totals {
        /// Break totals down per platform
        #[arg(long)]
        by_platform: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            file,
            config,
            search,
            filters,
            sort,
            order,
            summary,
            json,
        } => {
            let file = file.unwrap_or_else(|| cli.data_dir.join("players.json"));
            let state: FilterState = filters.into_iter().collect();
            let sort = SortSpec { field: sort, order };
            handle_query(&file, config.as_deref(), &state, &search, &sort, summary, json)?
        }
        Commands::Status { explain } => handle_status(&load_snapshot(&cli.data_dir)?, explain),
        Commands::Totals { by_platform } => {
            handle_totals(&load_snapshot(&cli.data_dir)?, by_platform)
        }
    }

    Ok(())
}

/// Parse `key=value`; the value is JSON, or a bare string when it is not.
fn parse_filter_arg(arg: &str) -> Result<(String, FilterValue), String> {
    let (key, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
    if key.is_empty() {
        return Err(format!("missing filter key in '{arg}'"));
    }
    let value: Value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
    let value: FilterValue = serde_json::from_value(value).map_err(|err| err.to_string())?;
    Ok((key.to_string(), value))
}

fn load_snapshot(data_dir: &Path) -> Result<Snapshot> {
    let start = Instant::now();
    let snapshot = Snapshot::load_from_dir(data_dir)
        .with_context(|| format!("Failed to load dashboard data from {}", data_dir.display()))?;
    let (players, accounts) = snapshot.counts();
    println!(
        "{} Loaded {} players and {} accounts in {:?}",
        "✓".green(),
        players,
        accounts,
        start.elapsed()
    );
    Ok(snapshot)
}

/// Handle the 'query' command
fn handle_query(
    file: &Path,
    config_path: Option<&Path>,
    state: &FilterState,
    search: &str,
    sort: &SortSpec,
    summary_only: bool,
    json: bool,
) -> Result<()> {
    let dataset = records::load_records(file)
        .with_context(|| format!("Failed to load dataset {}", file.display()))?;
    let config = match config_path {
        Some(path) => FilterConfig::from_path(path)?,
        None => FilterConfig::new(),
    };

    for key in state.iter().map(|(key, _)| key) {
        if config.definition(key).is_none() {
            tracing::warn!("Filter '{}' is not declared in the config and has no effect", key);
        }
    }

    let output = pipeline::query(&dataset, &config, state, search, sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if output.active_filters.is_empty() {
        println!("{}", "No active filters".dimmed());
    } else {
        println!("{}", "Active filters:".bold().blue());
        for chip in &output.active_filters {
            println!("  • {}", chip.label);
        }
    }
    if summary_only {
        return Ok(());
    }

    println!(
        "{}",
        format!("{} of {} records", output.result.len(), dataset.len()).bold()
    );
    for record in &output.result {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

fn status_badge(status: PlayerStatus) -> ColoredString {
    let text = status.display_name();
    match status {
        PlayerStatus::Critical => text.red().bold(),
        PlayerStatus::Pending => text.yellow(),
        PlayerStatus::Complete => text.green(),
    }
}

/// Handle the 'status' command
fn handle_status(snapshot: &Snapshot, explain: bool) {
    let players = snapshot.player_records();
    let (annotated, stats) = bankroll::annotate(&players);

    println!("{}", "Player status:".bold().blue());
    for entry in &annotated {
        println!("  {:<24} {}", entry.player.name, status_badge(entry.assessment.status));
        if explain {
            println!("      {}", entry.assessment.message);
        }
    }
    print_stats(&stats);
}

fn print_stats(stats: &StatusStats) {
    println!(
        "{} total: {} critical, {} pending, {} complete",
        stats.total,
        stats.critical.to_string().red(),
        stats.pending.to_string().yellow(),
        stats.complete.to_string().green()
    );
}

fn pnl_text(totals: &AccountTotals) -> ColoredString {
    let text = totals.formatted_pnl();
    if totals.total_pnl < 0.0 {
        text.red()
    } else {
        text.green()
    }
}

/// Handle the 'totals' command
fn handle_totals(snapshot: &Snapshot, by_platform: bool) {
    let totals = bankroll::aggregate(&snapshot.accounts);

    if by_platform {
        println!("{}", "Per platform:".bold().blue());
        for (platform, platform_totals) in bankroll::by_platform(&snapshot.accounts) {
            println!(
                "  {:<16} balance {:>14}  P&L {:>14}",
                platform,
                platform_totals.formatted_balance(),
                pnl_text(&platform_totals)
            );
        }
    }
    println!("{} {}", "Total balance:".bold(), totals.formatted_balance());
    println!("{} {}", "Total P&L:".bold(), pnl_text(&totals));
}
