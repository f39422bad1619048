pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod leaderboard;
pub mod parsing;
pub mod services;
pub mod session;
pub mod stats;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::services::leaderboard::ModeSummary;
use crate::services::{LeaderboardService, LeaderboardSummary, ServerService, UploadService};
use crate::session::Session;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_leaderboard(dry_run: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = open_database(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(async {
        let service = LeaderboardService::new(pool, config);
        service.run(dry_run).await
    })?;

    print_summary(&summary);
    Ok(())
}

pub fn handle_import(tournament_id: i64, file: &Path) -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = open_database(&config)?;
    let content = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let service = UploadService::new(pool, &config);
    let report = service.ingest(&Session::local_operator(), tournament_id, &filename, &content)?;

    println!(
        "{} {} {} rows into tournament {}: {} added, {} updated",
        "Imported".green().bold(),
        report.rows_accepted,
        report.kind,
        report.tournament_id,
        report.players_added,
        report.players_updated
    );
    Ok(())
}

pub fn handle_create_tournament(name: &str) -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = open_database(&config)?;
    let mut conn = database::get_connection(&pool)?;

    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Tournament name is required");
    }
    let tournament = database::tournaments::insert_tournament(&mut conn, name)?;
    println!(
        "{} tournament {} '{}'",
        "Created".green().bold(),
        tournament.id,
        tournament.name
    );
    Ok(())
}

pub fn handle_reset_database(yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("Refusing to reset the database without --yes");
    }
    let config = AppConfig::from_env()?;
    let pool = database::create_pool(&config.server.database_path)?;
    database::setup::reset_database(&mut database::get_connection(&pool)?)?;

    println!("{} {}", "Reset".red().bold(), config.server.database_path);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}

fn open_database(config: &AppConfig) -> Result<DbPool> {
    let pool = database::create_pool(&config.server.database_path)?;
    database::setup::ensure_schema(&mut database::get_connection(&pool)?)?;
    Ok(pool)
}

fn print_summary(summary: &LeaderboardSummary) {
    let heading = format!("Leaderboard for period {}", summary.period_key);
    println!("{}", heading.bold());
    if summary.dry_run {
        println!("{}", "Dry run: nothing was written".yellow());
    }
    println!(
        "{} feed rows, {} within the recency window",
        summary.rows_fetched, summary.rows_scored
    );

    print_mode(&summary.daily);
    print_mode(&summary.weekly);

    if !summary.dry_run {
        println!(
            "{} {} leaderboard rows, credited {} users with all-time points",
            "Wrote".green(),
            summary.rows_written,
            summary.all_time_updated
        );
    }
}

fn print_mode(mode: &ModeSummary) {
    println!("\n{} ({} users)", mode.mode.to_string().cyan().bold(), mode.users);
    for (idx, user) in mode.top.iter().enumerate() {
        println!("  {:>2}. {:<24} {:>6}", idx + 1, user.username, user.stars.to_string().yellow());
    }
}
