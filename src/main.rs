use anyhow::Result;

use ootp_tournament_stats::cli::Command;
use ootp_tournament_stats::{
    handle_completions, handle_create_tournament, handle_import, handle_leaderboard,
    handle_reset_database, handle_serve, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Leaderboard { dry_run } => handle_leaderboard(*dry_run),
        Command::Import { tournament, file } => handle_import(*tournament, file),
        Command::CreateTournament { name } => handle_create_tournament(name),
        Command::ResetDatabase { yes } => handle_reset_database(*yes),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
