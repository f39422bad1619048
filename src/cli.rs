use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "OOTP tournament stats and stars leaderboard")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Fetch the tournament feed, score it and update stored standings
    Leaderboard {
        /// Compute and print the standings without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Merge a stats CSV export into a tournament
    Import {
        /// Tournament id
        #[arg(short, long)]
        tournament: i64,
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Create an empty tournament
    CreateTournament {
        name: String,
    },
    /// Drop all stored tournaments, standings and all-time points
    ResetDatabase {
        /// Confirm the reset; nothing is dropped without it
        #[arg(long)]
        yes: bool,
    },
    /// Print shell completions to stdout
    Completions {
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_database_defaults_to_unconfirmed() {
        let cli = Cli::try_parse_from(["ootp-tournament-stats", "reset-database"]).unwrap();
        assert_eq!(cli.command, Command::ResetDatabase { yes: false });

        let cli = Cli::try_parse_from(["ootp-tournament-stats", "reset-database", "--yes"]).unwrap();
        assert_eq!(cli.command, Command::ResetDatabase { yes: true });
    }
}
