#![allow(clippy::print_stdout)]
//! Admin CLI for the SMS contact history database.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sms_history::config::AppConfig;
use sms_history::db;
use sms_history::logging::init_logging;
use sms_history::validation::InputValidator;
use sms_history::{HistoryRepository, HistoryStore};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file, layered over config/default and config/local
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// History database path, overrides the configured one
    #[arg(short, long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a message exchanged with a number
    Touch {
        /// Phone number (max 15 characters)
        tel: String,

        /// When the message was exchanged (RFC 3339 or YYYY-MM-DD HH:MM:SS, UTC); defaults to now
        #[arg(short, long)]
        at: Option<String>,
    },
    /// Show when a number was last contacted
    Lookup {
        /// Phone number
        tel: String,
    },
    /// Forget a number
    Delete {
        /// Phone number
        tel: String,
    },
    /// List numbers, most recently contacted first
    List {
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Count numbers in the history
    Count,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }

    // Keep the guard alive so file logs flush on exit
    let _log_guard = init_logging(&config.logging)?;

    let database = db::establish_connection(&config.database)
        .with_context(|| format!("Failed to open history database {}", config.database.path))?;
    let repo = HistoryRepository::new(database);

    match cli.command {
        Commands::Touch { tel, at } => {
            let timestamp = at
                .as_deref()
                .map(InputValidator::parse_timestamp)
                .transpose()?;
            match timestamp {
                Some(timestamp) => repo.touch(&tel, timestamp)?,
                None => repo.touch_now(&tel)?,
            }
            info!(tel = %tel, "History updated");
        },
        Commands::Lookup { tel } => match repo.lookup(&tel)? {
            Some(last_message) => println!("{tel}  last: {}", last_message.to_rfc3339()),
            None => {
                println!("{tel}: not found");
                return Ok(ExitCode::FAILURE);
            },
        },
        Commands::Delete { tel } => {
            if repo.delete(&tel)? {
                println!("Deleted {tel}");
            } else {
                println!("{tel}: not found, nothing deleted");
            }
        },
        Commands::List { limit, json } => {
            let records = repo.list(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No history entries.");
            } else {
                for (i, record) in records.iter().enumerate() {
                    println!("{}) {}  last: {}", i + 1, record.tel, record.last_message.to_rfc3339());
                }
            }
        },
        Commands::Count => println!("{}", repo.count()?),
    }

    Ok(ExitCode::SUCCESS)
}
