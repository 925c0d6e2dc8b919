//! Bankline CLI - query your bank transactions from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::{balance, count, health, history, transaction};

/// Bankline - bank transaction queries in your terminal
#[derive(Parser)]
#[command(name = "bk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show transaction history for an account
    History {
        /// Account number to query
        account: String,
        /// Earliest transaction date (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        date_from: Option<String>,
        /// Latest transaction date (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        date_to: Option<String>,
        /// Maximum number of transactions to fetch (1-1000)
        #[arg(long)]
        limit: Option<u32>,
        /// Filter by reference number
        #[arg(long)]
        reference_id: Option<String>,
        /// Filter by exact incoming amount
        #[arg(long)]
        amount_in: Option<Decimal>,
        /// Filter by exact outgoing amount
        #[arg(long)]
        amount_out: Option<Decimal>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count transactions for an account
    Count {
        /// Account number to query
        account: String,
        /// Earliest transaction date (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        date_from: Option<String>,
        /// Latest transaction date (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        date_to: Option<String>,
        /// Count transactions after this transaction ID
        #[arg(long)]
        id_from: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the derived balance for an account
    Balance {
        /// Account number to query
        account: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up a single transaction by its provider ID
    Transaction {
        /// Transaction ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check provider connectivity and configuration
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::History {
            account,
            date_from,
            date_to,
            limit,
            reference_id,
            amount_in,
            amount_out,
            json,
        } => {
            history::run(
                &account,
                date_from.as_deref(),
                date_to.as_deref(),
                limit,
                reference_id,
                amount_in,
                amount_out,
                json,
            )
            .await
        }
        Commands::Count {
            account,
            date_from,
            date_to,
            id_from,
            json,
        } => count::run(&account, date_from.as_deref(), date_to.as_deref(), id_from, json).await,
        Commands::Balance { account, json } => balance::run(&account, json).await,
        Commands::Transaction { id, json } => transaction::run(&id, json).await,
        Commands::Health { json } => health::run(json).await,
    }
}
