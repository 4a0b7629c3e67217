use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use uada::{
    commands::{self, evaluate::ValidatorKind, fee::FeeKind},
    config,
};

#[derive(Parser)]
#[command(name = "uada")]
#[command(about = "Operator tooling for the uADA validators", long_about = None)]
struct Cli {
    /// Path to config file (default: ./uada.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a validator over a JSON invocation (script context, datum and redeemer)
    Evaluate {
        /// Validator to run
        #[arg(long, value_enum)]
        validator: ValidatorKind,

        /// Invocation file
        invocation: PathBuf,
    },

    /// Derive the one-shot NFT name for a UTxO
    NftName {
        /// Transaction id (hex)
        tx_id: String,

        /// Output index
        index: u64,
    },

    /// Quote the treasury fee for a mint or withdrawal
    Fee {
        /// Mint or withdraw
        #[arg(value_enum)]
        kind: FeeKind,

        /// Amount of lovelace locked or unlocked
        amount: i128,
    },

    /// Print the fee parameter datum as CBOR hex, with its hash
    EncodeParams,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = config::config_path(cli.config.as_deref());

    match cli.command {
        Commands::Evaluate {
            validator,
            invocation,
        } => commands::evaluate::run(&config_path, validator, &invocation),
        Commands::NftName { tx_id, index } => commands::nft_name::run(&tx_id, index),
        Commands::Fee { kind, amount } => commands::fee::run(&config_path, kind, amount),
        Commands::EncodeParams => commands::encode_params::run(&config_path),
    }
}
