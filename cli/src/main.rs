//! ownable - command-line runtime for a single-owner registry.
//!
//! # Architecture
//!
//! The binary plays the part of the execution environment around
//! [`ownable_core::OwnerRegistry`]: it says who the caller is (`--as`), runs
//! one operation, and persists the result to a JSON state file.
//!
//! ```text
//! main() -> load config -> init_tracing() -> Store -> commands::{deploy,owner,transfer,history}
//!                                                            |
//!                                                            v
//!                                          Outcome::Applied | Outcome::Rejected(code)
//! ```
//!
//! # Exit status
//!
//! - `0`: the call was applied (or the query succeeded)
//! - `1`: IO, config, or state file errors
//! - `2`: usage errors (reported by clap)
//! - `3`: the registry rejected the call (`NOT_OWNER`, `ZERO_ADDRESS`, `SAME_OWNER`)

mod commands;
mod state;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ownable_config::{ConfigError, OwnableConfig};
use ownable_types::Identity;

use crate::commands::Outcome;
use crate::state::{DEFAULT_STATE_FILE, Store};

const DEFAULT_LOG_FILTER: &str = "warn";
const REJECTED_EXIT_CODE: u8 = 3;

/// Single-owner registry runtime
#[derive(Parser, Debug)]
#[command(name = "ownable")]
#[command(version, about, long_about = None)]
struct Args {
    /// Registry state file (defaults to `[state] path` in config, then ./ownable-state.json)
    #[arg(long, global = true, value_name = "PATH")]
    state: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" (overrides RUST_LOG and config)
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a registry owned by the deploying identity
    Deploy {
        /// Identity performing the deployment
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: Identity,

        /// Replace an existing state file
        #[arg(long)]
        force: bool,
    },
    /// Print the current owner
    Owner,
    /// Hand ownership to another identity (owner only)
    Transfer {
        /// Identity making the call
        #[arg(long = "as", value_name = "IDENTITY")]
        caller: Identity,

        /// Identity that should own the registry afterwards
        #[arg(value_name = "NEW_OWNER")]
        new_owner: Identity,
    },
    /// Print every recorded ownership transfer, oldest first
    History {
        /// Emit a JSON array instead of one line per event
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(cli_filter: Option<&str>, config: Option<&OwnableConfig>) {
    let env_filter = cli_filter
        .and_then(|filter| EnvFilter::try_new(filter).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| {
            config
                .and_then(OwnableConfig::log_filter)
                .and_then(|filter| EnvFilter::try_new(filter).ok())
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries command output; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(env_filter)
        .init();
}

fn resolve_state_path(cli: Option<PathBuf>, config: Option<&OwnableConfig>) -> PathBuf {
    cli.or_else(|| config.and_then(OwnableConfig::state_path))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE))
}

fn run(args: Args, config: Option<&OwnableConfig>) -> Result<Outcome> {
    let store = Store::new(resolve_state_path(args.state, config));
    tracing::debug!(path = %store.path().display(), "Using registry state file");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match args.command {
        Command::Deploy { caller, force } => commands::deploy(&store, caller, force, &mut out)?,
        Command::Owner => {
            commands::owner(&store, &mut out)?;
            Outcome::Applied
        }
        Command::Transfer { caller, new_owner } => {
            commands::transfer(&store, caller, new_owner, &mut out)?
        }
        Command::History { json } => {
            commands::history(&store, json, &mut out)?;
            Outcome::Applied
        }
    };

    out.flush()?;
    Ok(outcome)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, config_error): (Option<OwnableConfig>, Option<ConfigError>) =
        match OwnableConfig::load() {
            Ok(config) => (config, None),
            Err(err) => (None, Some(err)),
        };

    init_tracing(args.log.as_deref(), config.as_ref());
    if let Some(err) = config_error {
        tracing::warn!(path = %err.path().display(), "Ignoring unreadable config: {err}");
    }

    match run(args, config.as_ref()) {
        Ok(Outcome::Applied) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected(err)) => {
            eprintln!("rejected: {}", err.code());
            ExitCode::from(REJECTED_EXIT_CODE)
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
