//! Command implementations for filesem.
//!
//! `dispatch` resolves the effective configuration, installs logging, opens
//! the lock store and routes the parsed command to its handler.


use crate::cli::{Cli, Command, GlobalArgs, KeyArgs, ListArgs};
use filesem::config::Config;
use filesem::error::SemaphoreError;
use filesem::exit_codes;
use filesem::log::{FanoutSink, LogSink, NdjsonSink, TracingSink};
use filesem::semaphore::{KeyedFileLock, LeaseInfo, LeaseState, format_timestamp};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "FILESEM_LOG";

/// Outcome of a command that did not succeed.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The store reported an error.
    #[error(transparent)]
    Semaphore(#[from] SemaphoreError),

    /// An acquire found a live lease, or a release found nothing to remove.
    #[error("{0}")]
    Declined(String),
}

impl CommandError {
    /// Returns the process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Semaphore(e) => e.exit_code(),
            CommandError::Declined(_) => exit_codes::DECLINED,
        }
    }
}

/// Result type alias for command handlers.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.global)?;
    init_tracing(&config);

    match cli.command {
        Command::Config => {
            print!("{}", config.to_yaml()?);
            Ok(())
        }
        Command::Acquire(args) => cmd_acquire(&open_store(&config)?, args),
        Command::Release(args) => cmd_release(&open_store(&config)?, args),
        Command::Status(args) => cmd_status(&open_store(&config)?, args),
        Command::List(args) => cmd_list(&open_store(&config)?, args),
    }
}

/// Effective configuration: file (explicit or discovered) plus CLI overrides.
pub(crate) fn resolve_config(global: &GlobalArgs) -> filesem::Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir().map_err(|e| {
                SemaphoreError::Config(format!("failed to determine current directory: {}", e))
            })?;
            Config::discover(cwd)?
        }
    };

    if let Some(root) = &global.root {
        config.root = root.clone();
    }
    if let Some(lease_seconds) = global.lease_seconds {
        config.lease_seconds = lease_seconds;
    }

    config.validate()?;
    Ok(config)
}

/// Log sink for a configuration: tracing, plus the NDJSON audit file if set.
pub(crate) fn build_sink(config: &Config) -> Arc<dyn LogSink> {
    match &config.event_log {
        Some(path) => Arc::new(
            FanoutSink::new()
                .with(Arc::new(TracingSink))
                .with(Arc::new(NdjsonSink::new(path))),
        ),
        None => Arc::new(TracingSink),
    }
}

pub(crate) fn open_store(config: &Config) -> filesem::Result<KeyedFileLock> {
    KeyedFileLock::new(&config.root, config.lease_seconds, build_sink(config))
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(crate) fn cmd_acquire(store: &KeyedFileLock, args: KeyArgs) -> Result<()> {
    if !store.acquire(&args.key)? {
        return Err(CommandError::Declined(format!(
            "key \"{}\" is {}",
            args.key,
            store.inspect(&args.key)?
        )));
    }

    match store.inspect(&args.key)?.expires_at() {
        Some(ts) => println!("Acquired {} until {}", args.key, format_timestamp(ts)),
        None => println!("Acquired {}", args.key),
    }
    Ok(())
}

pub(crate) fn cmd_release(store: &KeyedFileLock, args: KeyArgs) -> Result<()> {
    if !store.release(&args.key) {
        return Err(CommandError::Declined(format!(
            "key \"{}\" was not released",
            args.key
        )));
    }

    println!("Released {}", args.key);
    Ok(())
}

fn cmd_status(store: &KeyedFileLock, args: KeyArgs) -> Result<()> {
    let state = store.inspect(&args.key)?;
    println!("{}: {}", args.key, state);
    Ok(())
}

fn cmd_list(store: &KeyedFileLock, args: ListArgs) -> Result<()> {
    let leases = store.list()?;

    if args.json {
        println!("{}", render_lease_json(&leases));
        return Ok(());
    }

    if leases.is_empty() {
        println!("No lease records under {}.", store.root().display());
        return Ok(());
    }

    println!("Lease records ({}):", leases.len());
    println!();
    for lease in &leases {
        println!("  {}", lease);
    }

    let reclaimable = leases
        .iter()
        .filter(|l| matches!(l.state, LeaseState::Expired { .. } | LeaseState::Corrupt))
        .count();
    if reclaimable > 0 {
        println!();
        println!(
            "Note: {} record(s) are expired or unreadable and will be reclaimed by the next acquire.",
            reclaimable
        );
    }

    Ok(())
}

/// Pretty-printed JSON array describing `leases`.
pub(crate) fn render_lease_json(leases: &[LeaseInfo]) -> String {
    let items = leases
        .iter()
        .map(|lease| {
            json!({
                "key": lease.key,
                "state": lease.state.as_str(),
                "expires_at": lease.state.expires_at(),
                "path": lease.path.display().to_string(),
            })
        })
        .collect();

    format!("{:#}", Value::Array(items))
}
