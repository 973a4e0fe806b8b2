//! CLI argument parsing for filesem.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// filesem: expiring named locks kept as files on a shared filesystem.
///
/// Each key is a file under the root directory holding the UNIX time at
/// which the lease expires. Expired leases are reclaimed by the next acquire.
#[derive(Parser, Debug)]
#[command(name = "filesem")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Options shared by every command.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file to load (default: ./filesem.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Root directory for lease records (overrides config).
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Lease duration in seconds (overrides config).
    #[arg(long, global = true)]
    pub lease_seconds: Option<u64>,
}

/// Available commands for filesem.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Try to take a key. Exits 2 if it is currently held.
    Acquire(KeyArgs),

    /// Delete the lease record for a key. Exits 2 if there was none.
    Release(KeyArgs),

    /// Show the state of a key without changing it.
    Status(KeyArgs),

    /// List every lease record under the root.
    List(ListArgs),

    /// Print the effective configuration as YAML.
    Config,
}

/// Arguments for commands that operate on one key.
#[derive(Parser, Debug)]
pub struct KeyArgs {
    /// The key naming the protected resource.
    pub key: String,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Emit a JSON array instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_acquire_with_overrides() {
        let cli = Cli::try_parse_from([
            "filesem",
            "acquire",
            "jobs",
            "--root",
            "/tmp/locks",
            "--lease-seconds",
            "30",
        ])
        .unwrap();

        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/locks")));
        assert_eq!(cli.global.lease_seconds, Some(30));
        assert!(matches!(cli.command, Command::Acquire(KeyArgs { ref key }) if key == "jobs"));
    }

    #[test]
    fn test_parse_list_json() {
        let cli = Cli::try_parse_from(["filesem", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::List(ListArgs { json: true })));
    }

    #[test]
    fn test_key_is_required() {
        assert!(Cli::try_parse_from(["filesem", "release"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
