//! ipswr - resolve Apple firmware downloads from AppleDB
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Given an OS name, a semver constraint, and optionally a device
//! identifier, `ipswr` syncs a local AppleDB checkout and prints the
//! download URL of the best-matching IPSW firmware image.
//!
//! # Examples
//!
//! ```text
//! ipswr resolve --os iOS --version ">=16.1, <17" --device iPhone11,2
//! ipswr resolve --os macOS --version "^13" --json
//! ipswr sync --path /tmp/appledb
//! ```

pub mod cmd;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ipswr_core::AppleDbConfig;

#[derive(Debug, Parser)]
#[command(name = "ipswr")]
#[command(author, version, about = "Resolve Apple firmware (IPSW) downloads from AppleDB")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the best-matching firmware image
    Resolve {
        /// OS name as recorded in AppleDB (e.g. iOS, macOS, tvOS)
        #[arg(long)]
        os: String,
        /// Version constraint (e.g. ">=16.1, <17"; admit betas with a
        /// prerelease floor like ">=17.0.0-0")
        #[arg(long)]
        version: String,
        /// Device identifier (e.g. iPhone11,2); omit to match any device
        #[arg(long)]
        device: Option<String>,
        /// Use the existing local dataset without touching the network
        #[arg(long)]
        offline: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Refresh the local AppleDB checkout
    Sync {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
}

/// Dataset location flags shared by every command.
#[derive(Debug, Args)]
pub struct DatasetArgs {
    /// AppleDB git remote to sync from
    #[arg(long, value_name = "URL")]
    pub git_url: Option<String>,

    /// Local dataset checkout (defaults to `appledb` under the user
    /// cache directory)
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

impl DatasetArgs {
    /// Fold the flags over the documented defaults.
    pub fn into_config(self, offline: bool) -> AppleDbConfig {
        let mut config = AppleDbConfig {
            offline,
            ..AppleDbConfig::default()
        };
        if let Some(git_url) = self.git_url {
            config.git_url = git_url;
        }
        if let Some(path) = self.path {
            config.local_path = path;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_args_parse() {
        let cli = Cli::try_parse_from([
            "ipswr", "resolve", "--os", "iOS", "--version", ">=16.1", "--device", "iPhone11,2",
            "--offline", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                os,
                version,
                device,
                offline,
                json,
                ..
            } => {
                assert_eq!(os, "iOS");
                assert_eq!(version, ">=16.1");
                assert_eq!(device.as_deref(), Some("iPhone11,2"));
                assert!(offline);
                assert!(json);
            }
            Commands::Sync { .. } => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn test_resolve_requires_os_and_version() {
        assert!(Cli::try_parse_from(["ipswr", "resolve", "--os", "iOS"]).is_err());
        assert!(Cli::try_parse_from(["ipswr", "resolve", "--version", "^16"]).is_err());
    }

    #[test]
    fn test_dataset_flags_override_defaults() {
        let config = DatasetArgs {
            git_url: Some("https://example.com/appledb.git".into()),
            path: Some(PathBuf::from("/tmp/appledb")),
        }
        .into_config(true);

        assert_eq!(config.git_url, "https://example.com/appledb.git");
        assert_eq!(config.local_path, PathBuf::from("/tmp/appledb"));
        assert!(config.offline);

        let defaults = DatasetArgs {
            git_url: None,
            path: None,
        }
        .into_config(false);
        assert_eq!(defaults.git_url, ipswr_core::DEFAULT_GIT_URL);
        assert!(defaults.local_path.ends_with("appledb"));
    }
}
