use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "clientele")]
#[command(about = "Single-user client-record manager over flat files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory where record files live (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new client with their first service
    #[command(alias = "new")]
    Create {
        /// Full display name (quoted if it has spaces)
        name: String,

        /// Phone number, 10 digits after stripping separators
        phone: String,

        /// Email address
        email: String,

        /// Description of the first requested service
        service: String,
    },

    /// Look a client up by name
    #[command(alias = "show")]
    Get {
        /// Display name (accents and case are ignored for matching)
        name: String,
    },

    /// List all clients
    #[command(alias = "ls")]
    List,

    /// Record another service for an existing client
    #[command(alias = "add")]
    Service {
        /// Display name of the client
        name: String,

        /// Description of the requested service
        description: String,
    },

    /// Remove a client and their record file
    #[command(alias = "rm")]
    Delete {
        /// Display name of the client
        name: String,
    },

    /// Show record counts and service averages
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create() {
        let cli = Cli::parse_from([
            "clientele",
            "create",
            "Ana López",
            "555-123-4567",
            "ana@example.com",
            "router setup",
        ]);
        match cli.command {
            Commands::Create { name, phone, .. } => {
                assert_eq!(name, "Ana López");
                assert_eq!(phone, "555-123-4567");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn aliases_resolve() {
        assert!(matches!(
            Cli::parse_from(["clientele", "ls"]).command,
            Commands::List
        ));
        assert!(matches!(
            Cli::parse_from(["clientele", "rm", "Ana"]).command,
            Commands::Delete { .. }
        ));
    }

    #[test]
    fn data_dir_is_global() {
        let cli = Cli::parse_from(["clientele", "list", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }
}
