// ABOUTME: CLI command definitions using clap
// ABOUTME: Global options select config, database, and acting user; subcommands act on keypairs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod create;
pub mod delete;
pub mod list;
pub mod show;

#[derive(Parser, Debug)]
#[command(name = "keypairs", about = "Manage tenant SSH keypairs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: <config dir>/keypairs/config.toml)
    #[arg(long, global = true, env = "KEYPAIRS_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path, overriding the config file
    #[arg(long, global = true, env = "KEYPAIRS_DB")]
    pub db: Option<PathBuf>,

    /// User whose keypairs are managed
    #[arg(long, global = true, env = "KEYPAIRS_USER")]
    pub user: Option<String>,

    /// Print API JSON envelopes instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generate a keypair, or import a public key
    Create {
        /// Keypair name
        name: String,

        /// OpenSSH public key file to import instead of generating
        #[arg(long)]
        public_key_file: Option<PathBuf>,

        /// Algorithm for generated keys (ssh-ed25519, ssh-rsa, ecdsa-sha2-nistp256)
        #[arg(long = "type", conflicts_with = "public_key_file")]
        key_type: Option<String>,
    },

    /// List keypairs
    List,

    /// Show one keypair
    Show {
        /// Keypair name
        name: String,
    },

    /// Delete a keypair
    Delete {
        /// Keypair name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_import() {
        let cli = Cli::try_parse_from([
            "keypairs",
            "--user",
            "alice",
            "create",
            "laptop",
            "--public-key-file",
            "id.pub",
        ])
        .unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert_eq!(
            cli.command,
            Command::Create {
                name: "laptop".into(),
                public_key_file: Some(PathBuf::from("id.pub")),
                key_type: None,
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["keypairs", "list", "--json", "--user", "bob"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn type_conflicts_with_import() {
        let result = Cli::try_parse_from([
            "keypairs",
            "create",
            "k",
            "--type",
            "rsa",
            "--public-key-file",
            "id.pub",
        ]);
        assert!(result.is_err());
    }
}
