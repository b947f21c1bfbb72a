//! Command-line interface.
//!
//! Stands in for the request front end and the scheduler: each subcommand
//! is one invocation of a core operation.

pub mod completions;
pub mod context;
pub mod device;
pub mod distribute;
pub mod init;
pub mod keys;
pub mod output;
pub mod secrets;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

/// keyfleet - Provision symmetric keys and distribute them to a device fleet.
#[derive(Parser)]
#[command(
    name = "keyfleet",
    about = "Provision symmetric keys and distribute them RSA-wrapped to a device fleet",
    version
)]
pub struct Cli {
    /// Path to keyfleet.toml (defaults to ./keyfleet.toml if present)
    #[arg(long, global = true, env = "KEYFLEET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write a default keyfleet.toml in the current directory
    Init,

    /// Generate a new 256-bit key and store it under a name
    Provision {
        /// Key name (5 to 20 characters by default)
        key_name: Option<String>,
        /// Read a JSON request ({"key_name": ...}) from a file, or - for stdin
        #[arg(long)]
        request: Option<String>,
        /// Output the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Wrap a stored key for one RSA public key
    Wrap {
        /// Key name
        #[arg(long)]
        key_name: Option<String>,
        /// Base64 SubjectPublicKeyInfo of the recipient
        #[arg(long)]
        public_key: Option<String>,
        /// Read a JSON request ({"key_name", "client_public_key"}) from a file, or - for stdin
        #[arg(long)]
        request: Option<String>,
        /// Output the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Wrap every key for every enrolled device
    Distribute {
        /// Keep running on the configured interval
        #[arg(long)]
        watch: bool,
        /// Stop watching after this many runs
        #[arg(long, requires = "watch")]
        runs: Option<usize>,
        /// Output run summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the secret store
    Secrets {
        #[command(subcommand)]
        action: SecretsAction,
    },

    /// Manage the device directory
    Device {
        #[command(subcommand)]
        action: DeviceAction,
    },

    /// Generate shell completions
    Completions {
        /// bash, zsh, fish, powershell, or elvish
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Secret store subcommands.
#[derive(Subcommand)]
pub enum SecretsAction {
    /// List key names in the store
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Device directory subcommands.
#[derive(Subcommand)]
pub enum DeviceAction {
    /// Enroll a device with its RSA public key
    Enroll {
        /// Device id
        id: String,
        /// Base64 SubjectPublicKeyInfo reported by the device
        public_key: String,
        /// Replace the reported key of an enrolled device
        #[arg(short, long)]
        force: bool,
    },

    /// List enrolled devices
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a device record
    Show {
        /// Device id
        id: String,
    },
}

/// Execute a command.
pub fn execute(command: Command, config: Option<&Path>) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Init => init::execute(config),
        Provision {
            key_name,
            request,
            json,
        } => keys::provision(config, key_name, request.as_deref(), json),
        Wrap {
            key_name,
            public_key,
            request,
            json,
        } => keys::wrap(config, key_name, public_key, request.as_deref(), json),
        Distribute { watch, runs, json } => {
            if watch {
                distribute::watch(config, runs, json)
            } else {
                distribute::execute(config, json)
            }
        }
        Secrets { action } => match action {
            SecretsAction::List { json } => secrets::list(config, json),
        },
        Device { action } => match action {
            DeviceAction::Enroll {
                id,
                public_key,
                force,
            } => device::enroll(config, &id, &public_key, force),
            DeviceAction::List { json } => device::list(config, json),
            DeviceAction::Show { id } => device::show(config, &id),
        },
        Completions { shell } => completions::execute(shell),
    }
}
