//! keyfleet - Provision symmetric keys and distribute them to a device fleet.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyfleet::cli::{execute, output, Cli};
use keyfleet::error::{ConfigError, DirectoryError, Error, Status};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("KEYFLEET_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keyfleet=debug")
        } else {
            EnvFilter::new("keyfleet=info")
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    if let Err(e) = execute(cli.command, cli.config.as_deref()) {
        report(&e);
        let code = match e.status() {
            Status::ClientError => 2,
            Status::ServerError => 1,
        };
        std::process::exit(code);
    }
}

/// Print a failed command. Internal faults go to the log, not the terminal.
fn report(e: &Error) {
    match e {
        Error::Validation(errors) => {
            for field in errors.as_slice() {
                output::error(&field.to_string());
            }
        }
        Error::Config(config_error) => {
            output::error(&e.to_string());
            if let ConfigError::NotFound(_) = config_error {
                output::hint("run: keyfleet init");
            }
        }
        Error::Directory(DirectoryError::AlreadyEnrolled(_)) => {
            output::error(&e.to_string());
            output::hint("pass --force to replace the reported key");
        }
        Error::Directory(DirectoryError::DeviceNotFound(_)) => output::error(&e.to_string()),
        _ => {
            tracing::error!(error = %e, "command failed");
            output::error("internal server error, see log for details");
        }
    }
}
