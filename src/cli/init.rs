//! Init command - write a default keyfleet.toml.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::error::Result;

/// Write the default configuration to `path` or `./keyfleet.toml`.
pub fn execute(path: Option<&Path>) -> Result<()> {
    let default_path = Config::default_path();
    let path = path.unwrap_or(&default_path);

    let config = Config::default();
    config.write_new(path)?;
    info!(path = %path.display(), "wrote default config");

    output::success(&format!("initialized {}", path.display()));
    output::kv("store:    ", config.store.path.display());
    output::kv("directory:", config.directory.path.display());
    output::hint("next: keyfleet provision <KEY_NAME>");
    Ok(())
}
