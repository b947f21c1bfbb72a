//! Configuration and backend resolution shared by commands.

use std::path::Path;

use tracing::debug;

use crate::core::config::Config;
use crate::core::directory::JsonFile;
use crate::core::store::Filesystem;
use crate::error::Result;

/// Loaded configuration plus the backends it points at.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
}

impl Context {
    /// Load `path`, or `./keyfleet.toml` if present, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Config::load_or_default(p, true)?,
            None => Config::load_or_default(&Config::default_path(), false)?,
        };
        debug!(
            store = %config.store.path.display(),
            directory = %config.directory.path.display(),
            "context resolved"
        );
        Ok(Self { config })
    }

    /// Secret store from the `[store]` section.
    pub fn store(&self) -> Filesystem {
        Filesystem::new(&self.config.store.path)
    }

    /// Device directory from the `[directory]` section.
    pub fn directory(&self) -> JsonFile {
        JsonFile::new(&self.config.directory.path)
    }
}
