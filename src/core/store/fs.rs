//! Filesystem-based secret store.
//!
//! One file per secret under a root directory, holding the base64 value.

use std::fs;
use std::path::PathBuf;

use tracing::debug;
use zeroize::Zeroizing;

use super::SecretStore;
use crate::error::{Result, SecretError, StoreError};

/// Filesystem secret store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    /// Store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn secret_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(name))
    }
}

/// Reject names that would escape the root or collide with temp files.
fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if bad {
        return Err(StoreError::InvalidName(name.to_string()).into());
    }
    Ok(())
}

impl SecretStore for Filesystem {
    fn list_secret_names(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "store root missing, no secrets");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(StoreError::Io)? {
            let entry = entry.map_err(StoreError::Io)?;
            if !entry.file_type().map_err(StoreError::Io)?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn get_secret_value(&self, name: &str) -> Result<Zeroizing<String>> {
        let path = self.secret_path(name)?;
        if !path.is_file() {
            return Err(SecretError::NotFound(name.to_string()).into());
        }
        let contents = Zeroizing::new(fs::read_to_string(&path).map_err(StoreError::Io)?);
        Ok(Zeroizing::new(contents.trim().to_string()))
    }

    fn set_secret_value(&self, name: &str, value: &str) -> Result<()> {
        let path = self.secret_path(name)?;
        fs::create_dir_all(&self.root).map_err(StoreError::Io)?;

        // Write beside the target, then rename over it
        let tmp = self.root.join(format!(".{}.tmp", name));
        let contents = Zeroizing::new(format!("{}\n", value));
        fs::write(&tmp, contents.as_bytes()).map_err(StoreError::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
                .map_err(StoreError::Io)?;
        }

        fs::rename(&tmp, &path).map_err(StoreError::Io)?;
        debug!(secret = %name, "secret written");
        Ok(())
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}
