// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `ConfigStore` keeping one `<key>.json` file per document in a directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::config::{ConfigError, ConfigStore};

/// Saved defaults as files under one directory.
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Store in the per-user weft config directory (e.g. `~/.config/weft`).
    pub fn new() -> Result<Self, ConfigError> {
        let dirs =
            ProjectDirs::from("dev", "flyingrobots", "weft").ok_or(ConfigError::NoConfigDir)?;
        Self::at(dirs.config_dir())
    }

    /// Store in `base`, creating it if needed.
    pub fn at(base: &Path) -> Result<Self, ConfigError> {
        fs::create_dir_all(base)?;
        Ok(Self {
            base: base.to_path_buf(),
        })
    }

    /// File the document for `key` is saved in.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        fs::read(self.path_for(key)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::Io(err),
        })
    }

    /// Written beside the target and renamed over it, so a reader never sees
    /// half a document.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.base)?;
        let staged = self.base.join(format!("{key}.json.partial"));
        fs::write(&staged, data)?;
        fs::rename(staged, self.path_for(key))?;
        Ok(())
    }
}
