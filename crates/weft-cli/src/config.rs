// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persistence of `weft` defaults between invocations.
//!
//! [`ConfigService`] turns typed values into JSON documents; where those
//! documents live is up to a [`ConfigStore`].

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Where saved JSON documents are kept, one per key.
pub trait ConfigStore {
    /// Bytes last saved under `key`, or [`ConfigError::NotFound`].
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replace whatever is saved under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure to read or write saved defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing saved under the key yet.
    #[error("no saved document")]
    NotFound,
    /// The platform reports no per-user config directory.
    #[error("no per-user config directory on this platform")]
    NoConfigDir,
    /// Reading or writing the document failed.
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not the JSON shape expected.
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Typed load/save of JSON documents over a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Service saving through `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Value saved under `key`; `Ok(None)` when nothing (or an empty file)
    /// is there.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Save `value` under `key` as pretty-printed JSON.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}
