// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved defaults for `weft roundtrip`.

use serde::{Deserialize, Serialize};

/// Config key the preferences are stored under.
pub const PREFS_KEY: &str = "cli-prefs";

/// Round-trip defaults, overridable per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliPrefs {
    /// Symbols per block.
    pub symbols: u32,
    /// Bytes per symbol.
    pub symbol_size: u32,
    /// Payloads to send before giving up.
    pub max_rounds: u32,
    /// Probability that a payload is dropped in transit.
    pub loss: f64,
}

impl Default for CliPrefs {
    fn default() -> Self {
        Self {
            symbols: 16,
            symbol_size: 1400,
            max_rounds: 1024,
            loss: 0.0,
        }
    }
}

/// Per-invocation overrides; `None` keeps the saved value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrefsOverride {
    /// Symbols per block.
    pub symbols: Option<u32>,
    /// Bytes per symbol.
    pub symbol_size: Option<u32>,
    /// Payloads to send before giving up.
    pub max_rounds: Option<u32>,
    /// Drop probability.
    pub loss: Option<f64>,
}

impl CliPrefs {
    /// Apply `over` on top of these preferences.
    pub fn overlay(self, over: &PrefsOverride) -> Self {
        Self {
            symbols: over.symbols.unwrap_or(self.symbols),
            symbol_size: over.symbol_size.unwrap_or(self.symbol_size),
            max_rounds: over.max_rounds.unwrap_or(self.max_rounds),
            loss: over.loss.unwrap_or(self.loss),
        }
    }
}
