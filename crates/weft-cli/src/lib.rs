// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Developer CLI for the weft codec registry.
//!
//! `weft list` enumerates the exposed types, `weft describe` prints one
//! type's methods and capabilities, and `weft roundtrip` drives an encoder
//! and decoder through the dynamic bindings over a simulated lossy channel.
//! Round-trip defaults persist as JSON in the platform config directory.

pub mod cli;
pub mod config;
pub mod fs_store;
pub mod prefs;
pub mod roundtrip;

pub use cli::entrypoint;
