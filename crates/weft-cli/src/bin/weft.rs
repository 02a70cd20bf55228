// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for weft.

use anyhow::Result;
use weft_cli::entrypoint;

fn main() -> Result<()> {
    entrypoint()
}
