// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use weft_bindings::Registry;
use weft_registry_api::{CapabilityFlags, RegistryProvider, Role, TypeDef};

use crate::config::ConfigService;
use crate::fs_store::FsConfigStore;
use crate::prefs::{CliPrefs, PrefsOverride, PREFS_KEY};
use crate::roundtrip::{self, RoundTripPlan};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(about = "Inspect and exercise the weft erasure codecs")]
pub struct Cli {
    /// Directory holding saved defaults (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List exposed codec types
    List {
        /// Only types of this family (e.g. SlidingWindow)
        #[arg(long)]
        family: Option<String>,
        /// Only types over this field (e.g. Binary8)
        #[arg(long)]
        field: Option<String>,
        /// Only encoders or only decoders
        #[arg(long)]
        role: Option<RoleArg>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the methods and capabilities of one exposed type
    Describe {
        /// Exposed type name, e.g. FullVectorEncoderBinary8
        name: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Encode a random block, send it over a lossy channel and verify the decode
    Roundtrip {
        /// Encoder family label
        #[arg(long, default_value = "FullVector")]
        family: String,
        /// Field label (ignored for NoCode)
        #[arg(long, default_value = "Binary8")]
        field: String,
        /// Use trace-enabled variants and print the encoder trace
        #[arg(long)]
        trace: bool,
        /// Symbols per block
        #[arg(long)]
        symbols: Option<u32>,
        /// Bytes per symbol
        #[arg(long)]
        symbol_size: Option<u32>,
        /// Payloads to send before giving up
        #[arg(long)]
        max_rounds: Option<u32>,
        /// Probability of dropping each payload
        #[arg(long)]
        loss: Option<f64>,
        /// Seed for the source block and the loss pattern
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Persist the effective symbols/size/rounds/loss as new defaults
        #[arg(long)]
        save_defaults: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Role filter.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleArg {
    /// Encoders only.
    Encoder,
    /// Decoders only.
    Decoder,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Encoder => Self::Encoder,
            RoleArg::Decoder => Self::Decoder,
        }
    }
}

fn capability_list(caps: CapabilityFlags) -> String {
    [
        (caps.systematic_encoder, "systematic"),
        (caps.sparse, "sparse"),
        (caps.recode, "recode"),
        (caps.partial_decoding_tracker, "partial"),
        (caps.feedback, "feedback"),
        (caps.trace, "trace"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(",")
}

/// Types matching the given filters, in registration order.
pub fn select<'a>(
    registry: &'a Registry,
    family: Option<&str>,
    field: Option<&str>,
    role: Option<Role>,
) -> Vec<&'a TypeDef> {
    registry
        .all_types()
        .iter()
        .filter(|t| family.is_none_or(|f| t.family == f))
        .filter(|t| field.is_none_or(|f| t.field == f))
        .filter(|t| role.is_none_or(|r| t.role == r))
        .collect()
}

fn list(out: &mut impl Write, types: &[&TypeDef], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, types)?;
        writeln!(out)?;
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Type", "Factory", "Field", "Capabilities"]);
    for t in types {
        let field = if t.field.is_empty() { "-" } else { t.field };
        table.add_row(vec![
            t.name.clone(),
            t.factory.clone(),
            field.to_owned(),
            capability_list(t.capabilities),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn describe(out: &mut impl Write, def: &TypeDef, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, def)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "{} ({} {}, built by {})", def.name, def.family, def.role, def.factory)?;
    writeln!(out, "capabilities: {}", capability_list(def.capabilities))?;
    let mut table = Table::new();
    table.set_header(vec!["Method", "Arguments", "Description"]);
    for m in &def.methods {
        let args = m
            .args
            .iter()
            .map(|a| {
                let opt = if a.required { "" } else { "?" };
                format!("{}{opt}: {}", a.name, a.ty.as_str())
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![m.name.to_owned(), args, m.doc.to_owned()]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn config_service(dir: Option<&PathBuf>) -> Option<ConfigService<FsConfigStore>> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    };
    match store {
        Ok(store) => Some(ConfigService::new(store)),
        Err(err) => {
            warn!(error = %err, "config store unavailable, using built-in defaults");
            None
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

/// Parse the command line and run it.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    run(cli, &mut io::stdout().lock())
}

/// Run an already parsed command, writing results to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let registry = weft_bindings::global().context("failed to build codec registry")?;
    match cli.command {
        Commands::List {
            family,
            field,
            role,
            json,
        } => {
            let types = select(
                registry,
                family.as_deref(),
                field.as_deref(),
                role.map(Role::from),
            );
            list(out, &types, json)
        }
        Commands::Describe { name, json } => {
            let def = registry
                .type_by_name(&name)
                .with_context(|| format!("unknown type {name}"))?;
            describe(out, def, json)
        }
        Commands::Roundtrip {
            family,
            field,
            trace,
            symbols,
            symbol_size,
            max_rounds,
            loss,
            seed,
            save_defaults,
            json,
        } => {
            let config = config_service(cli.config_dir.as_ref());
            let saved = match &config {
                Some(service) => service
                    .load::<CliPrefs>(PREFS_KEY)
                    .context("failed to load saved defaults")?
                    .unwrap_or_default(),
                None => CliPrefs::default(),
            };
            let prefs = saved.overlay(&PrefsOverride {
                symbols,
                symbol_size,
                max_rounds,
                loss,
            });
            let plan = RoundTripPlan {
                family,
                field,
                trace,
                prefs,
                seed,
            };
            let report = roundtrip::run(registry, &plan)?;
            if save_defaults {
                let service = config.context("no config directory to save defaults into")?;
                service
                    .save(PREFS_KEY, &prefs)
                    .context("failed to save defaults")?;
            }
            if json {
                serde_json::to_writer_pretty(&mut *out, &report)?;
                writeln!(out)?;
            } else {
                writeln!(
                    out,
                    "{} -> {}: {} bytes verified after {} payloads ({} lost, {} uncoded, {} feedback)",
                    report.encoder,
                    report.decoder,
                    report.block_size,
                    report.sent,
                    report.lost,
                    report.uncoded,
                    report.feedback
                )?;
                if let Some(trace) = &report.trace {
                    write!(out, "{trace}")?;
                }
            }
            Ok(())
        }
    }
}
