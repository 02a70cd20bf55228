// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encode a random block, push payloads over a lossy channel, decode and verify.

use anyhow::{bail, ensure, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use weft_bindings::naming::resolve_factory_name;
use weft_bindings::{Instance, Registry};
use weft_field::FieldKind;
use weft_registry_api::{Role, Value};

use crate::prefs::CliPrefs;

/// Family without field arithmetic.
const NO_CODE: &str = "NoCode";

/// What to round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripPlan {
    /// Family label, e.g. `FullVector`.
    pub family: String,
    /// Field label; ignored for `NoCode`.
    pub field: String,
    /// Use the trace-enabled variants.
    pub trace: bool,
    /// Dimensions, round limit and loss.
    pub prefs: CliPrefs,
    /// Seed for the source block and the loss pattern.
    pub seed: u64,
}

/// Outcome of a successful round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripReport {
    /// Encoder type name.
    pub encoder: String,
    /// Decoder type name.
    pub decoder: String,
    /// Payloads produced by the encoder.
    pub sent: u32,
    /// Payloads dropped in transit.
    pub lost: u32,
    /// Feedback messages returned to the encoder.
    pub feedback: u32,
    /// Symbols the decoder received uncoded.
    pub uncoded: u32,
    /// Decoded bytes.
    pub block_size: usize,
    /// Encoder trace, when tracing is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Decoder family able to decode `family`'s payloads.
fn decoder_family(family: &str) -> &str {
    match family {
        "SparseFullVector" => "FullVector",
        other => other,
    }
}

fn bytes(value: Value, method: &str) -> Result<Vec<u8>> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => bail!("{method} returned {} instead of bytes", other.kind()),
    }
}

fn flag(value: Value, method: &str) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => bail!("{method} returned {} instead of bool", other.kind()),
    }
}

fn uint(value: Value, method: &str) -> Result<u32> {
    match value {
        Value::Int(i) => u32::try_from(i).with_context(|| format!("{method} returned {i}")),
        other => bail!("{method} returned {} instead of int", other.kind()),
    }
}

fn build(
    registry: &Registry,
    family: &str,
    role: Role,
    plan: &RoundTripPlan,
) -> Result<Instance> {
    let field = if family == NO_CODE { "" } else { plan.field.as_str() };
    let name = resolve_factory_name(family, role, field, plan.trace);
    let mut factory = registry
        .factory(&name, plan.prefs.symbols, plan.prefs.symbol_size)
        .with_context(|| format!("no {role} for family {family} over field {field:?}"))?;
    factory.set_symbols(plan.prefs.symbols)?;
    factory.set_symbol_size(plan.prefs.symbol_size)?;
    Ok(factory.build()?)
}

fn has(instance: &Instance, method: &str) -> bool {
    instance.methods().iter().any(|m| m.name == method)
}

/// Run `plan` against `registry`.
pub fn run(registry: &Registry, plan: &RoundTripPlan) -> Result<RoundTripReport> {
    let prefs = plan.prefs;
    ensure!(
        (0.0..1.0).contains(&prefs.loss),
        "loss must be in [0, 1), got {}",
        prefs.loss
    );

    if plan.family != NO_CODE && FieldKind::from_label(&plan.field).is_none() {
        let known: Vec<&str> = FieldKind::ALL.iter().map(|k| k.label()).collect();
        bail!("unknown field {:?}, expected one of {}", plan.field, known.join(", "));
    }

    let mut encoder = build(registry, &plan.family, Role::Encoder, plan)?;
    let mut decoder = build(registry, decoder_family(&plan.family), Role::Decoder, plan)?;
    let feedback_loop = has(&decoder, "write_feedback") && has(&encoder, "read_feedback");
    info!(
        encoder = encoder.type_name(),
        decoder = decoder.type_name(),
        symbols = prefs.symbols,
        symbol_size = prefs.symbol_size,
        "starting round trip"
    );

    let mut rng = StdRng::seed_from_u64(plan.seed);
    let mut block = vec![0u8; prefs.symbols as usize * prefs.symbol_size as usize];
    rng.fill_bytes(&mut block);
    encoder.call("set_symbols", &[Value::Bytes(block.clone())])?;

    let (mut sent, mut lost, mut feedback) = (0u32, 0u32, 0u32);
    let mut complete = false;
    while sent < prefs.max_rounds {
        let payload = bytes(encoder.call("encode", &[])?, "encode")?;
        sent += 1;
        if prefs.loss > 0.0 && rng.gen_bool(prefs.loss) {
            lost += 1;
            continue;
        }
        decoder.call("decode", &[Value::Bytes(payload)])?;
        if feedback_loop {
            let message = decoder.call("write_feedback", &[])?;
            encoder.call("read_feedback", &[message])?;
            feedback += 1;
        }
        complete = flag(decoder.call("is_complete", &[])?, "is_complete")?;
        if complete {
            break;
        }
    }
    if !complete {
        let rank = uint(decoder.call("rank", &[])?, "rank")?;
        bail!(
            "decoder incomplete after {sent} payloads ({lost} lost), rank {rank} of {}",
            prefs.symbols
        );
    }

    let decoded = bytes(decoder.call("copy_symbols", &[])?, "copy_symbols")?;
    ensure!(decoded == block, "decoded block differs from the source block");
    let uncoded = uint(decoder.call("symbols_uncoded", &[])?, "symbols_uncoded")?;
    let trace = if plan.trace {
        match encoder.call("trace", &[])? {
            Value::Str(s) => Some(s),
            _ => None,
        }
    } else {
        None
    };
    debug!(sent, lost, feedback, "round trip verified");

    Ok(RoundTripReport {
        encoder: encoder.type_name().to_owned(),
        decoder: decoder.type_name().to_owned(),
        sent,
        lost,
        feedback,
        uncoded,
        block_size: decoded.len(),
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(family: &str, field: &str) -> RoundTripPlan {
        RoundTripPlan {
            family: family.into(),
            field: field.into(),
            trace: false,
            prefs: CliPrefs {
                symbols: 6,
                symbol_size: 16,
                max_rounds: 512,
                loss: 0.0,
            },
            seed: 7,
        }
    }

    #[test]
    fn lossless_systematic_run_needs_one_payload_per_symbol() {
        let registry = weft_bindings::global().unwrap();
        let report = run(registry, &plan("FullVector", "Binary8")).unwrap();
        assert_eq!(report.sent, 6);
        assert_eq!(report.uncoded, 6);
        assert_eq!(report.block_size, 96);
        assert_eq!(report.decoder, "FullVectorDecoderBinary8");
    }

    #[test]
    fn sparse_encoder_pairs_with_full_vector_decoder() {
        let registry = weft_bindings::global().unwrap();
        let report = run(registry, &plan("SparseFullVector", "Binary16")).unwrap();
        assert_eq!(report.encoder, "SparseFullVectorEncoderBinary16");
        assert_eq!(report.decoder, "FullVectorDecoderBinary16");
    }

    #[test]
    fn lossy_sliding_window_uses_feedback() {
        let registry = weft_bindings::global().unwrap();
        let mut lossy = plan("SlidingWindow", "Binary8");
        lossy.prefs.loss = 0.3;
        let report = run(registry, &lossy).unwrap();
        assert!(report.feedback > 0);
        assert_eq!(report.feedback + report.lost, report.sent);
    }

    #[test]
    fn no_code_ignores_the_field() {
        let registry = weft_bindings::global().unwrap();
        let mut traced = plan("NoCode", "Binary8");
        traced.trace = true;
        let report = run(registry, &traced).unwrap();
        assert_eq!(report.encoder, "NoCodeEncoderTrace");
        assert!(report.trace.is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn unknown_field_names_the_known_ones() {
        let registry = weft_bindings::global().unwrap();
        let err = run(registry, &plan("FullVector", "Binary32")).unwrap_err();
        assert!(err.to_string().contains("Binary, Binary4, Binary8, Binary16"));
    }

    #[test]
    fn unknown_family_and_bad_loss_are_errors() {
        let registry = weft_bindings::global().unwrap();
        assert!(run(registry, &plan("Reed", "Binary8")).is_err());
        let mut bad = plan("FullVector", "Binary8");
        bad.prefs.loss = 1.0;
        assert!(run(registry, &bad).is_err());
    }
}
