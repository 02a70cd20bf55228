// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Capability method groups.
//!
//! Each group defines a fixed set of methods and only implements [`Attach`]
//! for codecs that implement the corresponding codec trait. Groups never
//! share method names except the two feedback groups, which are mutually
//! exclusive by role.

use weft_codec::{
    FeedbackReader, FeedbackWriter, PartialDecodingTracker, Recoder, SparseDensity, Systematic,
    Traced,
};
use weft_registry_api::{ArgDef, ArgType, MethodDef, Value};

use crate::capability::Attach;
use crate::method::Args;
use crate::{CallError, MethodTable, RegistryError};

/// `recode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecodeMethods;

/// `is_partial_complete`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialCompleteMethods;

/// Decoder side of feedback: `feedback_size`, `write_feedback`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteFeedbackMethods;

/// Encoder side of feedback: `feedback_size`, `read_feedback`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadFeedbackMethods;

/// `set_density`, `density`, `set_average_nonzero_symbols`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityMethods;

/// `is_systematic_on`, `set_systematic_on`, `set_systematic_off`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystematicMethods;

/// `trace([zone])`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceMethods;

const NO_ARGS: &[ArgDef] = &[];

const fn required(name: &'static str, ty: ArgType) -> ArgDef {
    ArgDef {
        name,
        ty,
        required: true,
    }
}

const fn method(name: &'static str, doc: &'static str, args: &'static [ArgDef]) -> MethodDef {
    MethodDef { name, doc, args }
}

const RECODE: MethodDef = method("recode", "Produce a recoded payload.", NO_ARGS);
const IS_PARTIAL_COMPLETE: MethodDef = method(
    "is_partial_complete",
    "Whether every symbol received so far is decoded.",
    NO_ARGS,
);
const FEEDBACK_SIZE: MethodDef = method("feedback_size", "Feedback buffer size in bytes.", NO_ARGS);
const WRITE_FEEDBACK: MethodDef = method("write_feedback", "Serialize feedback.", NO_ARGS);
const READ_FEEDBACK: MethodDef = method(
    "read_feedback",
    "Apply decoder feedback.",
    &[required("feedback", ArgType::Bytes)],
);
const SET_DENSITY: MethodDef = method(
    "set_density",
    "Set coefficient density in (0, 1].",
    &[required("density", ArgType::Float)],
);
const DENSITY: MethodDef = method("density", "Current coefficient density.", NO_ARGS);
const SET_AVERAGE_NONZERO_SYMBOLS: MethodDef = method(
    "set_average_nonzero_symbols",
    "Set density from an average number of nonzero coefficients.",
    &[required("symbols", ArgType::Int)],
);
const IS_SYSTEMATIC_ON: MethodDef = method("is_systematic_on", "Whether systematic mode is on.", NO_ARGS);
const SET_SYSTEMATIC_ON: MethodDef = method("set_systematic_on", "Turn systematic mode on.", NO_ARGS);
const SET_SYSTEMATIC_OFF: MethodDef = method("set_systematic_off", "Turn systematic mode off.", NO_ARGS);
const TRACE: MethodDef = method(
    "trace",
    "Drain recorded trace events, optionally filtered by zone.",
    &[ArgDef {
        name: "zone",
        ty: ArgType::Str,
        required: false,
    }],
);

impl<C: Recoder> Attach<C> for RecodeMethods {
    const PRESENT: bool = true;

    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(RECODE, recode::<C>)
    }
}

fn recode<C: Recoder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    let mut payload = vec![0u8; codec.payload_size() as usize];
    let len = codec.recode(&mut payload)?;
    payload.truncate(len);
    Ok(payload.into())
}

impl<C: PartialDecodingTracker> Attach<C> for PartialCompleteMethods {
    const PRESENT: bool = true;

    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(IS_PARTIAL_COMPLETE, |codec: &mut C, _| {
            Ok(codec.is_partial_complete().into())
        })
    }
}

impl<C: FeedbackWriter> Attach<C> for WriteFeedbackMethods {
    const PRESENT: bool = true;

    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(FEEDBACK_SIZE, |codec: &mut C, _| {
            Ok(FeedbackWriter::feedback_size(codec).into())
        })?;
        table.define(WRITE_FEEDBACK, write_feedback::<C>)
    }
}

fn write_feedback<C: FeedbackWriter>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    let mut feedback = vec![0u8; FeedbackWriter::feedback_size(codec) as usize];
    let len = codec.write_feedback(&mut feedback)?;
    feedback.truncate(len);
    Ok(feedback.into())
}

impl<C: FeedbackReader> Attach<C> for ReadFeedbackMethods {
    const PRESENT: bool = true;

    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(FEEDBACK_SIZE, |codec: &mut C, _| {
            Ok(FeedbackReader::feedback_size(codec).into())
        })?;
        table.define(READ_FEEDBACK, |codec: &mut C, args| {
            codec.read_feedback(args.bytes(0)?)?;
            Ok(Value::None)
        })
    }
}

impl<C: SparseDensity> Attach<C> for DensityMethods {
    const PRESENT: bool = true;

    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(SET_DENSITY, |codec: &mut C, args| {
            codec.set_density(args.float(0)?)?;
            Ok(Value::None)
        })?;
        table.define(DENSITY, |codec: &mut C, _| Ok(codec.density().into()))?;
        table.define(SET_AVERAGE_NONZERO_SYMBOLS, |codec: &mut C, args| {
            codec.set_average_nonzero_symbols(args.uint(0)?)?;
            Ok(Value::None)
        })
    }
}

impl<C: Systematic> Attach<C> for SystematicMethods {
    const PRESENT: bool = true;

    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(IS_SYSTEMATIC_ON, |codec: &mut C, _| {
            Ok(codec.is_systematic_on().into())
        })?;
        table.define(SET_SYSTEMATIC_ON, |codec: &mut C, _| {
            codec.set_systematic_on();
            Ok(Value::None)
        })?;
        table.define(SET_SYSTEMATIC_OFF, |codec: &mut C, _| {
            codec.set_systematic_off();
            Ok(Value::None)
        })
    }
}

impl<C: Traced> Attach<C> for TraceMethods {
    const PRESENT: bool = true;

    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(TRACE, |codec: &mut C, args| {
            let zone = args.opt_str(0)?;
            Ok(codec.take_trace(zone).into())
        })
    }
}
