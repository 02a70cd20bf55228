// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Decoder generator.

use weft_codec::Decoder;
use weft_registry_api::{ArgDef, ArgType, MethodDef, Role, Value};

use crate::capability::{Attach, Capabilities, RoleBinding};
use crate::method::Args;
use crate::{CallError, MethodTable, RegistryError};

/// Generator for the decoder role.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderRole;

const DECODE: MethodDef = MethodDef {
    name: "decode",
    doc: "Consume one payload (payload_size bytes).",
    args: &[ArgDef {
        name: "symbol_data",
        ty: ArgType::Bytes,
        required: true,
    }],
};
const IS_COMPLETE: MethodDef = MethodDef {
    name: "is_complete",
    doc: "Whether every symbol is decoded.",
    args: &[],
};
const SYMBOLS_UNCODED: MethodDef = MethodDef {
    name: "symbols_uncoded",
    doc: "Number of symbols in uncoded form.",
    args: &[],
};
const COPY_SYMBOLS: MethodDef = MethodDef {
    name: "copy_symbols",
    doc: "Current block contents (block_size bytes).",
    args: &[],
};

fn decode<C: Decoder>(codec: &mut C, args: Args<'_>) -> Result<Value, CallError> {
    codec.decode(args.bytes(0)?)?;
    Ok(Value::None)
}

fn is_complete<C: Decoder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    Ok(codec.is_complete().into())
}

fn symbols_uncoded<C: Decoder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    Ok(codec.symbols_uncoded().into())
}

fn copy_symbols<C: Decoder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    let mut block = vec![0u8; codec.block_size() as usize];
    codec.copy_symbols(&mut block)?;
    Ok(block.into())
}

impl<C> RoleBinding<C> for DecoderRole
where
    C: Capabilities + Decoder,
{
    const ROLE: Role = Role::Decoder;

    fn generate(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(DECODE, decode::<C>)?;
        table.define(IS_COMPLETE, is_complete::<C>)?;
        table.define(SYMBOLS_UNCODED, symbols_uncoded::<C>)?;
        table.define(COPY_SYMBOLS, copy_symbols::<C>)?;
        <C::Recode as Attach<C>>::attach(table)?;
        <C::PartialDecoding as Attach<C>>::attach(table)?;
        <C::Feedback as Attach<C>>::attach(table)
    }
}
