// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encoder generator.

use weft_codec::Encoder;
use weft_registry_api::{ArgDef, ArgType, MethodDef, Role, Value};

use crate::capability::{Attach, Capabilities, RoleBinding};
use crate::method::Args;
use crate::{CallError, MethodTable, RegistryError};

/// Generator for the encoder role.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncoderRole;

const DATA: ArgDef = ArgDef {
    name: "data",
    ty: ArgType::Bytes,
    required: true,
};

const ENCODE: MethodDef = MethodDef {
    name: "encode",
    doc: "Produce the next payload.",
    args: &[],
};
const SET_SYMBOLS: MethodDef = MethodDef {
    name: "set_symbols",
    doc: "Install the whole source block (block_size bytes).",
    args: &[DATA],
};
const SET_SYMBOL: MethodDef = MethodDef {
    name: "set_symbol",
    doc: "Install one source symbol (symbol_size bytes).",
    args: &[
        ArgDef {
            name: "index",
            ty: ArgType::Int,
            required: true,
        },
        DATA,
    ],
};

fn encode<C: Encoder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    let mut payload = vec![0u8; codec.payload_size() as usize];
    let len = codec.encode(&mut payload)?;
    payload.truncate(len);
    Ok(payload.into())
}

fn set_symbols<C: Encoder>(codec: &mut C, args: Args<'_>) -> Result<Value, CallError> {
    codec.set_symbols(args.bytes(0)?)?;
    Ok(Value::None)
}

fn set_symbol<C: Encoder>(codec: &mut C, args: Args<'_>) -> Result<Value, CallError> {
    codec.set_symbol(args.uint(0)?, args.bytes(1)?)?;
    Ok(Value::None)
}

impl<C> RoleBinding<C> for EncoderRole
where
    C: Capabilities + Encoder,
{
    const ROLE: Role = Role::Encoder;

    fn generate(table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        table.define(ENCODE, encode::<C>)?;
        table.define(SET_SYMBOLS, set_symbols::<C>)?;
        table.define(SET_SYMBOL, set_symbol::<C>)?;
        <C::Sparse as Attach<C>>::attach(table)?;
        <C::Systematic as Attach<C>>::attach(table)?;
        <C::Feedback as Attach<C>>::attach(table)
    }
}
