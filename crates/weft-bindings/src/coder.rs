// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Base binding builder shared by both roles.

use weft_codec::Coder;
use weft_registry_api::{MethodDef, Value};

use crate::capability::{Attach, Capabilities, RoleBinding};
use crate::method::Args;
use crate::{CallError, MethodTable, RegistryError};

const BLOCK_SIZE: MethodDef = MethodDef {
    name: "block_size",
    doc: "Size of the block in bytes.",
    args: &[],
};
const PAYLOAD_SIZE: MethodDef = MethodDef {
    name: "payload_size",
    doc: "Size of one payload in bytes.",
    args: &[],
};
const SYMBOL_SIZE: MethodDef = MethodDef {
    name: "symbol_size",
    doc: "Size of one symbol in bytes.",
    args: &[],
};
const SYMBOLS: MethodDef = MethodDef {
    name: "symbols",
    doc: "Number of symbols in the block.",
    args: &[],
};
const RANK: MethodDef = MethodDef {
    name: "rank",
    doc: "Symbols available (encoder) or pivots held (decoder).",
    args: &[],
};

fn block_size<C: Coder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    Ok(codec.block_size().into())
}

fn payload_size<C: Coder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    Ok(codec.payload_size().into())
}

fn symbol_size<C: Coder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    Ok(codec.symbol_size().into())
}

fn symbols<C: Coder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    Ok(codec.symbols().into())
}

fn rank<C: Coder>(codec: &mut C, _args: Args<'_>) -> Result<Value, CallError> {
    Ok(codec.rank().into())
}

/// Methods every exposed codec type carries: the size accessors, `rank`,
/// and `trace` when the type records trace events.
pub fn coder<C: Capabilities>(type_name: &str) -> Result<MethodTable<C>, RegistryError> {
    let mut table = MethodTable::new(type_name);
    table.define(BLOCK_SIZE, block_size::<C>)?;
    table.define(PAYLOAD_SIZE, payload_size::<C>)?;
    table.define(SYMBOL_SIZE, symbol_size::<C>)?;
    table.define(SYMBOLS, symbols::<C>)?;
    table.define(RANK, rank::<C>)?;
    <C::Trace as Attach<C>>::attach(&mut table)?;
    Ok(table)
}

/// Complete method table for `C`: base methods plus its role's methods and
/// capabilities.
pub fn binding<C: Capabilities>(type_name: &str) -> Result<MethodTable<C>, RegistryError> {
    let mut table = coder::<C>(type_name)?;
    <C::Role as RoleBinding<C>>::generate(&mut table)?;
    Ok(table)
}
