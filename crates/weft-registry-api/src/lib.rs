// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host-facing registry interface for weft codec bindings.
//!
//! The registry itself lives in `weft-bindings`. Host adapters (`weft-wasm`,
//! `weft-cli`) depend only on the descriptors and the [`RegistryProvider`]
//! trait defined here, so they can enumerate exposed types, inspect their
//! methods and capabilities, and find factories by name.

use core::fmt;

/// Registry metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegistryInfo {
    /// Host module name under which types are exposed.
    pub module: &'static str,
    /// Registry layout version for breaking changes in naming or methods.
    pub registry_version: u32,
    /// Number of exposed codec types.
    pub type_count: usize,
    /// Number of exposed factory types.
    pub factory_count: usize,
}

/// Codec role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Produces payloads from source symbols.
    Encoder,
    /// Recovers source symbols from payloads.
    Decoder,
}

impl Role {
    /// Name fragment used in exposed type names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Encoder => "Encoder",
            Self::Decoder => "Decoder",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional capabilities detected on a codec type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityFlags {
    /// Records trace events.
    pub trace: bool,
    /// Can emit recoded payloads.
    pub recode: bool,
    /// Tracks partial decoding.
    pub partial_decoding_tracker: bool,
    /// Supports systematic mode.
    pub systematic_encoder: bool,
    /// Sliding-window feedback surface.
    pub feedback: bool,
    /// Density-controlled coefficients.
    pub sparse: bool,
}

/// Argument type accepted by a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgType {
    /// Byte buffer.
    Bytes,
    /// Unsigned integer.
    Int,
    /// Floating-point number.
    Float,
    /// String.
    Str,
}

impl ArgType {
    /// Lowercase name used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
        }
    }
}

/// Argument descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArgDef {
    /// Argument name.
    pub name: &'static str,
    /// Expected type.
    pub ty: ArgType,
    /// Whether the argument must be supplied.
    pub required: bool,
}

/// Descriptor for a single exposed method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodDef {
    /// Method name.
    pub name: &'static str,
    /// One-line documentation.
    pub doc: &'static str,
    /// Positional arguments.
    pub args: &'static [ArgDef],
}

/// Descriptor for an exposed codec type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDef {
    /// Exposed type name, e.g. `FullVectorEncoderBinary8Trace`.
    pub name: String,
    /// Name of the factory that builds this type.
    pub factory: String,
    /// Family label, e.g. `FullVector`.
    pub family: &'static str,
    /// Codec role.
    pub role: Role,
    /// Field label, empty for codecs without field arithmetic.
    pub field: &'static str,
    /// Whether the type records trace events.
    pub trace: bool,
    /// Detected capabilities.
    pub capabilities: CapabilityFlags,
    /// Methods in name order.
    pub methods: Vec<MethodDef>,
}

/// Descriptor for an exposed factory type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FactoryDef {
    /// Exposed factory name, e.g. `FullVectorEncoderFactoryBinary8`.
    pub name: String,
    /// Name of the type built by `build()`.
    pub builds: String,
}

/// Dynamically typed value crossing the host boundary.
///
/// Serialized as `{ "kind": "...", "value": ... }`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value"))]
pub enum Value {
    /// No value.
    None,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Raw bytes, passed through unchanged.
    Bytes(Vec<u8>),
    /// UTF-8 string.
    Str(String),
}

impl Value {
    /// Lowercase kind name used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bytes(_) => "bytes",
            Self::Str(_) => "str",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Registry of exposed codec and factory types.
///
/// Implemented by `weft_bindings::Registry`. Implementations are read-only
/// after construction and safe to share across threads.
pub trait RegistryProvider: Sync {
    /// Registry metadata.
    fn info(&self) -> RegistryInfo;

    /// Look up a codec type by exposed name.
    fn type_by_name(&self, name: &str) -> Option<&TypeDef>;

    /// Look up a factory by exposed name.
    fn factory_by_name(&self, name: &str) -> Option<&FactoryDef>;

    /// All codec types in registration order.
    fn all_types(&self) -> &[TypeDef];

    /// All factories in registration order.
    fn all_factories(&self) -> &[FactoryDef];
}
