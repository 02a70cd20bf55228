// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Registry and call errors.

use thiserror::Error;
use weft_codec::CodecError;
use weft_field::FieldKind;
use weft_registry_api::{ArgType, Role};

/// Configuration errors detected while building bindings.
///
/// Every variant is fatal: the registry refuses to initialize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two configurations resolved to the same exposed name.
    #[error("duplicate exposed name: {0}")]
    DuplicateName(String),
    /// A method table received two definitions of one method.
    #[error("duplicate method {method} on {type_name}")]
    DuplicateMethod {
        /// Exposed type being built.
        type_name: String,
        /// Method defined twice.
        method: &'static str,
    },
    /// A configuration's declared role disagrees with its codec type.
    #[error("{family} declares role {declared} but its codec is an {actual}")]
    RoleMismatch {
        /// Family label.
        family: &'static str,
        /// Role in the configuration table.
        declared: Role,
        /// Role of the codec type.
        actual: Role,
    },
    /// A configuration's declared field disagrees with its codec type.
    #[error("{family} {role} declares field {declared:?} but its codec uses {actual:?}")]
    FieldMismatch {
        /// Family label.
        family: &'static str,
        /// Role of the configuration.
        role: Role,
        /// Field in the configuration table.
        declared: Option<FieldKind>,
        /// Field of the codec type.
        actual: Option<FieldKind>,
    },
    /// A configuration's trace flag disagrees with its codec's trace tag.
    #[error("{family} {role} declares trace={declared} but its codec has trace={actual}")]
    TraceMismatch {
        /// Family label.
        family: &'static str,
        /// Role of the configuration.
        role: Role,
        /// Trace flag in the configuration table.
        declared: bool,
        /// Whether the codec type records trace events.
        actual: bool,
    },
}

/// Errors returned from calls on host-facing instances and factories.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// The type exposes no method of that name.
    #[error("{type_name} has no method {method}")]
    UnknownMethod {
        /// Exposed type name.
        type_name: String,
        /// Requested method.
        method: String,
    },
    /// No factory is registered under that name.
    #[error("unknown factory: {0}")]
    UnknownFactory(String),
    /// Wrong number of arguments.
    #[error("{method} takes {min}..={max} arguments, got {actual}")]
    Arity {
        /// Method called.
        method: &'static str,
        /// Required arguments.
        min: usize,
        /// Required plus optional arguments.
        max: usize,
        /// Supplied arguments.
        actual: usize,
    },
    /// An argument had the wrong dynamic type.
    #[error("{method}: argument {arg} must be {}, got {actual}", expected.as_str())]
    ArgumentType {
        /// Method called.
        method: &'static str,
        /// Argument name.
        arg: &'static str,
        /// Declared type.
        expected: ArgType,
        /// Kind of the supplied value.
        actual: &'static str,
    },
    /// An argument had the right type but an unusable value.
    #[error("{method}: argument {arg} {reason}")]
    InvalidArgument {
        /// Method called.
        method: &'static str,
        /// Argument name.
        arg: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// The codec rejected the call.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
