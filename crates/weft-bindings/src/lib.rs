// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Capability-driven host bindings for the weft codecs.
//!
//! Every concrete codec type is described once, by its [`Capabilities`]
//! impl. From that description this crate derives, with no per-type
//! boilerplate:
//!
//! - the exposed name (`FullVectorEncoderBinary8Trace`, see [`naming`]);
//! - a [`MethodTable`] holding the base methods, the role's methods and
//!   exactly the optional capability groups the type offers;
//! - a pooled [`Factory`] and its host-facing [`HostFactory`] surface.
//!
//! [`Registry`] enumerates every family × field × trace combination listed
//! in [`CONFIGURATIONS`], checks that names are unique and roles agree, and
//! implements [`weft_registry_api::RegistryProvider`] for host adapters.
//!
//! ```no_run
//! use weft_bindings::global;
//! use weft_registry_api::Value;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = global()?;
//! let factory = registry.factory("FullVectorEncoderFactoryBinary8", 16, 1400)?;
//! let mut encoder = factory.build()?;
//! encoder.call("set_symbols", &[Value::Bytes(vec![0; 16 * 1400])])?;
//! let payload = encoder.call("encode", &[])?;
//! # let _ = payload;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

mod attach;
mod capability;
mod coder;
mod decoder;
mod encoder;
mod error;
mod factory;
mod families;
mod instance;
mod method;
pub mod naming;
mod registry;

pub use attach::{
    DensityMethods, PartialCompleteMethods, ReadFeedbackMethods, RecodeMethods,
    SystematicMethods, TraceMethods, WriteFeedbackMethods,
};
pub use capability::{
    capability_flags, has_partial_decoding_tracker, has_recode, has_systematic_encoder,
    has_trace, is_feedback_shaped, is_sparse_shaped, role_of, Absent, Attach, Capabilities,
    RoleBinding, TraceSelect,
};
pub use coder::{binding, coder};
pub use decoder::DecoderRole;
pub use encoder::EncoderRole;
pub use error::{CallError, RegistryError};
pub use factory::{Factory, Pooled};
pub use families::CodecFamily;
pub use instance::{HostFactory, Instance};
pub use method::{Args, CallFn, Method, MethodTable};
pub use registry::{
    global, register, Configuration, Registry, CONFIGURATIONS, MODULE_NAME, REGISTRY_VERSION,
};
