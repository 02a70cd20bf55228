// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Compile-time capability detection.
//!
//! Each concrete codec type declares, through [`Capabilities`], one attacher
//! type per optional capability. An attacher is either [`Absent`] or a method
//! group from [`crate::attach`] whose [`Attach`] impl is bounded on the codec
//! trait it calls, so a codec can only claim a capability it actually
//! implements. The predicates below read [`Attach::PRESENT`] and are
//! evaluated entirely at compile time.

use weft_codec::{Coder, DisableTrace, EnableTrace, TraceTag};
use weft_field::FieldLabel;
use weft_registry_api::{CapabilityFlags, Role};

use crate::attach::TraceMethods;
use crate::{MethodTable, RegistryError};

/// Adds a capability's methods to a codec's table.
pub trait Attach<C> {
    /// Whether the capability is present.
    const PRESENT: bool;

    /// Define the capability's methods on `table`.
    fn attach(table: &mut MethodTable<C>) -> Result<(), RegistryError>;
}

/// The capability is not offered; nothing is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct Absent;

impl<C> Attach<C> for Absent {
    const PRESENT: bool = false;

    fn attach(_table: &mut MethodTable<C>) -> Result<(), RegistryError> {
        Ok(())
    }
}

/// Role-specific method generation.
pub trait RoleBinding<C> {
    /// The role this generator produces.
    const ROLE: Role;

    /// Define the role's methods and run its capability attachers.
    fn generate(table: &mut MethodTable<C>) -> Result<(), RegistryError>;
}

/// Capability surface of a concrete codec type.
pub trait Capabilities: Coder + Sized {
    /// Field selector; supplies the name fragment.
    type Field: FieldLabel;
    /// Encoder or decoder generator.
    type Role: RoleBinding<Self>;
    /// Trace method group.
    type Trace: Attach<Self>;
    /// Recoding (decoders).
    type Recode: Attach<Self>;
    /// Partial decoding tracking (decoders).
    type PartialDecoding: Attach<Self>;
    /// Systematic mode toggles (encoders).
    type Systematic: Attach<Self>;
    /// Sliding-window feedback, read on encoders and written on decoders.
    type Feedback: Attach<Self>;
    /// Coefficient density controls (encoders).
    type Sparse: Attach<Self>;
}

/// Maps a trace tag to its trace attacher.
pub trait TraceSelect: TraceTag {
    /// [`Absent`] or [`TraceMethods`].
    type Hook;
}

impl TraceSelect for DisableTrace {
    type Hook = Absent;
}

impl TraceSelect for EnableTrace {
    type Hook = TraceMethods;
}

/// Whether `C` records trace events.
pub const fn has_trace<C: Capabilities>() -> bool {
    <C::Trace as Attach<C>>::PRESENT
}

/// Whether `C` can recode.
pub const fn has_recode<C: Capabilities>() -> bool {
    <C::Recode as Attach<C>>::PRESENT
}

/// Whether `C` tracks partial decoding.
pub const fn has_partial_decoding_tracker<C: Capabilities>() -> bool {
    <C::PartialDecoding as Attach<C>>::PRESENT
}

/// Whether `C` supports systematic mode.
pub const fn has_systematic_encoder<C: Capabilities>() -> bool {
    <C::Systematic as Attach<C>>::PRESENT
}

/// Whether `C` belongs to the sliding-window (feedback) family.
pub const fn is_feedback_shaped<C: Capabilities>() -> bool {
    <C::Feedback as Attach<C>>::PRESENT
}

/// Whether `C` belongs to the sparse family.
pub const fn is_sparse_shaped<C: Capabilities>() -> bool {
    <C::Sparse as Attach<C>>::PRESENT
}

/// Role declared by `C`.
pub const fn role_of<C: Capabilities>() -> Role {
    <C::Role as RoleBinding<C>>::ROLE
}

/// All capability predicates for `C`.
pub const fn capability_flags<C: Capabilities>() -> CapabilityFlags {
    CapabilityFlags {
        trace: has_trace::<C>(),
        recode: has_recode::<C>(),
        partial_decoding_tracker: has_partial_decoding_tracker::<C>(),
        systematic_encoder: has_systematic_encoder::<C>(),
        feedback: is_feedback_shaped::<C>(),
        sparse: is_sparse_shaped::<C>(),
    }
}
