// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Capability declarations for every codec family.

use weft_codec::shape::{FullVector, OnTheFly, SlidingWindow, SparseFullVector};
use weft_codec::{CarouselDecoder, CarouselEncoder, RlncDecoder, RlncEncoder};
use weft_field::{Field, NoField};
use weft_registry_api::Role;

use crate::attach::{
    DensityMethods, PartialCompleteMethods, ReadFeedbackMethods, RecodeMethods,
    SystematicMethods, WriteFeedbackMethods,
};
use crate::capability::{Absent, Attach, Capabilities, TraceSelect};
use crate::decoder::DecoderRole;
use crate::encoder::EncoderRole;

/// Codec family and role, as listed in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecFamily {
    /// Full-vector RLNC encoder.
    FullVectorEncoder,
    /// Full-vector RLNC decoder.
    FullVectorDecoder,
    /// Sparse full-vector RLNC encoder.
    SparseFullVectorEncoder,
    /// On-the-fly RLNC encoder.
    OnTheFlyEncoder,
    /// On-the-fly RLNC decoder.
    OnTheFlyDecoder,
    /// Sliding-window RLNC encoder.
    SlidingWindowEncoder,
    /// Sliding-window RLNC decoder.
    SlidingWindowDecoder,
    /// Uncoded carousel encoder.
    NoCodeEncoder,
    /// Uncoded carousel decoder.
    NoCodeDecoder,
}

impl CodecFamily {
    /// Family label used as the name prefix.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullVectorEncoder | Self::FullVectorDecoder => "FullVector",
            Self::SparseFullVectorEncoder => "SparseFullVector",
            Self::OnTheFlyEncoder | Self::OnTheFlyDecoder => "OnTheFly",
            Self::SlidingWindowEncoder | Self::SlidingWindowDecoder => "SlidingWindow",
            Self::NoCodeEncoder | Self::NoCodeDecoder => "NoCode",
        }
    }

    /// Declared role.
    pub const fn role(self) -> Role {
        match self {
            Self::FullVectorEncoder
            | Self::SparseFullVectorEncoder
            | Self::OnTheFlyEncoder
            | Self::SlidingWindowEncoder
            | Self::NoCodeEncoder => Role::Encoder,
            Self::FullVectorDecoder
            | Self::OnTheFlyDecoder
            | Self::SlidingWindowDecoder
            | Self::NoCodeDecoder => Role::Decoder,
        }
    }
}

macro_rules! rlnc_capabilities {
    (
        $codec:ident<$shape:ty>,
        role: $role:ty,
        recode: $recode:ty,
        partial: $partial:ty,
        systematic: $systematic:ty,
        feedback: $feedback:ty,
        sparse: $sparse:ty $(,)?
    ) => {
        impl<F: Field, T: TraceSelect> Capabilities for $codec<F, T, $shape>
        where
            T::Hook: Attach<Self>,
        {
            type Field = F;
            type Role = $role;
            type Trace = T::Hook;
            type Recode = $recode;
            type PartialDecoding = $partial;
            type Systematic = $systematic;
            type Feedback = $feedback;
            type Sparse = $sparse;
        }
    };
}

rlnc_capabilities!(
    RlncEncoder<FullVector>,
    role: EncoderRole,
    recode: Absent,
    partial: Absent,
    systematic: SystematicMethods,
    feedback: Absent,
    sparse: Absent,
);

rlnc_capabilities!(
    RlncDecoder<FullVector>,
    role: DecoderRole,
    recode: Absent,
    partial: Absent,
    systematic: Absent,
    feedback: Absent,
    sparse: Absent,
);

rlnc_capabilities!(
    RlncEncoder<SparseFullVector>,
    role: EncoderRole,
    recode: Absent,
    partial: Absent,
    systematic: SystematicMethods,
    feedback: Absent,
    sparse: DensityMethods,
);

rlnc_capabilities!(
    RlncEncoder<OnTheFly>,
    role: EncoderRole,
    recode: Absent,
    partial: Absent,
    systematic: SystematicMethods,
    feedback: Absent,
    sparse: Absent,
);

rlnc_capabilities!(
    RlncDecoder<OnTheFly>,
    role: DecoderRole,
    recode: Absent,
    partial: PartialCompleteMethods,
    systematic: Absent,
    feedback: Absent,
    sparse: Absent,
);

rlnc_capabilities!(
    RlncEncoder<SlidingWindow>,
    role: EncoderRole,
    recode: Absent,
    partial: Absent,
    systematic: SystematicMethods,
    feedback: ReadFeedbackMethods,
    sparse: Absent,
);

rlnc_capabilities!(
    RlncDecoder<SlidingWindow>,
    role: DecoderRole,
    recode: RecodeMethods,
    partial: PartialCompleteMethods,
    systematic: Absent,
    feedback: WriteFeedbackMethods,
    sparse: Absent,
);

impl<T: TraceSelect> Capabilities for CarouselEncoder<T>
where
    T::Hook: Attach<Self>,
{
    type Field = NoField;
    type Role = EncoderRole;
    type Trace = T::Hook;
    type Recode = Absent;
    type PartialDecoding = Absent;
    type Systematic = Absent;
    type Feedback = Absent;
    type Sparse = Absent;
}

impl<T: TraceSelect> Capabilities for CarouselDecoder<T>
where
    T::Hook: Attach<Self>,
{
    type Field = NoField;
    type Role = DecoderRole;
    type Trace = T::Hook;
    type Recode = Absent;
    type PartialDecoding = Absent;
    type Systematic = Absent;
    type Feedback = Absent;
    type Sparse = Absent;
}
