// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Random linear network codes for weft.
//!
//! Every codec is a concrete type parameterized by a field (see
//! [`weft_field`]) and a trace tag ([`DisableTrace`] / [`EnableTrace`]). The
//! RLNC families share one encoder and one decoder implementation,
//! [`RlncEncoder`] and [`RlncDecoder`], specialised by a [`shape`] marker;
//! what differs between families is which optional capability traits the
//! shape implements:
//!
//! | Family | Encoder extras | Decoder extras |
//! |---|---|---|
//! | full vector | [`Systematic`] | – |
//! | sparse full vector | [`Systematic`], [`SparseDensity`] | (no decoder) |
//! | on-the-fly | [`Systematic`] | [`PartialDecodingTracker`] |
//! | sliding window | [`Systematic`], [`FeedbackReader`] | [`Recoder`], [`PartialDecodingTracker`], [`FeedbackWriter`] |
//! | carousel | – | – |
//!
//! The binding layer inspects exactly this declared surface; nothing here
//! knows about hosts or names.
#![forbid(unsafe_code)]

mod carousel;
mod decoder;
mod dimensions;
mod encoder;
mod error;
mod matrix;
mod payload;
pub mod shape;
mod source;
mod trace;

pub use carousel::{CarouselDecoder, CarouselEncoder};
pub use decoder::RlncDecoder;
pub use encoder::{RlncEncoder, DEFAULT_DENSITY};
pub use error::CodecError;
pub use trace::{DisableTrace, EnableTrace, TraceEvent, TraceLog, TraceTag};

/// Full-vector encoder: codes over the whole block.
pub type FullVectorEncoder<F, T> = RlncEncoder<F, T, shape::FullVector>;
/// Full-vector decoder.
pub type FullVectorDecoder<F, T> = RlncDecoder<F, T, shape::FullVector>;
/// Full-vector encoder with density-controlled coefficients.
pub type SparseFullVectorEncoder<F, T> = RlncEncoder<F, T, shape::SparseFullVector>;
/// On-the-fly encoder: codes over the symbols set so far.
pub type OnTheFlyEncoder<F, T> = RlncEncoder<F, T, shape::OnTheFly>;
/// On-the-fly decoder with partial decoding tracking.
pub type OnTheFlyDecoder<F, T> = RlncDecoder<F, T, shape::OnTheFly>;
/// Sliding-window encoder: on-the-fly plus receiver feedback.
pub type SlidingWindowEncoder<F, T> = RlncEncoder<F, T, shape::SlidingWindow>;
/// Sliding-window decoder: recoding and feedback generation.
pub type SlidingWindowDecoder<F, T> = RlncDecoder<F, T, shape::SlidingWindow>;

/// Surface shared by every encoder and decoder.
///
/// Sizes follow the usual convention: a block is `symbols` symbols of
/// `symbol_size` bytes each, and a payload is one symbol plus whatever header
/// the codec needs.
pub trait Coder: Send + 'static {
    /// Allocate a codec able to handle up to `max_symbols` × `max_symbol_size`.
    ///
    /// The codec starts initialized to the maximum dimensions.
    fn construct(max_symbols: u32, max_symbol_size: u32) -> Self
    where
        Self: Sized;

    /// Largest payload any instance built for these maxima can produce.
    fn max_payload_size(max_symbols: u32, max_symbol_size: u32) -> u32
    where
        Self: Sized;

    /// Reset all coding state and resize to `symbols` × `symbol_size`.
    fn initialize(&mut self, symbols: u32, symbol_size: u32) -> Result<(), CodecError>;

    /// Upper bound on `symbols` accepted by [`Coder::initialize`].
    fn max_symbols(&self) -> u32;

    /// Upper bound on `symbol_size` accepted by [`Coder::initialize`].
    fn max_symbol_size(&self) -> u32;

    /// Number of symbols in the block.
    fn symbols(&self) -> u32;

    /// Size of one symbol in bytes.
    fn symbol_size(&self) -> u32;

    /// Size of the whole block in bytes.
    fn block_size(&self) -> u32 {
        self.symbols().saturating_mul(self.symbol_size())
    }

    /// Size of one payload in bytes.
    fn payload_size(&self) -> u32;

    /// Encoders: symbols available for coding. Decoders: pivots held.
    fn rank(&self) -> u32;

    /// Reseed any internal random source.
    fn seed(&mut self, _seed: u64) {}
}

/// Encoding role.
pub trait Encoder: Coder {
    /// Install the whole source block; `data` must be exactly `block_size()` bytes.
    fn set_symbols(&mut self, data: &[u8]) -> Result<(), CodecError>;

    /// Install one source symbol; `data` must be exactly `symbol_size()` bytes.
    fn set_symbol(&mut self, index: u32, data: &[u8]) -> Result<(), CodecError>;

    /// Write one payload into `payload` and return the number of bytes used.
    fn encode(&mut self, payload: &mut [u8]) -> Result<usize, CodecError>;
}

/// Decoding role.
pub trait Decoder: Coder {
    /// Consume one payload of exactly `payload_size()` bytes.
    fn decode(&mut self, payload: &[u8]) -> Result<(), CodecError>;

    /// `true` once every symbol can be recovered.
    fn is_complete(&self) -> bool;

    /// Number of symbols already in their original, uncoded form.
    fn symbols_uncoded(&self) -> u32;

    /// Copy the current block into `dest` (`block_size()` bytes).
    ///
    /// No completeness check is made: rows not yet decoded are copied as they
    /// stand and missing rows read as zeros.
    fn copy_symbols(&self, dest: &mut [u8]) -> Result<(), CodecError>;
}

/// Encoders able to send source symbols uncoded before coded ones.
pub trait Systematic {
    /// Whether systematic mode is on.
    fn is_systematic_on(&self) -> bool;
    /// Turn systematic mode on.
    fn set_systematic_on(&mut self);
    /// Turn systematic mode off.
    fn set_systematic_off(&mut self);
}

/// Decoders able to emit fresh coded payloads from what they hold.
pub trait Recoder: Decoder {
    /// Write a recoded payload and return its length.
    fn recode(&mut self, payload: &mut [u8]) -> Result<usize, CodecError>;
}

/// Decoders that track whether the symbols seen so far are fully decoded.
pub trait PartialDecodingTracker: Decoder {
    /// `true` when at least one symbol is held and every held symbol is uncoded.
    fn is_partial_complete(&self) -> bool;
}

/// Encoders that consume receiver feedback.
pub trait FeedbackReader: Encoder {
    /// Feedback buffer size in bytes.
    fn feedback_size(&self) -> u32;
    /// Apply a feedback buffer of exactly `feedback_size()` bytes.
    fn read_feedback(&mut self, feedback: &[u8]) -> Result<(), CodecError>;
}

/// Decoders that produce feedback for their encoder.
pub trait FeedbackWriter: Decoder {
    /// Feedback buffer size in bytes.
    fn feedback_size(&self) -> u32;
    /// Serialize feedback into `feedback` and return the bytes written.
    fn write_feedback(&self, feedback: &mut [u8]) -> Result<usize, CodecError>;
}

/// Encoders with tunable coefficient density.
pub trait SparseDensity: Encoder {
    /// Probability in (0, 1] that a coefficient is nonzero.
    fn set_density(&mut self, density: f64) -> Result<(), CodecError>;
    /// Current coefficient density.
    fn density(&self) -> f64;
    /// Set density so that `symbols` coefficients are nonzero on average.
    fn set_average_nonzero_symbols(&mut self, symbols: u32) -> Result<(), CodecError>;
}

/// Codecs that keep a trace log.
///
/// Every codec implements this; only codecs built with [`EnableTrace`] ever
/// record anything.
pub trait Traced: Coder {
    /// Drain recorded events, keeping only those whose zone starts with `zone`.
    fn take_trace(&mut self, zone: Option<&str>) -> String;
}
