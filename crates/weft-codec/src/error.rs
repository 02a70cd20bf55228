// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors reported by codecs.

use thiserror::Error;

/// Errors produced by encoders, decoders and their configuration.
///
/// All variants describe a caller contract violation or a payload the codec
/// cannot interpret; no variant is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Symbol count is zero or above the construction maximum.
    #[error("symbols {symbols} outside 1..={max}")]
    SymbolsOutOfRange {
        /// Requested symbol count.
        symbols: u32,
        /// Construction maximum.
        max: u32,
    },
    /// Symbol size is zero or above the construction maximum.
    #[error("symbol size {symbol_size} outside 1..={max}")]
    SymbolSizeOutOfRange {
        /// Requested symbol size.
        symbol_size: u32,
        /// Construction maximum.
        max: u32,
    },
    /// Symbol size does not hold a whole number of field elements.
    #[error("symbol size {symbol_size} is not a multiple of {granularity} bytes")]
    SymbolSizeGranularity {
        /// Requested symbol size.
        symbol_size: u32,
        /// Required multiple.
        granularity: u32,
    },
    /// Source block buffer has the wrong length.
    #[error("block must be {expected} bytes, got {actual}")]
    BlockSizeMismatch {
        /// `block_size()`.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Symbol buffer has the wrong length.
    #[error("symbol must be {expected} bytes, got {actual}")]
    SymbolSizeMismatch {
        /// `symbol_size()`.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Symbol index outside `[0, symbols)`.
    #[error("symbol index {index} out of range for {symbols} symbols")]
    SymbolIndexOutOfRange {
        /// Requested index.
        index: u32,
        /// `symbols()`.
        symbols: u32,
    },
    /// Payload buffer has the wrong length.
    #[error("payload must be {expected} bytes, got {actual}")]
    PayloadSizeMismatch {
        /// `payload_size()`.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Payload header could not be interpreted.
    #[error("malformed payload: {0}")]
    MalformedPayload(&'static str),
    /// Density outside (0, 1].
    #[error("density {0} outside (0, 1]")]
    InvalidDensity(f64),
    /// Average nonzero symbol count outside `1..=symbols`.
    #[error("average nonzero symbols {requested} outside 1..={symbols}")]
    InvalidNonzeroSymbols {
        /// Requested count.
        requested: u32,
        /// `symbols()`.
        symbols: u32,
    },
    /// Feedback buffer has the wrong length.
    #[error("feedback must be {expected} bytes, got {actual}")]
    FeedbackSizeMismatch {
        /// `feedback_size()`.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Output buffer too small for the requested write.
    #[error("output buffer holds {actual} bytes, {expected} required")]
    BufferTooSmall {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}
