// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! RLNC payload framing.
//!
//! ```text
//! [kind: u8][header: max(4, coefficient_bytes(symbols))][symbol: symbol_size]
//! ```
//!
//! `kind` is `0` for a systematic payload, whose header starts with the
//! big-endian `u32` symbol index, and `1` for a coded payload, whose header
//! starts with the packed coefficient vector. Unused header bytes are zero.
//! Every payload of a given configuration has the same length.

use weft_field::Field;

use crate::CodecError;

const SYSTEMATIC: u8 = 0;
const CODED: u8 = 1;
const INDEX_BYTES: usize = 4;

/// A payload split into its parts.
pub(crate) enum Parsed<'a> {
    Systematic { index: usize, symbol: &'a [u8] },
    Coded { coefficients: &'a [u8], symbol: &'a [u8] },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    coefficients: usize,
    header: usize,
    symbol: usize,
}

impl Layout {
    pub(crate) fn new<F: Field>(symbols: u32, symbol_size: u32) -> Self {
        let coefficients = F::coefficient_bytes(symbols as usize);
        Self {
            coefficients,
            header: coefficients.max(INDEX_BYTES),
            symbol: symbol_size as usize,
        }
    }

    /// Total payload length in bytes.
    pub(crate) const fn len(&self) -> usize {
        1 + self.header + self.symbol
    }

    pub(crate) fn check_output(&self, out: &[u8]) -> Result<(), CodecError> {
        if out.len() < self.len() {
            return Err(CodecError::BufferTooSmall {
                expected: self.len(),
                actual: out.len(),
            });
        }
        Ok(())
    }

    /// Frame a systematic payload; returns bytes written.
    pub(crate) fn write_systematic(&self, out: &mut [u8], index: usize, symbol: &[u8]) -> usize {
        let (header, body) = self.prepare(out, SYSTEMATIC);
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        header[..INDEX_BYTES].copy_from_slice(&index.to_be_bytes());
        body.copy_from_slice(symbol);
        self.len()
    }

    /// Frame a coded payload and hand back the zeroed coefficient and symbol
    /// regions for the caller to fill.
    pub(crate) fn write_coded<'a>(&self, out: &'a mut [u8]) -> (&'a mut [u8], &'a mut [u8]) {
        let (header, body) = self.prepare(out, CODED);
        (&mut header[..self.coefficients], body)
    }

    fn prepare<'a>(&self, out: &'a mut [u8], kind: u8) -> (&'a mut [u8], &'a mut [u8]) {
        let out = &mut out[..self.len()];
        out.fill(0);
        out[0] = kind;
        out[1..].split_at_mut(self.header)
    }

    pub(crate) fn parse<'a>(&self, payload: &'a [u8], symbols: usize) -> Result<Parsed<'a>, CodecError> {
        if payload.len() != self.len() {
            return Err(CodecError::PayloadSizeMismatch {
                expected: self.len(),
                actual: payload.len(),
            });
        }
        let (header, symbol) = payload[1..].split_at(self.header);
        match payload[0] {
            SYSTEMATIC => {
                let mut index = [0u8; INDEX_BYTES];
                index.copy_from_slice(&header[..INDEX_BYTES]);
                let index = u32::from_be_bytes(index) as usize;
                if index >= symbols {
                    return Err(CodecError::MalformedPayload("systematic index out of range"));
                }
                Ok(Parsed::Systematic { index, symbol })
            }
            CODED => Ok(Parsed::Coded {
                coefficients: &header[..self.coefficients],
                symbol,
            }),
            _ => Err(CodecError::MalformedPayload("unknown payload kind")),
        }
    }
}
