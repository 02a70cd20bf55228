// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generic RLNC decoder.

use core::marker::PhantomData;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weft_field::Field;

use crate::dimensions::{to_u32, Dimensions};
use crate::matrix::Matrix;
use crate::payload::{Layout, Parsed};
use crate::shape::{OnTheFly, Shape, SlidingWindow};
use crate::trace::{TraceLog, TraceTag};
use crate::{
    Coder, CodecError, Decoder, FeedbackWriter, PartialDecodingTracker, Recoder, Traced,
};

/// RLNC decoder over field `F`, trace tag `T` and family shape `S`.
///
/// Payloads are eliminated into the block as they arrive; the block is
/// complete once `rank() == symbols()`.
#[derive(Debug)]
pub struct RlncDecoder<F: Field, T, S> {
    dims: Dimensions,
    layout: Layout,
    matrix: Matrix<F>,
    rng: StdRng,
    trace: TraceLog<T>,
    _shape: PhantomData<S>,
}

impl<F: Field, T: TraceTag, S: Shape> RlncDecoder<F, T, S> {
    fn reset(&mut self) {
        self.layout = Layout::new::<F>(self.dims.symbols(), self.dims.symbol_size());
        self.matrix
            .reset(self.dims.symbol_count(), self.dims.symbol_len());
        self.trace.clear();
    }

    fn feedback_len(&self) -> usize {
        self.dims.symbol_count().div_ceil(8)
    }

    fn all_held_uncoded(&self) -> bool {
        self.matrix.rank() > 0 && self.matrix.uncoded_count() == self.matrix.rank()
    }
}

impl<F: Field, T: TraceTag, S: Shape> Coder for RlncDecoder<F, T, S> {
    fn construct(max_symbols: u32, max_symbol_size: u32) -> Self {
        let mut decoder = Self {
            dims: Dimensions::new(max_symbols, max_symbol_size),
            layout: Layout::new::<F>(max_symbols, max_symbol_size),
            matrix: Matrix::default(),
            rng: StdRng::from_entropy(),
            trace: TraceLog::default(),
            _shape: PhantomData,
        };
        decoder.reset();
        decoder
    }

    fn max_payload_size(max_symbols: u32, max_symbol_size: u32) -> u32 {
        to_u32(Layout::new::<F>(max_symbols, max_symbol_size).len())
    }

    fn initialize(&mut self, symbols: u32, symbol_size: u32) -> Result<(), CodecError> {
        self.dims
            .resize(symbols, symbol_size, F::symbol_granularity())?;
        self.reset();
        Ok(())
    }

    fn max_symbols(&self) -> u32 {
        self.dims.max_symbols()
    }

    fn max_symbol_size(&self) -> u32 {
        self.dims.max_symbol_size()
    }

    fn symbols(&self) -> u32 {
        self.dims.symbols()
    }

    fn symbol_size(&self) -> u32 {
        self.dims.symbol_size()
    }

    fn payload_size(&self) -> u32 {
        to_u32(self.layout.len())
    }

    fn rank(&self) -> u32 {
        to_u32(self.matrix.rank())
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<F: Field, T: TraceTag, S: Shape> Decoder for RlncDecoder<F, T, S> {
    fn decode(&mut self, payload: &[u8]) -> Result<(), CodecError> {
        let symbols = self.dims.symbol_count();
        let pivot = match self.layout.parse(payload, symbols)? {
            Parsed::Systematic { index, symbol } => self.matrix.insert_systematic(index, symbol),
            Parsed::Coded {
                coefficients,
                symbol,
            } => {
                let vector = (0..symbols).map(|i| F::get(coefficients, i)).collect();
                self.matrix.insert(vector, symbol.to_vec())
            }
        };
        let rank = self.matrix.rank();
        self.trace.record("decoder", || match pivot {
            Some(column) => format!("pivot {column}, rank {rank}"),
            None => format!("redundant, rank {rank}"),
        });
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.matrix.rank() == self.dims.symbol_count()
    }

    fn symbols_uncoded(&self) -> u32 {
        to_u32(self.matrix.uncoded_count())
    }

    fn copy_symbols(&self, dest: &mut [u8]) -> Result<(), CodecError> {
        let block = self.matrix.data();
        if dest.len() < block.len() {
            return Err(CodecError::BufferTooSmall {
                expected: block.len(),
                actual: dest.len(),
            });
        }
        dest[..block.len()].copy_from_slice(block);
        Ok(())
    }
}

impl<F: Field, T: TraceTag> PartialDecodingTracker for RlncDecoder<F, T, OnTheFly> {
    fn is_partial_complete(&self) -> bool {
        self.all_held_uncoded()
    }
}

impl<F: Field, T: TraceTag> PartialDecodingTracker for RlncDecoder<F, T, SlidingWindow> {
    fn is_partial_complete(&self) -> bool {
        self.all_held_uncoded()
    }
}

impl<F: Field, T: TraceTag> Recoder for RlncDecoder<F, T, SlidingWindow> {
    fn recode(&mut self, payload: &mut [u8]) -> Result<usize, CodecError> {
        self.layout.check_output(payload)?;
        let held: Vec<usize> = (0..self.dims.symbol_count())
            .filter(|&i| self.matrix.has_pivot(i))
            .collect();
        let mut weights: Vec<(usize, F::Element)> = held
            .iter()
            .map(|&row| (row, F::from_u32(self.rng.gen())))
            .collect();
        if !weights.is_empty() && weights.iter().all(|(_, c)| F::is_zero(*c)) {
            let pick = self.rng.gen_range(0..weights.len());
            weights[pick].1 = F::from_u32(self.rng.gen_range(1..F::ORDER));
        }
        let layout = self.layout;
        let (header, symbol) = layout.write_coded(payload);
        self.matrix.combine(&weights, header, symbol);
        self.trace
            .record("recoder", || format!("recoded over {} rows", held.len()));
        Ok(layout.len())
    }
}

impl<F: Field, T: TraceTag> FeedbackWriter for RlncDecoder<F, T, SlidingWindow> {
    fn feedback_size(&self) -> u32 {
        to_u32(self.feedback_len())
    }

    fn write_feedback(&self, feedback: &mut [u8]) -> Result<usize, CodecError> {
        let len = self.feedback_len();
        if feedback.len() < len {
            return Err(CodecError::BufferTooSmall {
                expected: len,
                actual: feedback.len(),
            });
        }
        let out = &mut feedback[..len];
        out.fill(0);
        for index in 0..self.dims.symbol_count() {
            if self.matrix.is_uncoded(index) {
                out[index / 8] |= 1 << (index % 8);
            }
        }
        Ok(len)
    }
}

impl<F: Field, T: TraceTag, S: Shape> Traced for RlncDecoder<F, T, S> {
    fn take_trace(&mut self, zone: Option<&str>) -> String {
        self.trace.drain(zone)
    }
}
