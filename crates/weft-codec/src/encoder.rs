// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generic RLNC encoder shared by the full-vector, sparse, on-the-fly and
//! sliding-window families.

use core::marker::PhantomData;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weft_field::Field;

use crate::dimensions::{to_u32, Dimensions};
use crate::payload::Layout;
use crate::shape::{Scope, Shape, SlidingWindow, SparseFullVector};
use crate::source::SourceBlock;
use crate::trace::{TraceLog, TraceTag};
use crate::{
    Coder, CodecError, Encoder, FeedbackReader, SparseDensity, Systematic, Traced,
};

/// Coefficient density a sparse encoder starts with.
pub const DEFAULT_DENSITY: f64 = 0.5;

/// RLNC encoder over field `F`, trace tag `T` and family shape `S`.
///
/// In systematic mode (the default) each source symbol is sent once uncoded
/// before any coded payload; afterwards every payload is a random linear
/// combination of the symbols in the coding window.
#[derive(Debug)]
pub struct RlncEncoder<F, T, S> {
    dims: Dimensions,
    layout: Layout,
    block: SourceBlock,
    systematic: bool,
    sent: Vec<bool>,
    acknowledged: Vec<bool>,
    density: f64,
    rng: StdRng,
    trace: TraceLog<T>,
    _shape: PhantomData<(F, S)>,
}

impl<F: Field, T: TraceTag, S: Shape> RlncEncoder<F, T, S> {
    fn reset(&mut self) {
        let symbols = self.dims.symbol_count();
        self.layout = Layout::new::<F>(self.dims.symbols(), self.dims.symbol_size());
        self.block.reset(&self.dims);
        self.sent.clear();
        self.sent.resize(symbols, false);
        self.acknowledged.clear();
        self.acknowledged.resize(symbols, false);
        self.systematic = true;
        self.density = DEFAULT_DENSITY;
        self.trace.clear();
    }

    fn in_window(&self, index: usize) -> bool {
        if self.acknowledged[index] {
            return false;
        }
        match S::SCOPE {
            Scope::Block => true,
            Scope::Available => self.block.is_present(index),
        }
    }

    fn next_systematic(&self) -> Option<usize> {
        (0..self.dims.symbol_count())
            .find(|&i| self.block.is_present(i) && !self.sent[i] && !self.acknowledged[i])
    }

    fn draw_coefficient(&mut self) -> F::Element {
        if S::SPARSE {
            if self.rng.gen_bool(self.density) {
                self.draw_nonzero()
            } else {
                F::zero()
            }
        } else {
            F::from_u32(self.rng.gen())
        }
    }

    fn draw_nonzero(&mut self) -> F::Element {
        F::from_u32(self.rng.gen_range(1..F::ORDER))
    }

    fn encode_coded(&mut self, payload: &mut [u8]) -> usize {
        let window: Vec<usize> = (0..self.dims.symbol_count())
            .filter(|&i| self.in_window(i))
            .collect();
        let mut coefficients: Vec<F::Element> =
            window.iter().map(|_| self.draw_coefficient()).collect();
        if !window.is_empty() && coefficients.iter().all(|c| F::is_zero(*c)) {
            let pick = self.rng.gen_range(0..window.len());
            coefficients[pick] = self.draw_nonzero();
        }

        let layout = self.layout;
        let (header, symbol) = layout.write_coded(payload);
        for (&index, &c) in window.iter().zip(&coefficients) {
            if F::is_zero(c) {
                continue;
            }
            F::set(header, index, c);
            F::multiply_add_region(symbol, self.block.symbol(index), c);
        }
        self.trace
            .record("encoder", || format!("coded over {} symbols", window.len()));
        layout.len()
    }
}

impl<F: Field, T: TraceTag, S: Shape> Coder for RlncEncoder<F, T, S> {
    fn construct(max_symbols: u32, max_symbol_size: u32) -> Self {
        let dims = Dimensions::new(max_symbols, max_symbol_size);
        let mut encoder = Self {
            dims,
            layout: Layout::new::<F>(max_symbols, max_symbol_size),
            block: SourceBlock::default(),
            systematic: true,
            sent: Vec::new(),
            acknowledged: Vec::new(),
            density: DEFAULT_DENSITY,
            rng: StdRng::from_entropy(),
            trace: TraceLog::default(),
            _shape: PhantomData,
        };
        encoder.reset();
        encoder
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
        to_u32(self.block.present_count())
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl<F: Field, T: TraceTag, S: Shape> Encoder for RlncEncoder<F, T, S> {
    fn set_symbols(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.block.set_all(data)?;
        self.trace.record("encoder", || "set all symbols".to_owned());
        Ok(())
    }

    fn set_symbol(&mut self, index: u32, data: &[u8]) -> Result<(), CodecError> {
        self.block.set(index, data)?;
        self.trace.record("encoder", || format!("set symbol {index}"));
        Ok(())
    }

    fn encode(&mut self, payload: &mut [u8]) -> Result<usize, CodecError> {
        self.layout.check_output(payload)?;
        if self.systematic {
            if let Some(index) = self.next_systematic() {
                self.sent[index] = true;
                let written =
                    self.layout
                        .write_systematic(payload, index, self.block.symbol(index));
                self.trace
                    .record("encoder", || format!("systematic symbol {index}"));
                return Ok(written);
            }
        }
        Ok(self.encode_coded(payload))
    }
}

impl<F: Field, T: TraceTag, S: Shape> Systematic for RlncEncoder<F, T, S> {
    fn is_systematic_on(&self) -> bool {
        self.systematic
    }

    fn set_systematic_on(&mut self) {
        self.systematic = true;
    }

    fn set_systematic_off(&mut self) {
        self.systematic = false;
    }
}

impl<F: Field, T: TraceTag> SparseDensity for RlncEncoder<F, T, SparseFullVector> {
    fn set_density(&mut self, density: f64) -> Result<(), CodecError> {
        if !(density > 0.0 && density <= 1.0) {
            return Err(CodecError::InvalidDensity(density));
        }
        self.density = density;
        Ok(())
    }

    fn density(&self) -> f64 {
        self.density
    }

    fn set_average_nonzero_symbols(&mut self, symbols: u32) -> Result<(), CodecError> {
        let total = self.dims.symbols();
        if symbols == 0 || symbols > total {
            return Err(CodecError::InvalidNonzeroSymbols {
                requested: symbols,
                symbols: total,
            });
        }
        self.density = f64::from(symbols) / f64::from(total);
        Ok(())
    }
}

impl<F: Field, T: TraceTag> FeedbackReader for RlncEncoder<F, T, SlidingWindow> {
    fn feedback_size(&self) -> u32 {
        self.dims.symbols().div_ceil(8)
    }

    fn read_feedback(&mut self, feedback: &[u8]) -> Result<(), CodecError> {
        let expected = self.feedback_size() as usize;
        if feedback.len() != expected {
            return Err(CodecError::FeedbackSizeMismatch {
                expected,
                actual: feedback.len(),
            });
        }
        for (index, acked) in self.acknowledged.iter_mut().enumerate() {
            if feedback[index / 8] & (1 << (index % 8)) != 0 {
                *acked = true;
            }
        }
        let remaining = self.acknowledged.iter().filter(|a| !**a).count();
        self.trace
            .record("feedback", || format!("window now {remaining} symbols"));
        Ok(())
    }
}

impl<F: Field, T: TraceTag, S: Shape> Traced for RlncEncoder<F, T, S> {
    fn take_trace(&mut self, zone: Option<&str>) -> String {
        self.trace.drain(zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{FullVector, OnTheFly};
    use crate::DisableTrace;
    use weft_field::Binary8;

    type Full = RlncEncoder<Binary8, DisableTrace, FullVector>;
    type Sparse = RlncEncoder<Binary8, DisableTrace, SparseFullVector>;

    #[test]
    fn systematic_phase_sends_each_symbol_once_in_order() {
        let mut encoder = Full::construct(3, 2);
        encoder.set_symbols(&[1, 2, 3, 4, 5, 6]).unwrap();
        let mut payload = vec![0u8; encoder.payload_size() as usize];
        for expected in 0..3u8 {
            encoder.encode(&mut payload).unwrap();
            assert_eq!(payload[0], 0);
            assert_eq!(payload[4], expected);
        }
        encoder.encode(&mut payload).unwrap();
        assert_eq!(payload[0], 1, "fourth payload is coded");
    }

    #[test]
    fn on_the_fly_codes_only_available_symbols() {
        let mut encoder = RlncEncoder::<Binary8, DisableTrace, OnTheFly>::construct(4, 1);
        encoder.seed(7);
        encoder.set_systematic_off();
        encoder.set_symbol(1, &[9]).unwrap();
        assert_eq!(encoder.rank(), 1);
        let mut payload = vec![0u8; encoder.payload_size() as usize];
        for _ in 0..16 {
            encoder.encode(&mut payload).unwrap();
            assert_eq!(payload[1], 0);
            assert_ne!(payload[2], 0);
            assert_eq!(payload[3], 0);
            assert_eq!(payload[4], 0);
        }
    }

    #[test]
    fn density_contract() {
        let mut encoder = Sparse::construct(4, 1);
        assert_eq!(encoder.density(), DEFAULT_DENSITY);
        assert!(matches!(
            encoder.set_density(0.0),
            Err(CodecError::InvalidDensity(_))
        ));
        assert!(encoder.set_density(f64::NAN).is_err());
        encoder.set_density(1.0).unwrap();
        encoder.set_average_nonzero_symbols(1).unwrap();
        assert_eq!(encoder.density(), 0.25);
        assert!(matches!(
            encoder.set_average_nonzero_symbols(5),
            Err(CodecError::InvalidNonzeroSymbols { requested: 5, symbols: 4 })
        ));
    }

    #[test]
    fn encode_rejects_short_buffers() {
        let mut encoder = Full::construct(2, 4);
        let mut payload = vec![0u8; 3];
        assert!(matches!(
            encoder.encode(&mut payload),
            Err(CodecError::BufferTooSmall { .. })
        ));
    }
}
