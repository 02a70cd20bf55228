// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Uncoded carousel: source symbols sent round-robin with their index.
//!
//! Payload: `[index: u32 BE][symbol]`. No field arithmetic is involved, so
//! these codecs are parameterized by trace tag only.

use crate::dimensions::{to_u32, Dimensions};
use crate::source::SourceBlock;
use crate::trace::{TraceLog, TraceTag};
use crate::{Coder, CodecError, Decoder, Encoder, Traced};

const INDEX_BYTES: usize = 4;

fn payload_len(symbol_size: u32) -> usize {
    INDEX_BYTES + symbol_size as usize
}

/// Sends symbol `0, 1, …, symbols - 1, 0, …` forever.
#[derive(Debug)]
pub struct CarouselEncoder<T> {
    dims: Dimensions,
    block: SourceBlock,
    next: usize,
    trace: TraceLog<T>,
}

impl<T: TraceTag> Coder for CarouselEncoder<T> {
    fn construct(max_symbols: u32, max_symbol_size: u32) -> Self {
        let dims = Dimensions::new(max_symbols, max_symbol_size);
        let mut block = SourceBlock::default();
        block.reset(&dims);
        Self {
            dims,
            block,
            next: 0,
            trace: TraceLog::default(),
        }
    }

    fn max_payload_size(_max_symbols: u32, max_symbol_size: u32) -> u32 {
        to_u32(payload_len(max_symbol_size))
    }

    fn initialize(&mut self, symbols: u32, symbol_size: u32) -> Result<(), CodecError> {
        self.dims.resize(symbols, symbol_size, 1)?;
        self.block.reset(&self.dims);
        self.next = 0;
        self.trace.clear();
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
        to_u32(payload_len(self.dims.symbol_size()))
    }

    fn rank(&self) -> u32 {
        to_u32(self.block.present_count())
    }
}

impl<T: TraceTag> Encoder for CarouselEncoder<T> {
    fn set_symbols(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.block.set_all(data)
    }

    fn set_symbol(&mut self, index: u32, data: &[u8]) -> Result<(), CodecError> {
        self.block.set(index, data)
    }

    fn encode(&mut self, payload: &mut [u8]) -> Result<usize, CodecError> {
        let len = payload_len(self.dims.symbol_size());
        if payload.len() < len {
            return Err(CodecError::BufferTooSmall {
                expected: len,
                actual: payload.len(),
            });
        }
        let index = self.next;
        self.next = (self.next + 1) % self.dims.symbol_count().max(1);
        let (header, body) = payload[..len].split_at_mut(INDEX_BYTES);
        header.copy_from_slice(&to_u32(index).to_be_bytes());
        body.copy_from_slice(self.block.symbol(index));
        self.trace.record("encoder", || format!("symbol {index}"));
        Ok(len)
    }
}

impl<T: TraceTag> Traced for CarouselEncoder<T> {
    fn take_trace(&mut self, zone: Option<&str>) -> String {
        self.trace.drain(zone)
    }
}

/// Collects carousel payloads; every received symbol is already uncoded.
#[derive(Debug)]
pub struct CarouselDecoder<T> {
    dims: Dimensions,
    data: Vec<u8>,
    received: Vec<bool>,
    rank: usize,
    trace: TraceLog<T>,
}

impl<T: TraceTag> CarouselDecoder<T> {
    fn reset(&mut self) {
        self.data.clear();
        self.data.resize(self.dims.block_len(), 0);
        self.received.clear();
        self.received.resize(self.dims.symbol_count(), false);
        self.rank = 0;
        self.trace.clear();
    }
}

impl<T: TraceTag> Coder for CarouselDecoder<T> {
    fn construct(max_symbols: u32, max_symbol_size: u32) -> Self {
        let mut decoder = Self {
            dims: Dimensions::new(max_symbols, max_symbol_size),
            data: Vec::new(),
            received: Vec::new(),
            rank: 0,
            trace: TraceLog::default(),
        };
        decoder.reset();
        decoder
    }

    fn max_payload_size(_max_symbols: u32, max_symbol_size: u32) -> u32 {
        to_u32(payload_len(max_symbol_size))
    }

    fn initialize(&mut self, symbols: u32, symbol_size: u32) -> Result<(), CodecError> {
        self.dims.resize(symbols, symbol_size, 1)?;
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
        to_u32(payload_len(self.dims.symbol_size()))
    }

    fn rank(&self) -> u32 {
        to_u32(self.rank)
    }
}

impl<T: TraceTag> Decoder for CarouselDecoder<T> {
    fn decode(&mut self, payload: &[u8]) -> Result<(), CodecError> {
        let len = payload_len(self.dims.symbol_size());
        if payload.len() != len {
            return Err(CodecError::PayloadSizeMismatch {
                expected: len,
                actual: payload.len(),
            });
        }
        let (header, body) = payload.split_at(INDEX_BYTES);
        let mut index = [0u8; INDEX_BYTES];
        index.copy_from_slice(header);
        let index = u32::from_be_bytes(index) as usize;
        if index >= self.dims.symbol_count() {
            return Err(CodecError::MalformedPayload("carousel index out of range"));
        }
        if self.received[index] {
            self.trace.record("decoder", || format!("duplicate {index}"));
            return Ok(());
        }
        let start = index * self.dims.symbol_len();
        self.data[start..start + body.len()].copy_from_slice(body);
        self.received[index] = true;
        self.rank += 1;
        self.trace.record("decoder", || format!("symbol {index}"));
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.rank == self.dims.symbol_count()
    }

    fn symbols_uncoded(&self) -> u32 {
        to_u32(self.rank)
    }

    fn copy_symbols(&self, dest: &mut [u8]) -> Result<(), CodecError> {
        if dest.len() < self.data.len() {
            return Err(CodecError::BufferTooSmall {
                expected: self.data.len(),
                actual: dest.len(),
            });
        }
        dest[..self.data.len()].copy_from_slice(&self.data);
        Ok(())
    }
}

impl<T: TraceTag> Traced for CarouselDecoder<T> {
    fn take_trace(&mut self, zone: Option<&str>) -> String {
        self.trace.drain(zone)
    }
}
