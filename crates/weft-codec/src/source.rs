// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Encoder-side source block storage.

use crate::dimensions::Dimensions;
use crate::CodecError;

/// Source symbols plus a record of which have been provided.
#[derive(Debug, Default)]
pub(crate) struct SourceBlock {
    data: Vec<u8>,
    present: Vec<bool>,
    symbol_len: usize,
}

impl SourceBlock {
    pub(crate) fn reset(&mut self, dims: &Dimensions) {
        self.symbol_len = dims.symbol_len();
        self.data.clear();
        self.data.resize(dims.block_len(), 0);
        self.present.clear();
        self.present.resize(dims.symbol_count(), false);
    }

    pub(crate) fn set_all(&mut self, data: &[u8]) -> Result<(), CodecError> {
        if data.len() != self.data.len() {
            return Err(CodecError::BlockSizeMismatch {
                expected: self.data.len(),
                actual: data.len(),
            });
        }
        self.data.copy_from_slice(data);
        self.present.fill(true);
        Ok(())
    }

    pub(crate) fn set(&mut self, index: u32, data: &[u8]) -> Result<(), CodecError> {
        let slot = index as usize;
        if slot >= self.present.len() {
            return Err(CodecError::SymbolIndexOutOfRange {
                index,
                symbols: crate::dimensions::to_u32(self.present.len()),
            });
        }
        if data.len() != self.symbol_len {
            return Err(CodecError::SymbolSizeMismatch {
                expected: self.symbol_len,
                actual: data.len(),
            });
        }
        let start = slot * self.symbol_len;
        self.data[start..start + self.symbol_len].copy_from_slice(data);
        self.present[slot] = true;
        Ok(())
    }

    pub(crate) fn symbol(&self, index: usize) -> &[u8] {
        let start = index * self.symbol_len;
        &self.data[start..start + self.symbol_len]
    }

    pub(crate) fn is_present(&self, index: usize) -> bool {
        self.present.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn present_count(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }
}
