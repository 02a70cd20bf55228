// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Block dimensions shared by every codec.

use crate::CodecError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Dimensions {
    max_symbols: u32,
    max_symbol_size: u32,
    symbols: u32,
    symbol_size: u32,
}

impl Dimensions {
    pub(crate) fn new(max_symbols: u32, max_symbol_size: u32) -> Self {
        Self {
            max_symbols,
            max_symbol_size,
            symbols: max_symbols,
            symbol_size: max_symbol_size,
        }
    }

    /// Validate and adopt new dimensions; on error the old ones are kept.
    pub(crate) fn resize(
        &mut self,
        symbols: u32,
        symbol_size: u32,
        granularity: usize,
    ) -> Result<(), CodecError> {
        if symbols == 0 || symbols > self.max_symbols {
            return Err(CodecError::SymbolsOutOfRange {
                symbols,
                max: self.max_symbols,
            });
        }
        if symbol_size == 0 || symbol_size > self.max_symbol_size {
            return Err(CodecError::SymbolSizeOutOfRange {
                symbol_size,
                max: self.max_symbol_size,
            });
        }
        let granularity = u32::try_from(granularity).unwrap_or(u32::MAX);
        if symbol_size % granularity != 0 {
            return Err(CodecError::SymbolSizeGranularity {
                symbol_size,
                granularity,
            });
        }
        self.symbols = symbols;
        self.symbol_size = symbol_size;
        Ok(())
    }

    pub(crate) const fn max_symbols(&self) -> u32 {
        self.max_symbols
    }

    pub(crate) const fn max_symbol_size(&self) -> u32 {
        self.max_symbol_size
    }

    pub(crate) const fn symbols(&self) -> u32 {
        self.symbols
    }

    pub(crate) const fn symbol_size(&self) -> u32 {
        self.symbol_size
    }

    pub(crate) fn symbol_count(&self) -> usize {
        self.symbols as usize
    }

    pub(crate) fn symbol_len(&self) -> usize {
        self.symbol_size as usize
    }

    pub(crate) fn block_len(&self) -> usize {
        self.symbol_count() * self.symbol_len()
    }
}

/// Saturating `usize` → `u32` for size accessors.
pub(crate) fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_rejects_out_of_range_and_keeps_previous() {
        let mut dims = Dimensions::new(8, 16);
        assert!(matches!(
            dims.resize(9, 16, 1),
            Err(CodecError::SymbolsOutOfRange { symbols: 9, max: 8 })
        ));
        assert!(matches!(
            dims.resize(4, 0, 1),
            Err(CodecError::SymbolSizeOutOfRange { .. })
        ));
        assert!(matches!(
            dims.resize(4, 15, 2),
            Err(CodecError::SymbolSizeGranularity { .. })
        ));
        assert_eq!((dims.symbols(), dims.symbol_size()), (8, 16));
        dims.resize(4, 10, 2).unwrap();
        assert_eq!(dims.block_len(), 40);
    }
}
