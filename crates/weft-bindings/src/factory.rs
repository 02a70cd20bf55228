// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pooled codec factories.
//!
//! A [`Factory`] owns a free list of previously built codecs. [`Factory::build`]
//! hands out an exclusively owned [`Pooled`] handle; dropping the handle puts
//! the codec back on the free list through a weak reference, so handles that
//! outlive their factory simply drop the codec.

use core::fmt;
use core::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use weft_codec::{CodecError, Coder};

struct Pool<C> {
    free: Mutex<Vec<C>>,
}

impl<C> Pool<C> {
    fn take(&self) -> Option<C> {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    fn put(&self, codec: C) {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(codec);
    }

    fn len(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Builds codecs of type `C` up to fixed maximum dimensions.
pub struct Factory<C> {
    max_symbols: u32,
    max_symbol_size: u32,
    symbols: u32,
    symbol_size: u32,
    pool: Arc<Pool<C>>,
}

impl<C: Coder> Factory<C> {
    /// Factory for blocks of at most `max_symbols` × `max_symbol_size`.
    ///
    /// The build dimensions start at the maxima. `granularity` is the
    /// multiple every symbol size must be; the maxima are rejected up front
    /// when no codec could ever be built from them.
    pub fn new(
        max_symbols: u32,
        max_symbol_size: u32,
        granularity: u32,
    ) -> Result<Self, CodecError> {
        if max_symbols == 0 {
            return Err(CodecError::SymbolsOutOfRange {
                symbols: 0,
                max: u32::MAX,
            });
        }
        if max_symbol_size == 0 {
            return Err(CodecError::SymbolSizeOutOfRange {
                symbol_size: 0,
                max: u32::MAX,
            });
        }
        if !max_symbol_size.is_multiple_of(granularity) {
            return Err(CodecError::SymbolSizeGranularity {
                symbol_size: max_symbol_size,
                granularity,
            });
        }
        Ok(Self {
            max_symbols,
            max_symbol_size,
            symbols: max_symbols,
            symbol_size: max_symbol_size,
            pool: Arc::new(Pool {
                free: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Maximum symbols.
    pub fn max_symbols(&self) -> u32 {
        self.max_symbols
    }

    /// Maximum symbol size.
    pub fn max_symbol_size(&self) -> u32 {
        self.max_symbol_size
    }

    /// Largest payload any codec from this factory produces.
    pub fn max_payload_size(&self) -> u32 {
        C::max_payload_size(self.max_symbols, self.max_symbol_size)
    }

    /// Symbols for the next [`Factory::build`].
    pub fn symbols(&self) -> u32 {
        self.symbols
    }

    /// Symbol size for the next [`Factory::build`].
    pub fn symbol_size(&self) -> u32 {
        self.symbol_size
    }

    /// Set the symbol count used by subsequent builds.
    pub fn set_symbols(&mut self, symbols: u32) -> Result<(), CodecError> {
        if symbols == 0 || symbols > self.max_symbols {
            return Err(CodecError::SymbolsOutOfRange {
                symbols,
                max: self.max_symbols,
            });
        }
        self.symbols = symbols;
        Ok(())
    }

    /// Set the symbol size used by subsequent builds.
    pub fn set_symbol_size(&mut self, symbol_size: u32) -> Result<(), CodecError> {
        if symbol_size == 0 || symbol_size > self.max_symbol_size {
            return Err(CodecError::SymbolSizeOutOfRange {
                symbol_size,
                max: self.max_symbol_size,
            });
        }
        self.symbol_size = symbol_size;
        Ok(())
    }

    /// Take a codec from the free list (or construct one) and initialize it
    /// to the current dimensions.
    pub fn build(&self) -> Result<Pooled<C>, CodecError> {
        let codec = self
            .pool
            .take()
            .unwrap_or_else(|| C::construct(self.max_symbols, self.max_symbol_size));
        let mut pooled = Pooled {
            codec: Some(codec),
            pool: Arc::downgrade(&self.pool),
        };
        pooled.initialize(self.symbols, self.symbol_size)?;
        Ok(pooled)
    }

    /// Codecs currently waiting on the free list.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }
}

impl<C> fmt::Debug for Factory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("max_symbols", &self.max_symbols)
            .field("max_symbol_size", &self.max_symbol_size)
            .field("symbols", &self.symbols)
            .field("symbol_size", &self.symbol_size)
            .finish_non_exhaustive()
    }
}

/// Exclusively owned codec borrowed from a [`Factory`] pool.
pub struct Pooled<C> {
    codec: Option<C>,
    pool: Weak<Pool<C>>,
}

impl<C> Deref for Pooled<C> {
    type Target = C;

    #[allow(clippy::expect_used)]
    fn deref(&self) -> &C {
        // Only `Drop` takes the codec out.
        self.codec.as_ref().expect("pooled codec present until drop")
    }
}

impl<C> DerefMut for Pooled<C> {
    #[allow(clippy::expect_used)]
    fn deref_mut(&mut self) -> &mut C {
        self.codec.as_mut().expect("pooled codec present until drop")
    }
}

impl<C> Drop for Pooled<C> {
    fn drop(&mut self) {
        if let (Some(codec), Some(pool)) = (self.codec.take(), self.pool.upgrade()) {
            pool.put(codec);
        }
    }
}

impl<C> fmt::Debug for Pooled<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("returns_to_pool", &(self.pool.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_codec::{DisableTrace, FullVectorEncoder};
    use weft_field::Binary8;

    type Enc = FullVectorEncoder<Binary8, DisableTrace>;

    #[test]
    fn dropped_handles_return_to_the_pool() {
        let factory = Factory::<Enc>::new(8, 16, 1).unwrap();
        let a = factory.build().unwrap();
        let b = factory.build().unwrap();
        assert_eq!(factory.pooled(), 0);
        drop(a);
        drop(b);
        assert_eq!(factory.pooled(), 2);
        let _c = factory.build().unwrap();
        assert_eq!(factory.pooled(), 1);
    }

    #[test]
    fn handles_outliving_the_factory_are_dropped() {
        let factory = Factory::<Enc>::new(4, 4, 1).unwrap();
        let handle = factory.build().unwrap();
        drop(factory);
        assert_eq!(handle.symbols(), 4);
        drop(handle);
    }

    #[test]
    fn build_applies_current_dimensions() {
        let mut factory = Factory::<Enc>::new(8, 16, 1).unwrap();
        factory.set_symbols(3).unwrap();
        factory.set_symbol_size(5).unwrap();
        let codec = factory.build().unwrap();
        assert_eq!((codec.symbols(), codec.symbol_size()), (3, 5));
        assert_eq!(codec.max_symbols(), 8);
        assert!(matches!(
            factory.set_symbols(9),
            Err(CodecError::SymbolsOutOfRange { symbols: 9, max: 8 })
        ));
        assert!(factory.set_symbol_size(0).is_err());
        assert_eq!(factory.symbols(), 3);
    }

    #[test]
    fn unusable_maxima_are_rejected_at_creation() {
        assert_eq!(
            Factory::<Enc>::new(0, 16, 1).unwrap_err(),
            CodecError::SymbolsOutOfRange {
                symbols: 0,
                max: u32::MAX,
            }
        );
        assert!(matches!(
            Factory::<Enc>::new(4, 0, 1),
            Err(CodecError::SymbolSizeOutOfRange { symbol_size: 0, .. })
        ));
        assert_eq!(
            Factory::<Enc>::new(4, 15, 2).unwrap_err(),
            CodecError::SymbolSizeGranularity {
                symbol_size: 15,
                granularity: 2,
            }
        );
        assert!(Factory::<Enc>::new(4, 16, 2).is_ok());
    }
}
