// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Log/antilog tables shared by the GF(2^m) fields.

/// Log and exponent tables for a field of `1 << degree` elements.
///
/// `exp` is stored twice over so `exp[log a + log b]` never needs a modulo.
pub(crate) struct LogTables {
    log: Vec<u32>,
    exp: Vec<u32>,
    order_minus_one: u32,
}

impl LogTables {
    /// Build the tables by repeated multiplication by the generator `x`.
    ///
    /// `polynomial` is the full reduction polynomial including the top bit
    /// and must be primitive, otherwise `exp` will not cover every nonzero
    /// element.
    pub(crate) fn build(degree: u32, polynomial: u32) -> Self {
        let order = 1u32 << degree;
        let order_minus_one = order - 1;
        let mut log = vec![0u32; order as usize];
        let mut exp = vec![0u32; 2 * order_minus_one as usize];
        let mut value = 1u32;
        for power in 0..order_minus_one {
            exp[power as usize] = value;
            exp[(power + order_minus_one) as usize] = value;
            log[value as usize] = power;
            value <<= 1;
            if value & order != 0 {
                value ^= polynomial;
            }
        }
        Self {
            log,
            exp,
            order_minus_one,
        }
    }

    #[inline]
    pub(crate) fn multiply(&self, a: u32, b: u32) -> u32 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[(self.log[a as usize] + self.log[b as usize]) as usize]
    }

    #[inline]
    pub(crate) fn invert(&self, a: u32) -> u32 {
        if a == 0 {
            return 0;
        }
        self.exp[(self.order_minus_one - self.log[a as usize]) as usize]
    }

    /// Multiplication row for a fixed coefficient, indexed by the other operand.
    pub(crate) fn row(&self, c: u32, width: u32) -> Vec<u32> {
        (0..width).map(|v| self.multiply(c, v)).collect()
    }
}
