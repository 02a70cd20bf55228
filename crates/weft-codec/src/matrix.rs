// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Incremental Gauss–Jordan elimination over a field.
//!
//! Row `i` is only meaningful when column `i` holds a pivot. Rows are kept
//! fully reduced: a pivot row has `1` on its pivot column and `0` on every
//! other pivot column, so a row is decoded exactly when its remaining
//! coefficients are all zero.

use weft_field::Field;

#[derive(Debug)]
pub(crate) struct Matrix<F: Field> {
    symbols: usize,
    symbol_len: usize,
    coefficients: Vec<F::Element>,
    data: Vec<u8>,
    pivots: Vec<bool>,
    rank: usize,
}

impl<F: Field> Default for Matrix<F> {
    fn default() -> Self {
        Self {
            symbols: 0,
            symbol_len: 0,
            coefficients: Vec::new(),
            data: Vec::new(),
            pivots: Vec::new(),
            rank: 0,
        }
    }
}

impl<F: Field> Matrix<F> {
    pub(crate) fn reset(&mut self, symbols: usize, symbol_len: usize) {
        self.symbols = symbols;
        self.symbol_len = symbol_len;
        self.coefficients.clear();
        self.coefficients.resize(symbols * symbols, F::zero());
        self.data.clear();
        self.data.resize(symbols * symbol_len, 0);
        self.pivots.clear();
        self.pivots.resize(symbols, false);
        self.rank = 0;
    }

    pub(crate) const fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn has_pivot(&self, index: usize) -> bool {
        self.pivots[index]
    }

    fn row(&self, index: usize) -> &[F::Element] {
        &self.coefficients[index * self.symbols..(index + 1) * self.symbols]
    }

    pub(crate) fn symbol(&self, index: usize) -> &[u8] {
        &self.data[index * self.symbol_len..(index + 1) * self.symbol_len]
    }

    /// Pivot present and no other coefficient left in its row.
    pub(crate) fn is_uncoded(&self, index: usize) -> bool {
        self.pivots[index]
            && self
                .row(index)
                .iter()
                .enumerate()
                .all(|(k, c)| k == index || F::is_zero(*c))
    }

    pub(crate) fn uncoded_count(&self) -> usize {
        (0..self.symbols).filter(|&i| self.is_uncoded(i)).count()
    }

    /// Insert an uncoded source symbol. Returns the pivot column when the
    /// symbol was innovative.
    pub(crate) fn insert_systematic(&mut self, index: usize, symbol: &[u8]) -> Option<usize> {
        if self.is_uncoded(index) {
            return None;
        }
        let mut vector = vec![F::zero(); self.symbols];
        vector[index] = F::one();
        self.insert(vector, symbol.to_vec())
    }

    /// Insert a coded row. Returns the pivot column when it was innovative.
    pub(crate) fn insert(&mut self, mut vector: Vec<F::Element>, mut symbol: Vec<u8>) -> Option<usize> {
        for column in 0..self.symbols {
            let c = vector[column];
            if F::is_zero(c) || !self.pivots[column] {
                continue;
            }
            self.subtract_row(&mut vector, &mut symbol, column, c);
        }

        let pivot = vector.iter().position(|c| !F::is_zero(*c))?;
        let scale = F::invert(vector[pivot]);
        for c in &mut vector {
            *c = F::multiply(*c, scale);
        }
        F::multiply_region(&mut symbol, scale);

        for row in 0..self.symbols {
            if !self.pivots[row] {
                continue;
            }
            let c = self.coefficients[row * self.symbols + pivot];
            if F::is_zero(c) {
                continue;
            }
            let start = row * self.symbols;
            for (dst, src) in self.coefficients[start..start + self.symbols]
                .iter_mut()
                .zip(&vector)
            {
                *dst = F::add(*dst, F::multiply(c, *src));
            }
            let start = row * self.symbol_len;
            F::multiply_add_region(&mut self.data[start..start + self.symbol_len], &symbol, c);
        }

        let start = pivot * self.symbols;
        self.coefficients[start..start + self.symbols].copy_from_slice(&vector);
        let start = pivot * self.symbol_len;
        self.data[start..start + self.symbol_len].copy_from_slice(&symbol);
        self.pivots[pivot] = true;
        self.rank += 1;
        Some(pivot)
    }

    fn subtract_row(&self, vector: &mut [F::Element], symbol: &mut [u8], row: usize, c: F::Element) {
        for (dst, src) in vector.iter_mut().zip(self.row(row)) {
            *dst = F::add(*dst, F::multiply(c, *src));
        }
        F::multiply_add_region(symbol, self.symbol(row), c);
    }

    /// Random combination `sum(c_r * row_r)` over the pivot rows, written as
    /// a packed coefficient vector and a symbol.
    pub(crate) fn combine(&self, weights: &[(usize, F::Element)], header: &mut [u8], symbol: &mut [u8]) {
        let mut vector = vec![F::zero(); self.symbols];
        for &(row, c) in weights {
            for (dst, src) in vector.iter_mut().zip(self.row(row)) {
                *dst = F::add(*dst, F::multiply(c, *src));
            }
            F::multiply_add_region(symbol, self.symbol(row), c);
        }
        for (index, c) in vector.into_iter().enumerate() {
            F::set(header, index, c);
        }
    }
}
