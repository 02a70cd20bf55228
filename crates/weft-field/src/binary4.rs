// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GF(2^4) over `x^4 + x + 1`; two elements per byte, low nibble first.

use std::sync::OnceLock;

use crate::tables::LogTables;
use crate::{Field, FieldKind, FieldLabel};

const POLYNOMIAL: u32 = 0x13;

fn tables() -> &'static LogTables {
    static TABLES: OnceLock<LogTables> = OnceLock::new();
    TABLES.get_or_init(|| LogTables::build(Binary4::DEGREE, POLYNOMIAL))
}

/// Byte-wide multiplication row: both nibbles of every byte value times `c`.
#[allow(clippy::cast_possible_truncation)]
fn byte_row(c: u8) -> [u8; 256] {
    let nibble = tables().row(u32::from(c), 16);
    let mut row = [0u8; 256];
    for (value, out) in row.iter_mut().enumerate() {
        let low = nibble[value & 0x0F];
        let high = nibble[value >> 4];
        *out = ((high << 4) | low) as u8;
    }
    row
}

/// The field GF(16).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binary4;

impl FieldLabel for Binary4 {
    const LABEL: &'static str = "Binary4";
    const KIND: Option<FieldKind> = Some(FieldKind::Binary4);
}

#[allow(clippy::cast_possible_truncation)]
impl Field for Binary4 {
    type Element = u8;

    const DEGREE: u32 = 4;

    fn one() -> u8 {
        1
    }

    fn from_u32(value: u32) -> u8 {
        (value & 0x0F) as u8
    }

    fn to_u32(element: u8) -> u32 {
        u32::from(element)
    }

    fn add(a: u8, b: u8) -> u8 {
        (a ^ b) & 0x0F
    }

    fn multiply(a: u8, b: u8) -> u8 {
        tables().multiply(u32::from(a & 0x0F), u32::from(b & 0x0F)) as u8
    }

    fn invert(a: u8) -> u8 {
        tables().invert(u32::from(a & 0x0F)) as u8
    }

    fn get(packed: &[u8], index: usize) -> u8 {
        let byte = packed[index / 2];
        if index % 2 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    fn set(packed: &mut [u8], index: usize, value: u8) {
        let byte = &mut packed[index / 2];
        if index % 2 == 0 {
            *byte = (*byte & 0xF0) | (value & 0x0F);
        } else {
            *byte = (*byte & 0x0F) | (value << 4);
        }
    }

    fn multiply_region(region: &mut [u8], c: u8) {
        if c == 1 {
            return;
        }
        let row = byte_row(c);
        for byte in region {
            *byte = row[usize::from(*byte)];
        }
    }

    fn multiply_add_region(dst: &mut [u8], src: &[u8], c: u8) {
        debug_assert_eq!(dst.len(), src.len());
        match c & 0x0F {
            0 => {}
            1 => crate::add_region(dst, src),
            c => {
                let row = byte_row(c);
                for (d, s) in dst.iter_mut().zip(src) {
                    *d ^= row[usize::from(*s)];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_nonzero_element_has_an_inverse() {
        for a in 1u8..16 {
            assert_eq!(Binary4::multiply(a, Binary4::invert(a)), 1, "a = {a}");
        }
    }

    #[test]
    fn nibble_packing_low_first() {
        let mut packed = [0u8; 2];
        Binary4::set(&mut packed, 0, 0xA);
        Binary4::set(&mut packed, 1, 0x3);
        Binary4::set(&mut packed, 2, 0xF);
        assert_eq!(packed, [0x3A, 0x0F]);
        assert_eq!(Binary4::get(&packed, 1), 0x3);
    }

    #[test]
    fn region_multiply_matches_scalar() {
        let src = [0x12u8, 0xEF];
        let mut dst = [0u8; 2];
        Binary4::multiply_add_region(&mut dst, &src, 7);
        for index in 0..4 {
            assert_eq!(
                Binary4::get(&dst, index),
                Binary4::multiply(Binary4::get(&src, index), 7)
            );
        }
    }
}
