// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GF(2): coefficients are single bits, symbols combine by XOR.

use crate::{add_region, Field, FieldKind, FieldLabel};

/// The binary field GF(2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binary;

impl FieldLabel for Binary {
    const LABEL: &'static str = "Binary";
    const KIND: Option<FieldKind> = Some(FieldKind::Binary);
}

impl Field for Binary {
    type Element = u8;

    const DEGREE: u32 = 1;

    fn one() -> u8 {
        1
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_u32(value: u32) -> u8 {
        (value & 1) as u8
    }

    fn to_u32(element: u8) -> u32 {
        u32::from(element)
    }

    fn add(a: u8, b: u8) -> u8 {
        a ^ b
    }

    fn multiply(a: u8, b: u8) -> u8 {
        a & b
    }

    fn invert(a: u8) -> u8 {
        a
    }

    fn get(packed: &[u8], index: usize) -> u8 {
        (packed[index / 8] >> (index % 8)) & 1
    }

    fn set(packed: &mut [u8], index: usize, value: u8) {
        let mask = 1u8 << (index % 8);
        if value & 1 == 1 {
            packed[index / 8] |= mask;
        } else {
            packed[index / 8] &= !mask;
        }
    }

    fn multiply_region(region: &mut [u8], c: u8) {
        if c & 1 == 0 {
            region.fill(0);
        }
    }

    fn multiply_add_region(dst: &mut [u8], src: &[u8], c: u8) {
        if c & 1 == 1 {
            add_region(dst, src);
        }
    }
}
