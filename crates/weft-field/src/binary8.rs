// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GF(2^8) over `x^8 + x^4 + x^3 + x^2 + 1` (0x11D).

use std::sync::OnceLock;

use crate::tables::LogTables;
use crate::{Field, FieldKind, FieldLabel};

const POLYNOMIAL: u32 = 0x11D;

fn tables() -> &'static LogTables {
    static TABLES: OnceLock<LogTables> = OnceLock::new();
    TABLES.get_or_init(|| LogTables::build(Binary8::DEGREE, POLYNOMIAL))
}

/// The field GF(256).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binary8;

impl FieldLabel for Binary8 {
    const LABEL: &'static str = "Binary8";
    const KIND: Option<FieldKind> = Some(FieldKind::Binary8);
}

#[allow(clippy::cast_possible_truncation)]
impl Field for Binary8 {
    type Element = u8;

    const DEGREE: u32 = 8;

    fn one() -> u8 {
        1
    }

    fn from_u32(value: u32) -> u8 {
        (value & 0xFF) as u8
    }

    fn to_u32(element: u8) -> u32 {
        u32::from(element)
    }

    fn add(a: u8, b: u8) -> u8 {
        a ^ b
    }

    fn multiply(a: u8, b: u8) -> u8 {
        tables().multiply(u32::from(a), u32::from(b)) as u8
    }

    fn invert(a: u8) -> u8 {
        tables().invert(u32::from(a)) as u8
    }

    fn get(packed: &[u8], index: usize) -> u8 {
        packed[index]
    }

    fn set(packed: &mut [u8], index: usize, value: u8) {
        packed[index] = value;
    }

    fn multiply_region(region: &mut [u8], c: u8) {
        if c == 1 {
            return;
        }
        let row = tables().row(u32::from(c), 256);
        for byte in region {
            *byte = row[usize::from(*byte)] as u8;
        }
    }

    fn multiply_add_region(dst: &mut [u8], src: &[u8], c: u8) {
        debug_assert_eq!(dst.len(), src.len());
        match c {
            0 => {}
            1 => crate::add_region(dst, src),
            c => {
                let row = tables().row(u32::from(c), 256);
                for (d, s) in dst.iter_mut().zip(src) {
                    *d ^= row[usize::from(*s)] as u8;
                }
            }
        }
    }
}
