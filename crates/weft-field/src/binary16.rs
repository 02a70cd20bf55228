// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! GF(2^16) over 0x1100B; elements are big-endian byte pairs.

use std::sync::OnceLock;

use crate::tables::LogTables;
use crate::{Field, FieldKind, FieldLabel};

const POLYNOMIAL: u32 = 0x1_100B;

fn tables() -> &'static LogTables {
    static TABLES: OnceLock<LogTables> = OnceLock::new();
    TABLES.get_or_init(|| LogTables::build(Binary16::DEGREE, POLYNOMIAL))
}

/// The field GF(65536).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binary16;

impl FieldLabel for Binary16 {
    const LABEL: &'static str = "Binary16";
    const KIND: Option<FieldKind> = Some(FieldKind::Binary16);
}

#[allow(clippy::cast_possible_truncation)]
impl Field for Binary16 {
    type Element = u16;

    const DEGREE: u32 = 16;

    fn one() -> u16 {
        1
    }

    fn from_u32(value: u32) -> u16 {
        (value & 0xFFFF) as u16
    }

    fn to_u32(element: u16) -> u32 {
        u32::from(element)
    }

    fn add(a: u16, b: u16) -> u16 {
        a ^ b
    }

    fn multiply(a: u16, b: u16) -> u16 {
        tables().multiply(u32::from(a), u32::from(b)) as u16
    }

    fn invert(a: u16) -> u16 {
        tables().invert(u32::from(a)) as u16
    }

    fn get(packed: &[u8], index: usize) -> u16 {
        u16::from_be_bytes([packed[2 * index], packed[2 * index + 1]])
    }

    fn set(packed: &mut [u8], index: usize, value: u16) {
        packed[2 * index..2 * index + 2].copy_from_slice(&value.to_be_bytes());
    }

    fn symbol_granularity() -> usize {
        2
    }

    fn multiply_region(region: &mut [u8], c: u16) {
        if c == 1 {
            return;
        }
        for pair in region.chunks_exact_mut(2) {
            let value = u16::from_be_bytes([pair[0], pair[1]]);
            pair.copy_from_slice(&Self::multiply(value, c).to_be_bytes());
        }
    }

    fn multiply_add_region(dst: &mut [u8], src: &[u8], c: u16) {
        debug_assert_eq!(dst.len(), src.len());
        match c {
            0 => {}
            1 => crate::add_region(dst, src),
            c => {
                for (d, s) in dst.chunks_exact_mut(2).zip(src.chunks_exact(2)) {
                    let product = Self::multiply(u16::from_be_bytes([s[0], s[1]]), c);
                    let current = u16::from_be_bytes([d[0], d[1]]);
                    d.copy_from_slice(&(current ^ product).to_be_bytes());
                }
            }
        }
    }
}
