// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Binary extension fields for the weft network codecs.
//!
//! Four fields are provided, each as a zero-sized marker type implementing
//! [`Field`]:
//!
//! - [`Binary`]: GF(2), one bit per element.
//! - [`Binary4`]: GF(2^4), one nibble per element.
//! - [`Binary8`]: GF(2^8), one byte per element.
//! - [`Binary16`]: GF(2^16), two big-endian bytes per element.
//!
//! Codecs only touch field arithmetic through two surfaces: packed
//! coefficient vectors ([`Field::get`] / [`Field::set`]) and symbol regions
//! ([`Field::multiply_region`] / [`Field::multiply_add_region`]). Bindings only
//! need the display label ([`FieldLabel::LABEL`]), which is also provided by
//! the [`NoField`] placeholder used by codecs that do no arithmetic.
#![forbid(unsafe_code)]

mod binary;
mod binary16;
mod binary4;
mod binary8;
mod tables;

pub use binary::Binary;
pub use binary16::Binary16;
pub use binary4::Binary4;
pub use binary8::Binary8;

use core::fmt::Debug;

/// Runtime selector for the four supported fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    /// GF(2).
    Binary,
    /// GF(2^4).
    Binary4,
    /// GF(2^8).
    Binary8,
    /// GF(2^16).
    Binary16,
}

impl FieldKind {
    /// All fields in registration order.
    pub const ALL: [Self; 4] = [Self::Binary, Self::Binary4, Self::Binary8, Self::Binary16];

    /// Display label used when naming exposed types.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Binary => Binary::LABEL,
            Self::Binary4 => Binary4::LABEL,
            Self::Binary8 => Binary8::LABEL,
            Self::Binary16 => Binary16::LABEL,
        }
    }

    /// Symbol sizes over this field must be a multiple of this many bytes.
    pub fn symbol_granularity(self) -> u32 {
        let bytes = match self {
            Self::Binary => Binary::symbol_granularity(),
            Self::Binary4 => Binary4::symbol_granularity(),
            Self::Binary8 => Binary8::symbol_granularity(),
            Self::Binary16 => Binary16::symbol_granularity(),
        };
        u32::try_from(bytes).unwrap_or(u32::MAX)
    }

    /// Parse a display label back into a field selector.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label of a field selector type.
///
/// Implemented by every [`Field`] and by [`NoField`]. This is the only part
/// of the field library the binding layer depends on.
pub trait FieldLabel {
    /// Label appended to exposed type names (empty for [`NoField`]).
    const LABEL: &'static str;
    /// Runtime selector, `None` for [`NoField`].
    const KIND: Option<FieldKind>;
}

/// Resolve the display label of a field selector type.
pub const fn resolve_field_name<F: FieldLabel>() -> &'static str {
    F::LABEL
}

/// Placeholder for codecs that perform no field arithmetic (carousel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoField;

impl FieldLabel for NoField {
    const LABEL: &'static str = "";
    const KIND: Option<FieldKind> = None;
}

/// Arithmetic over a binary extension field.
///
/// Elements are stored unpacked as [`Field::Element`] inside codecs and packed
/// densely when they cross the wire as coefficient vectors. Symbols are raw
/// byte regions interpreted as a sequence of packed elements.
pub trait Field: FieldLabel + Copy + Default + Debug + Send + Sync + 'static {
    /// Unpacked element representation.
    type Element: Copy + Eq + Default + Debug + Send + Sync + 'static;

    /// Bits per element.
    const DEGREE: u32;

    /// Number of elements in the field.
    const ORDER: u32 = 1 << Self::DEGREE;

    /// Multiplicative identity.
    fn one() -> Self::Element;

    /// Additive identity.
    fn zero() -> Self::Element {
        Self::Element::default()
    }

    /// Build an element from the low [`Field::DEGREE`] bits of `value`.
    fn from_u32(value: u32) -> Self::Element;

    /// Widen an element to `u32`.
    fn to_u32(element: Self::Element) -> u32;

    /// Field addition (XOR); subtraction is identical.
    fn add(a: Self::Element, b: Self::Element) -> Self::Element;

    /// Field multiplication.
    fn multiply(a: Self::Element, b: Self::Element) -> Self::Element;

    /// Multiplicative inverse. The inverse of zero is defined as zero.
    fn invert(a: Self::Element) -> Self::Element;

    /// `a / b`, with division by zero yielding zero.
    fn divide(a: Self::Element, b: Self::Element) -> Self::Element {
        Self::multiply(a, Self::invert(b))
    }

    /// Returns `true` for the additive identity.
    fn is_zero(element: Self::Element) -> bool {
        element == Self::zero()
    }

    /// Bytes needed to pack `count` elements.
    fn coefficient_bytes(count: usize) -> usize {
        (count * Self::DEGREE as usize).div_ceil(8)
    }

    /// Read the element at `index` from a packed vector.
    fn get(packed: &[u8], index: usize) -> Self::Element;

    /// Write the element at `index` into a packed vector.
    fn set(packed: &mut [u8], index: usize, value: Self::Element);

    /// Symbol sizes must be a multiple of this many bytes.
    fn symbol_granularity() -> usize {
        1
    }

    /// `region *= c`, element-wise.
    fn multiply_region(region: &mut [u8], c: Self::Element);

    /// `dst += c * src`, element-wise. Both regions have equal length.
    fn multiply_add_region(dst: &mut [u8], src: &[u8], c: Self::Element);
}

/// `dst += src` for any binary field (addition is XOR on the packed bytes).
pub fn add_region(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}
