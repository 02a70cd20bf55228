// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use proptest::prelude::*;
use weft_field::{Binary, Binary16, Binary4, Binary8, Field};

fn distributes<F: Field>(a: u32, b: u32, c: u32) -> bool {
    let (a, b, c) = (F::from_u32(a), F::from_u32(b), F::from_u32(c));
    F::multiply(a, F::add(b, c)) == F::add(F::multiply(a, b), F::multiply(a, c))
}

fn associates<F: Field>(a: u32, b: u32, c: u32) -> bool {
    let (a, b, c) = (F::from_u32(a), F::from_u32(b), F::from_u32(c));
    F::multiply(F::multiply(a, b), c) == F::multiply(a, F::multiply(b, c))
}

fn divides_back<F: Field>(a: u32, b: u32) -> bool {
    let (a, b) = (F::from_u32(a), F::from_u32(b));
    if F::is_zero(b) {
        return true;
    }
    F::multiply(F::divide(a, b), b) == a
}

fn region_agrees_with_scalar<F: Field>(data: &[u8], c: u32) -> bool {
    let c = F::from_u32(c);
    let granularity = F::symbol_granularity();
    let len = data.len() - data.len() % granularity;
    let src = &data[..len];
    let mut dst = vec![0u8; len];
    F::multiply_add_region(&mut dst, src, c);
    let elements = len * 8 / F::DEGREE as usize;
    (0..elements).all(|i| F::get(&dst, i) == F::multiply(F::get(src, i), c))
}

proptest! {
    #[test]
    fn binary_laws(a in any::<u32>(), b in any::<u32>(), c in any::<u32>()) {
        prop_assert!(distributes::<Binary>(a, b, c));
        prop_assert!(associates::<Binary>(a, b, c));
        prop_assert!(divides_back::<Binary>(a, b));
    }

    #[test]
    fn binary4_laws(a in any::<u32>(), b in any::<u32>(), c in any::<u32>()) {
        prop_assert!(distributes::<Binary4>(a, b, c));
        prop_assert!(associates::<Binary4>(a, b, c));
        prop_assert!(divides_back::<Binary4>(a, b));
    }

    #[test]
    fn binary8_laws(a in any::<u32>(), b in any::<u32>(), c in any::<u32>()) {
        prop_assert!(distributes::<Binary8>(a, b, c));
        prop_assert!(associates::<Binary8>(a, b, c));
        prop_assert!(divides_back::<Binary8>(a, b));
    }

    #[test]
    fn binary16_laws(a in any::<u32>(), b in any::<u32>(), c in any::<u32>()) {
        prop_assert!(distributes::<Binary16>(a, b, c));
        prop_assert!(associates::<Binary16>(a, b, c));
        prop_assert!(divides_back::<Binary16>(a, b));
    }

    #[test]
    fn region_ops_match_scalar_ops(
        data in prop::collection::vec(any::<u8>(), 0..64),
        c in any::<u32>(),
    ) {
        prop_assert!(region_agrees_with_scalar::<Binary>(&data, c));
        prop_assert!(region_agrees_with_scalar::<Binary4>(&data, c));
        prop_assert!(region_agrees_with_scalar::<Binary8>(&data, c));
        prop_assert!(region_agrees_with_scalar::<Binary16>(&data, c));
    }
}
