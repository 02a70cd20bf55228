// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use std::collections::HashSet;

use weft_bindings::{global, CodecFamily, Registry, RegistryError, CONFIGURATIONS};
use weft_registry_api::{RegistryProvider, Role};

#[test]
fn every_exposed_name_is_unique() {
    let registry = Registry::initialize().unwrap();
    let mut seen = HashSet::new();
    for name in registry.type_names().chain(registry.factory_names()) {
        assert!(seen.insert(name.to_owned()), "name {name} exposed twice");
    }
    assert_eq!(seen.len(), 2 * CONFIGURATIONS.len());
}

#[test]
fn names_follow_family_role_field_trace() {
    let registry = global().unwrap();
    for name in [
        "FullVectorEncoderBinary8",
        "FullVectorDecoderBinary16Trace",
        "SparseFullVectorEncoderBinary",
        "OnTheFlyDecoderBinary4Trace",
        "SlidingWindowEncoderBinary8",
        "NoCodeEncoder",
        "NoCodeDecoderTrace",
    ] {
        assert!(registry.type_by_name(name).is_some(), "missing {name}");
    }
    let def = registry.type_by_name("SlidingWindowDecoderBinary8Trace").unwrap();
    assert_eq!(def.factory, "SlidingWindowDecoderFactoryBinary8Trace");
    assert_eq!(def.family, "SlidingWindow");
    assert_eq!(def.role, Role::Decoder);
    assert_eq!(def.field, "Binary8");
    assert!(def.trace);
    assert!(registry.type_by_name("SparseFullVectorDecoderBinary8").is_none());
    let factory = registry
        .factory_by_name("NoCodeEncoderFactory")
        .unwrap();
    assert_eq!(factory.builds, "NoCodeEncoder");
}

#[test]
fn registration_order_matches_the_configuration_table() {
    let registry = global().unwrap();
    let types = registry.all_types();
    assert_eq!(types.len(), CONFIGURATIONS.len());
    for (config, def) in CONFIGURATIONS.iter().zip(types) {
        assert_eq!(config.family.label(), def.family);
        assert_eq!(config.family.role(), def.role);
        assert_eq!(config.trace, def.trace);
        assert_eq!(config.field.map_or("", |f| f.label()), def.field);
    }
    assert_eq!(types[0].name, "FullVectorEncoderBinary");
    assert_eq!(types[1].name, "FullVectorEncoderBinaryTrace");
    assert_eq!(types[59].name, "NoCodeDecoderTrace");
}

#[test]
fn global_registry_is_initialized_once() {
    let a = global().unwrap();
    let b = global().unwrap();
    assert!(std::ptr::eq(a, b));
    let info = a.info();
    assert_eq!(info.module, "weft");
    assert_eq!(info.type_count, 60);
    assert_eq!(info.factory_count, 60);
}

#[test]
fn duplicate_configuration_fails_initialization() {
    let sliding: Vec<_> = CONFIGURATIONS
        .iter()
        .copied()
        .filter(|c| c.family == CodecFamily::SlidingWindowDecoder)
        .chain(
            CONFIGURATIONS
                .iter()
                .copied()
                .filter(|c| c.family == CodecFamily::SlidingWindowDecoder && c.trace),
        )
        .collect();
    match Registry::from_configurations(&sliding) {
        Err(RegistryError::DuplicateName(name)) => {
            assert_eq!(name, "SlidingWindowDecoderBinaryTrace");
        }
        other => panic!("expected DuplicateName, got {other:?}"),
    }
}
