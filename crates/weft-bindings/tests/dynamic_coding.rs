// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weft_bindings::{global, CallError, HostFactory, Instance};
use weft_codec::CodecError;
use weft_registry_api::{RegistryProvider, Value};

fn factory(name: &str, max_symbols: u32, max_symbol_size: u32) -> Box<dyn HostFactory> {
    global()
        .unwrap()
        .factory(name, max_symbols, max_symbol_size)
        .unwrap()
}

fn int(value: Value) -> i64 {
    match value {
        Value::Int(v) => v,
        other => panic!("expected int, got {other:?}"),
    }
}

fn boolean(value: Value) -> bool {
    match value {
        Value::Bool(v) => v,
        other => panic!("expected bool, got {other:?}"),
    }
}

fn bytes(value: Value) -> Vec<u8> {
    match value {
        Value::Bytes(v) => v,
        other => panic!("expected bytes, got {other:?}"),
    }
}

fn random_block(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

fn transfer(encoder: &mut Instance, decoder: &mut Instance, limit: usize) -> usize {
    for sent in 1..=limit {
        let payload = encoder.call("encode", &[]).unwrap();
        decoder.call("decode", &[payload]).unwrap();
        if boolean(decoder.call("is_complete", &[]).unwrap()) {
            return sent;
        }
    }
    panic!("decoder incomplete after {limit} payloads");
}

#[test]
fn full_vector_binary8_round_trip() {
    let enc_factory = factory("FullVectorEncoderFactoryBinary8", 16, 1400);
    let dec_factory = factory("FullVectorDecoderFactoryBinary8", 16, 1400);
    let mut encoder = enc_factory.build().unwrap();
    let mut decoder = dec_factory.build().unwrap();
    assert_eq!(encoder.type_name(), "FullVectorEncoderBinary8");

    let block_size = int(encoder.call("block_size", &[]).unwrap());
    assert_eq!(block_size, 16 * 1400);
    let data = random_block(16 * 1400, 1);
    encoder
        .call("set_symbols", &[Value::Bytes(data.clone())])
        .unwrap();

    let sent = transfer(&mut encoder, &mut decoder, 64);
    assert_eq!(sent, 16, "systematic phase delivers one symbol per payload");
    assert_eq!(bytes(decoder.call("copy_symbols", &[]).unwrap()), data);
    assert_eq!(int(decoder.call("symbols_uncoded", &[]).unwrap()), 16);
}

#[test]
fn every_rlnc_family_round_trips_in_every_field() {
    let pairs = [
        ("FullVectorEncoderFactory", "FullVectorDecoderFactory"),
        ("SparseFullVectorEncoderFactory", "FullVectorDecoderFactory"),
        ("OnTheFlyEncoderFactory", "OnTheFlyDecoderFactory"),
        ("SlidingWindowEncoderFactory", "SlidingWindowDecoderFactory"),
    ];
    for (seed, (enc, dec)) in pairs.into_iter().enumerate() {
        for field in ["Binary", "Binary4", "Binary8", "Binary16"] {
            let mut encoder = factory(&format!("{enc}{field}"), 8, 32).build().unwrap();
            let mut decoder = factory(&format!("{dec}{field}"), 8, 32).build().unwrap();
            encoder.call("set_systematic_off", &[]).unwrap();
            let data = random_block(8 * 32, seed as u64);
            encoder
                .call("set_symbols", &[Value::Bytes(data.clone())])
                .unwrap();
            transfer(&mut encoder, &mut decoder, 2000);
            assert_eq!(
                bytes(decoder.call("copy_symbols", &[]).unwrap()),
                data,
                "{enc}{field}"
            );
        }
    }
}

#[test]
fn carousel_round_trip_reports_rank_as_uncoded() {
    let mut encoder = factory("NoCodeEncoderFactory", 4, 3).build().unwrap();
    let mut decoder = factory("NoCodeDecoderFactoryTrace", 4, 3).build().unwrap();
    let data: Vec<u8> = (0..12).collect();
    encoder
        .call("set_symbols", &[Value::Bytes(data.clone())])
        .unwrap();
    assert_eq!(transfer(&mut encoder, &mut decoder, 4), 4);
    assert_eq!(
        decoder.call("symbols_uncoded", &[]).unwrap(),
        decoder.call("rank", &[]).unwrap()
    );
    assert_eq!(bytes(decoder.call("copy_symbols", &[]).unwrap()), data);
    let trace = decoder.call("trace", &[Value::Str("decoder".into())]).unwrap();
    assert!(matches!(trace, Value::Str(text) if text.lines().count() == 4));
}

#[test]
fn size_contracts_are_enforced() {
    let mut enc_factory = factory("OnTheFlyEncoderFactoryBinary8", 10, 100);
    let dec_factory = factory("OnTheFlyDecoderFactoryBinary8", 10, 100);
    assert!(matches!(
        enc_factory.set_symbols(11),
        Err(CallError::Codec(CodecError::SymbolsOutOfRange { symbols: 11, max: 10 }))
    ));
    assert!(matches!(
        enc_factory.set_symbol_size(101),
        Err(CallError::Codec(CodecError::SymbolSizeOutOfRange { .. }))
    ));
    enc_factory.set_symbols(5).unwrap();
    enc_factory.set_symbol_size(20).unwrap();
    assert_eq!(enc_factory.symbols(), 5);
    let mut encoder = enc_factory.build().unwrap();
    assert_eq!(int(encoder.call("block_size", &[]).unwrap()), 100);
    assert!(
        int(encoder.call("payload_size", &[]).unwrap())
            <= i64::from(enc_factory.max_payload_size())
    );

    assert!(matches!(
        encoder.call("set_symbols", &[Value::Bytes(vec![0; 99])]),
        Err(CallError::Codec(CodecError::BlockSizeMismatch { expected: 100, actual: 99 }))
    ));
    assert!(matches!(
        encoder.call("set_symbol", &[Value::Int(5), Value::Bytes(vec![0; 20])]),
        Err(CallError::Codec(CodecError::SymbolIndexOutOfRange { index: 5, symbols: 5 }))
    ));
    assert!(matches!(
        encoder.call("set_symbol", &[Value::Int(0), Value::Bytes(vec![0; 19])]),
        Err(CallError::Codec(CodecError::SymbolSizeMismatch { .. }))
    ));
    assert!(matches!(
        encoder.call("set_symbol", &[Value::Bytes(vec![0; 20])]),
        Err(CallError::Arity { min: 2, max: 2, actual: 1, .. })
    ));

    let mut decoder = dec_factory.build().unwrap();
    let payload_size = int(decoder.call("payload_size", &[]).unwrap()) as usize;
    assert!(matches!(
        decoder.call("decode", &[Value::Bytes(vec![0; payload_size + 1])]),
        Err(CallError::Codec(CodecError::PayloadSizeMismatch { .. }))
    ));
    assert!(matches!(
        decoder.call("encode", &[]),
        Err(CallError::UnknownMethod { .. })
    ));
    assert!(matches!(
        global().unwrap().factory("NoSuchFactory", 1, 1),
        Err(CallError::UnknownFactory(_))
    ));
}

#[test]
fn factories_reject_unusable_maxima_at_creation() {
    let registry = global().unwrap();
    assert!(matches!(
        registry.factory("FullVectorEncoderFactoryBinary8", 0, 16),
        Err(CallError::Codec(CodecError::SymbolsOutOfRange { symbols: 0, .. }))
    ));
    assert!(matches!(
        registry.factory("FullVectorEncoderFactoryBinary8", 4, 0),
        Err(CallError::Codec(CodecError::SymbolSizeOutOfRange { symbol_size: 0, .. }))
    ));
    assert!(matches!(
        registry.factory("FullVectorEncoderFactoryBinary16", 4, 15),
        Err(CallError::Codec(CodecError::SymbolSizeGranularity {
            symbol_size: 15,
            granularity: 2,
        }))
    ));
    // Odd sizes are fine for byte-granular fields and for the carousel.
    assert!(registry.factory("FullVectorEncoderFactoryBinary8", 4, 15).is_ok());
    assert!(registry.factory("NoCodeDecoderFactory", 4, 15).is_ok());
}

#[test]
fn systematic_toggle_switches_payload_kind() {
    let mut encoder = factory("FullVectorEncoderFactoryBinary", 4, 4).build().unwrap();
    encoder
        .call("set_symbols", &[Value::Bytes(vec![1; 16])])
        .unwrap();
    assert!(boolean(encoder.call("is_systematic_on", &[]).unwrap()));
    assert_eq!(bytes(encoder.call("encode", &[]).unwrap())[0], 0);

    encoder.call("set_systematic_off", &[]).unwrap();
    assert!(!boolean(encoder.call("is_systematic_on", &[]).unwrap()));
    for _ in 0..8 {
        assert_eq!(bytes(encoder.call("encode", &[]).unwrap())[0], 1);
    }

    encoder.call("set_systematic_on", &[]).unwrap();
    assert_eq!(bytes(encoder.call("encode", &[]).unwrap())[0], 0);
}

#[test]
fn feedback_round_trip_between_sliding_window_codecs() {
    let mut encoder = factory("SlidingWindowEncoderFactoryBinary8", 12, 8).build().unwrap();
    let mut decoder = factory("SlidingWindowDecoderFactoryBinary8", 12, 8).build().unwrap();
    assert_eq!(int(encoder.call("feedback_size", &[]).unwrap()), 2);
    encoder
        .call("set_symbols", &[Value::Bytes(random_block(96, 3))])
        .unwrap();
    for _ in 0..5 {
        let payload = encoder.call("encode", &[]).unwrap();
        decoder.call("decode", &[payload]).unwrap();
    }
    assert!(boolean(decoder.call("is_partial_complete", &[]).unwrap()));
    let feedback = decoder.call("write_feedback", &[]).unwrap();
    assert_eq!(feedback, Value::Bytes(vec![0b0001_1111, 0]));
    encoder.call("read_feedback", &[feedback]).unwrap();
    assert!(matches!(
        encoder.call("read_feedback", &[Value::Bytes(vec![0])]),
        Err(CallError::Codec(CodecError::FeedbackSizeMismatch { .. }))
    ));

    encoder.call("set_systematic_off", &[]).unwrap();
    let payload = bytes(encoder.call("encode", &[]).unwrap());
    assert_eq!(payload[0], 1);
    assert_eq!(&payload[1..6], &[0; 5]);

    let recoded = decoder.call("recode", &[]).unwrap();
    let mut sink = factory("SlidingWindowDecoderFactoryBinary8", 12, 8).build().unwrap();
    sink.call("decode", &[recoded]).unwrap();
    assert_eq!(int(sink.call("rank", &[]).unwrap()), 1);
}

#[test]
fn density_controls_are_exposed_on_sparse_encoders() {
    let mut encoder = factory("SparseFullVectorEncoderFactoryBinary16", 8, 8).build().unwrap();
    assert_eq!(encoder.call("density", &[]).unwrap(), Value::Float(0.5));
    encoder.call("set_density", &[Value::Float(0.25)]).unwrap();
    assert_eq!(encoder.call("density", &[]).unwrap(), Value::Float(0.25));
    encoder
        .call("set_average_nonzero_symbols", &[Value::Int(2)])
        .unwrap();
    assert_eq!(encoder.call("density", &[]).unwrap(), Value::Float(0.25));
    assert!(matches!(
        encoder.call("set_density", &[Value::Float(1.5)]),
        Err(CallError::Codec(CodecError::InvalidDensity(_)))
    ));
    assert!(matches!(
        encoder.call("set_density", &[Value::Str("dense".into())]),
        Err(CallError::ArgumentType { arg: "density", .. })
    ));
}

#[test]
fn trace_tag_changes_only_the_trace_method() {
    let registry = global().unwrap();
    let plain = registry.type_by_name("OnTheFlyEncoderBinary4").unwrap();
    let traced = registry.type_by_name("OnTheFlyEncoderBinary4Trace").unwrap();
    let mut plain_names: Vec<_> = plain.methods.iter().map(|m| m.name).collect();
    plain_names.push("trace");
    plain_names.sort_unstable();
    let traced_names: Vec<_> = traced.methods.iter().map(|m| m.name).collect();
    assert_eq!(plain_names, traced_names);

    let mut encoder = factory("OnTheFlyEncoderFactoryBinary4Trace", 2, 2).build().unwrap();
    encoder
        .call("set_symbol", &[Value::Int(1), Value::Bytes(vec![7, 7])])
        .unwrap();
    encoder.call("encode", &[]).unwrap();
    let trace = encoder.call("trace", &[]).unwrap();
    assert_eq!(
        trace,
        Value::Str("encoder: set symbol 1\nencoder: systematic symbol 1\n".into())
    );
    assert_eq!(encoder.call("trace", &[Value::None]).unwrap(), Value::Str(String::new()));
}

#[test]
fn instances_are_recycled_and_reinitialized() {
    let mut factory = factory("FullVectorDecoderFactoryBinary8", 4, 4);
    let mut decoder = factory.build().unwrap();
    let mut payload = vec![0u8; 1 + 4 + 4];
    payload[5..].copy_from_slice(&[1, 2, 3, 4]);
    decoder.call("decode", &[Value::Bytes(payload)]).unwrap();
    assert_eq!(int(decoder.call("rank", &[]).unwrap()), 1);
    drop(decoder);

    factory.set_symbols(2).unwrap();
    let mut recycled = factory.build().unwrap();
    assert_eq!(int(recycled.call("rank", &[]).unwrap()), 0);
    assert_eq!(int(recycled.call("symbols", &[]).unwrap()), 2);
    let other = factory.build().unwrap();
    assert_eq!(other.type_name(), recycled.type_name());
}
