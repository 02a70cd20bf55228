// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weft_codec::{
    CarouselDecoder, CarouselEncoder, Coder, CodecError, Decoder, DisableTrace, EnableTrace,
    Encoder, FeedbackReader, FeedbackWriter, FullVectorDecoder, FullVectorEncoder,
    OnTheFlyDecoder, OnTheFlyEncoder, PartialDecodingTracker, Recoder, SlidingWindowDecoder,
    SlidingWindowEncoder, SparseDensity, SparseFullVectorEncoder, Systematic, Traced,
};
use weft_field::{Binary, Binary16, Binary4, Binary8, Field};

fn source_block(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

/// Pump payloads from `encoder` into `decoder` until complete; returns the
/// number of payloads sent.
fn pump<E: Encoder, D: Decoder>(encoder: &mut E, decoder: &mut D, limit: usize) -> usize {
    let mut payload = vec![0u8; encoder.payload_size() as usize];
    for sent in 1..=limit {
        let len = encoder.encode(&mut payload).unwrap();
        assert_eq!(len, payload.len());
        decoder.decode(&payload[..len]).unwrap();
        if decoder.is_complete() {
            return sent;
        }
    }
    panic!("decoder incomplete after {limit} payloads");
}

fn full_vector_round_trip<F: Field>(symbols: u32, symbol_size: u32, seed: u64) {
    let mut encoder = FullVectorEncoder::<F, DisableTrace>::construct(symbols, symbol_size);
    let mut decoder = FullVectorDecoder::<F, DisableTrace>::construct(symbols, symbol_size);
    encoder.seed(seed);
    encoder.set_systematic_off();
    let data = source_block(encoder.block_size() as usize, seed);
    encoder.set_symbols(&data).unwrap();
    pump(&mut encoder, &mut decoder, 64 * symbols as usize);
    let mut out = vec![0u8; decoder.block_size() as usize];
    decoder.copy_symbols(&mut out).unwrap();
    assert_eq!(out, data);
    assert_eq!(decoder.symbols_uncoded(), symbols);
}

#[test]
fn full_vector_decodes_in_every_field() {
    full_vector_round_trip::<Binary>(8, 16, 1);
    full_vector_round_trip::<Binary4>(8, 16, 2);
    full_vector_round_trip::<Binary8>(16, 40, 3);
    full_vector_round_trip::<Binary16>(6, 10, 4);
}

#[test]
fn systematic_round_trip_needs_exactly_symbols_payloads() {
    let mut encoder = FullVectorEncoder::<Binary8, DisableTrace>::construct(5, 7);
    let mut decoder = FullVectorDecoder::<Binary8, DisableTrace>::construct(5, 7);
    assert!(encoder.is_systematic_on());
    let data = source_block(35, 9);
    encoder.set_symbols(&data).unwrap();
    assert_eq!(pump(&mut encoder, &mut decoder, 5), 5);
}

#[test]
fn sparse_encoder_respects_density_and_still_decodes() {
    let mut encoder = SparseFullVectorEncoder::<Binary8, DisableTrace>::construct(10, 4);
    let mut decoder = FullVectorDecoder::<Binary8, DisableTrace>::construct(10, 4);
    encoder.seed(11);
    encoder.set_systematic_off();
    encoder.set_average_nonzero_symbols(2).unwrap();
    assert!((encoder.density() - 0.2).abs() < f64::EPSILON);
    let data = source_block(40, 11);
    encoder.set_symbols(&data).unwrap();
    pump(&mut encoder, &mut decoder, 400);
    let mut out = vec![0u8; 40];
    decoder.copy_symbols(&mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn on_the_fly_tracks_partial_completion() {
    let mut encoder = OnTheFlyEncoder::<Binary8, DisableTrace>::construct(4, 2);
    let mut decoder = OnTheFlyDecoder::<Binary8, DisableTrace>::construct(4, 2);
    let mut payload = vec![0u8; encoder.payload_size() as usize];
    assert!(!decoder.is_partial_complete());

    encoder.set_symbol(0, &[1, 2]).unwrap();
    encoder.encode(&mut payload).unwrap();
    decoder.decode(&payload).unwrap();
    assert!(decoder.is_partial_complete());
    assert_eq!(decoder.rank(), 1);

    encoder.set_symbol(1, &[3, 4]).unwrap();
    encoder.encode(&mut payload).unwrap();
    decoder.decode(&payload).unwrap();
    assert_eq!(decoder.rank(), 2);
    assert!(decoder.is_partial_complete());
    assert!(!decoder.is_complete());

    encoder.set_systematic_off();
    encoder.set_symbol(2, &[5, 6]).unwrap();
    encoder.set_symbol(3, &[7, 8]).unwrap();
    let mut coded = 0;
    while !decoder.is_complete() {
        encoder.encode(&mut payload).unwrap();
        decoder.decode(&payload).unwrap();
        coded += 1;
        assert!(coded < 64);
    }
    assert!(decoder.is_partial_complete());
}

#[test]
fn sliding_window_feedback_shrinks_the_window() {
    let mut encoder = SlidingWindowEncoder::<Binary8, DisableTrace>::construct(10, 3);
    let mut decoder = SlidingWindowDecoder::<Binary8, DisableTrace>::construct(10, 3);
    assert_eq!(encoder.feedback_size(), 2);
    assert_eq!(decoder.feedback_size(), 2);
    let data = source_block(30, 5);
    encoder.set_symbols(&data).unwrap();

    let mut payload = vec![0u8; encoder.payload_size() as usize];
    for _ in 0..3 {
        encoder.encode(&mut payload).unwrap();
        decoder.decode(&payload).unwrap();
    }
    let mut feedback = vec![0u8; 2];
    assert_eq!(decoder.write_feedback(&mut feedback).unwrap(), 2);
    assert_eq!(feedback, [0b0000_0111, 0]);
    encoder.read_feedback(&feedback).unwrap();

    encoder.set_systematic_off();
    for _ in 0..32 {
        encoder.encode(&mut payload).unwrap();
        assert_eq!(&payload[1..4], &[0, 0, 0], "acknowledged symbols left the window");
    }
    assert!(matches!(
        encoder.read_feedback(&feedback[..1]),
        Err(CodecError::FeedbackSizeMismatch { expected: 2, actual: 1 })
    ));
}

#[test]
fn recoded_payloads_complete_a_downstream_decoder() {
    let mut encoder = SlidingWindowEncoder::<Binary8, DisableTrace>::construct(6, 8);
    let mut relay = SlidingWindowDecoder::<Binary8, DisableTrace>::construct(6, 8);
    let mut sink = SlidingWindowDecoder::<Binary8, DisableTrace>::construct(6, 8);
    encoder.seed(3);
    relay.seed(4);
    let data = source_block(48, 21);
    encoder.set_symbols(&data).unwrap();
    pump(&mut encoder, &mut relay, 64);

    let mut payload = vec![0u8; relay.payload_size() as usize];
    let mut sent = 0;
    while !sink.is_complete() {
        let len = relay.recode(&mut payload).unwrap();
        sink.decode(&payload[..len]).unwrap();
        sent += 1;
        assert!(sent < 200, "recoder failed to make progress");
    }
    let mut out = vec![0u8; 48];
    sink.copy_symbols(&mut out).unwrap();
    assert_eq!(out, data);
}

#[test]
fn carousel_cycles_and_reports_rank_as_uncoded() {
    let mut encoder = CarouselEncoder::<DisableTrace>::construct(3, 2);
    let mut decoder = CarouselDecoder::<DisableTrace>::construct(3, 2);
    assert_eq!(encoder.payload_size(), 6);
    encoder.set_symbols(&[1, 1, 2, 2, 3, 3]).unwrap();
    let mut payload = vec![0u8; 6];
    for expected in [0u8, 1, 2, 0] {
        encoder.encode(&mut payload).unwrap();
        assert_eq!(payload[3], expected);
        decoder.decode(&payload).unwrap();
        assert_eq!(decoder.symbols_uncoded(), decoder.rank());
    }
    assert!(decoder.is_complete());
    let mut out = vec![0u8; 6];
    decoder.copy_symbols(&mut out).unwrap();
    assert_eq!(out, [1, 1, 2, 2, 3, 3]);
}

#[test]
fn initialize_enforces_size_contracts() {
    let mut encoder = FullVectorEncoder::<Binary16, DisableTrace>::construct(8, 32);
    assert!(matches!(
        encoder.initialize(9, 32),
        Err(CodecError::SymbolsOutOfRange { .. })
    ));
    assert!(matches!(
        encoder.initialize(8, 33),
        Err(CodecError::SymbolSizeOutOfRange { .. })
    ));
    assert!(matches!(
        encoder.initialize(8, 31),
        Err(CodecError::SymbolSizeGranularity { granularity: 2, .. })
    ));
    encoder.initialize(4, 10).unwrap();
    assert_eq!(encoder.block_size(), 40);
    assert!(
        encoder.payload_size()
            <= FullVectorEncoder::<Binary16, DisableTrace>::max_payload_size(8, 32)
    );
    assert!(matches!(
        encoder.set_symbols(&[0u8; 39]),
        Err(CodecError::BlockSizeMismatch { expected: 40, actual: 39 })
    ));
    assert!(matches!(
        encoder.set_symbol(4, &[0u8; 10]),
        Err(CodecError::SymbolIndexOutOfRange { index: 4, symbols: 4 })
    ));
}

#[test]
fn trace_is_the_only_difference_between_tagged_codecs() {
    let mut plain = FullVectorEncoder::<Binary8, DisableTrace>::construct(2, 2);
    let mut traced = FullVectorEncoder::<Binary8, EnableTrace>::construct(2, 2);
    let mut a = vec![0u8; plain.payload_size() as usize];
    let mut b = vec![0u8; traced.payload_size() as usize];
    let data = [1u8, 2, 3, 4];
    plain.set_symbols(&data).unwrap();
    traced.set_symbols(&data).unwrap();
    plain.encode(&mut a).unwrap();
    traced.encode(&mut b).unwrap();
    assert_eq!(a, b);
    assert_eq!(plain.take_trace(None), "");
    assert_eq!(
        traced.take_trace(Some("encoder")),
        "encoder: set all symbols\nencoder: systematic symbol 0\n"
    );
}
