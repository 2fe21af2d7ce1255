// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoding of truncated, corrupted and hostile input.

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters

mod common;

use common::*;
use objwire::{CodecError, DecodeLimits, Decoder, Registry, ID_SIZE};

fn decode(registry: &Registry, bytes: &[u8], limits: DecodeLimits) -> Result<(), CodecError> {
    let mut reader = bytes;
    Decoder::with_registry(&mut reader, registry)
        .limits(limits)
        .required_object()
        .map(|_| ())
}

#[test]
fn truncation_at_every_byte_is_reported() {
    let registry = registry();
    let streams = [
        envelope(&registry, &sample()),
        envelope(&registry, &group()),
    ];

    for bytes in &streams {
        decode(&registry, bytes, DecodeLimits::default()).unwrap();
        for cut in 0..bytes.len() {
            match decode(&registry, &bytes[..cut], DecodeLimits::default()) {
                Err(CodecError::Truncated { offset }) => {
                    assert!(
                        offset <= cut as u64,
                        "cut {}: truncation reported past the end ({})",
                        cut,
                        offset
                    );
                }
                other => panic!("cut {} of {}: expected truncation, got {:?}", cut, bytes.len(), other),
            }
        }
    }
}

#[test]
fn truncation_offset_points_at_the_interrupted_value() {
    let registry = registry();
    let bytes = envelope(&registry, &sample());
    // Cut inside the i16 that follows bool, i8 and u8.
    let cut = ID_SIZE + 3 + 1;
    match decode(&registry, &bytes[..cut], DecodeLimits::default()) {
        Err(CodecError::Truncated { offset }) => assert_eq!(offset, (ID_SIZE + 3) as u64),
        other => panic!("expected truncation, got {:?}", other),
    }
}

#[test]
fn random_corruption_never_panics() {
    let registry = registry();
    let original = envelope(&registry, &group());
    let limits = DecodeLimits::default()
        .max_string_len(1024)
        .max_array_len(1024)
        .max_depth(16);
    let mut rng = fastrand::Rng::with_seed(0x0b1_7e5);

    for _ in 0..2000 {
        let mut bytes = original.clone();
        for _ in 0..rng.usize(1..4) {
            let at = rng.usize(..bytes.len());
            bytes[at] = rng.u8(..);
        }
        if rng.bool() {
            let len = rng.usize(..=bytes.len());
            bytes.truncate(len);
        }

        if let Err(err) = decode(&registry, &bytes, limits) {
            assert!(err.is_malformed_input(), "unexpected error kind: {:?}", err);
        }
    }
}

#[test]
fn huge_length_prefixes_are_rejected_before_allocation() {
    let registry = registry();
    let mut bytes = envelope(&registry, &Label::default());
    // Text length prefix sits right after the fingerprint.
    bytes[ID_SIZE..ID_SIZE + 4].copy_from_slice(&u32::MAX.to_le_bytes());

    match decode(&registry, &bytes, DecodeLimits::default()) {
        Err(CodecError::CorruptLength {
            what, len, offset, ..
        }) => {
            assert_eq!(what, "string");
            assert_eq!(len, u64::from(u32::MAX));
            assert_eq!(offset, ID_SIZE as u64);
        }
        other => panic!("expected corrupt length, got {:?}", other),
    }

    // Within the limit but beyond the stream: truncation, not allocation.
    bytes[ID_SIZE..ID_SIZE + 4].copy_from_slice(&1_000_000u32.to_le_bytes());
    assert!(matches!(
        decode(&registry, &bytes, DecodeLimits::default()),
        Err(CodecError::Truncated { .. })
    ));
}

#[test]
fn slice_count_over_limit_is_rejected() {
    let registry = registry();
    let label = Label {
        text: String::new(),
        sizes: vec![1; 5],
    };
    let bytes = envelope(&registry, &label);
    let limits = DecodeLimits::default().max_array_len(4);
    assert!(matches!(
        decode(&registry, &bytes, limits),
        Err(CodecError::CorruptLength {
            what: "slice",
            len: 5,
            max: 4,
            ..
        })
    ));
    decode(&registry, &bytes, limits.max_array_len(5)).unwrap();
}

#[test]
fn invalid_bool_is_corrupt() {
    let registry = registry();
    let mut bytes = envelope(&registry, &Circle::default());
    let last = bytes.len() - 1;
    bytes[last] = 7;
    match decode(&registry, &bytes, DecodeLimits::default()) {
        Err(CodecError::Corrupt { offset, .. }) => assert_eq!(offset, last as u64),
        other => panic!("expected corrupt bool, got {:?}", other),
    }
}

#[test]
fn nesting_depth_is_bounded() {
    let registry = registry();
    let mut nested = Group::default();
    for _ in 0..10 {
        nested = Group {
            note: boxed(nested),
            ..Group::default()
        };
    }
    let bytes = envelope(&registry, &nested);

    decode(&registry, &bytes, DecodeLimits::default()).unwrap();
    assert!(matches!(
        decode(&registry, &bytes, DecodeLimits::default().max_depth(4)),
        Err(CodecError::Corrupt { .. })
    ));

    let mut reader = bytes.as_slice();
    assert!(matches!(
        Decoder::with_registry(&mut reader, &registry)
            .limits(DecodeLimits::default().max_depth(4))
            .dynamic_object(),
        Err(CodecError::Corrupt { .. })
    ));
}

#[test]
fn null_top_level_object_is_an_error() {
    let registry = registry();
    assert!(matches!(
        decode(&registry, &[0u8; ID_SIZE], DecodeLimits::default()),
        Err(CodecError::NullObject { offset: 0 })
    ));
}
