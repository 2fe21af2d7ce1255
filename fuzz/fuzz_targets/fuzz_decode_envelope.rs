// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use objwire::{DecodeLimits, Decoder, Registry};

fuzz_target!(|data: &[u8]| {
    let _ = objwire_records::init();
    let limits = DecodeLimits::default().max_depth(16).max_array_len(1 << 16);

    // Decode envelopes back to back until the input is exhausted or rejected
    let mut reader = data;
    while !reader.is_empty() {
        let mut d = Decoder::with_registry(&mut reader, Registry::global()).limits(limits);
        if d.object().is_err() {
            break;
        }
    }
});
