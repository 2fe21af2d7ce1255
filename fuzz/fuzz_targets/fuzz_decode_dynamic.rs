// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use objwire::{BinaryObject, DecodeLimits, Decoder, Registry};

fuzz_target!(|data: &[u8]| {
    let _ = objwire_records::init();
    let limits = DecodeLimits::default().max_depth(16).max_array_len(1 << 16);

    let mut reader = data;
    let mut d = Decoder::with_registry(&mut reader, Registry::global()).limits(limits);
    if let Ok(Some(obj)) = d.dynamic_object() {
        // Anything that decodes must encode again
        let bytes = objwire::to_bytes(Registry::global(), &obj as &dyn BinaryObject);
        assert!(bytes.is_ok());
        let _ = obj.to_string();
    }
});
