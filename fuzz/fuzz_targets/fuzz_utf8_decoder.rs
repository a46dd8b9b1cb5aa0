//! Fuzz target for the incremental UTF-8 decoder.
//!
//! Checks that arbitrary byte streams never panic the decoder and that
//! decoding well-formed UTF-8 reproduces the char sequence of the source.

#![no_main]

use libfuzzer_sys::fuzz_target;
use uniscan::{Decode, Utf8Decoder};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes: must not panic, lengths must stay consistent.
    let mut decoder = Utf8Decoder::new();
    for &byte in data {
        match decoder.feed(byte) {
            Decode::Success(cp) => {
                assert!(cp <= 0x001F_FFFF);
                assert!(!decoder.pending());
            }
            Decode::Incomplete => assert!(decoder.pending()),
            Decode::Invalid => {}
        }
        assert!(decoder.current_len() <= 4);
        assert!(decoder.expected_len() <= 4);
    }

    // Well-formed UTF-8 must decode losslessly.
    if let Ok(text) = std::str::from_utf8(data) {
        let mut decoder = Utf8Decoder::new();
        let mut decoded = Vec::new();
        for &byte in data {
            match decoder.feed(byte) {
                Decode::Success(cp) => decoded.push(cp),
                Decode::Incomplete => {}
                Decode::Invalid => unreachable!("invalid result on valid UTF-8"),
            }
        }
        assert!(!decoder.pending());
        let expected: Vec<u32> = text.chars().map(|c| c as u32).collect();
        assert_eq!(decoded, expected);
    }
});
