//! Fast-path scanning over printable ASCII.
//!
//! The line segmenter spends most of its time in plain Latin text, so the
//! byte classifier here is the hot loop of the whole crate. Blocks of
//! bytes are tested in parallel with SSE2/AVX2 where available; the scalar
//! loop is the semantic reference and the fallback on other targets.

mod simd;

use std::fmt;

pub(crate) use simd::find_non_ascii;

/// Why a scanning call returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopCondition {
    /// A control character or a non-ASCII byte was reached.
    UnexpectedInput,
    /// The end of the input buffer was reached.
    EndOfInput,
    /// The column budget was exhausted.
    EndOfWidth,
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnexpectedInput => "UnexpectedInput",
            Self::EndOfInput => "EndOfInput",
            Self::EndOfWidth => "EndOfWidth",
        };
        f.write_str(name)
    }
}

/// Advances over printable ASCII (`0x20..0x80`), consuming at most `max`
/// bytes.
///
/// Returns the stop reason and the number of bytes consumed:
/// [`StopCondition::UnexpectedInput`] at the first control or non-ASCII
/// byte, [`StopCondition::EndOfWidth`] once `max` bytes were consumed with
/// input remaining, [`StopCondition::EndOfInput`] at the end of the buffer.
#[must_use]
pub fn scan_ascii(bytes: &[u8], max: usize) -> (StopCondition, usize) {
    let limit = max.min(bytes.len());
    match find_non_ascii(&bytes[..limit]) {
        Some(index) => (StopCondition::UnexpectedInput, index),
        None if limit < bytes.len() => (StopCondition::EndOfWidth, limit),
        None => (StopCondition::EndOfInput, limit),
    }
}
