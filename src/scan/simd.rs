//! Block classifiers behind [`super::scan_ascii`].
//!
//! Each implementation answers the same question: the index of the first
//! byte outside `0x20..0x80`, or `None`. The scalar loop is the reference;
//! the vector paths must agree with it bit for bit. On x86-64 the SSE2
//! path is always available and AVX2 is selected once per process from
//! CPU feature detection.

// SIMD intrinsics are unsafe to call; every use sits behind a cfg'd,
// feature-checked wrapper in this module.
#![allow(unsafe_code)]

/// Index of the first byte that is a control (`< 0x20`) or non-ASCII
/// (`>= 0x80`) byte.
#[inline]
pub(crate) fn find_non_ascii(bytes: &[u8]) -> Option<usize> {
    dispatch(bytes)
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn dispatch(bytes: &[u8]) -> Option<usize> {
    if avx2_available() {
        // SAFETY: gated on runtime AVX2 detection.
        return unsafe { x86::find_non_ascii_avx2(bytes) };
    }
    x86::find_non_ascii_sse2(bytes)
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
fn dispatch(bytes: &[u8]) -> Option<usize> {
    find_non_ascii_scalar(bytes)
}

/// The semantic reference implementation.
pub(crate) fn find_non_ascii_scalar(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| !(0x20..0x80).contains(&b))
}

#[cfg(target_arch = "x86_64")]
fn avx2_available() -> bool {
    use std::sync::atomic::{AtomicU8, Ordering};

    const UNKNOWN: u8 = 0;
    const NO: u8 = 1;
    const YES: u8 = 2;
    static AVX2: AtomicU8 = AtomicU8::new(UNKNOWN);

    match AVX2.load(Ordering::Relaxed) {
        YES => true,
        NO => false,
        _ => {
            let detected = std::arch::is_x86_feature_detected!("avx2");
            AVX2.store(if detected { YES } else { NO }, Ordering::Relaxed);
            detected
        }
    }
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use super::find_non_ascii_scalar;
    use core::arch::x86_64::{
        __m128i, __m256i, _mm_and_si128, _mm_cmplt_epi8, _mm_loadu_si128, _mm_movemask_epi8,
        _mm_or_si128, _mm_set1_epi8, _mm256_and_si256, _mm256_cmpgt_epi8, _mm256_loadu_si256,
        _mm256_movemask_epi8, _mm256_or_si256, _mm256_set1_epi8,
    };

    /// 16 bytes per step. SSE2 is part of the x86-64 baseline.
    pub(super) fn find_non_ascii_sse2(bytes: &[u8]) -> Option<usize> {
        const LANES: usize = size_of::<__m128i>();
        let mut offset = 0;

        while offset + LANES <= bytes.len() {
            // SAFETY: `offset + LANES <= len`; unaligned load.
            let mask = unsafe {
                let block = _mm_loadu_si128(bytes.as_ptr().add(offset).cast::<__m128i>());
                // Signed compare: control bytes are below 0x20. Bytes with
                // the high bit set are negative as i8, so they need their
                // own mask to be explicit about the 0x80..0xFF range.
                let control = _mm_cmplt_epi8(block, _mm_set1_epi8(0x20));
                let complex = _mm_and_si128(block, _mm_set1_epi8(i8::MIN));
                _mm_movemask_epi8(_mm_or_si128(control, complex)) as u32
            };
            if mask != 0 {
                return Some(offset + mask.trailing_zeros() as usize);
            }
            offset += LANES;
        }

        find_non_ascii_scalar(&bytes[offset..]).map(|i| offset + i)
    }

    /// 32 bytes per step, runtime-selected.
    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn find_non_ascii_avx2(bytes: &[u8]) -> Option<usize> {
        const LANES: usize = size_of::<__m256i>();
        let mut offset = 0;

        while offset + LANES <= bytes.len() {
            // SAFETY: `offset + LANES <= len`; unaligned load.
            let mask = unsafe {
                let block = _mm256_loadu_si256(bytes.as_ptr().add(offset).cast::<__m256i>());
                let control = _mm256_cmpgt_epi8(_mm256_set1_epi8(0x20), block);
                let complex = _mm256_and_si256(block, _mm256_set1_epi8(i8::MIN));
                _mm256_movemask_epi8(_mm256_or_si256(control, complex)) as u32
            };
            if mask != 0 {
                return Some(offset + mask.trailing_zeros() as usize);
            }
            offset += LANES;
        }

        find_non_ascii_scalar(&bytes[offset..]).map(|i| offset + i)
    }
}
