//! Three-stage compressed codepoint → properties lookup.
//!
//! The dense 0x110000-entry property array compresses well because whole
//! 256-codepoint blocks repeat (unassigned planes, CJK ranges) and because
//! only a couple thousand distinct property records exist. Stage 1 maps a
//! codepoint's block to a shared stage-2 block, stage 2 maps the offset
//! within the block to a stage-3 record index, stage 3 holds the
//! deduplicated records. Lookup is three dependent loads, O(1).

use std::fmt;
use std::sync::LazyLock;

use super::builder;
use super::properties::CodepointProperties;

/// Number of codepoints per block. Must be a power of two.
pub const BLOCK_SIZE: u32 = 256;

/// Number of stage-1 entries (0x110000 / BLOCK_SIZE).
pub const STAGE1_LEN: usize = (0x0011_0000 / BLOCK_SIZE) as usize;

/// Verification failure raised when a compressed table disagrees with the
/// dense array it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A codepoint resolves to a different record than the dense source.
    Mismatch { codepoint: u32 },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch { codepoint } => {
                write!(f, "table mismatch for codepoint U+{codepoint:04X}")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// The compressed multistage table.
pub struct UcdTables {
    pub(crate) stage1: Box<[u16]>,
    pub(crate) stage2: Box<[u16]>,
    pub(crate) stage3: Box<[CodepointProperties]>,
}

impl UcdTables {
    /// Looks up the properties of `codepoint`.
    ///
    /// Codepoints at or beyond 0x110000 resolve to the record of codepoint
    /// zero, mirroring the clamp the scanners rely on for garbage input.
    #[inline]
    #[must_use]
    pub fn get(&self, codepoint: u32) -> &CodepointProperties {
        let clamped = if codepoint < 0x0011_0000 { codepoint } else { 0 };
        self.lookup(clamped)
    }

    #[inline]
    fn lookup(&self, codepoint: u32) -> &CodepointProperties {
        let block = self.stage1[(codepoint / BLOCK_SIZE) as usize] as usize;
        let offset = (codepoint % BLOCK_SIZE) as usize;
        let index = self.stage2[block * BLOCK_SIZE as usize + offset] as usize;
        &self.stage3[index]
    }

    /// Number of distinct stage-2 blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.stage2.len() / BLOCK_SIZE as usize
    }

    /// Number of distinct property records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.stage3.len()
    }

    /// Checks that every codepoint of `dense` round-trips through the
    /// compressed stages.
    pub fn verify(&self, dense: &[CodepointProperties]) -> Result<(), TableError> {
        for (codepoint, record) in dense.iter().enumerate() {
            let codepoint = codepoint as u32;
            if self.lookup(codepoint) != record {
                return Err(TableError::Mismatch { codepoint });
            }
        }
        Ok(())
    }
}

static TABLES: LazyLock<UcdTables> = LazyLock::new(builder::build);

/// The process-wide property tables.
///
/// Built once on first access; afterwards the tables are immutable and can
/// be read from any number of threads without synchronization.
#[must_use]
pub fn tables() -> &'static UcdTables {
    &TABLES
}

/// Looks up the properties of a codepoint given as a raw scalar.
///
/// Accepts any `u32` - surrogates decode to their own records, values at or
/// beyond 0x110000 clamp to the record of codepoint zero.
#[inline]
#[must_use]
pub fn properties_u32(codepoint: u32) -> &'static CodepointProperties {
    tables().get(codepoint)
}

/// Looks up the properties of a character.
#[inline]
#[must_use]
pub fn properties(c: char) -> &'static CodepointProperties {
    properties_u32(c as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ucd::enums::{GeneralCategory, GraphemeClusterBreak};
    use crate::ucd::properties::Script;

    #[test]
    fn lookup_known_codepoints() {
        assert_eq!(properties('A').script, Script::Latin);
        assert_eq!(properties('A').char_width, 1);
        assert_eq!(properties('あ').script, Script::Hiragana);
        assert_eq!(properties('あ').char_width, 2);
        assert_eq!(properties('\r').grapheme_cluster_break, GraphemeClusterBreak::Cr);
        assert_eq!(properties('\n').grapheme_cluster_break, GraphemeClusterBreak::Lf);
        assert_eq!(
            properties('\u{200D}').grapheme_cluster_break,
            GraphemeClusterBreak::Zwj
        );
    }

    #[test]
    fn out_of_range_clamps_to_codepoint_zero() {
        assert_eq!(properties_u32(0x0011_0000), properties_u32(0));
        assert_eq!(properties_u32(u32::MAX), properties_u32(0));
    }

    #[test]
    fn surrogates_have_their_own_record() {
        let props = properties_u32(0xD800);
        assert_eq!(props.general_category, GeneralCategory::Surrogate);
        assert_eq!(props.char_width, 0);
    }

    #[test]
    fn tables_are_compressed() {
        let t = tables();
        assert!(t.block_count() < STAGE1_LEN);
        assert!(t.record_count() < u16::MAX as usize);
        // Unassigned planes must share a block.
        assert_eq!(t.stage1[(0x4_0000 / BLOCK_SIZE) as usize], t.stage1[(0x5_0000 / BLOCK_SIZE) as usize]);
    }
}
