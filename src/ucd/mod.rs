//! Precompiled Unicode Character Database lookup.
//!
//! A packed seven-byte record per codepoint, reachable in O(1) through a
//! three-stage compressed table shared by all scanners in this crate.

mod builder;
mod enums;
mod properties;
mod tables;

pub use enums::{
    EastAsianWidth, EmojiSegmentationCategory, GeneralCategory, GraphemeClusterBreak,
};
pub use properties::{CodepointProperties, PropertyFlags, Script};
pub use tables::{BLOCK_SIZE, STAGE1_LEN, TableError, UcdTables, properties, properties_u32, tables};
