//! `uniscan` - Unicode text scanning core for terminal renderers
//!
//! Turns a stream of UTF-8 bytes into display-column-accounted grapheme
//! clusters, script runs, and emoji presentation runs. The heart of the
//! crate is [`LineSegmenter`], a resumable width-bounded scanner that
//! terminal emulators drive one line at a time.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for SIMD intrinsics)
#![allow(clippy::cast_possible_truncation)] // Intentional width/offset casts
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::module_name_repetitions)] // Allow scan::scan_ascii etc
#![allow(clippy::missing_errors_doc)] // Error conditions documented inline
#![allow(clippy::missing_panics_doc)] // Contract violations panic by design
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::match_same_arms)] // Segmentation rules read better spelled out
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer

pub mod grapheme;
pub mod scan;
pub mod segment;
pub mod ucd;
pub mod utf8;
pub mod width;

// Re-export core types at crate root
pub use grapheme::{GraphemeClusters, GraphemeTracker, breakable};
pub use scan::{StopCondition, scan_ascii};
pub use segment::{
    EmojiRun, EmojiSegmenter, LineSegmenter, NoopListener, PresentationStyle, RunSegmenter,
    ScriptRun, ScriptSegmenter, Segment, SegmentationListener, SegmentationResult, WordSegmenter,
};
pub use ucd::{CodepointProperties, PropertyFlags, Script, properties, properties_u32};
pub use utf8::{Decode, Utf8Decoder};
pub use width::{is_wide, is_zero_width, width};
