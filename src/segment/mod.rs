//! Segmenters over scanned input.
//!
//! [`LineSegmenter`] works directly on UTF-8 bytes with a column budget;
//! the script, emoji, run and word segmenters operate on already-decoded
//! codepoint slices.

mod emoji;
mod line;
mod run;
mod script;
mod word;

pub use emoji::{EmojiRun, EmojiSegmenter, PresentationStyle};
pub use line::{LineSegmenter, NoopListener, SegmentationListener, SegmentationResult};
pub use run::{RunSegmenter, Segment};
pub use script::{ScriptRun, ScriptSegmenter, ScriptSet};
pub use word::WordSegmenter;
