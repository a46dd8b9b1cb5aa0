//! Run segmentation for text shaping.
//!
//! A run is a maximal span that a shaper can process in one go: one
//! resolved script and one presentation style. Boundaries are the union of
//! script boundaries (UAX #24) and presentation transitions (UTS #51).

use crate::ucd::Script;

use super::emoji::{EmojiSegmenter, PresentationStyle};
use super::script::ScriptSegmenter;

/// One shaping run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Start offset, in codepoints.
    pub start: usize,
    /// Exclusive end offset, in codepoints.
    pub end: usize,
    /// Resolved script of the run.
    pub script: Script,
    /// Presentation style of the run.
    pub presentation: PresentationStyle,
}

/// Splits decoded text into runs by intersecting the script and emoji
/// segmenters.
pub struct RunSegmenter<'a> {
    len: usize,
    last_split: usize,
    script_segmenter: ScriptSegmenter<'a>,
    emoji_segmenter: EmojiSegmenter<'a>,
    script_pos: usize,
    emoji_pos: usize,
    script: Script,
    presentation: PresentationStyle,
    prev_end: usize,
}

impl<'a> RunSegmenter<'a> {
    #[must_use]
    pub fn new(text: &'a [char]) -> Self {
        Self {
            len: text.len(),
            last_split: 0,
            script_segmenter: ScriptSegmenter::new(text),
            emoji_segmenter: EmojiSegmenter::new(text),
            script_pos: 0,
            emoji_pos: 0,
            script: Script::Unknown,
            presentation: PresentationStyle::Text,
            prev_end: 0,
        }
    }

    /// Returns the next run, or `None` once the text is exhausted.
    pub fn consume(&mut self) -> Option<Segment> {
        if self.last_split >= self.len {
            return None;
        }

        // Drive each sub-segmenter past the last split, remembering the
        // value in effect there.
        while self.script_pos <= self.last_split {
            match self.script_segmenter.consume() {
                Some(run) => {
                    self.script_pos = run.end;
                    self.script = run.script;
                }
                None => break,
            }
        }
        while self.emoji_pos <= self.last_split {
            match self.emoji_segmenter.consume() {
                Some(run) => {
                    self.emoji_pos = run.end;
                    self.presentation = run.style;
                }
                None => break,
            }
        }

        self.last_split = self.script_pos.min(self.emoji_pos);
        let segment = Segment {
            start: self.prev_end,
            end: self.last_split,
            script: self.script,
            presentation: self.presentation,
        };
        self.prev_end = self.last_split;
        Some(segment)
    }
}

impl Iterator for RunSegmenter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        self.consume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::emoji::PresentationStyle::{Emoji, Text};

    fn segments(s: &str) -> Vec<(String, Script, PresentationStyle)> {
        let chars: Vec<char> = s.chars().collect();
        RunSegmenter::new(&chars)
            .map(|seg| {
                (
                    chars[seg.start..seg.end].iter().collect(),
                    seg.script,
                    seg.presentation,
                )
            })
            .collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(segments(""), vec![]);
    }

    #[test]
    fn latin_emoji() {
        assert_eq!(
            segments("A😀"),
            vec![
                ("A".into(), Script::Latin, Text),
                ("😀".into(), Script::Latin, Emoji),
            ]
        );
    }

    #[test]
    fn latin_common_emoji() {
        assert_eq!(
            segments("A 😀"),
            vec![
                ("A ".into(), Script::Latin, Text),
                ("😀".into(), Script::Latin, Emoji),
            ]
        );
    }

    #[test]
    fn latin_emoji_latin() {
        assert_eq!(
            segments("AB😀CD"),
            vec![
                ("AB".into(), Script::Latin, Text),
                ("😀".into(), Script::Latin, Emoji),
                ("CD".into(), Script::Latin, Text),
            ]
        );
    }

    #[test]
    fn punctuation_stays_in_script_run() {
        assert_eq!(
            segments("Abc.;?Xyz"),
            vec![("Abc.;?Xyz".into(), Script::Latin, Text)]
        );
    }

    #[test]
    fn one_space_is_common() {
        assert_eq!(segments(" "), vec![(" ".into(), Script::Common, Text)]);
    }

    #[test]
    fn arabic_hangul() {
        assert_eq!(
            segments("نص키스의"),
            vec![
                ("نص".into(), Script::Arabic, Text),
                ("키스의".into(), Script::Hangul, Text),
            ]
        );
    }

    #[test]
    fn han_devanagari_emoji_mix() {
        assert_eq!(
            segments("百家姓ऋषियों🌱🌲🌳🌴百家姓🌱🌲"),
            vec![
                ("百家姓".into(), Script::Han, Text),
                ("ऋषियों".into(), Script::Devanagari, Text),
                ("🌱🌲🌳🌴".into(), Script::Devanagari, Emoji),
                ("百家姓".into(), Script::Han, Text),
                ("🌱🌲".into(), Script::Han, Emoji),
            ]
        );
    }

    #[test]
    fn combining_circle_is_common() {
        let text = "◌́◌̀◌̈◌̂◌̄◌̊";
        assert_eq!(
            segments(text),
            vec![(text.into(), Script::Common, Text)]
        );
    }

    #[test]
    fn zwj_sequences() {
        assert_eq!(
            segments("👩\u{200D}👩\u{200D}👧\u{200D}👦abcd👩\u{200D}👩\u{200D}efg"),
            vec![
                ("👩\u{200D}👩\u{200D}👧\u{200D}👦".into(), Script::Latin, Emoji),
                ("abcd".into(), Script::Latin, Text),
                ("👩\u{200D}👩".into(), Script::Latin, Emoji),
                ("\u{200D}efg".into(), Script::Latin, Text),
            ]
        );
    }
}
