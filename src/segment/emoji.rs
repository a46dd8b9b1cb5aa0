//! Emoji presentation segmentation (UTS #51).
//!
//! Decoded text splits into runs that render either as colored emoji or as
//! ordinary text. A longest-match token scanner recognizes the emoji
//! sequence grammar - ZWJ sequences, skin-tone modifier sequences, keycap
//! and tag sequences, flag pairs, and the VS15/VS16 presentation
//! selectors - and adjacent tokens of equal presentation merge into runs.

use std::fmt;

use crate::ucd::properties;

/// How a run wants to be rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresentationStyle {
    /// Monochrome text glyphs.
    #[default]
    Text,
    /// Colored emoji glyphs.
    Emoji,
}

impl fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "Text",
            Self::Emoji => "Emoji",
        })
    }
}

/// One presentation run: codepoints `[previous end, end)` share `style`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmojiRun {
    /// Exclusive end offset of the run, in codepoints.
    pub end: usize,
    /// Presentation of the run.
    pub style: PresentationStyle,
}

/// Splits decoded text into emoji-presentation and text-presentation runs.
#[derive(Clone, Debug)]
pub struct EmojiSegmenter<'a> {
    text: &'a [char],
    cursor_begin: usize,
    cursor_end: usize,
    next_begin: usize,
    is_emoji: bool,
    is_next_emoji: bool,
}

impl<'a> EmojiSegmenter<'a> {
    #[must_use]
    pub fn new(text: &'a [char]) -> Self {
        let mut segmenter = Self {
            text,
            cursor_begin: 0,
            cursor_end: 0,
            next_begin: 0,
            is_emoji: false,
            is_next_emoji: false,
        };
        if !text.is_empty() {
            let _ = segmenter.scan_once();
        }
        segmenter
    }

    /// Start offset of the most recently returned run.
    #[must_use]
    pub fn current_begin(&self) -> usize {
        self.cursor_begin
    }

    /// The codepoints of the most recently returned run.
    #[must_use]
    pub fn current_run(&self) -> &'a [char] {
        &self.text[self.cursor_begin..self.cursor_end]
    }

    /// Returns the next presentation run, or `None` at the end of input.
    pub fn consume(&mut self) -> Option<EmojiRun> {
        self.cursor_begin = self.cursor_end;
        self.cursor_end = self.next_begin;
        self.is_emoji = self.is_next_emoji;

        if self.next_begin >= self.text.len() {
            return None;
        }

        loop {
            let end = self.scan_once();
            if self.is_emoji != self.is_next_emoji {
                break;
            }
            self.cursor_end = end;
            if self.cursor_end >= self.text.len() {
                break;
            }
        }
        self.next_begin = self.cursor_end;

        Some(EmojiRun {
            end: self.cursor_end,
            style: if self.is_emoji {
                PresentationStyle::Emoji
            } else {
                PresentationStyle::Text
            },
        })
    }

    /// Scans one token at `cursor_end`, records its presentation in
    /// `is_next_emoji` and returns its end offset.
    fn scan_once(&mut self) -> usize {
        let (end, is_emoji) = scan_presentation(self.text, self.cursor_end);
        self.is_next_emoji = is_emoji;
        end
    }
}

impl Iterator for EmojiSegmenter<'_> {
    type Item = EmojiRun;

    fn next(&mut self) -> Option<Self::Item> {
        self.consume()
    }
}

use crate::ucd::EmojiSegmentationCategory as Cat;

fn category(text: &[char], index: usize) -> Cat {
    text.get(index)
        .map_or(Cat::Invalid, |&c| properties(c).emoji_segmentation_category)
}

fn is_any_emoji(cat: Cat) -> bool {
    matches!(
        cat,
        Cat::Emoji
            | Cat::EmojiTextPresentation
            | Cat::EmojiEmojiPresentation
            | Cat::EmojiModifierBase
            | Cat::EmojiVsBase
            | Cat::TagBase
    )
}

/// Scans one token starting at `start` and decides its presentation.
///
/// Longest match wins; an emoji sequence and a text-presentation sequence
/// of equal length resolve to text, matching the rule order of the
/// grammar.
fn scan_presentation(text: &[char], start: usize) -> (usize, bool) {
    debug_assert!(start < text.len());

    let emoji_end = match_emoji_sequence(text, start);
    let text_end = if is_any_emoji(category(text, start)) && category(text, start + 1) == Cat::Vs15
    {
        Some(start + 2)
    } else {
        None
    };

    match (emoji_end, text_end) {
        (Some(e), Some(t)) if e > t => (e, true),
        (_, Some(t)) => (t, false),
        (Some(e), None) => (e, true),
        (None, None) => (start + 1, false),
    }
}

/// Longest emoji sequence starting at `start`, if any.
fn match_emoji_sequence(text: &[char], start: usize) -> Option<usize> {
    let first = category(text, start);
    let mut best: Option<usize> = None;
    let mut note = |candidate: Option<usize>| {
        if let Some(end) = candidate {
            best = Some(best.map_or(end, |b| b.max(end)));
        }
    };

    // Tag sequence: a black flag carrying tag characters and a terminator.
    if first == Cat::TagBase {
        let mut i = start + 1;
        while category(text, i) == Cat::TagSequence {
            i += 1;
        }
        if i > start + 1 && category(text, i) == Cat::TagTerm {
            note(Some(i + 1));
        }
    }

    // Enclosing circle-backslash: a "prohibited" overlay on any emoji.
    if is_any_emoji(first) && category(text, start + 1) == Cat::CombiningEnclosingCircleBackslash {
        note(Some(start + 2));
    }

    // A ZWJ chain of elements; a single element is the degenerate chain.
    if let Some(mut end) = match_zwj_element(text, start) {
        while category(text, end) == Cat::Zwj {
            match match_zwj_element(text, end + 1) {
                Some(next_end) => end = next_end,
                None => break,
            }
        }
        note(Some(end));
    }

    best
}

/// One element of a ZWJ sequence: a flag pair, a modifier sequence, a
/// keycap sequence, a presentation sequence, or a bare emoji.
fn match_zwj_element(text: &[char], start: usize) -> Option<usize> {
    let first = category(text, start);
    let second = category(text, start + 1);

    // Flag pair.
    if first == Cat::RegionalIndicator && second == Cat::RegionalIndicator {
        return Some(start + 2);
    }

    // Skin-tone modifier sequence.
    if first == Cat::EmojiModifierBase && second == Cat::EmojiModifier {
        return Some(start + 2);
    }

    // Keycap sequence, with the VS16 optional for legacy data.
    if first == Cat::KeycapBase {
        if second == Cat::Vs16 && category(text, start + 2) == Cat::CombiningEnclosingKeycap {
            return Some(start + 3);
        }
        if second == Cat::CombiningEnclosingKeycap {
            return Some(start + 2);
        }
    }

    // Emoji presentation sequence: a base followed by VS16.
    if is_any_emoji(first) && second == Cat::Vs16 {
        return Some(start + 2);
    }

    // Bare emoji codepoint.
    if is_any_emoji(first) {
        return Some(start + 1);
    }

    None
}
