//! Unicode Character Database enumerations used by the packed property record.
//!
//! All enums are one byte wide so that [`super::CodepointProperties`] stays
//! within its eight-byte budget. `Script` is re-exported from the
//! `unicode-script` crate, which already provides a one-byte enumeration of
//! every script in `Scripts.txt`.

/// General_Category property (UAX #44).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GeneralCategory {
    #[default]
    Unassigned,
    Control,
    Format,
    PrivateUse,
    Surrogate,
    LowercaseLetter,
    ModifierLetter,
    OtherLetter,
    TitlecaseLetter,
    UppercaseLetter,
    SpacingMark,
    EnclosingMark,
    NonspacingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    ClosePunctuation,
    FinalPunctuation,
    InitialPunctuation,
    OtherPunctuation,
    OpenPunctuation,
    CurrencySymbol,
    ModifierSymbol,
    MathSymbol,
    OtherSymbol,
    LineSeparator,
    ParagraphSeparator,
    SpaceSeparator,
}

/// Grapheme_Cluster_Break property (UAX #29).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GraphemeClusterBreak {
    #[default]
    Other,
    Control,
    Cr,
    Lf,
    Extend,
    Prepend,
    RegionalIndicator,
    SpacingMark,
    Zwj,
    // Hangul syllable types
    L,
    V,
    T,
    Lv,
    Lvt,
}

/// East_Asian_Width property (UAX #11).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EastAsianWidth {
    #[default]
    Neutral,
    Ambiguous,
    Halfwidth,
    Fullwidth,
    Narrow,
    Wide,
}

/// Input alphabet of the emoji presentation state machine (UTS #51).
///
/// Every codepoint maps to exactly one category; codepoints that play no
/// role in emoji presentation sequences map to `Invalid`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EmojiSegmentationCategory {
    #[default]
    Invalid,
    Emoji,
    EmojiTextPresentation,
    EmojiEmojiPresentation,
    EmojiModifierBase,
    EmojiModifier,
    EmojiVsBase,
    RegionalIndicator,
    KeycapBase,
    CombiningEnclosingKeycap,
    CombiningEnclosingCircleBackslash,
    Zwj,
    Vs15,
    Vs16,
    TagBase,
    TagSequence,
    TagTerm,
}
