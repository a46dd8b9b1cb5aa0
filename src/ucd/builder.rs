//! Builds the compressed property tables from compiled Unicode data.
//!
//! A dense 0x110000-entry array is populated first, then compressed into
//! the three stages by sharing identical 256-codepoint blocks and
//! deduplicating identical property records. The build runs once per
//! process, behind the `LazyLock` in [`super::tables`].

use std::collections::HashMap;

use icu_properties::props as icu;
use icu_properties::{CodePointMapData, CodePointSetData};
use unicode_script::UnicodeScript;

use super::enums::{
    EastAsianWidth, EmojiSegmentationCategory, GeneralCategory, GraphemeClusterBreak,
};
use super::properties::{CodepointProperties, PropertyFlags, Script};
use super::tables::{BLOCK_SIZE, STAGE1_LEN, UcdTables};

pub(super) fn build() -> UcdTables {
    let dense = dense_properties();
    let tables = compress(&dense);
    debug_assert!(tables.verify(&dense).is_ok());
    tables
}

/// Populates the per-codepoint array from the compiled data crates and
/// derives `char_width` and the emoji segmentation category.
fn dense_properties() -> Vec<CodepointProperties> {
    let gc = CodePointMapData::<icu::GeneralCategory>::new();
    let gcb = CodePointMapData::<icu::GraphemeClusterBreak>::new();
    let eaw = CodePointMapData::<icu::EastAsianWidth>::new();
    let emoji = CodePointSetData::new::<icu::Emoji>();
    let emoji_presentation = CodePointSetData::new::<icu::EmojiPresentation>();
    let emoji_component = CodePointSetData::new::<icu::EmojiComponent>();
    let emoji_modifier = CodePointSetData::new::<icu::EmojiModifier>();
    let emoji_modifier_base = CodePointSetData::new::<icu::EmojiModifierBase>();
    let extended_pictographic = CodePointSetData::new::<icu::ExtendedPictographic>();
    let grapheme_extend = CodePointSetData::new::<icu::GraphemeExtend>();

    let mut dense = Vec::with_capacity(0x0011_0000);
    for codepoint in 0_u32..0x0011_0000 {
        let mut flags = PropertyFlags::empty();
        flags.set(PropertyFlags::EMOJI, emoji.contains32(codepoint));
        flags.set(
            PropertyFlags::EMOJI_PRESENTATION,
            emoji_presentation.contains32(codepoint),
        );
        flags.set(
            PropertyFlags::EMOJI_COMPONENT,
            emoji_component.contains32(codepoint),
        );
        flags.set(
            PropertyFlags::EMOJI_MODIFIER,
            emoji_modifier.contains32(codepoint),
        );
        flags.set(
            PropertyFlags::EMOJI_MODIFIER_BASE,
            emoji_modifier_base.contains32(codepoint),
        );
        flags.set(
            PropertyFlags::EXTENDED_PICTOGRAPHIC,
            extended_pictographic.contains32(codepoint),
        );
        flags.set(
            PropertyFlags::CORE_GRAPHEME_EXTEND,
            grapheme_extend.contains32(codepoint),
        );

        let mut props = CodepointProperties {
            char_width: 0,
            flags,
            script: char::from_u32(codepoint).map_or(Script::Unknown, |c| c.script()),
            grapheme_cluster_break: grapheme_cluster_break_from_icu(gcb.get32(codepoint)),
            east_asian_width: east_asian_width_from_icu(eaw.get32(codepoint)),
            general_category: general_category_from_icu(gc.get32(codepoint)),
            emoji_segmentation_category: EmojiSegmentationCategory::Invalid,
        };
        props.emoji_segmentation_category = emoji_segmentation_category(codepoint, &props);
        props.char_width = char_width(&props);
        dense.push(props);
    }
    dense
}

/// Compresses the dense array by sharing identical blocks and records.
fn compress(dense: &[CodepointProperties]) -> UcdTables {
    let mut stage1: Vec<u16> = Vec::with_capacity(STAGE1_LEN);
    let mut stage2: Vec<u16> = Vec::new();
    let mut stage3: Vec<CodepointProperties> = Vec::new();
    let mut record_index: HashMap<CodepointProperties, u16> = HashMap::new();
    let mut block_index: HashMap<Vec<u16>, u16> = HashMap::new();

    for block in dense.chunks_exact(BLOCK_SIZE as usize) {
        let indices: Vec<u16> = block
            .iter()
            .map(|record| {
                *record_index.entry(*record).or_insert_with(|| {
                    stage3.push(*record);
                    u16::try_from(stage3.len() - 1).expect("stage3 index overflow")
                })
            })
            .collect();

        let block_number = *block_index.entry(indices).or_insert_with_key(|key| {
            let number =
                u16::try_from(stage2.len() / BLOCK_SIZE as usize).expect("stage2 block overflow");
            stage2.extend_from_slice(key);
            number
        });
        stage1.push(block_number);
    }

    debug_assert_eq!(stage1.len(), STAGE1_LEN);
    UcdTables {
        stage1: stage1.into_boxed_slice(),
        stage2: stage2.into_boxed_slice(),
        stage3: stage3.into_boxed_slice(),
    }
}

/// Display width per UAX #11 with the UTS #51 emoji-presentation override:
/// emoji presentation behaves as East Asian Wide regardless of the assigned
/// East_Asian_Width value.
fn char_width(props: &CodepointProperties) -> u8 {
    match props.general_category {
        GeneralCategory::Control
        | GeneralCategory::EnclosingMark
        | GeneralCategory::Format
        | GeneralCategory::LineSeparator
        | GeneralCategory::NonspacingMark
        | GeneralCategory::ParagraphSeparator
        | GeneralCategory::SpacingMark
        | GeneralCategory::Surrogate => return 0,
        _ => {}
    }

    if props.emoji_presentation() {
        return 2;
    }

    match props.east_asian_width {
        EastAsianWidth::Wide | EastAsianWidth::Fullwidth => 2,
        EastAsianWidth::Ambiguous
        | EastAsianWidth::Halfwidth
        | EastAsianWidth::Narrow
        | EastAsianWidth::Neutral => 1,
    }
}

/// Classifies a codepoint for the emoji presentation state machine.
///
/// The fixed codepoints come before the flag-derived categories; a keycap
/// base is a keycap base even though the digits are not emoji themselves.
fn emoji_segmentation_category(
    codepoint: u32,
    props: &CodepointProperties,
) -> EmojiSegmentationCategory {
    match codepoint {
        0x20E3 => return EmojiSegmentationCategory::CombiningEnclosingKeycap,
        0x20E0 => return EmojiSegmentationCategory::CombiningEnclosingCircleBackslash,
        0x200D => return EmojiSegmentationCategory::Zwj,
        0xFE0E => return EmojiSegmentationCategory::Vs15,
        0xFE0F => return EmojiSegmentationCategory::Vs16,
        0x1F3F4 => return EmojiSegmentationCategory::TagBase,
        0xE0030..=0xE0039 | 0xE0061..=0xE007A => return EmojiSegmentationCategory::TagSequence,
        0xE007F => return EmojiSegmentationCategory::TagTerm,
        _ => {}
    }

    if props.emoji_modifier_base() {
        EmojiSegmentationCategory::EmojiModifierBase
    } else if props.emoji_modifier() {
        EmojiSegmentationCategory::EmojiModifier
    } else if props.grapheme_cluster_break == GraphemeClusterBreak::RegionalIndicator {
        EmojiSegmentationCategory::RegionalIndicator
    } else if matches!(codepoint, 0x30..=0x39 | 0x23 | 0x2A) {
        EmojiSegmentationCategory::KeycapBase
    } else if props.emoji_presentation() {
        EmojiSegmentationCategory::EmojiEmojiPresentation
    } else if props.emoji() {
        EmojiSegmentationCategory::EmojiTextPresentation
    } else {
        EmojiSegmentationCategory::Invalid
    }
}

// The wildcard arms guard against upstream non-exhaustive property types.
#[allow(unreachable_patterns)]
fn general_category_from_icu(gc: icu::GeneralCategory) -> GeneralCategory {
    use icu_properties::props::GeneralCategory as I;
    match gc {
        I::Unassigned => GeneralCategory::Unassigned,
        I::Control => GeneralCategory::Control,
        I::Format => GeneralCategory::Format,
        I::PrivateUse => GeneralCategory::PrivateUse,
        I::Surrogate => GeneralCategory::Surrogate,
        I::LowercaseLetter => GeneralCategory::LowercaseLetter,
        I::ModifierLetter => GeneralCategory::ModifierLetter,
        I::OtherLetter => GeneralCategory::OtherLetter,
        I::TitlecaseLetter => GeneralCategory::TitlecaseLetter,
        I::UppercaseLetter => GeneralCategory::UppercaseLetter,
        I::SpacingMark => GeneralCategory::SpacingMark,
        I::EnclosingMark => GeneralCategory::EnclosingMark,
        I::NonspacingMark => GeneralCategory::NonspacingMark,
        I::DecimalNumber => GeneralCategory::DecimalNumber,
        I::LetterNumber => GeneralCategory::LetterNumber,
        I::OtherNumber => GeneralCategory::OtherNumber,
        I::ConnectorPunctuation => GeneralCategory::ConnectorPunctuation,
        I::DashPunctuation => GeneralCategory::DashPunctuation,
        I::ClosePunctuation => GeneralCategory::ClosePunctuation,
        I::FinalPunctuation => GeneralCategory::FinalPunctuation,
        I::InitialPunctuation => GeneralCategory::InitialPunctuation,
        I::OtherPunctuation => GeneralCategory::OtherPunctuation,
        I::OpenPunctuation => GeneralCategory::OpenPunctuation,
        I::CurrencySymbol => GeneralCategory::CurrencySymbol,
        I::ModifierSymbol => GeneralCategory::ModifierSymbol,
        I::MathSymbol => GeneralCategory::MathSymbol,
        I::OtherSymbol => GeneralCategory::OtherSymbol,
        I::LineSeparator => GeneralCategory::LineSeparator,
        I::ParagraphSeparator => GeneralCategory::ParagraphSeparator,
        I::SpaceSeparator => GeneralCategory::SpaceSeparator,
        _ => GeneralCategory::Unassigned,
    }
}

fn grapheme_cluster_break_from_icu(gcb: icu::GraphemeClusterBreak) -> GraphemeClusterBreak {
    use icu_properties::props::GraphemeClusterBreak as I;
    match gcb {
        I::CR => GraphemeClusterBreak::Cr,
        I::LF => GraphemeClusterBreak::Lf,
        I::Control => GraphemeClusterBreak::Control,
        I::Extend => GraphemeClusterBreak::Extend,
        I::Prepend => GraphemeClusterBreak::Prepend,
        I::RegionalIndicator => GraphemeClusterBreak::RegionalIndicator,
        I::SpacingMark => GraphemeClusterBreak::SpacingMark,
        I::ZWJ => GraphemeClusterBreak::Zwj,
        I::L => GraphemeClusterBreak::L,
        I::V => GraphemeClusterBreak::V,
        I::T => GraphemeClusterBreak::T,
        I::LV => GraphemeClusterBreak::Lv,
        I::LVT => GraphemeClusterBreak::Lvt,
        _ => GraphemeClusterBreak::Other,
    }
}

fn east_asian_width_from_icu(eaw: icu::EastAsianWidth) -> EastAsianWidth {
    use icu_properties::props::EastAsianWidth as I;
    match eaw {
        I::Ambiguous => EastAsianWidth::Ambiguous,
        I::Fullwidth => EastAsianWidth::Fullwidth,
        I::Halfwidth => EastAsianWidth::Halfwidth,
        I::Narrow => EastAsianWidth::Narrow,
        I::Wide => EastAsianWidth::Wide,
        _ => EastAsianWidth::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ucd::tables;

    #[test]
    fn compression_round_trips() {
        let dense = dense_properties();
        let compressed = compress(&dense);
        assert!(compressed.verify(&dense).is_ok());
    }

    #[test]
    fn derived_widths() {
        let t = tables();
        // Printable ASCII is narrow.
        assert_eq!(t.get('x' as u32).char_width, 1);
        // C0 and C1 controls occupy no columns.
        assert_eq!(t.get(0x07).char_width, 0);
        assert_eq!(t.get(0x9B).char_width, 0);
        // Combining marks are zero width.
        assert_eq!(t.get(0x0301).char_width, 0);
        // CJK is wide.
        assert_eq!(t.get('漢' as u32).char_width, 2);
        // Emoji presentation forces width 2 even for Neutral EAW.
        assert_eq!(t.get(0x231A).char_width, 2); // WATCH
    }

    #[test]
    fn emoji_segmentation_categories() {
        let t = tables();
        use crate::ucd::EmojiSegmentationCategory as C;
        assert_eq!(t.get(0x200D).emoji_segmentation_category, C::Zwj);
        assert_eq!(t.get(0xFE0E).emoji_segmentation_category, C::Vs15);
        assert_eq!(t.get(0xFE0F).emoji_segmentation_category, C::Vs16);
        assert_eq!(t.get('#' as u32).emoji_segmentation_category, C::KeycapBase);
        assert_eq!(t.get('7' as u32).emoji_segmentation_category, C::KeycapBase);
        assert_eq!(t.get(0x1F3F4).emoji_segmentation_category, C::TagBase);
        assert_eq!(t.get(0xE0067).emoji_segmentation_category, C::TagSequence);
        assert_eq!(t.get(0xE007F).emoji_segmentation_category, C::TagTerm);
        assert_eq!(t.get(0x1F600).emoji_segmentation_category, C::EmojiEmojiPresentation);
        // COPYRIGHT SIGN is an emoji that defaults to text presentation.
        assert_eq!(t.get(0xA9).emoji_segmentation_category, C::EmojiTextPresentation);
        assert_eq!(t.get(0x1F3FB).emoji_segmentation_category, C::EmojiModifier);
        assert_eq!(t.get(0x1F466).emoji_segmentation_category, C::EmojiModifierBase);
        assert_eq!(t.get(0x1F1E6).emoji_segmentation_category, C::RegionalIndicator);
        assert_eq!(t.get('Q' as u32).emoji_segmentation_category, C::Invalid);
    }
}
