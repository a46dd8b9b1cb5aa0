//! The packed per-codepoint property record.

use bitflags::bitflags;
pub use unicode_script::Script;

use super::enums::{
    EastAsianWidth, EmojiSegmentationCategory, GeneralCategory, GraphemeClusterBreak,
};

bitflags! {
    /// Boolean emoji and core properties folded into one byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        const EMOJI = 0x01;
        const EMOJI_PRESENTATION = 0x02;
        const EMOJI_COMPONENT = 0x04;
        const EMOJI_MODIFIER = 0x08;
        const EMOJI_MODIFIER_BASE = 0x10;
        const EXTENDED_PICTOGRAPHIC = 0x20;
        const CORE_GRAPHEME_EXTEND = 0x40;
    }
}

/// Everything the scanners need to know about one codepoint, packed into
/// seven bytes so the deduplicated stage-3 table stays small.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodepointProperties {
    /// Display width in terminal columns (0, 1 or 2).
    pub char_width: u8,
    /// Boolean emoji/core properties.
    pub flags: PropertyFlags,
    /// Script (UAX #24).
    pub script: Script,
    /// Grapheme_Cluster_Break (UAX #29).
    pub grapheme_cluster_break: GraphemeClusterBreak,
    /// East_Asian_Width (UAX #11).
    pub east_asian_width: EastAsianWidth,
    /// General_Category (UAX #44).
    pub general_category: GeneralCategory,
    /// Input category of the emoji presentation state machine (UTS #51).
    pub emoji_segmentation_category: EmojiSegmentationCategory,
}

impl Default for CodepointProperties {
    fn default() -> Self {
        Self {
            char_width: 0,
            flags: PropertyFlags::empty(),
            script: Script::Unknown,
            grapheme_cluster_break: GraphemeClusterBreak::Other,
            east_asian_width: EastAsianWidth::Neutral,
            general_category: GeneralCategory::Unassigned,
            emoji_segmentation_category: EmojiSegmentationCategory::Invalid,
        }
    }
}

impl CodepointProperties {
    #[must_use]
    pub fn emoji(&self) -> bool {
        self.flags.contains(PropertyFlags::EMOJI)
    }

    #[must_use]
    pub fn emoji_presentation(&self) -> bool {
        self.flags.contains(PropertyFlags::EMOJI_PRESENTATION)
    }

    #[must_use]
    pub fn emoji_component(&self) -> bool {
        self.flags.contains(PropertyFlags::EMOJI_COMPONENT)
    }

    #[must_use]
    pub fn emoji_modifier(&self) -> bool {
        self.flags.contains(PropertyFlags::EMOJI_MODIFIER)
    }

    #[must_use]
    pub fn emoji_modifier_base(&self) -> bool {
        self.flags.contains(PropertyFlags::EMOJI_MODIFIER_BASE)
    }

    #[must_use]
    pub fn extended_pictographic(&self) -> bool {
        self.flags.contains(PropertyFlags::EXTENDED_PICTOGRAPHIC)
    }

    #[must_use]
    pub fn core_grapheme_extend(&self) -> bool {
        self.flags.contains(PropertyFlags::CORE_GRAPHEME_EXTEND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fits_eight_bytes() {
        assert!(size_of::<CodepointProperties>() <= 8);
    }

    #[test]
    fn flag_accessors() {
        let mut props = CodepointProperties::default();
        assert!(!props.emoji());
        props.flags = PropertyFlags::EMOJI | PropertyFlags::EXTENDED_PICTOGRAPHIC;
        assert!(props.emoji());
        assert!(props.extended_pictographic());
        assert!(!props.emoji_modifier());
    }
}
