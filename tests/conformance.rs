//! Differential conformance against the unicode-rs reference crates.
//!
//! The corpus avoids the few places where policies legitimately differ
//! (Indic conjunct breaks from newer UAX #29 revisions, legacy width
//! special cases like soft hyphen and jamo vowels).

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;
use uniscan::GraphemeClusters;

const GRAPHEME_CORPUS: &[&str] = &[
    "",
    "hello world",
    "caf\u{00E9}",
    "e\u{0301}\u{0302}xyz",
    "\u{00E9}\u{0301}",
    "漢字かな交じり文",
    "한국어 텍스트",
    "\u{1100}\u{1161}\u{11A8}",
    "\u{AC00}\u{11A8}\u{1100}\u{1161}",
    "😀😀😀",
    "👨\u{200D}👩\u{200D}👧\u{200D}👦",
    "👩\u{200D}❤\u{FE0F}\u{200D}💋\u{200D}👨",
    "🤦🏼\u{200D}♂\u{FE0F}",
    "🇩🇪🇫🇷",
    "🇩🇪🇫",
    "🏴\u{E0067}\u{E0062}\u{E0073}\u{E0063}\u{E0074}\u{E007F}",
    "1\u{FE0F}\u{20E3}2\u{FE0F}\u{20E3}",
    "a\r\nb\rc\nd",
    "©\u{FE0F}™\u{FE0E}",
    "🌱🌲🌳🌴 garden",
];

#[test]
fn grapheme_clusters_match_unicode_segmentation() {
    for text in GRAPHEME_CORPUS {
        let chars: Vec<char> = text.chars().collect();
        let ours: Vec<String> = GraphemeClusters::new(&chars)
            .map(|cluster| cluster.iter().collect())
            .collect();
        let reference: Vec<String> = text.graphemes(true).map(str::to_owned).collect();
        assert_eq!(ours, reference, "clusters differ for {text:?}");
    }
}

#[test]
fn char_widths_match_unicode_width() {
    let corpus: Vec<char> = (' '..='~')
        .chain("äöüßéàçñ".chars())
        .chain("漢字中文測試".chars())
        .chain("ひらがなカタカナ".chars())
        .chain("한국어".chars())
        .chain("😀🎉🌱👨💋⌚".chars())
        .chain(['\u{0301}', '\u{0302}', '\u{20E3}'])
        .collect();
    for c in corpus {
        let ours = uniscan::width(c);
        let reference = UnicodeWidthChar::width(c).unwrap_or(0) as u32;
        assert_eq!(ours, reference, "width differs for U+{:04X}", c as u32);
    }
}

#[test]
fn pairwise_breaks_match_on_two_char_sequences() {
    // Exhaustive pair check over a small alphabet of interesting chars.
    let alphabet = [
        'a', 'Z', '0', ' ', '\u{00E9}', '\u{0301}', '\u{200D}', '漢', 'あ',
        '\u{AC00}', '\u{1100}', '\u{1161}', '\u{11A8}', '😀', '🏴', '\u{FE0F}',
        '\u{FE0E}', '\u{20E3}',
    ];
    for &a in &alphabet {
        for &b in &alphabet {
            let text: String = [a, b].iter().collect();
            let chars: Vec<char> = text.chars().collect();
            let ours = GraphemeClusters::new(&chars).count();
            let reference = text.graphemes(true).count();
            assert_eq!(
                ours, reference,
                "cluster count differs for U+{:04X} U+{:04X}",
                a as u32, b as u32
            );
        }
    }
}
