//! Whitespace word splitting.
//!
//! Alternates between word runs and delimiter runs, where a delimiter is
//! one of space, tab, CR or LF. Deliberately simple - a terminal selects
//! words this way, no UAX #29 word rules involved.

/// Iterator over alternating word and delimiter runs.
pub struct WordSegmenter<'a> {
    text: &'a [char],
    offset: usize,
}

impl<'a> WordSegmenter<'a> {
    #[must_use]
    pub fn new(text: &'a [char]) -> Self {
        Self { text, offset: 0 }
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\r' | '\n' | '\t')
}

impl<'a> Iterator for WordSegmenter<'a> {
    type Item = &'a [char];

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.text.len() {
            return None;
        }
        let start = self.offset;
        let in_delimiters = is_delimiter(self.text[start]);
        while self.offset < self.text.len() && is_delimiter(self.text[self.offset]) == in_delimiters
        {
            self.offset += 1;
        }
        Some(&self.text[start..self.offset])
    }
}
