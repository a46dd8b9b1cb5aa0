//! Script run segmentation (UAX #24).
//!
//! Each codepoint carries a set of scripts (its script extensions, with
//! the primary script moved to the front). Consecutive codepoints merge
//! by intersecting those sets; when an intersection comes up empty, a run
//! boundary is emitted and the set restarts at the offending codepoint.

use unicode_script::UnicodeScript;

use crate::ucd::Script;

/// Fixed-capacity set of scripts, ordered by priority. No codepoint has
/// more script extensions than fit here, and the merge logic only ever
/// shrinks sets, so the capacity never overflows in practice.
#[derive(Clone, Copy, Debug)]
pub struct ScriptSet {
    scripts: [Script; Self::CAPACITY],
    len: usize,
}

impl ScriptSet {
    pub const CAPACITY: usize = 32;

    #[must_use]
    pub fn new() -> Self {
        Self {
            scripts: [Script::Unknown; Self::CAPACITY],
            len: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Script] {
        &self.scripts[..self.len]
    }

    #[must_use]
    pub fn contains(&self, script: Script) -> bool {
        self.as_slice().contains(&script)
    }

    pub fn push(&mut self, script: Script) {
        debug_assert!(self.len < Self::CAPACITY);
        if self.len < Self::CAPACITY {
            self.scripts[self.len] = script;
            self.len += 1;
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Swaps the element at `index` to the front.
    fn promote(&mut self, index: usize) {
        self.scripts.swap(0, index);
    }
}

impl Default for ScriptSet {
    fn default() -> Self {
        Self::new()
    }
}

/// One script run: codepoints `[previous end, end)` resolve to `script`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptRun {
    /// Exclusive end offset of the run, in codepoints.
    pub end: usize,
    /// The resolved script of the run.
    pub script: Script,
}

/// Splits decoded text into runs of a single resolved script.
#[derive(Clone, Debug)]
pub struct ScriptSegmenter<'a> {
    text: &'a [char],
    offset: usize,
    current: ScriptSet,
    /// Refined guess for what Common should resolve to, learned from
    /// Inherited pairs seen while the run is still unsettled.
    common_preferred: Script,
}

impl<'a> ScriptSegmenter<'a> {
    #[must_use]
    pub fn new(text: &'a [char]) -> Self {
        let mut current = ScriptSet::new();
        current.push(Script::Common);
        Self {
            text,
            offset: 0,
            current,
            common_preferred: Script::Common,
        }
    }

    /// Returns the next script run, or `None` once the text is exhausted.
    pub fn consume(&mut self) -> Option<ScriptRun> {
        if self.offset >= self.text.len() {
            return None;
        }

        while self.offset < self.text.len() {
            let next_set = scripts_for(self.text[self.offset]);
            if !self.merge(&next_set) {
                // Empty intersection: the run ends in front of this codepoint.
                let run = ScriptRun {
                    end: self.offset,
                    script: self.resolve(),
                };
                self.current = next_set;
                return Some(run);
            }
            self.offset += 1;
        }

        let run = ScriptRun {
            end: self.offset,
            script: self.resolve(),
        };
        self.current.clear();
        Some(run)
    }

    /// The resolved script of the current set: its head, with Common
    /// replaced by the preferred script when one was learned.
    fn resolve(&self) -> Script {
        let head = self.current.as_slice().first().copied().unwrap_or(Script::Common);
        if head == Script::Common {
            self.common_preferred
        } else {
            head
        }
    }

    /// Intersects `next` into the current set.
    ///
    /// Returns false when the intersection is empty, which marks a run
    /// boundary.
    fn merge(&mut self, next: &ScriptSet) -> bool {
        if next.is_empty() || self.current.is_empty() {
            return false;
        }

        let priority = self.current.as_slice()[0];

        // Common/Inherited codepoints follow whatever surrounds them.
        if matches!(next.as_slice()[0], Script::Common | Script::Inherited) {
            if next.len() == 2
                && priority == Script::Inherited
                && self.common_preferred == Script::Common
            {
                self.common_preferred = next.as_slice()[1];
            }
            return true;
        }

        // An unsettled current set adopts the first concrete one.
        if matches!(priority, Script::Common | Script::Inherited) {
            self.current = *next;
            return true;
        }

        if self.current.len() == 1 {
            return next.contains(priority);
        }

        // General case: keep the priority script when both sides know it,
        // otherwise adopt the next set's head, then intersect the rest.
        let mut priority = priority;
        let mut next_rest = next.as_slice();
        let mut has_priority = next.contains(priority);
        if !has_priority {
            priority = next_rest[0];
            next_rest = &next_rest[1..];
            has_priority = self.current.contains(priority);
        }

        let mut merged = ScriptSet::new();
        if has_priority {
            merged.push(priority);
        }
        if !next_rest.is_empty() {
            for &script in &self.current.as_slice()[1..] {
                if next_rest.contains(&script) {
                    merged.push(script);
                }
            }
        }

        if merged.is_empty() {
            return false;
        }
        self.current = merged;
        true
    }
}

impl Iterator for ScriptSegmenter<'_> {
    type Item = ScriptRun;

    fn next(&mut self) -> Option<Self::Item> {
        self.consume()
    }
}

/// The script set of one codepoint: its script extensions with the primary
/// script promoted to the front (or appended when the extensions lack it).
fn scripts_for(c: char) -> ScriptSet {
    let mut set = ScriptSet::new();
    for script in c.script_extension().iter() {
        set.push(script);
    }

    let primary = c.script();
    if let Some(index) = set.as_slice().iter().position(|&s| s == primary) {
        set.promote(index);
    } else {
        set.push(primary);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(s: &str) -> Vec<(usize, Script)> {
        let chars: Vec<char> = s.chars().collect();
        ScriptSegmenter::new(&chars)
            .map(|run| (run.end, run.script))
            .collect()
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(runs(""), vec![]);
    }

    #[test]
    fn latin_only() {
        assert_eq!(runs("Hello"), vec![(5, Script::Latin)]);
    }

    #[test]
    fn punctuation_joins_surrounding_script() {
        assert_eq!(runs("Abc.;?Xyz"), vec![(9, Script::Latin)]);
    }

    #[test]
    fn common_only_resolves_to_common() {
        assert_eq!(runs(" "), vec![(1, Script::Common)]);
        assert_eq!(runs(".…¡"), vec![(3, Script::Common)]);
    }

    #[test]
    fn latin_then_han() {
        assert_eq!(runs("Hi你好"), vec![(2, Script::Latin), (4, Script::Han)]);
    }

    #[test]
    fn arabic_then_hangul() {
        assert_eq!(runs("نص키스의"), vec![(2, Script::Arabic), (5, Script::Hangul)]);
    }

    #[test]
    fn leading_common_adopts_first_concrete_script() {
        assert_eq!(runs("  你好"), vec![(4, Script::Han)]);
    }

    #[test]
    fn emoji_join_the_surrounding_run() {
        let text = "ऋषियों🌱🌲";
        assert_eq!(runs(text), vec![(text.chars().count(), Script::Devanagari)]);
    }

    #[test]
    fn kana_with_embedded_punctuation() {
        assert_eq!(runs("いろはに.…¡ほへと"), vec![(10, Script::Hiragana)]);
    }

    #[test]
    fn combining_marks_inherit() {
        assert_eq!(runs("क+े"), vec![(3, Script::Devanagari)]);
    }
}
