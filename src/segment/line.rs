//! Width-bounded, resumable segmentation of UTF-8 byte streams.
//!
//! [`LineSegmenter`] walks a borrowed byte buffer and hands out grapheme
//! clusters until a column budget is exhausted, a control byte appears, or
//! the input ends. All state needed to resume - the partial UTF-8 sequence,
//! the cluster being accumulated, the previous codepoint - lives in the
//! segmenter, so the caller may feed a stream chunk by chunk.
//!
//! A returned slice never ends inside a UTF-8 sequence and never splits a
//! grapheme cluster; a cluster whose width would overflow the budget is
//! wound back completely and re-scanned by the next call.

use crate::grapheme::GraphemeTracker;
use crate::scan::{StopCondition, scan_ascii};
use crate::ucd::properties_u32;
use crate::utf8::{Decode, Utf8Decoder};

/// VARIATION SELECTOR-16, requesting emoji presentation of its base.
const VS16: u32 = 0xFE0F;

/// Result of a single [`LineSegmenter::process`] or
/// [`LineSegmenter::flush`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentationResult<'a> {
    /// The scanned text: everything emitted during this call. Never ends
    /// with a partial UTF-8 sequence, but may contain invalid bytes.
    pub text: &'a [u8],
    /// Sum of the column widths of everything emitted during this call.
    pub width: u32,
    /// Why scanning stopped.
    pub stop: StopCondition,
}

/// Receives fine-grained scanning events.
///
/// All methods default to no-ops, so a listener only implements what it
/// cares about. The unit listener [`NoopListener`] compiles away entirely.
pub trait SegmentationListener {
    /// A run of printable ASCII; one column per byte.
    fn on_ascii(&mut self, text: &[u8]) {
        let _ = text;
    }

    /// A complete grapheme cluster and its column width.
    fn on_grapheme_cluster(&mut self, cluster: &[u8], width: u32) {
        let _ = (cluster, width);
    }

    /// Bytes that do not form valid UTF-8; rendered as one replacement
    /// glyph of width 1.
    fn on_invalid(&mut self, bytes: &[u8]) {
        let _ = bytes;
    }
}

impl<T: SegmentationListener + ?Sized> SegmentationListener for &mut T {
    fn on_ascii(&mut self, text: &[u8]) {
        (**self).on_ascii(text);
    }

    fn on_grapheme_cluster(&mut self, cluster: &[u8], width: u32) {
        (**self).on_grapheme_cluster(cluster, width);
    }

    fn on_invalid(&mut self, bytes: &[u8]) {
        (**self).on_invalid(bytes);
    }
}

/// The do-nothing listener.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl SegmentationListener for NoopListener {}

/// Everything carried between calls.
#[derive(Clone, Copy, Debug, Default)]
struct ScanState {
    /// UTF-8 decoder, possibly holding a partial sequence.
    utf8: Utf8Decoder,
    /// Offset where decoding resumes.
    next: usize,
    /// Start of the grapheme cluster being accumulated. Everything before
    /// this offset has been emitted.
    cluster_start: usize,
    /// Offset just past the most recently completed codepoint.
    codepoint_start: usize,
    /// Accumulated width of the cluster being built.
    cluster_width: u32,
    /// Previous codepoint plus regional-indicator parity.
    tracker: GraphemeTracker,
}

impl ScanState {
    fn at(offset: usize) -> Self {
        Self {
            next: offset,
            cluster_start: offset,
            codepoint_start: offset,
            ..Self::default()
        }
    }

    /// Rewinds to the start of the cluster in flight so the next call
    /// re-decodes it from scratch.
    fn rewind_to_cluster_start(&mut self) {
        self.next = self.cluster_start;
        self.codepoint_start = self.cluster_start;
        self.cluster_width = 0;
        self.utf8.reset();
        self.tracker.reset();
    }
}

/// Outcome of the complex-unicode subloop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ComplexStop {
    /// Hit a byte below 0x80; the caller reclassifies it.
    PlainByte,
    EndOfInput,
    EndOfWidth,
}

/// Stateful scanner that segments UTF-8 text into grapheme clusters up to
/// a total column width.
///
/// Control characters are never consumed: `process` stops in front of them
/// with [`StopCondition::UnexpectedInput`] and the caller skips past via
/// [`LineSegmenter::move_forward_to`].
pub struct LineSegmenter<'a, L = NoopListener> {
    buffer: &'a [u8],
    state: ScanState,
    listener: L,
}

impl<'a> LineSegmenter<'a, NoopListener> {
    /// Creates a segmenter without an event listener.
    #[must_use]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_listener(NoopListener, buffer)
    }
}

impl<'a, L: SegmentationListener> LineSegmenter<'a, L> {
    /// Creates a segmenter that reports every emitted piece to `listener`.
    pub fn with_listener(listener: L, buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            state: ScanState::at(0),
            listener,
        }
    }

    /// Installs a new input buffer and clears all scanning state.
    pub fn reset(&mut self, buffer: &'a [u8]) {
        self.buffer = buffer;
        self.state = ScanState::at(0);
    }

    /// Installs a regrown view of the current buffer after the caller
    /// appended bytes to its backing storage (streaming input).
    ///
    /// Scanning state is preserved; the already-scanned prefix must be
    /// byte-identical to the previous buffer.
    pub fn expand_buffer(&mut self, grown: &'a [u8]) {
        assert!(
            grown.len() >= self.buffer.len(),
            "expanded buffer must not shrink"
        );
        self.buffer = grown;
    }

    /// Moves the scan position to `offset`, e.g. past a control sequence
    /// the caller handled. Resets the decoder and the codepoint hint so
    /// the next cluster starts fresh.
    pub fn move_forward_to(&mut self, offset: usize) {
        assert!(offset <= self.buffer.len(), "offset beyond buffer");
        self.state = ScanState::at(offset);
    }

    /// Offset where the next `process` call resumes.
    #[must_use]
    pub fn next_offset(&self) -> usize {
        self.state.next
    }

    /// True when a partial UTF-8 sequence is buffered.
    #[must_use]
    pub fn pending_utf8(&self) -> bool {
        self.state.utf8.pending()
    }

    /// A copy of the UTF-8 decoder state.
    #[must_use]
    pub fn utf8_state(&self) -> Utf8Decoder {
        self.state.utf8
    }

    /// The previous codepoint, or zero when the next cluster starts fresh.
    #[must_use]
    pub fn last_codepoint_hint(&self) -> u32 {
        self.state.tracker.prev()
    }

    /// Consumes input until the column budget `max_width` is exhausted,
    /// the input ends, or a control byte is reached.
    pub fn process(&mut self, max_width: u32) -> SegmentationResult<'a> {
        let buffer = self.buffer;
        let anchor = self.state.cluster_start;

        if self.state.next == buffer.len() {
            return SegmentationResult {
                text: &buffer[anchor..anchor],
                width: 0,
                stop: StopCondition::EndOfInput,
            };
        }

        let mut total: u32 = 0;
        loop {
            if self.state.next == buffer.len() {
                return self.result(anchor, total, StopCondition::EndOfInput);
            }
            if total == max_width {
                return self.result(anchor, total, StopCondition::EndOfWidth);
            }
            let byte = buffer[self.state.next];
            // A cluster or partial sequence left over from an earlier call
            // must be settled by the complex path before the byte itself
            // can be classified.
            let pending = self.state.tracker.prev() != 0 || self.state.utf8.pending();
            if byte < 0x20 && !pending {
                return self.result(anchor, total, StopCondition::UnexpectedInput);
            }
            if byte < 0x80 && !pending {
                // A run of printable ASCII: one column per byte, bounded by
                // the remaining budget. ASCII cannot join a following
                // cluster, so the codepoint hint resets.
                let budget = (max_width - total) as usize;
                let (_, len) = scan_ascii(&buffer[self.state.next..], budget);
                debug_assert!(len > 0);
                let end = self.state.next + len;
                self.listener.on_ascii(&buffer[self.state.next..end]);
                self.state.next = end;
                self.state.cluster_start = end;
                self.state.codepoint_start = end;
                self.state.cluster_width = 0;
                self.state.tracker.reset();
                total += len as u32;
            } else {
                let (consumed, stop) = self.process_complex(max_width - total);
                total += consumed;
                match stop {
                    ComplexStop::PlainByte => {}
                    ComplexStop::EndOfInput => {
                        return self.result(anchor, total, StopCondition::EndOfInput);
                    }
                    ComplexStop::EndOfWidth => {
                        return self.result(anchor, total, StopCondition::EndOfWidth);
                    }
                }
            }
        }
    }

    /// Declares end-of-input: emits a complete pending cluster and reports
    /// a buffered partial UTF-8 sequence as invalid. Idempotent.
    pub fn flush(&mut self, max_width: u32) -> SegmentationResult<'a> {
        let buffer = self.buffer;
        let anchor = self.state.cluster_start;
        let mut width: u32 = 0;
        let mut budget = max_width;

        // A complete cluster may sit in front of a partial tail.
        let cluster_end = if self.state.utf8.pending() {
            self.state.codepoint_start
        } else {
            self.state.next
        };
        if self.state.tracker.prev() != 0 && self.state.cluster_start < cluster_end {
            let w = self.state.cluster_width;
            if w <= budget {
                self.listener
                    .on_grapheme_cluster(&buffer[self.state.cluster_start..cluster_end], w);
                width += w;
                budget -= w;
                self.state.cluster_start = cluster_end;
                self.state.codepoint_start = cluster_end;
                self.state.cluster_width = 0;
                self.state.tracker.reset();
            } else {
                // Pending cluster does not fit: rewind for a later call.
                self.state.rewind_to_cluster_start();
                return SegmentationResult {
                    text: &buffer[anchor..anchor],
                    width: 0,
                    stop: StopCondition::EndOfInput,
                };
            }
        }

        if self.state.utf8.pending() && budget >= 1 {
            self.listener
                .on_invalid(&buffer[self.state.cluster_start..self.state.next]);
            width += 1;
            self.state.utf8.reset();
            self.state.cluster_start = self.state.next;
            self.state.codepoint_start = self.state.next;
            self.state.tracker.reset();
        }

        SegmentationResult {
            text: &buffer[anchor..self.state.cluster_start],
            width,
            stop: StopCondition::EndOfInput,
        }
    }

    fn result(&self, anchor: usize, width: u32, stop: StopCondition) -> SegmentationResult<'a> {
        let buffer = self.buffer;
        SegmentationResult {
            text: &buffer[anchor..self.state.cluster_start],
            width,
            stop,
        }
    }

    /// Decodes codepoints starting at `state.next` and emits grapheme
    /// clusters as their boundaries are confirmed, up to `budget` columns.
    fn process_complex(&mut self, budget: u32) -> (u32, ComplexStop) {
        let buffer = self.buffer;
        let mut consumed: u32 = 0;

        loop {
            if self.state.next == buffer.len() {
                return (consumed, ComplexStop::EndOfInput);
            }
            let byte = buffer[self.state.next];
            if byte < 0x80 {
                // The cluster in flight is complete; emit it before handing
                // control back for the ASCII or control byte.
                match self.finish_cluster_before_plain_byte(budget - consumed) {
                    Ok(width) => {
                        consumed += width;
                        return (consumed, ComplexStop::PlainByte);
                    }
                    Err(()) => {
                        self.state.rewind_to_cluster_start();
                        return (consumed, ComplexStop::EndOfWidth);
                    }
                }
            }

            self.state.next += 1;
            match self.state.utf8.feed(byte) {
                Decode::Incomplete => {}
                Decode::Invalid => {
                    if consumed + 1 <= budget {
                        // One replacement glyph per invalid sequence. When
                        // the offending byte opened a fresh sequence, it
                        // stays buffered and belongs to the next cluster.
                        let retained = usize::from(self.state.utf8.pending());
                        let end = self.state.next - retained;
                        self.listener
                            .on_invalid(&buffer[self.state.cluster_start..end]);
                        consumed += 1;
                        self.state.cluster_start = end;
                        self.state.codepoint_start = end;
                        self.state.cluster_width = 0;
                        self.state.tracker.reset();
                    } else {
                        self.state.rewind_to_cluster_start();
                        return (consumed, ComplexStop::EndOfWidth);
                    }
                }
                Decode::Success(cp) => {
                    let pos = self.state.next;
                    if self.state.tracker.prev() == 0 {
                        // First codepoint of a cluster.
                        self.state.tracker.start(cp);
                        self.state.codepoint_start = pos;
                        self.state.cluster_width = properties_u32(cp).char_width as u32;
                    } else if self.state.tracker.breakable(cp) {
                        // Boundary found: the previous cluster is complete.
                        let width = self.state.cluster_width;
                        if consumed + width <= budget {
                            consumed += width;
                            self.listener.on_grapheme_cluster(
                                &buffer[self.state.cluster_start..self.state.codepoint_start],
                                width,
                            );
                            self.state.cluster_start = self.state.codepoint_start;
                            self.state.cluster_width = properties_u32(cp).char_width as u32;
                            self.state.codepoint_start = pos;
                            if consumed == budget {
                                self.state.rewind_to_cluster_start();
                                return (consumed, ComplexStop::EndOfWidth);
                            }
                        } else {
                            self.state.rewind_to_cluster_start();
                            return (consumed, ComplexStop::EndOfWidth);
                        }
                    } else {
                        // Same cluster. VS16 promotes the cluster to two
                        // columns; VS15 and everything else leave the width
                        // as computed from the base.
                        if cp == VS16 {
                            self.state.cluster_width = 2;
                        }
                        self.state.codepoint_start = pos;
                    }
                }
            }
        }
    }

    /// Emits the cluster in flight (if any) when scanning reached a byte
    /// below 0x80. Returns the width added, or `Err` when the cluster does
    /// not fit into the remaining budget.
    fn finish_cluster_before_plain_byte(&mut self, budget: u32) -> Result<u32, ()> {
        let buffer = self.buffer;
        let here = self.state.next;

        if self.state.utf8.pending() {
            // The plain byte interrupted a multi-byte sequence.
            if budget < 1 {
                return Err(());
            }
            self.listener
                .on_invalid(&buffer[self.state.cluster_start..here]);
            self.state.utf8.reset();
            self.state.cluster_start = here;
            self.state.codepoint_start = here;
            self.state.cluster_width = 0;
            self.state.tracker.reset();
            return Ok(1);
        }

        if self.state.tracker.prev() != 0 && self.state.cluster_start < here {
            let width = self.state.cluster_width;
            if width > budget {
                return Err(());
            }
            self.listener
                .on_grapheme_cluster(&buffer[self.state.cluster_start..here], width);
            self.state.cluster_start = here;
            self.state.codepoint_start = here;
            self.state.cluster_width = 0;
            self.state.tracker.reset();
            return Ok(width);
        }

        Ok(0)
    }
}
