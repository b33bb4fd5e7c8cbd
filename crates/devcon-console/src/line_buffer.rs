//! Fixed-capacity scrollback ring of wrapped text lines.
//!
//! Lines live in a ring indexed by an ever-growing write cursor: logical
//! line `i` sits in slot `i % capacity`. Once the cursor passes the
//! capacity, each new line overwrites the oldest one.

use devcon_types::backend::TextMeasure;

/// Scrollback storage for the console transcript.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    slots: Vec<String>,
    capacity: usize,
    /// Total lines written since the last clear.
    written: u64,
}

impl LineBuffer {
    /// Create a ring holding at most `capacity` lines (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity: capacity.max(1),
            written: 0,
        }
    }

    /// Maximum number of lines kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of lines currently reachable.
    pub fn len(&self) -> usize {
        self.written.min(self.capacity as u64) as usize
    }

    /// True until the first line is written, and again after a clear.
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Lines written since the last clear, including overwritten ones.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Split `text` on line breaks, word-wrap each piece to `width`, and
    /// store the results. Returns the number of lines written.
    ///
    /// An empty string still takes one line.
    pub fn append(&mut self, text: &str, width: f32, measure: &dyn TextMeasure) -> usize {
        let mut wrapped = Vec::new();
        for segment in text.split('\n') {
            let segment = segment.strip_suffix('\r').unwrap_or(segment);
            wrap_segment(segment, width, measure, &mut wrapped);
        }
        let n = wrapped.len();
        for line in wrapped {
            self.push_line(line);
        }
        n
    }

    /// Store one already-wrapped line.
    pub fn push_line(&mut self, line: String) {
        let slot = (self.written % self.capacity as u64) as usize;
        if slot < self.slots.len() {
            self.slots[slot] = line;
        } else {
            self.slots.push(line);
        }
        self.written += 1;
    }

    /// Forget every line. Slots keep their old text but become unreachable.
    pub fn clear(&mut self) {
        self.written = 0;
    }

    /// Largest valid scroll offset for a window of `max_on_screen` lines.
    pub fn max_scroll(&self, max_on_screen: usize) -> usize {
        self.len().saturating_sub(max_on_screen)
    }

    /// The lines visible in a window of `max_on_screen` lines, oldest first.
    ///
    /// `scroll_offset` counts lines up from the bottom and is clamped to
    /// the available history.
    pub fn view(&self, max_on_screen: usize, scroll_offset: usize) -> View<'_> {
        let visible = self.len().min(max_on_screen) as u64;
        let scroll = scroll_offset.min(self.max_scroll(max_on_screen)) as u64;
        let end = self.written - scroll;
        View {
            buffer: self,
            next: end - visible,
            end,
        }
    }

    fn slot(&self, logical: u64) -> &str {
        &self.slots[(logical % self.capacity as u64) as usize]
    }
}

/// Lazy iterator over a window of the ring. Clone it to read again.
#[derive(Debug, Clone)]
pub struct View<'a> {
    buffer: &'a LineBuffer,
    next: u64,
    end: u64,
}

impl<'a> Iterator for View<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.next >= self.end {
            return None;
        }
        let line = self.buffer.slot(self.next);
        self.next += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.next) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for View<'_> {}

/// Greedy word wrap of a single line.
///
/// Words are never split: a word wider than `width` ends up alone on its
/// own, overlong line. Runs of spaces, leading indentation included, are
/// kept as empty words.
fn wrap_segment(segment: &str, width: f32, measure: &dyn TextMeasure, out: &mut Vec<String>) {
    if measure.measure_width(segment) <= width {
        out.push(segment.to_string());
        return;
    }

    let mut current = String::new();
    let mut candidate = String::new();
    let mut words = segment.split(' ');
    if let Some(first) = words.next() {
        current.push_str(first);
    }
    for word in words {
        candidate.clear();
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);
        if measure.measure_width(&candidate) <= width {
            std::mem::swap(&mut current, &mut candidate);
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    out.push(current);
}
