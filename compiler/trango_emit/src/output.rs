//! Output buffer.
//!
//! String building for in-memory emission, with line tracking so the
//! source-map builder can record generated positions.

/// The string buffer the emitter renders into.
///
/// Indentation is tabs, matching what the target's formatter produces.
#[derive(Default)]
pub struct OutputBuffer {
    buffer: String,
    line: u32,
    column: u32,
}

impl OutputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        OutputBuffer::default()
    }

    /// Emit a text fragment. The fragment must not contain newlines;
    /// use `newline` so line tracking stays correct.
    pub fn push(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.column += u32::try_from(text.len()).unwrap_or(0);
    }

    /// Emit a newline.
    pub fn newline(&mut self) {
        self.buffer.push('\n');
        self.line += 1;
        self.column = 0;
    }

    /// Emit indentation.
    pub fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.buffer.push('\t');
        }
        self.column += u32::try_from(level).unwrap_or(0);
    }

    /// Emit a full line: indentation, text, newline.
    pub fn line(&mut self, level: usize, text: &str) {
        self.indent(level);
        self.push(text);
        self.newline();
    }

    /// Emit a blank line.
    pub fn blank(&mut self) {
        self.newline();
    }

    /// Current 1-based generated line.
    pub fn current_line(&self) -> u32 {
        self.line + 1
    }

    /// Current 0-based generated column.
    pub fn current_column(&self) -> u32 {
        self.column
    }

    /// Whether nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether the buffer currently ends with a blank line.
    pub fn ends_with_blank(&self) -> bool {
        self.buffer.ends_with("\n\n") || self.buffer.is_empty()
    }

    /// Ensure the output ends with exactly one trailing newline.
    pub fn finish(mut self) -> String {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }

    /// Borrow the text produced so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Append pre-rendered multi-line text, keeping line tracking
    /// correct.
    pub fn append(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.newline();
            }
            if !line.is_empty() {
                self.push(line);
            }
        }
    }
}
