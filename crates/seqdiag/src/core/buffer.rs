//! Append-only line storage for diagram text

/// Ordered, append-only sequence of diagram lines
///
/// The first line is the header supplied at construction. Lines are never
/// removed or reordered; rendering joins them with a caller-chosen separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Create a buffer holding only the header line
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            lines: vec![header.into()],
        }
    }

    /// Append one line
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append an empty line
    pub fn push_blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Number of lines, header included
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: the header is present from construction
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The 1-based line number the next appended line will occupy
    pub fn next_line_number(&self) -> usize {
        self.lines.len() + 1
    }

    /// The header line
    pub fn header(&self) -> &str {
        &self.lines[0]
    }

    /// All lines in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join all lines with `separator`
    pub fn render(&self, separator: &str) -> String {
        self.lines.join(separator)
    }
}
