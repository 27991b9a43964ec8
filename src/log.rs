//! Operator log sinks
//!
//! Every user-facing line of a run goes through a [`LogSink`]. The core only
//! appends; reading, clearing and display belong to whoever owns the sink.

use std::io::{self, Write};

/// Append-only destination for operator log lines
pub trait LogSink {
    /// Append one line (without trailing newline)
    fn append(&mut self, line: &str);
}

impl LogSink for Vec<String> {
    fn append(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// In-memory sink for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended so far, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Count lines containing `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines.iter().filter(|l| l.contains(needle)).count()
    }

    /// Consume the sink and return its lines
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Writes each line to stdout and flushes so progress shows up immediately
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn append(&mut self, line: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout must not abort the run.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

/// Forwards each line as a `tracing` info event
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn append(&mut self, line: &str) {
        tracing::info!(target: "scan_rename::operator", "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        sink.append("first");
        sink.append("second line");
        sink.append("second again");
        assert_eq!(sink.lines(), ["first", "second line", "second again"]);
        assert_eq!(sink.count_containing("second"), 2);
        assert_eq!(sink.into_lines().len(), 3);
    }

    #[test]
    fn test_vec_sink() {
        let mut lines: Vec<String> = Vec::new();
        let sink: &mut dyn LogSink = &mut lines;
        sink.append("hello");
        assert_eq!(lines, vec!["hello".to_string()]);
    }
}
