//! The line-oriented output sink `print` writes to.

/// An append-only, line-granular output destination. `print` emits
/// exactly one line per statement, in execution order.
pub trait OutputSink {
    fn emit_line(&mut self, line: &str);
}

/// Collects emitted lines in memory, for tests and embedders that want
/// the captured output rather than a terminal stream.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for BufferSink {
    fn emit_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Writes each line straight to stdout, for the CLI driver.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit_line(&mut self, line: &str) {
        println!("{line}");
    }
}
