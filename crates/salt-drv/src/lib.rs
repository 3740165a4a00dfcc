//! Driver glue tying the tokenizer, parser, and evaluator together.
//!
//! A [`Session`] is the Driver Contract: hand it source text and an
//! output sink, get back either successful completion or a single
//! structured error.

use salt_eval::OutputSink;
use salt_util::SaltDiagnostic;

/// Runs a Salt program end-to-end: tokenize, parse, evaluate.
///
/// On success, every line the program printed has already been written
/// to `sink`. On failure, returns the single [`SaltDiagnostic`] that
/// aborted execution — a parse error carries an approximate token
/// index, a tokenizer/evaluator error does not (AST nodes carry no
/// position metadata).
pub struct Session;

impl Session {
    pub fn run_source(source: &str, sink: &mut dyn OutputSink) -> Result<(), SaltDiagnostic> {
        let program = salt_par::parse_program(source)?;
        salt_eval::run_program(&program, sink).map_err(SaltDiagnostic::new)
    }

    pub fn run_file(path: &std::path::Path, sink: &mut dyn OutputSink) -> anyhow::Result<()> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read '{}': {e}", path.display()))?;
        Self::run_source(&source, sink).map_err(|diag| anyhow::anyhow!("{diag}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salt_eval::BufferSink;

    #[test]
    fn runs_a_program_to_completion() {
        let mut sink = BufferSink::new();
        Session::run_source("make int x 5\nprint x", &mut sink).unwrap();
        assert_eq!(sink.lines(), &["5".to_string()]);
    }

    #[test]
    fn reports_a_structured_parse_error() {
        let mut sink = BufferSink::new();
        let err = Session::run_source("make int 5 5", &mut sink).unwrap_err();
        assert!(err.token_index.is_some());
    }

    #[test]
    fn tolerates_stray_top_level_close_brace() {
        let mut sink = BufferSink::new();
        Session::run_source("print 1 } print 2", &mut sink).unwrap();
        assert_eq!(sink.lines(), &["1".to_string(), "2".to_string()]);
    }
}
