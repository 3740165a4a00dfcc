//! Tree-walking evaluator for the Salt language.
//!
//! Walks the AST produced by `salt-par` against a mutable variable
//! environment and function table, writing program output to an
//! [`OutputSink`].

mod coerce;
mod environment;
mod evaluator;
mod output;
mod value;

pub use environment::{Environment, FunctionDef, FunctionTable};
pub use evaluator::{Evaluator, Flow};
pub use output::{BufferSink, OutputSink, StdoutSink};
pub use value::{Array, Value};

use salt_par::Stmt;
use salt_util::SaltResult;

/// Runs a parsed program against a fresh environment, writing its output
/// to `sink`.
pub fn run_program(program: &[Stmt], sink: &mut dyn OutputSink) -> SaltResult<()> {
    Evaluator::new(sink).run(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Vec<String> {
        let program = salt_par::parse_program(source).expect("parse error");
        let mut sink = BufferSink::new();
        run_program(&program, &mut sink).expect("eval error");
        sink.into_lines()
    }

    fn run_err(source: &str) -> SaltError {
        let program = salt_par::parse_program(source).expect("parse error");
        let mut sink = BufferSink::new();
        run_program(&program, &mut sink).unwrap_err()
    }

    use salt_util::SaltError;

    #[test]
    fn declare_and_print_sum() {
        let lines = run("make int x 5\nmake int y 7\nprint \"sum=\" x + y");
        assert_eq!(lines, vec!["sum=12"]);
    }

    #[test]
    fn array_average() {
        let lines = run(
            "make int array s[4]\n\
             make s[0] 10\n\
             make s[1] 20\n\
             make s[2] 30\n\
             make s[3] 40\n\
             make int total 0\n\
             make int i 0\n\
             loop i from 0 to 3 { make total total + s[i] }\n\
             print \"avg=\" total / 4",
        );
        assert_eq!(lines, vec!["avg=25.0"]);
    }

    #[test]
    fn if_else_branch() {
        let lines = run("make int n 7\nif n gt 5 { print \"big\" } else { print \"small\" }");
        assert_eq!(lines, vec!["big"]);
    }

    #[test]
    fn function_call() {
        let lines = run(
            "make function add takes int a , int b gives int { give a + b }\n\
             print add(3, 4)",
        );
        assert_eq!(lines, vec!["7"]);
    }

    #[test]
    fn while_with_end() {
        let lines = run(
            "make int i 0\n\
             while i lt 100 { if i eq 3 { end } print i make i i + 1 }",
        );
        assert_eq!(lines, vec!["0", "1", "2"]);
    }

    #[test]
    fn loop_with_skip() {
        let lines = run("make int i 0\nloop i from 1 to 5 { if i eq 3 { skip } print i }");
        assert_eq!(lines, vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn redeclaration_is_a_name_error() {
        let err = run_err("make int x 1\nmake int x 2");
        assert!(matches!(err, SaltError::Name { .. }));
    }

    #[test]
    fn type_stays_fixed_across_assignments() {
        let lines = run("make int x 5\nmake x 3.9\nprint x");
        assert_eq!(lines, vec!["3"]);
    }

    #[test]
    fn array_index_out_of_bounds_is_an_index_error() {
        let err = run_err("make int array a[2]\nprint a[5]");
        assert!(matches!(err, SaltError::Index { .. }));
    }

    #[test]
    fn function_writes_do_not_leak_to_caller() {
        let lines = run(
            "make int x 1\n\
             make function bump takes int x gives int { make x x + 1 give x }\n\
             print bump(x)\n\
             print x",
        );
        assert_eq!(lines, vec!["2", "1"]);
    }

    #[test]
    fn division_by_zero_is_an_arithmetic_error() {
        let err = run_err("print 1 / 0");
        assert!(matches!(err, SaltError::Arithmetic { .. }));
    }

    #[test]
    fn arity_mismatch_is_an_arity_error() {
        let err = run_err(
            "make function add takes int a , int b gives int { give a + b }\n\
             print add(1)",
        );
        assert!(matches!(err, SaltError::Arity { .. }));
    }
}
