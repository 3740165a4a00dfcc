//! Recursive-descent parser for the Salt language.
//!
//! Consumes the token stream produced by `salt-lex` and builds the typed
//! AST that `salt-eval` walks.

pub mod ast;
mod parser;

pub use ast::{
    ArithOp, CompareOp, Expr, LogicalOp, LoopForm, NumberLiteral, Param, Stmt, TypeName,
};
pub use parser::{ParseResult, Parser};

/// Tokenizes and parses `source` into a program: an ordered list of
/// top-level statements.
pub fn parse_program(source: &str) -> ParseResult<Vec<Stmt>> {
    let tokens = salt_lex::tokenize(source);
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_declaration_and_print() {
        let program = parse_program("make int x 5\nprint x").unwrap();
        assert_eq!(
            program,
            vec![
                Stmt::Declaration {
                    type_name: TypeName::Int,
                    name: "x".to_string(),
                    value: Expr::Number(NumberLiteral::Int(5)),
                },
                Stmt::Print { arguments: vec![Expr::Variable("x".to_string())] },
            ]
        );
    }

    #[test]
    fn parses_if_else() {
        let program = parse_program("if x gt 5 { print x } else { print 0 }").unwrap();
        assert_eq!(program.len(), 1);
        assert!(matches!(program[0], Stmt::If { else_block: Some(_), .. }));
    }

    #[test]
    fn parses_loop_count_form() {
        let program = parse_program("loop 3 times { skip }").unwrap();
        assert_eq!(
            program,
            vec![Stmt::For { form: LoopForm::Count { count: 3 }, body: vec![Stmt::Skip] }]
        );
    }

    #[test]
    fn parses_loop_range_form_with_default_step() {
        let program = parse_program("loop i from 1 to 10 { end }").unwrap();
        assert_eq!(
            program,
            vec![Stmt::For {
                form: LoopForm::Range { var: "i".to_string(), start: 1, end: 10, step: 1 },
                body: vec![Stmt::End],
            }]
        );
    }

    #[test]
    fn parses_function_definition_and_call() {
        let program =
            parse_program("make function add takes int a , int b gives int { give a + b }")
                .unwrap();
        assert!(matches!(program[0], Stmt::FunctionDefinition { .. }));

        let call = parse_program("print add(1, 2)").unwrap();
        assert_eq!(
            call,
            vec![Stmt::Print {
                arguments: vec![Expr::FunctionCall {
                    name: "add".to_string(),
                    arguments: vec![
                        Expr::Number(NumberLiteral::Int(1)),
                        Expr::Number(NumberLiteral::Int(2)),
                    ],
                }],
            }]
        );
    }

    #[test]
    fn parses_array_declaration_and_access() {
        let program = parse_program("make int array nums[3]\nmake nums[0] 9\nprint nums[0]")
            .unwrap();
        assert_eq!(program.len(), 3);
        assert!(matches!(program[0], Stmt::ArrayDeclaration { .. }));
        assert!(matches!(program[1], Stmt::ArrayElementAssignment { .. }));
    }

    #[test]
    fn tolerates_stray_top_level_close_brace() {
        let program = parse_program("print 1 } print 2").unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn comparison_binds_over_arithmetic() {
        // addition/subtraction parse as the operands of the single
        // comparison level, not the other way around.
        let program = parse_program("print 1 + 2 gt 3").unwrap();
        let Stmt::Print { arguments } = &program[0] else { panic!("expected print") };
        assert!(matches!(
            &arguments[0],
            Expr::Comparison { left, op: CompareOp::Gt, .. } if matches!(**left, Expr::BinaryOp { .. })
        ));
    }

    #[test]
    fn reports_parse_error_with_token_context() {
        let err = parse_program("make int 5 5").unwrap_err();
        assert!(err.token_index.is_some());
    }
}
