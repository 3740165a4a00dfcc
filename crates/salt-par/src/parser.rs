//! Recursive-descent parser over a positional cursor into the token list.

use salt_util::tables::{is_identifier, is_statement_starter, is_type_name};
use salt_util::{SaltDiagnostic, SaltError};

use crate::ast::{
    ArithOp, CompareOp, Expr, LogicalOp, LoopForm, NumberLiteral, Param, Stmt, TypeName,
};

pub type ParseResult<T> = Result<T, SaltDiagnostic>;

pub struct Parser {
    tokens: Vec<String>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens, position: 0 }
    }

    /// Parse every statement in the token stream, tolerating stray `}`
    /// tokens at the top level.
    pub fn parse_program(&mut self) -> ParseResult<Vec<Stmt>> {
        tracing::debug!(tokens = self.tokens.len(), "parsing program");
        let mut statements = Vec::new();
        while let Some(token) = self.current() {
            if token == "}" {
                self.advance();
                continue;
            }
            statements.push(self.parse_statement()?);
        }
        tracing::debug!(statements = statements.len(), "parsing finished");
        Ok(statements)
    }

    fn current(&self) -> Option<&str> {
        self.tokens.get(self.position).map(String::as_str)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&self, message: impl Into<String>) -> SaltDiagnostic {
        let token = self.current().unwrap_or("<end of input>").to_string();
        SaltDiagnostic::at_token(SaltError::parse(message), self.position, token)
    }

    fn expect(&mut self, expected: &str) -> ParseResult<()> {
        if self.current() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected '{expected}', got {}",
                self.current().unwrap_or("end of input")
            )))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current() {
            Some(token) if is_identifier(token) => {
                let name = token.to_string();
                self.advance();
                Ok(name)
            }
            other => {
                let got = other.unwrap_or("end of input").to_string();
                Err(self.error(format!("expected identifier, got {got}")))
            }
        }
    }

    fn expect_type_name(&mut self) -> ParseResult<TypeName> {
        match self.current().and_then(TypeName::from_token) {
            Some(type_name) => {
                self.advance();
                Ok(type_name)
            }
            None => {
                let got = self.current().unwrap_or("end of input").to_string();
                Err(self.error(format!("expected a type name, got {got}")))
            }
        }
    }

    /// Parses a bare integer literal token (no decimal point), as
    /// required by loop counts, range bounds, and step values.
    fn expect_int_literal(&mut self) -> ParseResult<i64> {
        match self.current() {
            Some(token) if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) => {
                let value: i64 = token
                    .parse()
                    .map_err(|_| self.error(format!("integer literal out of range: {token}")))?;
                self.advance();
                Ok(value)
            }
            other => {
                let got = other.unwrap_or("end of input").to_string();
                Err(self.error(format!("expected an integer, got {got}")))
            }
        }
    }

    fn looks_like_number(token: &str) -> bool {
        !token.is_empty()
            && token.chars().all(|c| c.is_ascii_digit() || c == '.')
            && token.chars().any(|c| c.is_ascii_digit())
    }

    fn looks_like_string_literal(token: &str) -> bool {
        !token.is_empty() && token.starts_with('"') && token.ends_with('"')
    }

    fn parse_block_until_close_brace(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        loop {
            match self.current() {
                None => return Err(self.error("reached end of input before closing '}'")),
                Some("}") => break,
                _ => statements.push(self.parse_statement()?),
            }
        }
        self.advance();
        Ok(statements)
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current() {
            None => Err(self.error("unexpected end of input")),
            Some("make") => self.parse_make_statement(),
            Some("print") => self.parse_print_statement(),
            Some("skip") => {
                self.advance();
                Ok(Stmt::Skip)
            }
            Some("end") => {
                self.advance();
                Ok(Stmt::End)
            }
            Some("give") => self.parse_give_statement(),
            Some("if") => self.parse_if_statement(),
            Some("loop") => self.parse_loop_statement(),
            Some("while") => self.parse_while_statement(),
            Some(_) => Ok(Stmt::Expression(self.parse_comparison()?)),
        }
    }

    fn parse_make_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'make'
        match self.current() {
            Some("function") => self.parse_function_definition(),
            Some(token) if is_type_name(token) => {
                let type_name = self.expect_type_name()?;
                if self.current() == Some("array") {
                    self.advance();
                    let name = self.expect_identifier()?;
                    self.expect("[")?;
                    let size = self.parse_comparison()?;
                    self.expect("]")?;
                    Ok(Stmt::ArrayDeclaration { element_type: type_name, name, size })
                } else {
                    let name = self.expect_identifier()?;
                    let value = self.parse_comparison()?;
                    Ok(Stmt::Declaration { type_name, name, value })
                }
            }
            _ => {
                let name = self.expect_identifier()?;
                if self.current() == Some("[") {
                    self.advance();
                    let index = self.parse_comparison()?;
                    self.expect("]")?;
                    let value = self.parse_comparison()?;
                    Ok(Stmt::ArrayElementAssignment { name, index, value })
                } else {
                    let value = self.parse_comparison()?;
                    Ok(Stmt::Assignment { name, value })
                }
            }
        }
    }

    fn parse_function_definition(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'function'
        let name = self.expect_identifier()?;
        tracing::trace!(function = %name, "entering function definition");
        let parameters = match self.current() {
            Some("gives") => {
                self.advance();
                Vec::new()
            }
            Some("takes") => {
                self.advance();
                let mut parameters = Vec::new();
                loop {
                    let type_name = self.expect_type_name()?;
                    let param_name = self.expect_identifier()?;
                    parameters.push(Param { type_name, name: param_name });
                    match self.current() {
                        Some(",") => self.advance(),
                        Some("gives") => break,
                        other => {
                            let got = other.unwrap_or("end of input").to_string();
                            return Err(self.error(format!("expected ',' or 'gives', got {got}")));
                        }
                    }
                }
                self.advance(); // 'gives'
                parameters
            }
            other => {
                let got = other.unwrap_or("end of input").to_string();
                return Err(self.error(format!("expected 'takes' or 'gives', got {got}")));
            }
        };
        let return_type = self.expect_type_name()?;
        self.expect("{")?;
        let body = self.parse_block_until_close_brace()?;
        tracing::trace!(function = %name, "leaving function definition");
        Ok(Stmt::FunctionDefinition { name, return_type, parameters, body })
    }

    fn parse_print_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'print'
        let mut arguments = Vec::new();
        while let Some(token) = self.current() {
            if token == "}" || is_statement_starter(token) {
                break;
            }
            arguments.push(self.parse_comparison()?);
        }
        Ok(Stmt::Print { arguments })
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'if'
        let condition = self.parse_comparison()?;
        self.expect("{")?;
        let then_block = self.parse_block_until_close_brace()?;
        let else_block = if self.current() == Some("else") {
            self.advance();
            self.expect("{")?;
            Some(self.parse_block_until_close_brace()?)
        } else {
            None
        };
        Ok(Stmt::If { condition, then_block, else_block })
    }

    fn parse_loop_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'loop'
        let form = match self.current() {
            Some(token) if Self::looks_like_number(token) => {
                let count = self.expect_int_literal()?;
                self.expect("times")?;
                LoopForm::Count { count }
            }
            Some(token) if is_identifier(token) => {
                let var = token.to_string();
                self.advance();
                self.expect("from")?;
                let start = self.expect_int_literal()?;
                self.expect("to")?;
                let end = self.expect_int_literal()?;
                let step = if self.current() == Some("by") {
                    self.advance();
                    self.expect_int_literal()?
                } else {
                    1
                };
                LoopForm::Range { var, start, end, step }
            }
            other => {
                let got = other.unwrap_or("end of input").to_string();
                return Err(self.error(format!("expected a number or variable name after 'loop', got {got}")));
            }
        };
        self.expect("{")?;
        let body = self.parse_block_until_close_brace()?;
        Ok(Stmt::For { form, body })
    }

    fn parse_while_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'while'
        let condition = self.parse_comparison()?;
        self.expect("{")?;
        let body = self.parse_block_until_close_brace()?;
        Ok(Stmt::While { condition, body })
    }

    fn parse_give_statement(&mut self) -> ParseResult<Stmt> {
        self.advance(); // 'give'
        let value = self.parse_comparison()?;
        Ok(Stmt::Return(value))
    }

    /// Lowest precedence level: `not`, `and`/`or`, and the six
    /// comparisons all share this single level with no chaining.
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        if self.current() == Some("not") {
            self.advance();
            let operand = self.parse_expression()?;
            return Ok(Expr::Not(Box::new(operand)));
        }

        let left = self.parse_expression()?;

        let op = match self.current() {
            Some("and") => Some(LogicalOp::And),
            Some("or") => Some(LogicalOp::Or),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let right = self.parse_expression()?;
            return Ok(Expr::Logical { left: Box::new(left), op, right: Box::new(right) });
        }

        let op = match self.current() {
            Some("eq") => Some(CompareOp::Eq),
            Some("neq") => Some(CompareOp::Neq),
            Some("lt") => Some(CompareOp::Lt),
            Some("gt") => Some(CompareOp::Gt),
            Some("lteq") => Some(CompareOp::Lteq),
            Some("gteq") => Some(CompareOp::Gteq),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let right = self.parse_expression()?;
            return Ok(Expr::Comparison { left: Box::new(left), op, right: Box::new(right) });
        }

        Ok(left)
    }

    /// Addition and subtraction.
    fn parse_expression(&mut self) -> ParseResult<Expr> {
        let mut result = self.parse_term()?;
        loop {
            let op = match self.current() {
                Some("+") => ArithOp::Add,
                Some("-") => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            result = Expr::BinaryOp { left: Box::new(result), op, right: Box::new(right) };
        }
        Ok(result)
    }

    /// Multiplication, division, and modulo.
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut result = self.parse_primary()?;
        loop {
            let op = match self.current() {
                Some("*") => ArithOp::Mul,
                Some("/") => ArithOp::Div,
                Some("%") => ArithOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary()?;
            result = Expr::BinaryOp { left: Box::new(result), op, right: Box::new(right) };
        }
        Ok(result)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = match self.current() {
            Some(token) => token.to_string(),
            None => return Err(self.error("unexpected end of input")),
        };

        if token == "-" {
            self.advance();
            let operand = self.parse_primary()?;
            return Ok(Expr::UnaryMinus(Box::new(operand)));
        }

        if Self::looks_like_number(&token) {
            self.advance();
            let literal = if token.contains('.') {
                let value: f64 = token
                    .parse()
                    .map_err(|_| self.error(format!("malformed number literal: {token}")))?;
                NumberLiteral::Double(value)
            } else {
                let value: i64 = token
                    .parse()
                    .map_err(|_| self.error(format!("integer literal out of range: {token}")))?;
                NumberLiteral::Int(value)
            };
            return Ok(Expr::Number(literal));
        }

        if Self::looks_like_string_literal(&token) {
            self.advance();
            let inner = token
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or("");
            return Ok(Expr::StringLit(inner.to_string()));
        }

        if token == "TRUE" || token == "FALSE" {
            self.advance();
            return Ok(Expr::Boolean(token == "TRUE"));
        }

        if token == "(" {
            self.advance();
            let expr = self.parse_comparison()?;
            self.expect(")")?;
            return Ok(expr);
        }

        if is_identifier(&token) {
            self.advance();
            if self.current() == Some("[") {
                self.advance();
                let index = self.parse_comparison()?;
                self.expect("]")?;
                return Ok(Expr::ArrayAccess { name: token, index: Box::new(index) });
            }
            if self.current() == Some("(") {
                return self.parse_function_call(token);
            }
            return Ok(Expr::Variable(token));
        }

        Err(self.error(format!(
            "expected a number, variable, string, boolean, or '(', got {token}"
        )))
    }

    fn parse_function_call(&mut self, name: String) -> ParseResult<Expr> {
        self.advance(); // '('
        let mut arguments = Vec::new();
        while self.current() != Some(")") {
            if self.current().is_none() {
                return Err(self.error("reached end of input before closing ')'"));
            }
            arguments.push(self.parse_comparison()?);
            match self.current() {
                Some(",") => self.advance(),
                Some(")") => break,
                other => {
                    let got = other.unwrap_or("end of input").to_string();
                    return Err(self.error(format!("expected ',' or ')', got {got}")));
                }
            }
        }
        self.advance(); // ')'
        Ok(Expr::FunctionCall { name, arguments })
    }
}
