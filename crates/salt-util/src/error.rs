//! Error categories shared by every stage of the pipeline.
//!
//! Each crate (`salt-lex`, `salt-par`, `salt-eval`) defines its own
//! narrower error enum for the mistakes it can make, then converts into
//! [`SaltError`] at the crate boundary so a driver only ever has to match
//! on one type.

use thiserror::Error;

/// One of the seven fatal error categories from the language design.
/// Every variant carries enough context for a driver to render a useful
/// diagnostic without consulting any other state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SaltError {
    /// Malformed lexical input. The tokenizer tolerates almost everything
    /// (unterminated strings silently run to end of input), so this
    /// variant is rarely raised in practice.
    #[error("lexical error: {message}")]
    Lexical { message: String },

    /// Unexpected token, missing delimiter, or malformed statement header.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Use of an undefined variable/function, or re-declaration of an
    /// existing variable.
    #[error("name error: {message}")]
    Name { message: String },

    /// Incompatible operand types for an operator, a non-array used as an
    /// array, or a non-integer array index/size.
    #[error("type error: {message}")]
    Type { message: String },

    /// Array index outside `[0, size)`.
    #[error("index error: {message}")]
    Index { message: String },

    /// Division or modulo by zero.
    #[error("arithmetic error: {message}")]
    Arithmetic { message: String },

    /// Function called with the wrong number of arguments.
    #[error("arity error: {message}")]
    Arity { message: String },
}

impl SaltError {
    pub fn lexical(message: impl Into<String>) -> Self {
        Self::Lexical { message: message.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }

    pub fn name(message: impl Into<String>) -> Self {
        Self::Name { message: message.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type { message: message.into() }
    }

    pub fn index(message: impl Into<String>) -> Self {
        Self::Index { message: message.into() }
    }

    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::Arithmetic { message: message.into() }
    }

    pub fn arity(message: impl Into<String>) -> Self {
        Self::Arity { message: message.into() }
    }
}

/// A [`SaltError`] located at an approximate position in the token stream.
///
/// Tokens carry no position metadata of their own (see the Data Model), so
/// the best a diagnostic can do is report the cursor's token index and the
/// offending token's text at the moment the error was raised. This is the
/// structure the Driver Contract promises a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SaltDiagnostic {
    pub error: SaltError,
    pub token_index: Option<usize>,
    pub token: Option<String>,
}

impl SaltDiagnostic {
    pub fn new(error: SaltError) -> Self {
        Self { error, token_index: None, token: None }
    }

    pub fn at_token(error: SaltError, token_index: usize, token: impl Into<String>) -> Self {
        Self { error, token_index: Some(token_index), token: Some(token.into()) }
    }
}

impl std::fmt::Display for SaltDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;
        if let (Some(idx), Some(tok)) = (self.token_index, &self.token) {
            write!(f, " (near token {idx}: `{tok}`)")?;
        }
        Ok(())
    }
}

impl std::error::Error for SaltDiagnostic {}

pub type SaltResult<T> = std::result::Result<T, SaltError>;
