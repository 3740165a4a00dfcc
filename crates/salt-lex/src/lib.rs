//! Tokenizer for the Salt language.
//!
//! Turns raw source text into a flat stream of tokens: plain, owned
//! strings with no position metadata attached. The seven rules below are
//! tried in order at every cursor position; the first one that matches
//! consumes the run of characters it owns.

mod cursor;

use cursor::Cursor;

/// A Salt token. Tokens are non-empty strings; quoted string literals
/// keep their surrounding quote characters so the parser/evaluator can
/// tell them apart from bare identifiers.
pub type Token = String;

/// Tokenize `source` into a flat token stream.
///
/// Whitespace is skipped, `#` begins a line comment, numeric runs
/// (digits and at most the shape of an integer or decimal) become a
/// single token, quoted strings run to the closing quote or to end of
/// input if unterminated, identifier/keyword runs are alphanumeric plus
/// underscore, and any single recognized operator character becomes its
/// own token. Any other character is silently skipped.
pub fn tokenize(source: &str) -> Vec<Token> {
    tracing::debug!(bytes = source.len(), "tokenizing source");
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    while let Some(c) = cursor.current_char() {
        if c.is_whitespace() {
            cursor.bump();
            continue;
        }

        if c == '#' {
            while let Some(c) = cursor.current_char() {
                if c == '\n' {
                    break;
                }
                cursor.bump();
            }
            continue;
        }

        if c.is_ascii_digit() {
            tokens.push(lex_number(&mut cursor));
            continue;
        }

        if c == '"' {
            tokens.push(lex_string(&mut cursor));
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            tokens.push(lex_word(&mut cursor));
            continue;
        }

        if salt_util::tables::is_operator_char(c) {
            cursor.bump();
            tokens.push(c.to_string());
            continue;
        }

        // Unrecognized character: skip it silently.
        cursor.bump();
    }

    tracing::debug!(count = tokens.len(), "tokenizing finished");
    tokens
}

/// A run of digits and `.` with no validation of shape or dot count.
fn lex_number(cursor: &mut Cursor<'_>) -> Token {
    let mut text = String::new();
    while let Some(c) = cursor.current_char() {
        if c.is_ascii_digit() || c == '.' {
            text.push(c);
            cursor.bump();
        } else {
            break;
        }
    }
    text
}

/// A quoted string literal, quotes included. Runs to the closing `"`; if
/// the string is never closed, the closing quote is synthesized so the
/// token is always a complete, valid string literal.
fn lex_string(cursor: &mut Cursor<'_>) -> Token {
    let mut text = String::new();
    text.push('"');
    cursor.bump();
    let mut closed = false;
    while let Some(c) = cursor.current_char() {
        text.push(c);
        cursor.bump();
        if c == '"' {
            closed = true;
            break;
        }
    }
    if !closed {
        text.push('"');
    }
    text
}

/// An identifier or keyword: a run of alphanumerics and underscores
/// starting with a letter or underscore.
fn lex_word(cursor: &mut Cursor<'_>) -> Token {
    let mut text = String::new();
    while let Some(c) = cursor.current_char() {
        if c.is_alphanumeric() || c == '_' {
            text.push(c);
            cursor.bump();
        } else {
            break;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_a_declaration() {
        assert_eq!(tokenize("make int x 5"), vec!["make", "int", "x", "5"]);
    }

    #[test]
    fn splits_operators_into_single_char_tokens() {
        assert_eq!(tokenize("x=5"), vec!["x", "=", "5"]);
        assert_eq!(tokenize("a>=b"), vec!["a", ">", "=", "b"]);
    }

    #[test]
    fn keeps_decimal_numbers_as_one_token() {
        assert_eq!(tokenize("3.14"), vec!["3.14"]);
    }

    #[test]
    fn does_not_limit_dots_in_a_numeric_run() {
        assert_eq!(tokenize("3.4.5"), vec!["3.4.5"]);
    }

    #[test]
    fn keeps_quotes_on_string_literals() {
        assert_eq!(tokenize(r#""hello world""#), vec![r#""hello world""#]);
    }

    #[test]
    fn tolerates_an_unterminated_string() {
        assert_eq!(tokenize(r#""oops"#), vec![r#""oops""#]);
    }

    #[test]
    fn strips_line_comments() {
        assert_eq!(tokenize("make int x 5 # the answer\nprint x"), vec![
            "make", "int", "x", "5", "print", "x"
        ]);
    }

    #[test]
    fn skips_unrecognized_characters() {
        assert_eq!(tokenize("x @ y"), vec!["x", "y"]);
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  ").is_empty());
    }
}
