//! Language Tables - the single authoritative registry of reserved words,
//! type names, operator characters, and statement-starter words.
//!
//! Every other component (tokenizer, parser, evaluator) reads from this
//! module rather than hard-coding its own copy of a keyword or operator
//! set.

/// All reserved words in Salt. A token equal to one of these can never be
/// used as a variable, function, or parameter name.
pub const KEYWORDS: &[&str] = &[
    "make", "int", "string", "bool", "double", "TRUE", "FALSE", "not", "and", "or", "eq", "neq",
    "gt", "lt", "gteq", "lteq", "print", "if", "else", "loop", "while", "from", "to", "by",
    "skip", "end", "function", "takes", "gives", "give", "array",
];

/// The scalar type names usable in declarations, array element types,
/// parameter types, and return types.
pub const TYPES: &[&str] = &["int", "string", "bool", "double"];

/// Single-character operator/punctuation tokens recognized by the tokenizer.
pub const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '%', '(', ')', '<', '>', '=', '!', '{', '}', ',', '[', ']',
];

/// Tokens that may begin a new statement. `print` uses this set to know
/// where its argument list ends.
pub const STATEMENT_STARTERS: &[&str] =
    &["make", "print", "if", "loop", "while", "skip", "end", "give"];

/// True iff `word` is one of the reserved keywords.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// True iff `word` names one of the four scalar types.
pub fn is_type_name(word: &str) -> bool {
    TYPES.contains(&word)
}

/// True iff `ch` is one of the single-character operator tokens.
pub fn is_operator_char(ch: char) -> bool {
    OPERATOR_CHARS.contains(&ch)
}

/// True iff `word` may start a new statement.
pub fn is_statement_starter(word: &str) -> bool {
    STATEMENT_STARTERS.contains(&word)
}

/// A token is a valid user-chosen identifier (variable, function, or
/// parameter name) iff it starts with a letter or underscore, every
/// character is alphanumeric or underscore, and it is not a keyword.
pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }
    !is_keyword(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_not_identifiers() {
        for &kw in KEYWORDS {
            assert!(!is_identifier(kw), "{kw} should not be a valid identifier");
        }
    }

    #[test]
    fn plain_names_are_identifiers() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_tmp"));
        assert!(is_identifier("total_3"));
    }

    #[test]
    fn operator_leading_tokens_are_not_identifiers() {
        assert!(!is_identifier("3abc"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("+"));
    }

    #[test]
    fn type_names_are_recognized() {
        for &t in TYPES {
            assert!(is_type_name(t));
        }
        assert!(!is_type_name("array"));
    }
}
