//! Type coercion rules shared by declaration, assignment, argument
//! passing, and return-value conversion.

use salt_par::TypeName;
use salt_util::{SaltError, SaltResult};

use crate::value::Value;

/// Forces `value` into `target`, following the declaration coercion
/// rules: int truncates toward zero from double and parses from string;
/// double converts/parses; bool applies truthiness; string renders the
/// value textually.
pub fn coerce(value: &Value, target: TypeName) -> SaltResult<Value> {
    match target {
        TypeName::Int => coerce_to_int(value),
        TypeName::Double => coerce_to_double(value),
        TypeName::Bool => Ok(Value::Bool(value.is_truthy())),
        TypeName::String => Ok(Value::String(value.to_display_string())),
    }
}

fn coerce_to_int(value: &Value) -> SaltResult<Value> {
    match value {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Double(d) => Ok(Value::Int(d.trunc() as i64)),
        Value::Bool(b) => Ok(Value::Int(if *b { 1 } else { 0 })),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| SaltError::type_error(format!("cannot coerce \"{s}\" to int"))),
        Value::Array(_) => Err(SaltError::type_error("cannot coerce an array to int")),
        Value::Unit => Err(SaltError::type_error("cannot coerce a unit value to int")),
    }
}

fn coerce_to_double(value: &Value) -> SaltResult<Value> {
    match value {
        Value::Int(n) => Ok(Value::Double(*n as f64)),
        Value::Double(d) => Ok(Value::Double(*d)),
        Value::Bool(b) => Ok(Value::Double(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| SaltError::type_error(format!("cannot coerce \"{s}\" to double"))),
        Value::Array(_) => Err(SaltError::type_error("cannot coerce an array to double")),
        Value::Unit => Err(SaltError::type_error("cannot coerce a unit value to double")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_truncates_toward_zero_from_double() {
        assert_eq!(coerce(&Value::Double(4.9), TypeName::Int).unwrap(), Value::Int(4));
        assert_eq!(coerce(&Value::Double(-4.9), TypeName::Int).unwrap(), Value::Int(-4));
    }

    #[test]
    fn int_parses_numeric_strings() {
        assert_eq!(
            coerce(&Value::String("42".to_string()), TypeName::Int).unwrap(),
            Value::Int(42)
        );
        assert!(coerce(&Value::String("nope".to_string()), TypeName::Int).is_err());
    }

    #[test]
    fn bool_applies_truthiness() {
        assert_eq!(coerce(&Value::Int(0), TypeName::Bool).unwrap(), Value::Bool(false));
        assert_eq!(coerce(&Value::Int(7), TypeName::Bool).unwrap(), Value::Bool(true));
    }

    #[test]
    fn string_renders_textually() {
        assert_eq!(
            coerce(&Value::Double(4.0), TypeName::String).unwrap(),
            Value::String("4.0".to_string())
        );
    }
}
