//! Strict equality over JSON scalars.
//!
//! Only null, booleans, numbers and strings take part in uniqueness checks.
//! Numbers compare by numeric value, so `1`, `1.0` and `-0.0 == 0` hold.
//! Arrays and objects never compare equal to anything.

use serde_json::{Number, Value};

/// Hashable normal form of a scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKey<'a> {
    Null,
    Bool(bool),
    /// Any number with an integral value, including integral floats
    Integer(i128),
    /// Bit pattern of a non-integral float
    Float(u64),
    Text(&'a str),
}

impl<'a> ScalarKey<'a> {
    /// Returns `None` for arrays and objects.
    pub fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(ScalarKey::Null),
            Value::Bool(b) => Some(ScalarKey::Bool(*b)),
            Value::Number(n) => Some(number_key(n)),
            Value::String(s) => Some(ScalarKey::Text(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn number_key(n: &Number) -> ScalarKey<'static> {
    if let Some(i) = n.as_i64() {
        return ScalarKey::Integer(i as i128);
    }
    if let Some(u) = n.as_u64() {
        return ScalarKey::Integer(u as i128);
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() == 0.0 && f >= i128::MIN as f64 && f < i128::MAX as f64 {
        ScalarKey::Integer(f as i128)
    } else {
        ScalarKey::Float(f.to_bits())
    }
}

pub fn is_scalar(value: &Value) -> bool {
    ScalarKey::of(value).is_some()
}

/// Strict equality: both sides scalar and equal after normalization.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (ScalarKey::of(a), ScalarKey::of(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Render a value for messages: strings verbatim, everything else as JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_equal_strings() {
        assert!(strict_eq(&json!("toyota"), &json!("toyota")));
        assert!(!strict_eq(&json!("toyota"), &json!("Toyota")));
    }

    #[test]
    fn test_integral_float_equals_integer() {
        assert!(strict_eq(&json!(2), &json!(2.0)));
        assert!(strict_eq(&json!(0), &json!(-0.0)));
        assert!(!strict_eq(&json!(2), &json!(2.5)));
    }

    #[test]
    fn test_large_unsigned_integer() {
        assert!(strict_eq(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!strict_eq(&json!(u64::MAX), &json!(i64::MAX)));
    }

    #[test]
    fn test_type_mismatch_is_not_equal() {
        assert!(!strict_eq(&json!(1), &json!("1")));
        assert!(!strict_eq(&json!(true), &json!(1)));
        assert!(!strict_eq(&json!(null), &json!(false)));
    }

    #[test]
    fn test_compound_values_never_equal() {
        assert!(!strict_eq(&json!([1]), &json!([1])));
        assert!(!strict_eq(&json!({"a": 1}), &json!({"a": 1})));
        assert!(!is_scalar(&json!([])));
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("datsun")), "datsun");
        assert_eq!(render_value(&json!(3)), "3");
        assert_eq!(render_value(&json!(null)), "null");
    }
}
