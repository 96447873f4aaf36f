use super::Value;

use std::cmp::Ordering;

impl Value {
    /// Compares two values of compatible types. Integers and floats compare
    /// numerically across widths; anything else of mismatched type is
    /// incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;

        match (self, other) {
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (Decimal(a), Decimal(b)) => Some(a.cmp(b)),
            (F64(a), F64(b)) => a.partial_cmp(b),
            (F64(a), b) => b.as_i64().and_then(|b| a.partial_cmp(&(b as f64))),
            (a, F64(b)) => a.as_i64().and_then(|a| (a as f64).partial_cmp(b)),
            (a, b) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => None,
            },
        }
    }

    /// Equality that treats integers of different widths as equal when they
    /// hold the same number.
    pub fn loosely_eq(&self, other: &Value) -> bool {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Lowercases strings, including inside lists. Other values are
    /// returned unchanged.
    pub fn fold_case(&self) -> Value {
        match self {
            Value::String(s) => Value::String(s.to_lowercase()),
            Value::List(items) => Value::List(items.iter().map(Value::fold_case).collect()),
            other => other.clone(),
        }
    }
}
