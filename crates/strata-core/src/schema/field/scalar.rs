use super::{FieldMode, ScalarDefault};
use crate::stmt::Value;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub scalar: ScalarType,

    pub mode: FieldMode,

    /// Value generated at create time when the input leaves the field out
    pub default: Option<ScalarDefault>,

    pub index: Option<IndexKind>,

    /// Storage column name, when it differs from the field name
    pub map: Option<String>,

    /// Driver-specific column type, e.g. `VarChar(255)`
    pub native_type: Option<String>,

    /// Stamp the current time on every update. `DateTime` only.
    pub updated_at: bool,
}

/// The closed set of scalar storage types. Each is bound to exactly one host
/// value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `String`
    String,
    /// `bool`
    Boolean,
    /// `i32`
    Int,
    /// `f64`
    Float,
    /// `chrono::DateTime<Utc>`
    DateTime,
    /// `i64`
    BigInt,
    /// `serde_json::Value`
    Json,
    /// `rust_decimal::Decimal`
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Unique,
    Index,
}

impl ScalarField {
    pub fn new(scalar: ScalarType, mode: FieldMode) -> ScalarField {
        ScalarField {
            scalar,
            mode,
            default: None,
            index: None,
            map: None,
            native_type: None,
            updated_at: false,
        }
    }

    pub fn required(scalar: ScalarType) -> ScalarField {
        ScalarField::new(scalar, FieldMode::Required)
    }

    pub fn optional(scalar: ScalarType) -> ScalarField {
        ScalarField::new(scalar, FieldMode::Optional)
    }

    pub fn many(scalar: ScalarType) -> ScalarField {
        ScalarField::new(scalar, FieldMode::Many)
    }

    pub fn is_unique(&self) -> bool {
        self.index == Some(IndexKind::Unique)
    }
}

impl ScalarType {
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Boolean => "Boolean",
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::DateTime => "DateTime",
            ScalarType::BigInt => "BigInt",
            ScalarType::Json => "Json",
            ScalarType::Decimal => "Decimal",
        }
    }

    /// Returns `true` if `value` is a value of this type's host type. `BigInt`
    /// also admits `I32` values, which widen losslessly.
    pub fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarType::String, Value::String(_))
                | (ScalarType::Boolean, Value::Bool(_))
                | (ScalarType::Int, Value::I32(_))
                | (ScalarType::Float, Value::F64(_))
                | (ScalarType::DateTime, Value::DateTime(_))
                | (ScalarType::BigInt, Value::I64(_) | Value::I32(_))
                | (ScalarType::Json, Value::Json(_))
                | (ScalarType::Decimal, Value::Decimal(_))
        )
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
