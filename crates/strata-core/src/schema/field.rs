mod default;
pub use default::{Generated, RandomEncoding, ScalarDefault};

mod enumeration;
pub use enumeration::EnumField;

mod multi;
pub use multi::MultiField;

mod relation;
pub use relation::{Cardinality, ForeignKey, RelationField};

mod scalar;
pub use scalar::{IndexKind, ScalarField, ScalarType};

use crate::stmt::Value;

/// How a field is stored. The set is closed: every shape, obligation and
/// default rule in the schema is a match over these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageField {
    /// Present in the API, stored nowhere (computed or virtual fields)
    None,
    Scalar(ScalarField),
    Relation(RelationField),
    Enum(EnumField),
    /// Several scalar or enum columns exposed as one field
    Multi(MultiField),
}

/// Nullability and multiplicity of a scalar or enum field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldMode {
    Required,
    Optional,
    /// A list of values. Never carries a default.
    Many,
}

impl StorageField {
    pub fn kind_name(&self) -> &'static str {
        match self {
            StorageField::None => "none",
            StorageField::Scalar(_) => "scalar",
            StorageField::Relation(_) => "relation",
            StorageField::Enum(_) => "enum",
            StorageField::Multi(_) => "multi",
        }
    }

    /// The mode of scalar and enum fields.
    pub fn mode(&self) -> Option<FieldMode> {
        match self {
            StorageField::Scalar(scalar) => Some(scalar.mode),
            StorageField::Enum(enumeration) => Some(enumeration.mode),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, StorageField::None)
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, StorageField::Relation(_))
    }

    /// Scalar and enum fields are the only kinds a `multi` field may contain.
    pub fn is_scalarish(&self) -> bool {
        matches!(self, StorageField::Scalar(_) | StorageField::Enum(_))
    }

    pub fn as_scalar(&self) -> Option<&ScalarField> {
        match self {
            StorageField::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&RelationField> {
        match self {
            StorageField::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_relation(&self) -> &RelationField {
        match self {
            StorageField::Relation(relation) => relation,
            _ => panic!("expected relation field, but was {self:?}"),
        }
    }

    pub fn as_multi(&self) -> Option<&MultiField> {
        match self {
            StorageField::Multi(multi) => Some(multi),
            _ => None,
        }
    }

    /// Completes a create-time value with defaults.
    ///
    /// Scalar and enum fields get their default when `value` is absent and
    /// the mode is not `many`. A `multi` field fills each absent subfield
    /// the same way. `Generated::Storage` defaults are left for the driver.
    pub fn with_create_default(&self, value: Option<Value>) -> Option<Value> {
        match self {
            StorageField::Scalar(scalar) if value.is_none() && scalar.mode != FieldMode::Many => {
                match scalar.default.as_ref().map(ScalarDefault::generate) {
                    Some(Generated::Value(value)) => Some(value),
                    _ => None,
                }
            }
            StorageField::Enum(enumeration)
                if value.is_none() && enumeration.mode != FieldMode::Many =>
            {
                enumeration.default.clone().map(Value::String)
            }
            StorageField::Multi(multi) => {
                let mut record = match value {
                    Some(Value::Record(record)) => record,
                    Some(other) => return Some(other),
                    None => Default::default(),
                };

                for (name, subfield) in &multi.fields {
                    let current = record.remove(name);
                    if let Some(value) = subfield.with_create_default(current) {
                        record.insert(name.clone(), value);
                    }
                }

                if record.is_empty() {
                    None
                } else {
                    Some(Value::Record(record))
                }
            }
            _ => value,
        }
    }
}

impl From<ScalarField> for StorageField {
    fn from(value: ScalarField) -> Self {
        StorageField::Scalar(value)
    }
}

impl From<RelationField> for StorageField {
    fn from(value: RelationField) -> Self {
        StorageField::Relation(value)
    }
}

impl From<EnumField> for StorageField {
    fn from(value: EnumField) -> Self {
        StorageField::Enum(value)
    }
}

impl From<MultiField> for StorageField {
    fn from(value: MultiField) -> Self {
        StorageField::Multi(value)
    }
}
