use super::{Value, ValueRecord};

/// Identifies exactly one record by a single unique field.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueWhere {
    pub field: String,
    pub value: Value,
}

impl UniqueWhere {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> UniqueWhere {
        UniqueWhere {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<Value>) -> UniqueWhere {
        UniqueWhere::new("id", value)
    }

    pub fn matches(&self, record: &ValueRecord) -> bool {
        record
            .get(&self.field)
            .is_some_and(|value| !value.is_null() && value.loosely_eq(&self.value))
    }
}

impl core::fmt::Display for UniqueWhere {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{{{}: {:?}}}", self.field, self.value)
    }
}
