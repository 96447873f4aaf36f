use crate::{Error, RelatedMany, RelatedOne, Result};

use indexmap::IndexMap;
use strata_core::stmt::Value;

/// The resolved output of one item. Each field carries its own result.
#[derive(Debug)]
pub struct OutputRecord {
    fields: IndexMap<String, Result<Output>>,
}

/// One resolved output field.
#[derive(Debug)]
pub enum Output {
    /// A scalar result. `None` leaves the field out of the response.
    Value(Option<Value>),

    One(RelatedOne),

    Many(RelatedMany),
}

impl OutputRecord {
    pub(crate) fn new(fields: IndexMap<String, Result<Output>>) -> OutputRecord {
        OutputRecord { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Result<Output>> {
        self.fields.get(field)
    }

    /// The resolved scalar value of `field`. `None` for relation fields,
    /// failed fields, and fields that resolved to nothing.
    pub fn value(&self, field: &str) -> Option<&Value> {
        match self.fields.get(field)? {
            Ok(Output::Value(value)) => value.as_ref(),
            _ => None,
        }
    }

    /// Failed fields with their errors.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &Error)> + '_ {
        self.fields
            .iter()
            .filter_map(|(name, result)| Some((name.as_str(), result.as_ref().err()?)))
    }

    pub fn is_complete(&self) -> bool {
        self.fields.values().all(Result::is_ok)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Result<Output>)> + '_ {
        self.fields.iter().map(|(name, result)| (name.as_str(), result))
    }
}

impl Output {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Output::Value(value) => value.as_ref(),
            _ => None,
        }
    }

    pub fn as_one(&self) -> Option<&RelatedOne> {
        match self {
            Output::One(related) => Some(related),
            _ => None,
        }
    }

    pub fn as_many(&self) -> Option<&RelatedMany> {
        match self {
            Output::Many(related) => Some(related),
            _ => None,
        }
    }
}
