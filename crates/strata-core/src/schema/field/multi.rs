use super::StorageField;

use indexmap::IndexMap;

/// One API field backed by several storage fields.
///
/// Only scalar and enum subfields are valid; anything else is reported when
/// the schema is built. Composition is one level deep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiField {
    pub fields: IndexMap<String, StorageField>,
}

impl MultiField {
    pub fn new<I, S>(fields: I) -> MultiField
    where
        I: IntoIterator<Item = (S, StorageField)>,
        S: Into<String>,
    {
        MultiField {
            fields: fields
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        }
    }
}
