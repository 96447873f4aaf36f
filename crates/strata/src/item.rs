use strata_core::stmt::{Value, ValueRecord};

/// A stored record of some list.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    list: String,
    record: ValueRecord,
}

impl Item {
    pub(crate) fn new(list: impl Into<String>, record: ValueRecord) -> Item {
        Item {
            list: list.into(),
            record,
        }
    }

    pub fn list(&self) -> &str {
        &self.list
    }

    pub fn id(&self) -> &Value {
        self.record.get("id").unwrap_or(&Value::Null)
    }

    /// Stored value of `field`, before output resolution.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.record.get(field)
    }

    pub fn record(&self) -> &ValueRecord {
        &self.record
    }

    pub fn into_record(self) -> ValueRecord {
        self.record
    }
}
