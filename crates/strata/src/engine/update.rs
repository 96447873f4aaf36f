use super::{id_of, Engine};
use crate::Result;

use chrono::Utc;
use strata_core::{
    schema::{Operation, RelateOp, StorageField},
    stmt::{Value, ValueRecord},
    Error,
};

impl Engine {
    pub(crate) async fn update(
        &self,
        list: &str,
        target: &ValueRecord,
        data: ValueRecord,
    ) -> Result<ValueRecord> {
        let list = self.list(list)?;
        let unique = self.resolve_unique(list, target).await?;

        let Some(existing) = self.driver.find_unique(list.name(), &unique).await? else {
            return Err(Error::record_not_found(format!("{} where {unique}", list.name())));
        };
        let id = id_of(&existing)?;

        let mut resolved = self.resolve_input(list, Operation::Update, &data).await?;
        let mut changes = ValueRecord::new();
        let mut relations = vec![];

        for field in list.fields() {
            let value = resolved.shift_remove(field.name()).flatten();

            match field.storage() {
                StorageField::None => {}
                StorageField::Relation(_) => {
                    if let Some(value) = value {
                        relations.extend(self.parse_relation(list, field, &value, RelateOp::Update)?);
                    }
                }
                StorageField::Scalar(scalar) if scalar.updated_at && value.is_none() => {
                    changes.insert(field.name(), Value::DateTime(Utc::now()));
                }
                // subfields left out of the input keep their stored values
                StorageField::Multi(_) => {
                    if let Some(Value::Record(given)) = value {
                        let mut merged = existing
                            .get(field.name())
                            .and_then(Value::as_record)
                            .cloned()
                            .unwrap_or_default();
                        merged.merge(given);
                        changes.insert(field.name(), merged);
                    }
                }
                _ => {
                    if let Some(value) = value {
                        changes.insert(field.name(), value);
                    }
                }
            }
        }

        let writes = self.prepare_relations(relations).await?;

        let updated = if changes.is_empty() {
            existing
        } else {
            self.driver.update(list.name(), &id, changes).await?
        };

        self.apply_relations(&id, writes).await?;

        tracing::debug!(list = list.name(), id = ?id, "updated");
        Ok(updated)
    }
}
