use super::relate::RelationWrite;
use super::{id_of, Engine};
use crate::Result;

use async_recursion::async_recursion;
use strata_core::{
    schema::{Operation, RelateOp, StorageField},
    stmt::ValueRecord,
};

/// A create whose inputs, defaults and nested relation inputs are fully
/// resolved. Writing it cannot fail on a resolver.
#[derive(Debug)]
pub(super) struct PreparedCreate {
    list: String,
    record: ValueRecord,
    relations: Vec<RelationWrite>,
}

impl Engine {
    pub(crate) async fn create(&self, list: &str, data: ValueRecord) -> Result<ValueRecord> {
        let prepared = self.prepare_create(list, data).await?;
        self.write_create(prepared).await
    }

    /// Resolves a create input and every nested create below it.
    #[async_recursion]
    pub(super) async fn prepare_create(&self, list: &str, data: ValueRecord) -> Result<PreparedCreate> {
        let list = self.list(list)?;
        let mut resolved = self.resolve_input(list, Operation::Create, &data).await?;

        let mut record = ValueRecord::new();
        let mut relations = vec![];

        for field in list.fields() {
            let value = resolved.shift_remove(field.name()).flatten();

            match field.storage() {
                StorageField::None => {}
                StorageField::Relation(_) => {
                    if let Some(value) = value {
                        relations.extend(self.parse_relation(list, field, &value, RelateOp::Create)?);
                    }
                }
                storage => {
                    if let Some(value) = storage.with_create_default(value) {
                        record.insert(field.name(), value);
                    }
                }
            }
        }

        Ok(PreparedCreate {
            list: list.name().to_string(),
            record,
            relations: self.prepare_relations(relations).await?,
        })
    }

    #[async_recursion]
    pub(super) async fn write_create(&self, prepared: PreparedCreate) -> Result<ValueRecord> {
        let PreparedCreate {
            list,
            record,
            relations,
        } = prepared;

        let created = self.driver.create(&list, record).await?;
        let id = id_of(&created)?;

        self.apply_relations(&id, relations).await?;

        tracing::debug!(list = %list, id = ?id, "created");
        Ok(created)
    }
}
