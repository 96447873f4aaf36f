mod store;
use store::Store;

use std::sync::{Mutex, MutexGuard};
use strata_core::{
    async_trait, err,
    stmt::{Filter, FindManyArgsValue, RelationKey, Side, UniqueWhere, Value, ValueRecord},
    Driver, Result, Schema,
};

/// Driver that keeps every list in process memory.
///
/// Autoincrement fields are numbered per list and field, starting at 1.
/// `dbgenerated` defaults are not evaluated and leave the field unset.
#[derive(Debug, Default)]
pub struct Memory {
    store: Mutex<Store>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory::default()
    }

    fn store(&self) -> Result<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| err!("memory store lock poisoned"))
    }
}

#[async_trait]
impl Driver for Memory {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        let store = self
            .store
            .get_mut()
            .map_err(|_| err!("memory store lock poisoned"))?;

        for list in schema.lists() {
            store.register(list);
        }

        tracing::debug!(lists = schema.lists().count(), "memory store ready");
        Ok(())
    }

    async fn find_many(&self, list: &str, args: &FindManyArgsValue) -> Result<Vec<ValueRecord>> {
        self.store()?.find_many(list, args)
    }

    async fn count(&self, list: &str, filter: &Filter) -> Result<u64> {
        self.store()?.count(list, filter)
    }

    async fn find_unique(&self, list: &str, target: &UniqueWhere) -> Result<Option<ValueRecord>> {
        let store = self.store()?;
        let table = store.table(list)?;
        Ok(table.rows.iter().find(|row| target.matches(row)).cloned())
    }

    async fn create(&self, list: &str, record: ValueRecord) -> Result<ValueRecord> {
        self.store()?.table_mut(list)?.insert(record)
    }

    async fn update(&self, list: &str, id: &Value, changes: ValueRecord) -> Result<ValueRecord> {
        self.store()?.table_mut(list)?.update(id, changes)
    }

    async fn connect(&self, relation: &RelationKey, left: &Value, right: &Value) -> Result<()> {
        self.store()?.connect(relation, left, right);
        Ok(())
    }

    async fn disconnect(&self, relation: &RelationKey, left: &Value, right: &Value) -> Result<()> {
        self.store()?.disconnect(relation, left, right);
        Ok(())
    }

    async fn linked(&self, relation: &RelationKey, side: Side, id: &Value) -> Result<Vec<Value>> {
        Ok(self.store()?.linked(relation, side, id))
    }
}
