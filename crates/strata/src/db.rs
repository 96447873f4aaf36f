mod builder;
pub use builder::Builder;

use crate::{engine::Engine, Item, OutputRecord, Result};

use strata_core::{stmt::ValueRecord, Driver, Schema};

use std::sync::Arc;

/// Handle to a compiled schema and its storage. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Db {
    engine: Engine,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(schema: Arc<Schema>, driver: Arc<dyn Driver>) -> Db {
        Db {
            engine: Engine::new(schema, driver),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.engine.schema
    }

    /// Creates a record from a create input, then applies its relation
    /// inputs.
    pub async fn create(&self, list: &str, data: ValueRecord) -> Result<Item> {
        let record = self.engine.create(list, data).await?;
        Ok(Item::new(list, record))
    }

    /// Updates the record identified by the unique-where `target`.
    pub async fn update(&self, list: &str, target: ValueRecord, data: ValueRecord) -> Result<Item> {
        let record = self.engine.update(list, &target, data).await?;
        Ok(Item::new(list, record))
    }

    /// The record identified by the unique-where `target`, if any.
    pub async fn find_one(&self, list: &str, target: ValueRecord) -> Result<Option<Item>> {
        let record = self.engine.find_one(list, &target).await?;
        Ok(record.map(|record| Item::new(list, record)))
    }

    /// Runs a list query. `args` holds `where`, `orderBy`, `take`, `skip` and
    /// `cursor`, each optional.
    pub async fn find_many(&self, list: &str, args: ValueRecord) -> Result<Vec<Item>> {
        let records = self.engine.find_many(list, &args).await?;
        Ok(records
            .into_iter()
            .map(|record| Item::new(list, record))
            .collect())
    }

    pub async fn count(&self, list: &str, filter: ValueRecord) -> Result<u64> {
        self.engine.count(list, &filter).await
    }

    /// Resolves every output field of `item`. Failing fields are reported
    /// per field; the rest still resolve.
    pub async fn output(&self, item: &Item) -> Result<OutputRecord> {
        self.engine.output(item.list(), item.record()).await
    }
}
