use crate::{
    stmt::{Filter, FindManyArgsValue, RelationKey, Side, UniqueWhere, Value, ValueRecord},
    Result, Schema,
};

use async_trait::async_trait;
use std::fmt::Debug;

/// Storage backend.
///
/// Drivers receive fully resolved values: every input has passed its
/// resolver and matches the storage shape of its field.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Called once with the compiled schema before any other method.
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        let _ = schema;
        Ok(())
    }

    /// Records of `list` matching `args`, ordered, then offset by cursor and
    /// `skip`, then limited by `take`.
    async fn find_many(&self, list: &str, args: &FindManyArgsValue) -> Result<Vec<ValueRecord>>;

    async fn count(&self, list: &str, filter: &Filter) -> Result<u64>;

    async fn find_unique(&self, list: &str, target: &UniqueWhere) -> Result<Option<ValueRecord>>;

    /// Stores a new record and returns it with storage-assigned values
    /// filled in.
    async fn create(&self, list: &str, record: ValueRecord) -> Result<ValueRecord>;

    /// Merges `changes` into the record with the given id.
    async fn update(&self, list: &str, id: &Value, changes: ValueRecord) -> Result<ValueRecord>;

    /// Links two records. Linking an already-linked pair is a no-op.
    async fn connect(&self, relation: &RelationKey, left: &Value, right: &Value) -> Result<()>;

    async fn disconnect(&self, relation: &RelationKey, left: &Value, right: &Value) -> Result<()>;

    /// Ids of the records linked to `id`, which sits on `side` of the link.
    async fn linked(&self, relation: &RelationKey, side: Side, id: &Value) -> Result<Vec<Value>>;
}
