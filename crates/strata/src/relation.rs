//! Lazy handles to the records on the other end of a relation.

use crate::{engine::Engine, Item, Result};

use strata_core::{
    schema::RelationInfo,
    stmt::{FieldOp, Filter, Value, ValueRecord},
    Error,
};

/// The related record of a `one` relation, loaded on demand.
#[derive(Debug)]
pub struct RelatedOne {
    engine: Engine,
    info: RelationInfo,
    from: Value,
}

/// The related records of a `many` relation, queried on demand.
#[derive(Debug)]
pub struct RelatedMany {
    engine: Engine,
    info: RelationInfo,
    from: Value,
}

impl RelatedOne {
    pub(crate) fn new(engine: Engine, info: RelationInfo, from: Value) -> RelatedOne {
        RelatedOne { engine, info, from }
    }

    pub fn target(&self) -> &str {
        &self.info.target
    }

    pub async fn get(&self) -> Result<Option<Item>> {
        let ids = self.linked().await?;

        let [id] = &ids[..] else {
            if ids.len() > 1 {
                return Err(strata_core::err!(
                    "`{}` links {} records to a one relation",
                    self.info.key,
                    ids.len()
                ));
            }
            return Ok(None);
        };

        let target = strata_core::stmt::UniqueWhere::id(id.clone());
        let record = self
            .engine
            .driver
            .find_unique(&self.info.target, &target)
            .await?;
        Ok(record.map(|record| Item::new(&self.info.target, record)))
    }

    async fn linked(&self) -> Result<Vec<Value>> {
        self.engine
            .driver
            .linked(&self.info.key, self.info.side, &self.from)
            .await
    }
}

impl RelatedMany {
    pub(crate) fn new(engine: Engine, info: RelationInfo, from: Value) -> RelatedMany {
        RelatedMany { engine, info, from }
    }

    pub fn target(&self) -> &str {
        &self.info.target
    }

    /// Queries the related records. `args` takes the same arguments as a
    /// list query, scoped to this relation.
    pub async fn find_many(&self, args: ValueRecord) -> Result<Vec<Item>> {
        let list = self.engine.schema.list(&self.info.target).ok_or_else(|| {
            Error::invalid_argument(format!("no list named `{}`", self.info.target))
        })?;

        let mut resolved = self.engine.resolve_find_many_args(list, &args).await?;
        resolved.filter = Filter::and_from_vec(vec![self.scope().await?, resolved.filter]);

        let records = self
            .engine
            .driver
            .find_many(&self.info.target, &resolved)
            .await?;
        Ok(records
            .into_iter()
            .map(|record| Item::new(&self.info.target, record))
            .collect())
    }

    pub async fn count(&self, filter: ValueRecord) -> Result<u64> {
        let list = self.engine.schema.list(&self.info.target).ok_or_else(|| {
            Error::invalid_argument(format!("no list named `{}`", self.info.target))
        })?;

        let filter = self.engine.resolve_where(list, &filter).await?;
        let filter = Filter::and_from_vec(vec![self.scope().await?, filter]);
        self.engine.driver.count(&self.info.target, &filter).await
    }

    /// Restricts a query to the records currently linked.
    async fn scope(&self) -> Result<Filter> {
        let ids = self
            .engine
            .driver
            .linked(&self.info.key, self.info.side, &self.from)
            .await?;
        Ok(Filter::field("id", FieldOp::In(ids)))
    }
}
