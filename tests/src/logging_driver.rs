use std::sync::{Arc, Mutex};
use strata_core::{
    async_trait,
    stmt::{Filter, FindManyArgsValue, RelationKey, Side, UniqueWhere, Value, ValueRecord},
    Driver, Result, Schema,
};

#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

/// One driver call, recorded after it succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverOp {
    FindMany {
        list: String,
        args: FindManyArgsValue,
    },
    Count {
        list: String,
        filter: Filter,
    },
    FindUnique {
        list: String,
        target: UniqueWhere,
    },
    Create {
        list: String,
        record: ValueRecord,
    },
    Update {
        list: String,
        id: Value,
        changes: ValueRecord,
    },
    Connect {
        relation: RelationKey,
        left: Value,
        right: Value,
    },
    Disconnect {
        relation: RelationKey,
        left: Value,
        right: Value,
    },
    Linked {
        relation: RelationKey,
        side: Side,
        id: Value,
    },
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    fn log(&self, op: DriverOp) {
        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(op);
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.register_schema(schema).await
    }

    async fn find_many(&self, list: &str, args: &FindManyArgsValue) -> Result<Vec<ValueRecord>> {
        let rows = self.inner.find_many(list, args).await?;
        self.log(DriverOp::FindMany {
            list: list.to_string(),
            args: args.clone(),
        });
        Ok(rows)
    }

    async fn count(&self, list: &str, filter: &Filter) -> Result<u64> {
        let count = self.inner.count(list, filter).await?;
        self.log(DriverOp::Count {
            list: list.to_string(),
            filter: filter.clone(),
        });
        Ok(count)
    }

    async fn find_unique(&self, list: &str, target: &UniqueWhere) -> Result<Option<ValueRecord>> {
        let row = self.inner.find_unique(list, target).await?;
        self.log(DriverOp::FindUnique {
            list: list.to_string(),
            target: target.clone(),
        });
        Ok(row)
    }

    async fn create(&self, list: &str, record: ValueRecord) -> Result<ValueRecord> {
        let created = self.inner.create(list, record.clone()).await?;
        self.log(DriverOp::Create {
            list: list.to_string(),
            record,
        });
        Ok(created)
    }

    async fn update(&self, list: &str, id: &Value, changes: ValueRecord) -> Result<ValueRecord> {
        let updated = self.inner.update(list, id, changes.clone()).await?;
        self.log(DriverOp::Update {
            list: list.to_string(),
            id: id.clone(),
            changes,
        });
        Ok(updated)
    }

    async fn connect(&self, relation: &RelationKey, left: &Value, right: &Value) -> Result<()> {
        self.inner.connect(relation, left, right).await?;
        self.log(DriverOp::Connect {
            relation: relation.clone(),
            left: left.clone(),
            right: right.clone(),
        });
        Ok(())
    }

    async fn disconnect(&self, relation: &RelationKey, left: &Value, right: &Value) -> Result<()> {
        self.inner.disconnect(relation, left, right).await?;
        self.log(DriverOp::Disconnect {
            relation: relation.clone(),
            left: left.clone(),
            right: right.clone(),
        });
        Ok(())
    }

    async fn linked(&self, relation: &RelationKey, side: Side, id: &Value) -> Result<Vec<Value>> {
        let ids = self.inner.linked(relation, side, id).await?;
        self.log(DriverOp::Linked {
            relation: relation.clone(),
            side,
            id: id.clone(),
        });
        Ok(ids)
    }
}
