mod create;
mod input;
mod output;
mod query;
mod relate;
mod update;

use crate::Result;

use strata_core::{
    schema::{List, Operation, ResolveCx},
    stmt::{Value, ValueRecord},
    Driver, Error, Schema,
};

use std::sync::Arc;

/// Resolves requests against the schema and forwards resolved values to the
/// driver.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    pub(crate) schema: Arc<Schema>,
    pub(crate) driver: Arc<dyn Driver>,
}

impl Engine {
    pub(crate) fn new(schema: Arc<Schema>, driver: Arc<dyn Driver>) -> Engine {
        Engine { schema, driver }
    }

    fn list(&self, name: &str) -> Result<&List> {
        self.schema
            .list(name)
            .ok_or_else(|| Error::invalid_argument(format!("no list named `{name}`")))
    }

    fn resolve_cx<'a>(&'a self, list: &'a str, field: &'a str, operation: Operation) -> ResolveCx<'a> {
        ResolveCx {
            list,
            field,
            operation,
            driver: &*self.driver,
            item: None,
        }
    }
}

fn id_of(record: &ValueRecord) -> Result<Value> {
    match record.get("id") {
        Some(id) if !id.is_null() => Ok(id.clone()),
        _ => Err(strata_core::err!("record has no id")),
    }
}

/// Short description of a resolved value for error messages.
fn describe(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(value) => value.ty_name(),
    }
}
