use super::Db;
use crate::Result;

use strata_core::{
    schema::{self, Config, ListDef},
    Driver, Schema,
};

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    core: schema::Builder,
}

impl Builder {
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.core.config(config);
        self
    }

    pub fn list(&mut self, list: ListDef) -> &mut Self {
        self.core.list(list);
        self
    }

    /// Compiles the schema without connecting to storage.
    pub fn build_schema(self) -> Result<Schema> {
        self.core.build()
    }

    pub async fn connect(self, mut driver: impl Driver) -> Result<Db> {
        let schema = self.core.build()?;
        driver.register_schema(&schema).await?;

        tracing::debug!(
            lists = schema.lists().count(),
            driver = ?driver,
            "connected"
        );

        Ok(Db::new(Arc::new(schema), Arc::new(driver)))
    }
}
