pub mod db;
pub use db::Db;

mod engine;

pub mod field;

mod item;
pub use item::Item;

mod output;
pub use output::{Output, OutputRecord};

pub mod relation;
pub use relation::{RelatedMany, RelatedOne};

pub use strata_core::{
    driver, err, record, schema, stmt, Driver, Error, Result, Schema,
};

pub use strata_core::schema::{Config, ListDef};
