//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

pub use crate::{DbTest, DriverOp};

pub use crate::{lists, tests};

pub use std_util::prelude::*;

pub use strata::{
    field::{self, *},
    record,
    schema::{Config, IdStrategy, ListDef, OutputType, Resolver, ScalarType, SetPolicy},
    stmt::{CursorPolicy, Value},
    Db, Error, Item,
};
