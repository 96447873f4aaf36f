//! Built-in field types.
//!
//! Each function takes a config and returns a field type function for
//! [`ListDef::field`](crate::ListDef::field).

mod filter;

mod checkbox;
pub use checkbox::{checkbox, CheckboxConfig};

mod integer;
pub use integer::{integer, IntegerConfig};

mod relationship;
pub use relationship::{relationship, RelationshipConfig};

mod select;
pub use select::{select, SelectConfig};

mod text;
pub use text::{text, TextConfig};

mod timestamp;
pub use timestamp::{timestamp, TimestampConfig};

mod virtual_field;
pub use virtual_field::{virtual_field, VirtualConfig};

use strata_core::{
    err,
    schema::{FieldMode, IndexKind, Resolver},
    stmt::Value,
};

/// Storage mode for a single-valued field.
fn mode(is_nullable: bool) -> FieldMode {
    if is_nullable {
        FieldMode::Optional
    } else {
        FieldMode::Required
    }
}

fn index(is_unique: bool, is_indexed: bool) -> Option<IndexKind> {
    match (is_unique, is_indexed) {
        (true, _) => Some(IndexKind::Unique),
        (false, true) => Some(IndexKind::Index),
        (false, false) => None,
    }
}

/// Rejects an explicit `null` for a field whose storage is not nullable.
/// Absent values pass through.
fn reject_null(kind: &'static str) -> Resolver {
    Resolver::from_fn(move |value| match value {
        Some(Value::Null) => Err(err!("{kind} fields cannot be set to null")),
        value => Ok(value),
    })
}
