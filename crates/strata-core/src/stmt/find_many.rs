use super::{Filter, OrderBy, UniqueWhere};
use crate::{Error, Result};

use serde::Deserialize;

/// Resolved arguments of a list query.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FindManyArgsValue {
    /// Records to include. `Filter::All` when the request sent `{}`.
    pub filter: Filter,

    /// Ordering, most significant first. Empty leaves ordering to the driver.
    pub order_by: Vec<OrderBy>,

    /// Maximum number of records. `None` is unlimited.
    pub take: Option<u64>,

    /// Records to skip, applied after the cursor.
    pub skip: u64,

    /// Resume immediately after this record.
    pub cursor: Option<UniqueWhere>,
}

/// What to do with a cursor when no ordering is given, which makes "the
/// record after the cursor" undefined.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorPolicy {
    /// Fail the query with an invalid argument error.
    #[default]
    Reject,

    /// Log a warning and let the driver apply its default order.
    Warn,
}

impl FindManyArgsValue {
    pub fn filter(filter: Filter) -> FindManyArgsValue {
        FindManyArgsValue {
            filter,
            ..FindManyArgsValue::default()
        }
    }

    /// Validates raw pagination arguments.
    pub fn new(
        filter: Filter,
        order_by: Vec<OrderBy>,
        take: Option<i64>,
        skip: i64,
        cursor: Option<UniqueWhere>,
        policy: CursorPolicy,
    ) -> Result<FindManyArgsValue> {
        let take = match take {
            Some(take) => Some(u64::try_from(take).map_err(|_| {
                Error::invalid_argument(format!("`take` must not be negative, got {take}"))
            })?),
            None => None,
        };

        let skip = u64::try_from(skip)
            .map_err(|_| Error::invalid_argument(format!("`skip` must not be negative, got {skip}")))?;

        let args = FindManyArgsValue {
            filter,
            order_by,
            take,
            skip,
            cursor,
        };

        if !args.is_deterministic() {
            match policy {
                CursorPolicy::Reject => {
                    return Err(Error::invalid_argument(
                        "`cursor` requires a non-empty `orderBy`",
                    ))
                }
                CursorPolicy::Warn => {
                    tracing::warn!(
                        cursor = ?args.cursor,
                        "cursor given without orderBy; resuming under the driver's default order"
                    );
                }
            }
        }

        Ok(args)
    }

    /// A cursor only has a well-defined successor under an explicit order.
    pub fn is_deterministic(&self) -> bool {
        self.cursor.is_none() || !self.order_by.is_empty()
    }
}
