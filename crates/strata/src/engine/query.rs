use super::Engine;
use crate::Result;

use async_recursion::async_recursion;
use strata_core::{
    schema::{FieldDescriptor, List, ManyWhere, Operation, StorageField},
    stmt::{
        Direction, FieldOp, Filter, FindManyArgsValue, OrderBy, Quantifier, QueryMode,
        RelationFilter, UniqueWhere, Value, ValueRecord,
    },
    Error,
};

impl Engine {
    pub(crate) async fn find_one(&self, list: &str, target: &ValueRecord) -> Result<Option<ValueRecord>> {
        let list = self.list(list)?;
        let unique = self.resolve_unique(list, target).await?;
        self.driver.find_unique(list.name(), &unique).await
    }

    pub(crate) async fn find_many(&self, list: &str, args: &ValueRecord) -> Result<Vec<ValueRecord>> {
        let list = self.list(list)?;
        let args = self.resolve_find_many_args(list, args).await?;

        tracing::debug!(list = list.name(), ?args, "find many");
        self.driver.find_many(list.name(), &args).await
    }

    pub(crate) async fn count(&self, list: &str, filter: &ValueRecord) -> Result<u64> {
        let list = self.list(list)?;
        let filter = self.resolve_where(list, filter).await?;
        self.driver.count(list.name(), &filter).await
    }

    /// Resolves raw `where`, `orderBy`, `take`, `skip` and `cursor`
    /// arguments. Absent arguments take their declared defaults.
    pub(crate) async fn resolve_find_many_args(
        &self,
        list: &List,
        args: &ValueRecord,
    ) -> Result<FindManyArgsValue> {
        let declared = &list.types().find_many_args;

        if let Some(key) = args.keys().find(|key| declared.get(key).is_none()) {
            return Err(Error::invalid_argument(format!(
                "`{key}` is not a query argument of `{}`",
                list.name()
            )));
        }

        let filter = match args.get("where") {
            None | Some(Value::Null) => Filter::All,
            Some(Value::Record(filter)) => self.resolve_where(list, filter).await?,
            Some(other) => return Err(Error::type_conversion(other.clone(), "where input")),
        };

        let order_by = match args.get("orderBy") {
            None | Some(Value::Null) => vec![],
            Some(Value::List(items)) => self.resolve_order_by(list, items).await?,
            Some(Value::Record(item)) => {
                self.resolve_order_by(list, &[Value::Record(item.clone())]).await?
            }
            Some(other) => return Err(Error::type_conversion(other.clone(), "orderBy input")),
        };

        let take = match args.get("take") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_i64()
                    .ok_or_else(|| Error::type_conversion(value.clone(), "Int"))?,
            ),
        };

        let skip = match args.get("skip") {
            None | Some(Value::Null) => 0,
            Some(value) => value
                .as_i64()
                .ok_or_else(|| Error::type_conversion(value.clone(), "Int"))?,
        };

        let cursor = match args.get("cursor") {
            None | Some(Value::Null) => None,
            Some(Value::Record(cursor)) => Some(self.resolve_unique(list, cursor).await?),
            Some(other) => return Err(Error::type_conversion(other.clone(), "unique where input")),
        };

        FindManyArgsValue::new(
            filter,
            order_by,
            take,
            skip,
            cursor,
            self.schema.config().cursor,
        )
    }

    /// Resolves a unique-where input: exactly one field, non-null, through
    /// that field's `uniqueWhere` resolver.
    pub(crate) async fn resolve_unique(&self, list: &List, target: &ValueRecord) -> Result<UniqueWhere> {
        let given: Vec<_> = target.iter().filter(|(_, value)| !value.is_null()).collect();

        let [(name, value)] = given[..] else {
            return Err(Error::invalid_argument(format!(
                "a unique where input for `{}` needs exactly one non-null field, got {}",
                list.name(),
                given.len()
            )));
        };

        let field = self.input_field(list, name, Operation::UniqueWhere)?;
        let resolved = self
            .resolve_query_value(field, Operation::UniqueWhere, value.clone())
            .await?;

        match resolved {
            Some(value) if !value.is_null() => Ok(UniqueWhere::new(name, value)),
            _ => Err(Error::invalid_argument(format!(
                "`{}` resolved to no value for a unique where",
                field.path()
            ))),
        }
    }

    /// Resolves a `where` input into a filter tree.
    #[async_recursion]
    pub(crate) async fn resolve_where(&self, list: &List, input: &ValueRecord) -> Result<Filter> {
        let mut filters = vec![];

        for (key, value) in input.iter() {
            match key {
                "AND" | "OR" | "NOT" => {
                    let items = match value {
                        Value::List(items) => items.clone(),
                        Value::Record(_) => vec![value.clone()],
                        other => return Err(Error::type_conversion(other.clone(), "List")),
                    };

                    let mut operands = Vec::with_capacity(items.len());
                    for item in items {
                        let item = item.into_record()?;
                        operands.push(self.resolve_where(list, &item).await?);
                    }

                    filters.push(match key {
                        "AND" => Filter::and_from_vec(operands),
                        "OR" => Filter::Or(operands),
                        _ => Filter::and_from_vec(
                            operands
                                .into_iter()
                                .map(|operand| Filter::Not(Box::new(operand)))
                                .collect(),
                        ),
                    });
                }
                name => {
                    let field = self.input_field(list, name, Operation::Filter)?;
                    let resolved = self
                        .resolve_query_value(field, Operation::Filter, value.clone())
                        .await?;

                    if let Some(resolved) = resolved {
                        filters.push(self.field_filter(list, field, resolved).await?);
                    }
                }
            }
        }

        Ok(Filter::and_from_vec(filters))
    }

    #[async_recursion]
    async fn field_filter(&self, list: &List, field: &FieldDescriptor, value: Value) -> Result<Filter> {
        let name = field.name().to_string();

        match field.storage() {
            StorageField::Scalar(_) | StorageField::Enum(_) => {
                field_ops(vec![name], value, QueryMode::Default)
            }
            StorageField::Multi(_) => {
                let record = value.into_record()?;
                let filters = record
                    .into_iter()
                    .map(|(sub, value)| {
                        field_ops(vec![name.clone(), sub], value, QueryMode::Default)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Filter::and_from_vec(filters))
            }
            StorageField::Relation(relation) => {
                let info = self
                    .schema
                    .relation(list.name(), field.name())
                    .ok_or_else(|| strata_core::err!("`{}` is not a relation field", field.path()))?;
                let target = self.list(&relation.target)?;

                let quantified: Vec<(Quantifier, ValueRecord)> = match (relation.is_many(), value) {
                    // `author: null` matches records with no related record
                    (false, Value::Null) => vec![(Quantifier::None, ValueRecord::new())],
                    (false, Value::Record(filter)) => vec![(Quantifier::Some, filter)],
                    (true, Value::Record(filter)) => ManyWhere::parse(&field.path(), &filter)?
                        .iter()
                        .map(|(quantifier, filter)| (quantifier, filter.clone()))
                        .collect(),
                    (_, other) => {
                        return Err(Error::invalid_argument(format!(
                            "`{}` cannot be filtered by {}",
                            field.path(),
                            other.ty_name()
                        )))
                    }
                };

                let mut filters = vec![];
                for (quantifier, filter) in quantified {
                    filters.push(Filter::Relation(RelationFilter {
                        relation: info.key.clone(),
                        side: info.side,
                        target: info.target.clone(),
                        quantifier,
                        filter: Box::new(self.resolve_where(target, &filter).await?),
                    }));
                }
                Ok(Filter::and_from_vec(filters))
            }
            StorageField::None => Err(Error::invalid_argument(format!(
                "`{}` is not stored and cannot be filtered",
                field.path()
            ))),
        }
    }

    async fn resolve_order_by(&self, list: &List, items: &[Value]) -> Result<Vec<OrderBy>> {
        let mut order_by = vec![];

        for item in items {
            let Value::Record(item) = item else {
                return Err(Error::type_conversion(item.clone(), "orderBy input"));
            };

            let given: Vec<_> = item.iter().filter(|(_, value)| !value.is_null()).collect();
            let [(name, value)] = given[..] else {
                return Err(Error::invalid_argument(format!(
                    "each orderBy item needs exactly one field, got {}",
                    given.len()
                )));
            };

            let field = self.input_field(list, name, Operation::OrderBy)?;
            let Some(resolved) = self
                .resolve_query_value(field, Operation::OrderBy, value.clone())
                .await?
            else {
                continue;
            };

            match resolved {
                Value::String(direction) => order_by.push(OrderBy {
                    path: vec![name.to_string()],
                    direction: parse_direction(&direction)?,
                }),
                Value::Record(subfields) => {
                    for (sub, direction) in subfields {
                        let Value::String(direction) = direction else {
                            continue;
                        };
                        order_by.push(OrderBy {
                            path: vec![name.to_string(), sub],
                            direction: parse_direction(&direction)?,
                        });
                    }
                }
                other => return Err(Error::type_conversion(other, "OrderDirection")),
            }
        }

        Ok(order_by)
    }

    fn input_field<'a>(&self, list: &'a List, name: &str, op: Operation) -> Result<&'a FieldDescriptor> {
        list.field(name)
            .filter(|field| field.input(op).is_some())
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "`{name}` is not a {op} input of `{}`",
                    list.name()
                ))
            })
    }

    /// Runs a query-side resolver and checks its result.
    async fn resolve_query_value(
        &self,
        field: &FieldDescriptor,
        op: Operation,
        value: Value,
    ) -> Result<Option<Value>> {
        let Some(input) = field.input(op) else {
            return Ok(None);
        };

        let cx = self.resolve_cx(field.list(), field.name(), op);
        let resolved = input
            .resolve
            .resolve(Some(value), &cx)
            .await
            .map_err(|err| Error::resolution(field.path(), err))?;

        if !input.target.admits(resolved.as_ref()) {
            return Err(Error::resolution(
                field.path(),
                strata_core::err!(
                    "resolver returned {}, which does not fit `{}`",
                    super::describe(resolved.as_ref()),
                    input.target
                ),
            ));
        }

        Ok(resolved)
    }
}

fn parse_direction(src: &str) -> Result<Direction> {
    Direction::parse(src)
        .ok_or_else(|| Error::invalid_argument(format!("`{src}` is not an order direction")))
}

/// Translates a scalar filter object such as `{ equals, in, not: { .. } }`.
/// A `mode` key applies to every operator of the object, nested `not`
/// included.
fn field_ops(path: Vec<String>, value: Value, mode: QueryMode) -> Result<Filter> {
    let mut record = match value {
        Value::Record(record) => record,
        Value::Null => {
            return Err(Error::invalid_argument(format!(
                "`{}` cannot be filtered by null",
                path.join(".")
            )))
        }
        other => return Err(Error::type_conversion(other, "filter input")),
    };

    let mode = match record.remove("mode") {
        None | Some(Value::Null) => mode,
        Some(Value::String(src)) => QueryMode::parse(&src).ok_or_else(|| {
            Error::invalid_argument(format!("`{src}` is not a query mode"))
        })?,
        Some(other) => return Err(Error::type_conversion(other, "QueryMode")),
    };

    let mut filters = vec![];

    for (op, operand) in record {
        let field = |op: FieldOp| Filter::Field {
            path: path.clone(),
            op: op.with_mode(mode),
        };

        let filter = match (op.as_str(), operand) {
            // `equals: null` matches missing values; other null operands are no-ops
            ("equals", operand) => field(FieldOp::Equals(operand)),
            (_, Value::Null) => continue,
            ("not", Value::Record(nested)) => {
                Filter::Not(Box::new(field_ops(path.clone(), Value::Record(nested), mode)?))
            }
            ("not", operand) => field(FieldOp::NotEquals(operand)),
            ("in", operand) => field(FieldOp::In(operand.into_list()?)),
            ("notIn", operand) => field(FieldOp::NotIn(operand.into_list()?)),
            ("lt", operand) => field(FieldOp::Lt(operand)),
            ("lte", operand) => field(FieldOp::Lte(operand)),
            ("gt", operand) => field(FieldOp::Gt(operand)),
            ("gte", operand) => field(FieldOp::Gte(operand)),
            ("contains", operand) => field(FieldOp::Contains(operand.into_string()?)),
            ("startsWith", operand) => field(FieldOp::StartsWith(operand.into_string()?)),
            ("endsWith", operand) => field(FieldOp::EndsWith(operand.into_string()?)),
            (other, _) => {
                return Err(Error::invalid_argument(format!(
                    "`{other}` is not a filter operator of `{}`",
                    path.join(".")
                )))
            }
        };

        filters.push(filter);
    }

    Ok(Filter::and_from_vec(filters))
}
