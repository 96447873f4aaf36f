use crate::schema::{
    Arg, FieldInput, FieldOutput, FieldType, IdStrategy, IndexKind, InputObjectType, InputType,
    OutputType, Resolver, ScalarDefault, ScalarField, ScalarType,
};
use crate::stmt::Value;
use crate::{Error, Result};

/// The `id` field added to every list that does not declare one.
pub(crate) fn field(strategy: IdStrategy) -> FieldType {
    let (scalar, default) = match strategy {
        IdStrategy::Autoincrement => (ScalarType::Int, ScalarDefault::Autoincrement),
        IdStrategy::Cuid => (ScalarType::String, ScalarDefault::Cuid),
        IdStrategy::Uuid => (ScalarType::String, ScalarDefault::Uuid),
    };

    let storage = ScalarField {
        default: Some(default),
        index: Some(IndexKind::Unique),
        ..ScalarField::required(scalar)
    };

    let numeric = scalar == ScalarType::Int;
    let parse = move |value: Value| parse_id(value, numeric);

    let mut field = FieldType::new(
        storage,
        FieldOutput::new(OutputType::Id.non_null()).resolve(Resolver::from_fn(|value| {
            Ok(value.map(|value| match value {
                Value::I32(n) => Value::String(n.to_string()),
                Value::I64(n) => Value::String(n.to_string()),
                other => other,
            }))
        })),
        "strata/fields/id/views",
    );

    field.input.filter = Some(FieldInput::new(id_filter(true)).resolve(Resolver::from_fn(
        move |value| value.map(|value| map_filter(value, &parse)).transpose(),
    )));
    field.input.order_by = Some(FieldInput::new(InputType::OrderDirection));
    field.input.unique_where = Some(
        FieldInput::new(InputType::Id)
            .resolve(Resolver::from_fn(move |value| value.map(&parse).transpose())),
    );
    field.label = Some("ID".to_string());
    field
}

fn id_filter(with_not: bool) -> InputType {
    let id = || Arg::new(InputType::Id);
    let ids = || Arg::new(InputType::Id.non_null().list_of());

    let mut filter = InputObjectType::new("IDFilter")
        .field("equals", id())
        .field("in", ids())
        .field("notIn", ids())
        .field("lt", id())
        .field("lte", id())
        .field("gt", id())
        .field("gte", id());

    if with_not {
        filter = filter.field("not", id_filter(false));
    }

    InputType::Object(filter)
}

/// Converts the id operands inside an `IDFilter` value.
fn map_filter(value: Value, parse: &impl Fn(Value) -> Result<Value>) -> Result<Value> {
    match value {
        Value::Record(record) => record
            .into_iter()
            .map(|(op, operand)| {
                let operand = match (op.as_str(), operand) {
                    ("not", operand) => map_filter(operand, parse)?,
                    (_, Value::List(items)) => Value::List(
                        items.into_iter().map(parse).collect::<Result<Vec<_>>>()?,
                    ),
                    (_, operand) => parse(operand)?,
                };
                Ok((op, operand))
            })
            .collect::<Result<_>>()
            .map(Value::Record),
        other => Ok(other),
    }
}

fn parse_id(value: Value, numeric: bool) -> Result<Value> {
    match (value, numeric) {
        (Value::Null, _) => Ok(Value::Null),
        (Value::String(src), true) => src
            .parse::<i32>()
            .map(Value::I32)
            .map_err(|_| Error::invalid_argument(format!("`{src}` is not a valid id"))),
        (Value::I64(n), true) => i32::try_from(n)
            .map(Value::I32)
            .map_err(|_| Error::invalid_argument(format!("`{n}` is not a valid id"))),
        (value @ Value::I32(_), true) => Ok(value),
        (value @ Value::String(_), false) => Ok(value),
        (other, _) => Err(Error::type_conversion(other, "ID")),
    }
}
