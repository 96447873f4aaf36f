use super::field::{Cardinality, ScalarType};
use super::shape::{ListInput, ListInputKind, RelateOp};
use super::ty::{Arg, InputObjectType, InputType};
use crate::stmt::{Quantifier, Value, ValueRecord};
use crate::{Error, Result};

use serde::Deserialize;

/// The relate-to and many-relation-filter input types generated for a list.
#[derive(Debug, Clone, PartialEq)]
pub struct RelateToTypes {
    pub one_for_create: InputObjectType,
    pub one_for_update: InputObjectType,
    pub many_for_create: InputObjectType,
    pub many_for_update: InputObjectType,
    pub many_where: InputObjectType,
}

/// How `set` combines with the other verbs of a to-many relate input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetPolicy {
    /// `set` may be combined with `connect` and `create`, and is applied
    /// first. `set` with `disconnect` is rejected.
    #[default]
    SetFirst,

    /// `set` must be the only verb.
    Exclusive,
}

/// A parsed to-one relate input. At most one verb is present.
#[derive(Debug, Clone, PartialEq)]
pub enum RelateOne {
    Create(ValueRecord),
    /// Unique-where of the record to link
    Connect(ValueRecord),
    Disconnect,
}

/// A parsed to-many relate input, applied as: set, disconnect, connect,
/// create.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RelateMany {
    /// Replace the linked set with exactly these records
    pub set: Option<Vec<ValueRecord>>,
    pub disconnect: Vec<ValueRecord>,
    pub connect: Vec<ValueRecord>,
    pub create: Vec<ValueRecord>,
}

/// A parsed `{ every, some, none }` filter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ManyWhere {
    pub every: Option<ValueRecord>,
    pub some: Option<ValueRecord>,
    pub none: Option<ValueRecord>,
}

impl RelateToTypes {
    pub fn for_list(list: &str) -> RelateToTypes {
        let input = |kind| InputType::Ref(ListInput::new(list, kind));
        let create = || input(ListInputKind::Create);
        let unique = || input(ListInputKind::UniqueWhere);
        let object = |kind| InputObjectType::new(ListInput::new(list, kind).type_name());
        let items = |ty: InputType| Arg::new(ty.non_null().list_of());

        RelateToTypes {
            one_for_create: object(ListInputKind::RelateTo(Cardinality::One, RelateOp::Create))
                .field("create", create())
                .field("connect", unique()),
            one_for_update: object(ListInputKind::RelateTo(Cardinality::One, RelateOp::Update))
                .field("create", create())
                .field("connect", unique())
                .field("disconnect", InputType::Scalar(ScalarType::Boolean)),
            many_for_create: object(ListInputKind::RelateTo(Cardinality::Many, RelateOp::Create))
                .field("create", items(create()))
                .field("connect", items(unique())),
            many_for_update: object(ListInputKind::RelateTo(Cardinality::Many, RelateOp::Update))
                .field("disconnect", items(unique()))
                .field("set", items(unique()))
                .field("create", items(create()))
                .field("connect", items(unique())),
            many_where: object(ListInputKind::ManyWhere)
                .field("every", input(ListInputKind::Where))
                .field("some", input(ListInputKind::Where))
                .field("none", input(ListInputKind::Where)),
        }
    }
}

impl RelateOne {
    /// Parses a to-one relate input. `Ok(None)` means no change.
    pub fn parse(path: &str, value: &Value, op: RelateOp) -> Result<Option<RelateOne>> {
        let record = match value {
            Value::Null => return Ok(None),
            Value::Record(record) => record,
            other => return Err(Error::type_conversion(other.clone(), "relate-to input")),
        };

        let allowed: &[&str] = match op {
            RelateOp::Create => &["create", "connect"],
            RelateOp::Update => &["create", "connect", "disconnect"],
        };
        reject_unknown(path, record, allowed)?;

        let create = nested_record(path, record, "create")?;
        let connect = nested_record(path, record, "connect")?;
        let disconnect = match record.get("disconnect") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::Bool(true)) => true,
            Some(other) => return Err(Error::type_conversion(other.clone(), "Boolean")),
        };

        let given: Vec<&str> = [
            ("create", create.is_some()),
            ("connect", connect.is_some()),
            ("disconnect", disconnect),
        ]
        .into_iter()
        .filter_map(|(verb, present)| present.then_some(verb))
        .collect();

        if given.len() > 1 {
            return Err(Error::ambiguous_relation_input(
                path,
                format!("only one of {} may be provided", quote_all(&given)),
            ));
        }

        Ok(create
            .map(RelateOne::Create)
            .or(connect.map(RelateOne::Connect))
            .or(disconnect.then_some(RelateOne::Disconnect)))
    }
}

impl RelateMany {
    /// Parses a to-many relate input. `Ok(None)` means no change.
    pub fn parse(
        path: &str,
        value: &Value,
        op: RelateOp,
        policy: SetPolicy,
    ) -> Result<Option<RelateMany>> {
        let record = match value {
            Value::Null => return Ok(None),
            Value::Record(record) => record,
            other => return Err(Error::type_conversion(other.clone(), "relate-to input")),
        };

        let allowed: &[&str] = match op {
            RelateOp::Create => &["create", "connect"],
            RelateOp::Update => &["set", "disconnect", "connect", "create"],
        };
        reject_unknown(path, record, allowed)?;

        let relate = RelateMany {
            set: nested_list(path, record, "set")?,
            disconnect: nested_list(path, record, "disconnect")?.unwrap_or_default(),
            connect: nested_list(path, record, "connect")?.unwrap_or_default(),
            create: nested_list(path, record, "create")?.unwrap_or_default(),
        };

        if relate.set.is_some() {
            // empty lists change nothing, so they never conflict
            let given = [
                ("disconnect", !relate.disconnect.is_empty()),
                ("connect", !relate.connect.is_empty()),
                ("create", !relate.create.is_empty()),
            ];
            let candidates: &[&str] = match policy {
                SetPolicy::SetFirst => &["disconnect"],
                SetPolicy::Exclusive => &["disconnect", "connect", "create"],
            };
            let conflicting: Vec<&str> = given
                .into_iter()
                .filter(|(verb, present)| *present && candidates.contains(verb))
                .map(|(verb, _)| verb)
                .collect();

            if !conflicting.is_empty() {
                return Err(Error::ambiguous_relation_input(
                    path,
                    format!("`set` cannot be combined with {}", quote_all(&conflicting)),
                ));
            }
        }

        Ok((!relate.is_empty()).then_some(relate))
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_none()
            && self.disconnect.is_empty()
            && self.connect.is_empty()
            && self.create.is_empty()
    }
}

impl ManyWhere {
    pub fn parse(path: &str, record: &ValueRecord) -> Result<ManyWhere> {
        reject_unknown(path, record, &["every", "some", "none"])?;

        Ok(ManyWhere {
            every: nested_record(path, record, "every")?,
            some: nested_record(path, record, "some")?,
            none: nested_record(path, record, "none")?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantifier, &ValueRecord)> + '_ {
        [
            (Quantifier::Every, self.every.as_ref()),
            (Quantifier::Some, self.some.as_ref()),
            (Quantifier::None, self.none.as_ref()),
        ]
        .into_iter()
        .filter_map(|(quantifier, filter)| Some((quantifier, filter?)))
    }
}

fn reject_unknown(path: &str, record: &ValueRecord, allowed: &[&str]) -> Result<()> {
    match record.keys().find(|key| !allowed.contains(key)) {
        Some(key) => Err(Error::invalid_argument(format!(
            "`{key}` is not a valid key for `{path}`; expected {}",
            quote_all(allowed)
        ))),
        None => Ok(()),
    }
}

fn nested_record(path: &str, record: &ValueRecord, key: &str) -> Result<Option<ValueRecord>> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Record(nested)) => Ok(Some(nested.clone())),
        Some(other) => Err(Error::type_conversion(other.clone(), "input object")
            .context(crate::err!("{path}.{key}"))),
    }
}

fn nested_list(path: &str, record: &ValueRecord, key: &str) -> Result<Option<Vec<ValueRecord>>> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::List(items)) => items
            .iter()
            .map(|item| match item {
                Value::Record(nested) => Ok(nested.clone()),
                other => Err(Error::type_conversion(other.clone(), "input object")
                    .context(crate::err!("{path}.{key}"))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(other) => Err(Error::type_conversion(other.clone(), "List")
            .context(crate::err!("{path}.{key}"))),
    }
}

fn quote_all(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("`{item}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
