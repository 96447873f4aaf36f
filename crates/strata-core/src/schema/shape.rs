use super::field::{Cardinality, ScalarType};
use crate::stmt::{Direction, Value};

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use std::fmt;

/// Structural description of the values that may flow through one
/// operation of one field.
///
/// `Undefined` means "absent" and is distinct from `Null`. Shapes are plain
/// data; `is_subtype_of` is the only assignability relation in the system.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Undefined,
    Null,
    /// Unconstrained
    Any,
    Scalar(ScalarType),
    Enum(EnumShape),
    /// `"asc"` or `"desc"`
    OrderDirection,
    List(Box<Shape>),
    /// Exact set of keys; an absent key is checked as `Undefined`
    Record(IndexMap<String, Shape>),
    /// Any input object value
    Object,
    /// A generated input object of a list, referenced by name
    Input(ListInput),
    /// Lazily resolved related records
    Related(Related),
    Union(Vec<Shape>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumShape {
    pub name: String,
    pub values: Vec<String>,
}

/// Nominal reference to one of the input types generated for a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListInput {
    pub list: String,
    pub kind: ListInputKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListInputKind {
    Create,
    Update,
    Where,
    UniqueWhere,
    OrderBy,
    RelateTo(Cardinality, RelateOp),
    /// `{ every, some, none }` over a to-many relation
    ManyWhere,
}

/// Whether a relate-to input is used while creating or updating the
/// owning record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelateOp {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Related {
    One { list: String },
    Many { list: String },
}

impl Shape {
    /// Flattened, deduplicated union. A single member collapses to itself.
    pub fn union(members: impl IntoIterator<Item = Shape>) -> Shape {
        let mut flat = vec![];

        for member in members {
            match member {
                Shape::Union(inner) => {
                    for member in inner {
                        push_unique(&mut flat, member);
                    }
                }
                member => push_unique(&mut flat, member),
            }
        }

        match flat.len() {
            1 => flat.remove(0),
            _ => Shape::Union(flat),
        }
    }

    pub fn nullable(self) -> Shape {
        Shape::union([self, Shape::Null])
    }

    pub fn optional(self) -> Shape {
        Shape::union([self, Shape::Undefined])
    }

    pub fn list(self) -> Shape {
        Shape::List(Box::new(self))
    }

    /// Union members, or the shape itself.
    pub fn members(&self) -> &[Shape] {
        match self {
            Shape::Union(members) => members,
            _ => std::slice::from_ref(self),
        }
    }

    /// The union of the members for which `keep` returns `true`.
    pub fn retain_members(&self, keep: impl Fn(&Shape) -> bool) -> Shape {
        Shape::union(self.members().iter().filter(|m| keep(m)).cloned())
    }

    pub fn is_subtype_of(&self, other: &Shape) -> bool {
        use Shape::*;

        match (self, other) {
            (Union(members), _) => members.iter().all(|m| m.is_subtype_of(other)),
            (_, Union(members)) => members.iter().any(|m| self.is_subtype_of(m)),
            (_, Any) => true,
            (Any, _) => false,
            (Undefined, Undefined) | (Null, Null) | (OrderDirection, OrderDirection) => true,
            (Object, Object) => true,
            (Scalar(a), Scalar(b)) => a == b,
            (Enum(a), Enum(b)) => a.values.iter().all(|v| b.values.contains(v)),
            (Enum(_), Scalar(ScalarType::String)) => true,
            (List(a), List(b)) => a.is_subtype_of(b),
            (Record(a), Record(b)) => {
                a.keys().all(|key| b.contains_key(key))
                    && b.iter().all(|(key, expect)| {
                        a.get(key).unwrap_or(&Undefined).is_subtype_of(expect)
                    })
            }
            (Record(_) | Input(_), Object) => true,
            (Input(a), Input(b)) => a == b,
            (Related(a), Related(b)) => a == b,
            _ => false,
        }
    }

    /// Runtime counterpart of `is_subtype_of`: does `value` (`None` when
    /// absent) inhabit this shape?
    pub fn admits(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Shape::Union(members), _) => members.iter().any(|m| m.admits(value)),
            (Shape::Any, _) => true,
            (Shape::Related(_), _) => true,
            (Shape::Undefined, None) => true,
            (_, None) => false,
            (Shape::Null, Some(Value::Null)) => true,
            (Shape::Scalar(scalar), Some(value)) => scalar.admits(value),
            (Shape::Enum(shape), Some(Value::String(value))) => shape.values.contains(value),
            (Shape::OrderDirection, Some(Value::String(value))) => Direction::parse(value).is_some(),
            (Shape::List(item), Some(Value::List(items))) => {
                items.iter().all(|value| item.admits(Some(value)))
            }
            (Shape::Record(fields), Some(Value::Record(record))) => {
                record.keys().all(|key| fields.contains_key(key))
                    && fields
                        .iter()
                        .all(|(key, shape)| shape.admits(record.get(key)))
            }
            (Shape::Object | Shape::Input(_), Some(Value::Record(_))) => true,
            _ => false,
        }
    }
}

fn push_unique(members: &mut Vec<Shape>, member: Shape) {
    if !members.contains(&member) {
        members.push(member);
    }
}

impl ListInput {
    pub fn new(list: impl Into<String>, kind: ListInputKind) -> ListInput {
        ListInput {
            list: list.into(),
            kind,
        }
    }

    /// Name of the generated input type, e.g. `PostRelateToOneForCreateInput`.
    pub fn type_name(&self) -> String {
        let list = self.list.to_upper_camel_case();

        match self.kind {
            ListInputKind::Create => format!("{list}CreateInput"),
            ListInputKind::Update => format!("{list}UpdateInput"),
            ListInputKind::Where => format!("{list}WhereInput"),
            ListInputKind::UniqueWhere => format!("{list}WhereUniqueInput"),
            ListInputKind::OrderBy => format!("{list}OrderByInput"),
            ListInputKind::RelateTo(cardinality, op) => {
                let cardinality = match cardinality {
                    Cardinality::One => "One",
                    Cardinality::Many => "Many",
                };
                let op = match op {
                    RelateOp::Create => "Create",
                    RelateOp::Update => "Update",
                };
                format!("{list}RelateTo{cardinality}For{op}Input")
            }
            ListInputKind::ManyWhere => format!("{list}ManyRelationFilter"),
        }
    }
}

impl Related {
    pub fn list(&self) -> &str {
        match self {
            Related::One { list } | Related::Many { list } => list,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Undefined => f.write_str("undefined"),
            Shape::Null => f.write_str("null"),
            Shape::Any => f.write_str("any"),
            Shape::Scalar(scalar) => f.write_str(scalar.name()),
            Shape::Enum(shape) => f.write_str(&shape.name),
            Shape::OrderDirection => f.write_str("OrderDirection"),
            Shape::List(item) => match **item {
                Shape::Union(_) => write!(f, "({item})[]"),
                _ => write!(f, "{item}[]"),
            },
            Shape::Record(fields) => {
                f.write_str("{ ")?;
                for (i, (key, shape)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {shape}")?;
                }
                f.write_str(" }")
            }
            Shape::Object => f.write_str("object"),
            Shape::Input(input) => f.write_str(&input.type_name()),
            Shape::Related(Related::One { list }) => write!(f, "related one {list}"),
            Shape::Related(Related::Many { list }) => write!(f, "related many {list}"),
            Shape::Union(members) if members.is_empty() => f.write_str("never"),
            Shape::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
        }
    }
}
