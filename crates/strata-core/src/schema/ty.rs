use super::field::ScalarType;
use super::shape::{EnumShape, ListInput, Related, Shape};
use crate::stmt::Value;

use indexmap::IndexMap;

/// Type of an input argument as the API declares it.
#[derive(Debug, Clone, PartialEq)]
pub enum InputType {
    Scalar(ScalarType),
    /// Opaque identifier, carried as a string
    Id,
    Enum(EnumType),
    OrderDirection,
    List(Box<InputType>),
    NonNull(Box<InputType>),
    /// An input object declared inline by a field type
    Object(InputObjectType),
    /// A generated input object of some list
    Ref(ListInput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub fields: IndexMap<String, Arg>,
}

/// A declared argument: a type and an optional default.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub ty: InputType,
    pub default: Option<Value>,
}

/// Type of a field in the output object.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputType {
    Scalar(ScalarType),
    Id,
    Enum(EnumType),
    List(Box<OutputType>),
    NonNull(Box<OutputType>),
    Related(Related),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub fields: IndexMap<String, OutputType>,
}

impl InputType {
    pub fn non_null(self) -> InputType {
        match self {
            InputType::NonNull(_) => self,
            ty => InputType::NonNull(Box::new(ty)),
        }
    }

    pub fn list_of(self) -> InputType {
        InputType::List(Box::new(self))
    }

    pub fn is_nullable(&self) -> bool {
        !matches!(self, InputType::NonNull(_))
    }

    /// Shape of the values the API layer hands over for this type, ignoring
    /// absence.
    pub fn value_shape(&self) -> Shape {
        match self {
            InputType::NonNull(inner) => inner.inner_shape(),
            ty => ty.inner_shape().nullable(),
        }
    }

    fn inner_shape(&self) -> Shape {
        match self {
            InputType::Scalar(scalar) => Shape::Scalar(*scalar),
            InputType::Id => Shape::Scalar(ScalarType::String),
            InputType::Enum(ty) => Shape::Enum(EnumShape {
                name: ty.name.clone(),
                values: ty.values.clone(),
            }),
            InputType::OrderDirection => Shape::OrderDirection,
            InputType::List(item) => item.value_shape().list(),
            InputType::NonNull(inner) => inner.inner_shape(),
            InputType::Object(object) => Shape::Record(
                object
                    .fields
                    .iter()
                    .map(|(name, arg)| (name.clone(), arg.value_shape()))
                    .collect(),
            ),
            InputType::Ref(input) => Shape::Input(input.clone()),
        }
    }

    /// Every list input this type refers to, including through inline
    /// objects.
    pub fn refs(&self) -> Vec<&ListInput> {
        let mut out = vec![];
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs<'a>(&'a self, out: &mut Vec<&'a ListInput>) {
        match self {
            InputType::List(inner) | InputType::NonNull(inner) => inner.collect_refs(out),
            InputType::Object(object) => {
                for arg in object.fields.values() {
                    arg.ty.collect_refs(out);
                }
            }
            InputType::Ref(input) => out.push(input),
            _ => {}
        }
    }

    /// Type name in schema notation, e.g. `[PostWhereInput!]!`.
    pub fn name(&self) -> String {
        match self {
            InputType::Scalar(scalar) => scalar.name().to_string(),
            InputType::Id => "ID".to_string(),
            InputType::Enum(ty) => ty.name.clone(),
            InputType::OrderDirection => "OrderDirection".to_string(),
            InputType::List(item) => format!("[{}]", item.name()),
            InputType::NonNull(inner) => format!("{}!", inner.name()),
            InputType::Object(object) => object.name.clone(),
            InputType::Ref(input) => input.type_name(),
        }
    }
}

impl EnumType {
    /// `QueryMode`, selecting case-sensitive or case-insensitive string
    /// filters.
    pub fn query_mode() -> EnumType {
        EnumType {
            name: "QueryMode".to_string(),
            values: vec!["default".to_string(), "insensitive".to_string()],
        }
    }
}

impl Arg {
    pub fn new(ty: InputType) -> Arg {
        Arg { ty, default: None }
    }

    pub fn with_default(self, default: impl Into<Value>) -> Arg {
        Arg {
            default: Some(default.into()),
            ..self
        }
    }

    /// What the argument delivers: a nullable argument without a default may
    /// also be absent.
    pub fn value_shape(&self) -> Shape {
        let shape = self.ty.value_shape();

        if self.ty.is_nullable() && self.default.is_none() {
            shape.optional()
        } else {
            shape
        }
    }
}

impl From<InputType> for Arg {
    fn from(ty: InputType) -> Arg {
        Arg::new(ty)
    }
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> InputObjectType {
        InputObjectType {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, arg: impl Into<Arg>) -> InputObjectType {
        self.fields.insert(name.into(), arg.into());
        self
    }
}

impl OutputType {
    pub fn non_null(self) -> OutputType {
        match self {
            OutputType::NonNull(_) => self,
            ty => OutputType::NonNull(Box::new(ty)),
        }
    }

    pub fn list_of(self) -> OutputType {
        OutputType::List(Box::new(self))
    }

    /// Shape of the values this output type accepts from a resolver. A
    /// nullable type accepts both null and absence.
    pub fn accepted_shape(&self) -> Shape {
        match self {
            OutputType::NonNull(inner) => inner.inner_shape(),
            ty => Shape::union([ty.inner_shape(), Shape::Null, Shape::Undefined]),
        }
    }

    fn inner_shape(&self) -> Shape {
        match self {
            OutputType::Scalar(scalar) => Shape::Scalar(*scalar),
            OutputType::Id => Shape::Scalar(ScalarType::String),
            OutputType::Enum(ty) => Shape::Enum(EnumShape {
                name: ty.name.clone(),
                values: ty.values.clone(),
            }),
            OutputType::List(item) => item.accepted_shape().list(),
            OutputType::NonNull(inner) => inner.inner_shape(),
            OutputType::Related(related) => Shape::Related(related.clone()),
        }
    }

    pub fn name(&self) -> String {
        match self {
            OutputType::Scalar(scalar) => scalar.name().to_string(),
            OutputType::Id => "ID".to_string(),
            OutputType::Enum(ty) => ty.name.clone(),
            OutputType::List(item) => format!("[{}]", item.name()),
            OutputType::NonNull(inner) => format!("{}!", inner.name()),
            OutputType::Related(related) => related.list().to_string(),
        }
    }
}
