use super::field::{Cardinality, FieldMode, MultiField, RelationField, ScalarType, StorageField};
use super::shape::{EnumShape, ListInput, ListInputKind, RelateOp, Related, Shape};

use std::fmt;

/// Operations a field participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
    Filter,
    OrderBy,
    UniqueWhere,
    Output,
}

impl Operation {
    /// The operations that take client input.
    pub const INPUTS: [Operation; 5] = [
        Operation::Create,
        Operation::Update,
        Operation::Filter,
        Operation::OrderBy,
        Operation::UniqueWhere,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Filter => "where",
            Operation::OrderBy => "orderBy",
            Operation::UniqueWhere => "uniqueWhere",
            Operation::Output => "output",
        }
    }

    /// Narrows an argument's value shape to what a resolver can receive.
    ///
    /// `orderBy` and `uniqueWhere` inputs that are null or absent are dropped
    /// before resolution, and so are absent `where` inputs.
    pub fn resolver_input(self, arg: &Shape) -> Shape {
        match self {
            Operation::OrderBy | Operation::UniqueWhere => {
                arg.retain_members(|m| !matches!(m, Shape::Null | Shape::Undefined))
            }
            Operation::Filter => arg.retain_members(|m| !matches!(m, Shape::Undefined)),
            Operation::Create | Operation::Update | Operation::Output => arg.clone(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl StorageField {
    /// The shape values must have at the storage boundary for `op`.
    ///
    /// For inputs this is what resolvers must produce; for `Output` it is
    /// what storage hands to the output resolver. Pure and deterministic.
    pub fn shape(&self, op: Operation) -> Shape {
        match self {
            StorageField::None => Shape::Undefined,
            StorageField::Scalar(scalar) => {
                let unique = match (scalar.scalar, scalar.mode) {
                    (ScalarType::String | ScalarType::Int, FieldMode::Required | FieldMode::Optional) => {
                        Shape::Scalar(scalar.scalar)
                    }
                    _ => Shape::Any,
                };
                scalarish(Shape::Scalar(scalar.scalar), scalar.mode, op, unique)
            }
            StorageField::Enum(enumeration) => {
                let value = Shape::Enum(EnumShape {
                    name: enumeration.name.clone(),
                    values: enumeration.values.clone(),
                });
                scalarish(value, enumeration.mode, op, Shape::Any)
            }
            StorageField::Relation(relation) => relation_shape(relation, op),
            StorageField::Multi(multi) => multi_shape(multi, op),
        }
    }
}

fn scalarish(value: Shape, mode: FieldMode, op: Operation, unique: Shape) -> Shape {
    match op {
        Operation::Create | Operation::Update => match mode {
            FieldMode::Optional => Shape::union([value, Shape::Null, Shape::Undefined]),
            FieldMode::Required => value.optional(),
            FieldMode::Many => value.list().optional(),
        },
        Operation::Output => match mode {
            FieldMode::Optional => value.nullable(),
            FieldMode::Required => value,
            FieldMode::Many => value.list(),
        },
        Operation::OrderBy => Shape::OrderDirection.optional(),
        Operation::Filter => Shape::Object.nullable(),
        Operation::UniqueWhere => unique,
    }
}

fn relation_shape(relation: &RelationField, op: Operation) -> Shape {
    let input = |kind| Shape::Input(ListInput::new(&relation.target, kind));

    match op {
        Operation::Create => {
            input(ListInputKind::RelateTo(relation.cardinality, RelateOp::Create)).optional()
        }
        Operation::Update => {
            input(ListInputKind::RelateTo(relation.cardinality, RelateOp::Update)).optional()
        }
        Operation::Filter => match relation.cardinality {
            Cardinality::One => input(ListInputKind::Where).nullable(),
            Cardinality::Many => input(ListInputKind::ManyWhere).nullable(),
        },
        Operation::OrderBy => Shape::Undefined,
        Operation::UniqueWhere => Shape::Any,
        Operation::Output => {
            let list = relation.target.clone();
            Shape::Related(match relation.cardinality {
                Cardinality::One => Related::One { list },
                Cardinality::Many => Related::Many { list },
            })
        }
    }
}

fn multi_shape(multi: &MultiField, op: Operation) -> Shape {
    match op {
        Operation::Filter => Shape::Object.nullable(),
        Operation::UniqueWhere => Shape::Any,
        Operation::Create | Operation::Update | Operation::OrderBy | Operation::Output => {
            Shape::Record(
                multi
                    .fields
                    .iter()
                    .map(|(name, field)| (name.clone(), field.shape(op)))
                    .collect(),
            )
        }
    }
}
