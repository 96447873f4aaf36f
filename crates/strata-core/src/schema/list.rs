use super::config::IdStrategy;
use super::derive::Operation;
use super::descriptor::FieldDescriptor;
use super::find_many::FindManyArgs;
use super::relate::RelateToTypes;
use super::shape::{ListInput, ListInputKind};
use super::ty::{Arg, InputObjectType, InputType, ObjectType};

use heck::ToUpperCamelCase;
use indexmap::IndexMap;

/// A compiled list.
#[derive(Debug)]
pub struct List {
    name: String,
    id: IdStrategy,
    fields: IndexMap<String, FieldDescriptor>,
    types: ListTypeSet,
}

/// The input and output types generated for one list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListTypeSet {
    pub create: InputObjectType,
    pub update: InputObjectType,
    pub r#where: InputObjectType,
    pub unique_where: InputObjectType,
    pub order_by: InputObjectType,
    pub output: ObjectType,
    pub find_many_args: FindManyArgs,
    pub relate_to: RelateToTypes,
}

impl List {
    pub(crate) fn new(name: String, id: IdStrategy, fields: IndexMap<String, FieldDescriptor>) -> List {
        let types = ListTypeSet::build(&name, &fields);
        List {
            name,
            id,
            fields,
            types,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id_strategy(&self) -> IdStrategy {
        self.id
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields.values()
    }

    pub fn types(&self) -> &ListTypeSet {
        &self.types
    }
}

impl ListTypeSet {
    fn build(list: &str, fields: &IndexMap<String, FieldDescriptor>) -> ListTypeSet {
        let object = |kind| InputObjectType::new(ListInput::new(list, kind).type_name());
        let args = |op, mut object: InputObjectType| {
            for field in fields.values() {
                if let Some(arg) = field.input(op).and_then(|input| input.arg.clone()) {
                    object.fields.insert(field.name().to_string(), arg);
                }
            }
            object
        };

        let nested_where =
            || Arg::new(InputType::Ref(ListInput::new(list, ListInputKind::Where)).non_null().list_of());
        let r#where = object(ListInputKind::Where)
            .field("AND", nested_where())
            .field("OR", nested_where())
            .field("NOT", nested_where());

        ListTypeSet {
            create: args(Operation::Create, object(ListInputKind::Create)),
            update: args(Operation::Update, object(ListInputKind::Update)),
            r#where: args(Operation::Filter, r#where),
            unique_where: args(Operation::UniqueWhere, object(ListInputKind::UniqueWhere)),
            order_by: args(Operation::OrderBy, object(ListInputKind::OrderBy)),
            output: ObjectType {
                name: list.to_upper_camel_case(),
                fields: fields
                    .values()
                    .flat_map(|field| {
                        let extras = field
                            .extra_outputs()
                            .map(|(name, output)| (name.to_string(), output.ty.clone()));
                        std::iter::once((field.name().to_string(), field.output().ty.clone())).chain(extras)
                    })
                    .collect(),
            },
            find_many_args: FindManyArgs::for_list(list),
            relate_to: RelateToTypes::for_list(list),
        }
    }

    /// The generated input object for `kind`.
    pub fn input(&self, kind: ListInputKind) -> &InputObjectType {
        use super::field::Cardinality::*;
        use super::shape::RelateOp;

        match kind {
            ListInputKind::Create => &self.create,
            ListInputKind::Update => &self.update,
            ListInputKind::Where => &self.r#where,
            ListInputKind::UniqueWhere => &self.unique_where,
            ListInputKind::OrderBy => &self.order_by,
            ListInputKind::RelateTo(One, RelateOp::Create) => &self.relate_to.one_for_create,
            ListInputKind::RelateTo(One, RelateOp::Update) => &self.relate_to.one_for_update,
            ListInputKind::RelateTo(Many, RelateOp::Create) => &self.relate_to.many_for_create,
            ListInputKind::RelateTo(Many, RelateOp::Update) => &self.relate_to.many_for_update,
            ListInputKind::ManyWhere => &self.relate_to.many_where,
        }
    }
}
