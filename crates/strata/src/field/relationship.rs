use strata_core::schema::{
    Cardinality, CreateInput, FieldData, FieldInput, FieldOutput, FieldType, ForeignKey, InputType,
    ListInputKind, OutputType, RelateOp, Related, RelationField, Resolver,
};
use strata_core::stmt::Value;

/// A link to records of another list.
#[derive(Debug, Clone, Default)]
pub struct RelationshipConfig {
    /// `List` for a one-sided relation, or `List.field` naming the field that
    /// points back
    pub target: String,
    pub many: bool,
    /// This side owns the key of a one-to-one relation
    pub foreign_key: bool,
    /// Link table name of a many-to-many relation
    pub relation_name: Option<String>,
    pub label: Option<String>,
}

impl RelationshipConfig {
    pub fn one(target: impl Into<String>) -> RelationshipConfig {
        RelationshipConfig {
            target: target.into(),
            ..RelationshipConfig::default()
        }
    }

    pub fn many(target: impl Into<String>) -> RelationshipConfig {
        RelationshipConfig {
            target: target.into(),
            many: true,
            ..RelationshipConfig::default()
        }
    }
}

pub fn relationship(config: RelationshipConfig) -> impl FnOnce(&FieldData<'_>) -> FieldType {
    move |data| {
        let (list, back) = match config.target.split_once('.') {
            Some((list, field)) => (list.to_string(), Some(field.to_string())),
            None => (config.target.clone(), None),
        };

        let cardinality = if config.many {
            Cardinality::Many
        } else {
            Cardinality::One
        };

        let storage = RelationField {
            cardinality,
            target: list.clone(),
            field: back,
            foreign_key: config.foreign_key.then(ForeignKey::default),
            relation_name: config.relation_name,
        };

        let related = match cardinality {
            Cardinality::One => Related::One { list: list.clone() },
            Cardinality::Many => Related::Many { list: list.clone() },
        };

        let mut field = FieldType::new(
            storage,
            FieldOutput::new(OutputType::Related(related)),
            "strata/fields/relationship/views",
        );

        let input = |kind| InputType::Ref(data.cx.list_input(&list, kind));

        field.input.create = Some(CreateInput::new(input(ListInputKind::RelateTo(
            cardinality,
            RelateOp::Create,
        )))
        .resolve(null_as_absent()));
        field.input.update = Some(
            FieldInput::new(input(ListInputKind::RelateTo(cardinality, RelateOp::Update)))
                .resolve(null_as_absent()),
        );
        field.input.filter = Some(FieldInput::new(input(match cardinality {
            Cardinality::One => ListInputKind::Where,
            Cardinality::Many => ListInputKind::ManyWhere,
        })));

        field.label = config.label;
        field
    }
}

/// A `null` relation input means "no change".
fn null_as_absent() -> Resolver {
    Resolver::from_fn(|value| {
        Ok(match value {
            Some(Value::Null) => None,
            value => value,
        })
    })
}
