use super::filter::filter;

use strata_core::schema::{
    FieldData, FieldInput, FieldOutput, FieldType, InputType, OutputType, ScalarDefault,
    ScalarField, ScalarType,
};
use strata_core::stmt::Value;

#[derive(Debug, Clone, Default)]
pub struct IntegerConfig {
    pub is_nullable: bool,
    pub default: Option<i32>,
    /// Number records in creation order
    pub autoincrement: bool,
    pub is_unique: bool,
    pub is_indexed: bool,
    pub label: Option<String>,
}

pub fn integer(config: IntegerConfig) -> impl FnOnce(&FieldData<'_>) -> FieldType {
    move |_| {
        let default = match (config.autoincrement, config.default) {
            (true, _) => Some(ScalarDefault::Autoincrement),
            (false, Some(value)) => Some(ScalarDefault::Literal(Value::I32(value))),
            (false, None) => None,
        };

        let storage = ScalarField {
            default,
            index: super::index(config.is_unique, config.is_indexed),
            ..ScalarField::new(ScalarType::Int, super::mode(config.is_nullable))
        };

        let int = || InputType::Scalar(ScalarType::Int);
        let mut output = OutputType::Scalar(ScalarType::Int);
        if !config.is_nullable {
            output = output.non_null();
        }

        let mut field = FieldType::new(storage, FieldOutput::new(output), "strata/fields/integer/views");

        let write = || {
            let input = FieldInput::new(int());
            if config.is_nullable {
                input
            } else {
                input.resolve(super::reject_null("integer"))
            }
        };
        field.input.create = Some(write().into());
        field.input.update = Some(write());
        field.input.filter = Some(FieldInput::new(filter(int(), "Int", config.is_nullable)));
        field.input.order_by = Some(FieldInput::new(InputType::OrderDirection));
        if config.is_unique {
            field.input.unique_where = Some(FieldInput::new(int()));
        }

        field.label = config.label;
        field
    }
}
