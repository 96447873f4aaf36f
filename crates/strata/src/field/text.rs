use super::filter::filter;

use strata_core::schema::{
    FieldData, FieldInput, FieldOutput, FieldType, InputType, OutputType, ScalarDefault,
    ScalarField, ScalarType,
};
use strata_core::stmt::Value;

#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    pub is_nullable: bool,
    pub default: Option<String>,
    pub is_unique: bool,
    pub is_indexed: bool,
    /// Column type on providers that support them, e.g. `VarChar(255)`
    pub native_type: Option<String>,
    pub label: Option<String>,
}

/// A string field.
pub fn text(config: TextConfig) -> impl FnOnce(&FieldData<'_>) -> FieldType {
    move |_| {
        let storage = ScalarField {
            default: config
                .default
                .map(|value| ScalarDefault::Literal(Value::String(value))),
            index: super::index(config.is_unique, config.is_indexed),
            native_type: config.native_type,
            ..ScalarField::new(ScalarType::String, super::mode(config.is_nullable))
        };

        let string = || InputType::Scalar(ScalarType::String);
        let mut output = OutputType::Scalar(ScalarType::String);
        if !config.is_nullable {
            output = output.non_null();
        }

        let mut field = FieldType::new(storage, FieldOutput::new(output), "strata/fields/text/views");

        let write = || {
            let input = FieldInput::new(string());
            if config.is_nullable {
                input
            } else {
                input.resolve(super::reject_null("text"))
            }
        };
        field.input.create = Some(write().into());
        field.input.update = Some(write());
        field.input.filter = Some(FieldInput::new(filter(string(), "String", config.is_nullable)));
        field.input.order_by = Some(FieldInput::new(InputType::OrderDirection));
        if config.is_unique {
            field.input.unique_where = Some(FieldInput::new(string()));
        }

        field.label = config.label;
        field
    }
}
