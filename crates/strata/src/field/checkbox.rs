use super::filter::filter;

use strata_core::schema::{
    FieldData, FieldInput, FieldOutput, FieldType, InputType, OutputType, ScalarDefault,
    ScalarField, ScalarType,
};
use strata_core::stmt::Value;

#[derive(Debug, Clone, Default)]
pub struct CheckboxConfig {
    pub default: bool,
    pub label: Option<String>,
}

/// A non-nullable boolean. Always has a default.
pub fn checkbox(config: CheckboxConfig) -> impl FnOnce(&FieldData<'_>) -> FieldType {
    move |_| {
        let storage = ScalarField {
            default: Some(ScalarDefault::Literal(Value::Bool(config.default))),
            ..ScalarField::required(ScalarType::Boolean)
        };

        let boolean = || InputType::Scalar(ScalarType::Boolean);
        let mut field = FieldType::new(
            storage,
            FieldOutput::new(OutputType::Scalar(ScalarType::Boolean).non_null()),
            "strata/fields/checkbox/views",
        );

        field.input.create = Some(FieldInput::new(boolean()).resolve(super::reject_null("checkbox")).into());
        field.input.update = Some(FieldInput::new(boolean()).resolve(super::reject_null("checkbox")));
        field.input.filter = Some(FieldInput::new(filter(boolean(), "Boolean", false)));
        field.input.order_by = Some(FieldInput::new(InputType::OrderDirection));

        field.label = config.label;
        field
    }
}
