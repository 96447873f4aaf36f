use super::filter::filter;

use strata_core::schema::{
    FieldData, FieldInput, FieldOutput, FieldType, InputType, OutputType, ScalarDefault,
    ScalarField, ScalarType,
};

#[derive(Debug, Clone, Default)]
pub struct TimestampConfig {
    pub is_nullable: bool,
    /// Stamp the creation time when no value is given
    pub default_now: bool,
    /// Stamp the current time on every update
    pub updated_at: bool,
    pub is_indexed: bool,
    pub label: Option<String>,
}

pub fn timestamp(config: TimestampConfig) -> impl FnOnce(&FieldData<'_>) -> FieldType {
    move |_| {
        let storage = ScalarField {
            default: config.default_now.then_some(ScalarDefault::Now),
            index: super::index(false, config.is_indexed),
            updated_at: config.updated_at,
            ..ScalarField::new(ScalarType::DateTime, super::mode(config.is_nullable))
        };

        let datetime = || InputType::Scalar(ScalarType::DateTime);
        let mut output = OutputType::Scalar(ScalarType::DateTime);
        if !config.is_nullable {
            output = output.non_null();
        }

        let mut field = FieldType::new(storage, FieldOutput::new(output), "strata/fields/timestamp/views");

        let write = || {
            let input = FieldInput::new(datetime());
            if config.is_nullable {
                input
            } else {
                input.resolve(super::reject_null("timestamp"))
            }
        };
        field.input.create = Some(write().into());
        field.input.update = Some(write());
        field.input.filter = Some(FieldInput::new(filter(datetime(), "DateTime", config.is_nullable)));
        field.input.order_by = Some(FieldInput::new(InputType::OrderDirection));

        field.label = config.label;
        field
    }
}
