use super::filter::filter;

use heck::{ToTitleCase, ToUpperCamelCase};
use strata_core::schema::{
    AdminMeta, EnumField, EnumType, FieldData, FieldInput, FieldOutput, FieldType, InputType,
    OutputType,
};

/// A choice from a fixed set of string options, stored as an enum.
#[derive(Debug, Clone, Default)]
pub struct SelectConfig {
    pub options: Vec<String>,
    pub is_nullable: bool,
    /// Must be one of `options`
    pub default: Option<String>,
    pub is_indexed: bool,
    pub label: Option<String>,
}

impl SelectConfig {
    pub fn new<I, S>(options: I) -> SelectConfig
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectConfig {
            options: options.into_iter().map(Into::into).collect(),
            ..SelectConfig::default()
        }
    }
}

pub fn select(config: SelectConfig) -> impl FnOnce(&FieldData<'_>) -> FieldType {
    move |data| {
        let name = format!(
            "{}{}Type",
            data.list.to_upper_camel_case(),
            data.field.to_upper_camel_case()
        );

        let storage = EnumField {
            default: config.default,
            index: super::index(false, config.is_indexed),
            ..EnumField::new(&name, config.options.clone(), super::mode(config.is_nullable))
        };

        let ty = EnumType {
            name,
            values: config.options,
        };

        let mut output = OutputType::Enum(ty.clone());
        if !config.is_nullable {
            output = output.non_null();
        }

        let mut field = FieldType::new(storage, FieldOutput::new(output), "strata/fields/select/views");

        let write = || {
            let input = FieldInput::new(InputType::Enum(ty.clone()));
            if config.is_nullable {
                input
            } else {
                input.resolve(super::reject_null("select"))
            }
        };
        field.input.create = Some(write().into());
        field.input.update = Some(write());
        field.input.filter = Some(FieldInput::new(filter(
            InputType::Enum(ty.clone()),
            &ty.name,
            config.is_nullable,
        )));
        field.input.order_by = Some(FieldInput::new(InputType::OrderDirection));

        let options = ty.values.clone();
        let is_required = !config.is_nullable;
        field.admin_meta = Some(AdminMeta::new(move || {
            serde_json::json!({
                "options": options
                    .iter()
                    .map(|value| serde_json::json!({ "label": value.to_title_case(), "value": value }))
                    .collect::<Vec<_>>(),
                "isRequired": is_required,
            })
        }));

        field.label = config.label;
        field
    }
}
