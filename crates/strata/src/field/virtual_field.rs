use strata_core::schema::{FieldData, FieldOutput, FieldType, OutputType, Resolver, StorageField};

/// An output-only field computed from the stored record.
#[derive(Debug, Clone)]
pub struct VirtualConfig {
    pub output: OutputType,
    /// Receives no stored value; reads the record through
    /// [`ResolveCx::item`](strata_core::schema::ResolveCx::item)
    pub resolve: Resolver,
    pub label: Option<String>,
}

impl VirtualConfig {
    pub fn new(output: OutputType, resolve: Resolver) -> VirtualConfig {
        VirtualConfig {
            output,
            resolve,
            label: None,
        }
    }
}

pub fn virtual_field(config: VirtualConfig) -> impl FnOnce(&FieldData<'_>) -> FieldType {
    move |_| {
        let mut field = FieldType::new(
            StorageField::None,
            FieldOutput::new(config.output).resolve(config.resolve),
            "strata/fields/virtual/views",
        );
        field.label = config.label;
        field
    }
}
