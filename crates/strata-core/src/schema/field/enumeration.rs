use super::FieldMode;

#[derive(Debug, Clone, PartialEq)]
pub struct EnumField {
    /// Name of the storage-level enum type
    pub name: String,

    pub values: Vec<String>,

    pub mode: FieldMode,

    /// Literal default; must be one of `values`
    pub default: Option<String>,

    pub index: Option<super::IndexKind>,

    pub map: Option<String>,
}

impl EnumField {
    pub fn new<I, S>(name: impl Into<String>, values: I, mode: FieldMode) -> EnumField
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumField {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            mode,
            default: None,
            index: None,
            map: None,
        }
    }
}
