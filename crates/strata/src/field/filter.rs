use strata_core::schema::{Arg, EnumType, InputObjectType, InputType, ScalarType};

/// The filter object for a scalar or enum field, e.g. `StringNullableFilter`.
///
/// `not` nests the same filter once, without a further `not`. String
/// filters also take a `mode`, which applies to the nested `not` as well.
pub(super) fn filter(base: InputType, name: &str, is_nullable: bool) -> InputType {
    InputType::Object(object(base, name, is_nullable, true))
}

fn object(base: InputType, name: &str, is_nullable: bool, with_not: bool) -> InputObjectType {
    let type_name = match (is_nullable, with_not) {
        (true, true) => format!("{name}NullableFilter"),
        (false, true) => format!("{name}Filter"),
        (true, false) => format!("Nested{name}NullableFilter"),
        (false, false) => format!("Nested{name}Filter"),
    };

    let one = || Arg::new(base.clone());
    let many = || Arg::new(base.clone().non_null().list_of());

    let mut filter = InputObjectType::new(type_name)
        .field("equals", one())
        .field("in", many())
        .field("notIn", many());

    if is_ordered(&base) {
        filter = filter
            .field("lt", one())
            .field("lte", one())
            .field("gt", one())
            .field("gte", one());
    }

    if base == InputType::Scalar(ScalarType::String) {
        filter = filter
            .field("contains", one())
            .field("startsWith", one())
            .field("endsWith", one());

        if with_not {
            filter = filter.field("mode", InputType::Enum(EnumType::query_mode()));
        }
    }

    if with_not {
        filter = filter.field(
            "not",
            InputType::Object(object(base, name, is_nullable, false)),
        );
    }

    filter
}

fn is_ordered(ty: &InputType) -> bool {
    !matches!(
        ty,
        InputType::Scalar(ScalarType::Boolean | ScalarType::Json) | InputType::Enum(_)
    )
}
