use super::context::BuildContext;
use super::error_set::ErrorSet;
use super::field::{Cardinality, EnumField, FieldMode, ScalarField, ScalarType, StorageField};
use super::list::List;

use indexmap::IndexMap;
use std::collections::HashSet;

/// Checks a field's storage on its own: defaults, index and relation
/// options, `multi` composition.
pub(crate) fn verify_field(
    cx: &BuildContext,
    list: &str,
    name: &str,
    storage: &StorageField,
    issues: &mut ErrorSet,
) {
    match storage {
        StorageField::None => {}
        StorageField::Scalar(scalar) => verify_scalar(cx, list, name, scalar, issues),
        StorageField::Enum(enumeration) => verify_enum(list, name, enumeration, issues),
        StorageField::Relation(relation) => {
            if relation.foreign_key.is_some() && relation.relation_name.is_some() {
                issues.field(
                    list,
                    name,
                    "a relation cannot set both `foreign_key` and `relation_name`",
                );
            } else if relation.foreign_key.is_some() && relation.is_many() {
                issues.field(list, name, "`foreign_key` is only valid on `one` relations");
            } else if relation.relation_name.is_some() && relation.is_one() {
                issues.field(list, name, "`relation_name` is only valid on `many` relations");
            }
        }
        StorageField::Multi(multi) => {
            if multi.fields.is_empty() {
                issues.field(list, name, "`multi` fields need at least one subfield");
            }

            for (sub, field) in &multi.fields {
                let path = format!("{name}.{sub}");

                match field {
                    StorageField::Scalar(scalar) => verify_scalar(cx, list, &path, scalar, issues),
                    StorageField::Enum(enumeration) => verify_enum(list, &path, enumeration, issues),
                    other => issues.field(
                        list,
                        &path,
                        format!(
                            "`multi` fields can only contain scalar and enum fields, found {}",
                            other.kind_name()
                        ),
                    ),
                }
            }
        }
    }
}

fn verify_scalar(
    cx: &BuildContext,
    list: &str,
    name: &str,
    scalar: &ScalarField,
    issues: &mut ErrorSet,
) {
    if let Some(default) = &scalar.default {
        if scalar.mode == FieldMode::Many {
            issues.field(list, name, "`many` fields cannot have a default");
        } else if let Err(message) = default.verify(scalar.scalar) {
            issues.field(list, name, message);
        }
    }

    if scalar.updated_at && scalar.scalar != ScalarType::DateTime {
        issues.field(
            list,
            name,
            format!("`updated_at` is only valid on DateTime fields, not {}", scalar.scalar),
        );
    }

    if scalar.native_type.is_some() && !cx.provider().supports_native_types() {
        issues.field(
            list,
            name,
            format!("native types are not supported by {}", cx.provider().name()),
        );
    }
}

fn verify_enum(list: &str, name: &str, enumeration: &EnumField, issues: &mut ErrorSet) {
    if enumeration.values.is_empty() {
        issues.field(list, name, "enum fields need at least one value");
    }

    let mut seen = HashSet::new();
    for value in &enumeration.values {
        if !seen.insert(value) {
            issues.field(list, name, format!("enum value `{value}` is listed twice"));
        }
    }

    if let Some(default) = &enumeration.default {
        if enumeration.mode == FieldMode::Many {
            issues.field(list, name, "`many` fields cannot have a default");
        } else if !enumeration.values.contains(default) {
            issues.field(
                list,
                name,
                format!("default `{default}` is not one of the enum's values"),
            );
        }
    }
}

/// Checks relations across lists: targets exist and both sides of a
/// two-sided relation agree.
pub(crate) fn verify_relations(lists: &IndexMap<String, List>, issues: &mut ErrorSet) {
    for list in lists.values() {
        for field in list.fields() {
            let Some(relation) = field.storage().as_relation() else {
                continue;
            };

            let Some(target) = lists.get(&relation.target) else {
                issues.field(
                    list.name(),
                    field.name(),
                    format!("relation target `{}` is not registered", relation.target),
                );
                continue;
            };

            let Some(pair_name) = &relation.field else {
                continue;
            };

            let Some(pair) = target
                .field(pair_name)
                .and_then(|pair| pair.storage().as_relation())
            else {
                issues.field(
                    list.name(),
                    field.name(),
                    format!(
                        "`{}.{pair_name}` is not a relation field",
                        relation.target
                    ),
                );
                continue;
            };

            let points_back = pair.target == list.name()
                && pair.field.as_deref().map_or(true, |back| back == field.name());

            if !points_back {
                issues.field(
                    list.name(),
                    field.name(),
                    format!(
                        "`{}.{pair_name}` does not point back to `{}`",
                        relation.target,
                        field.path()
                    ),
                );
                continue;
            }

            // Each pair is seen from both ends; report pair-level problems once.
            if (list.name(), field.name()) > (target.name(), pair_name.as_str()) {
                continue;
            }

            match (relation.cardinality, pair.cardinality) {
                (Cardinality::One, Cardinality::One) => {
                    let owners = [relation.foreign_key.is_some(), pair.foreign_key.is_some()]
                        .into_iter()
                        .filter(|owns| *owns)
                        .count();

                    if owners != 1 {
                        issues.field(
                            list.name(),
                            field.name(),
                            format!(
                                "exactly one side of the one-to-one relation with `{}.{pair_name}` must set `foreign_key`, found {owners}",
                                relation.target
                            ),
                        );
                    }
                }
                (Cardinality::Many, Cardinality::Many) => {
                    if let (Some(a), Some(b)) = (&relation.relation_name, &pair.relation_name) {
                        if a != b {
                            issues.field(
                                list.name(),
                                field.name(),
                                format!(
                                    "`relation_name` `{a}` does not match `{b}` on `{}.{pair_name}`",
                                    relation.target
                                ),
                            );
                        }
                    }
                }
                _ => {}
            }
        }
    }
}
