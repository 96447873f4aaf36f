use super::context::BuildContext;
use super::derive::Operation;
use super::error_set::ErrorSet;
use super::field::StorageField;
use super::obligation::Obligation;
use super::resolve::Resolver;
use super::shape::Shape;
use super::ty::{Arg, OutputType};

use heck::ToTitleCase;
use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// What a field type function returns: storage, the API surface, and
/// optional conversions for each operation.
#[derive(Debug, Clone)]
pub struct FieldType {
    pub storage: StorageField,
    pub input: FieldInputs,
    pub output: FieldOutput,
    /// Further fields this field adds to the list's output object, each
    /// computed from the same stored value
    pub extra_output: IndexMap<String, FieldOutput>,
    /// Admin UI module implementing the field's views
    pub views: String,
    pub label: Option<String>,
    pub admin_meta: Option<AdminMeta>,
}

#[derive(Debug, Clone, Default)]
pub struct FieldInputs {
    pub create: Option<CreateInput>,
    pub update: Option<FieldInput>,
    pub filter: Option<FieldInput>,
    pub order_by: Option<FieldInput>,
    pub unique_where: Option<FieldInput>,
}

#[derive(Debug, Clone)]
pub struct FieldInput {
    pub arg: Arg,
    pub resolve: Option<Resolver>,
}

/// Create may omit its argument, which leaves the resolver as the only
/// source of the value.
#[derive(Debug, Clone)]
pub struct CreateInput {
    pub arg: Option<Arg>,
    pub resolve: Option<Resolver>,
}

#[derive(Debug, Clone)]
pub struct FieldOutput {
    pub ty: OutputType,
    pub resolve: Option<Resolver>,
}

/// Lazily produced metadata for the admin UI.
#[derive(Clone)]
pub struct AdminMeta(Arc<dyn Fn() -> serde_json::Value + Send + Sync>);

/// A field of a compiled list. Immutable once built.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    list: String,
    name: String,
    storage: StorageField,
    inputs: IndexMap<Operation, BoundInput>,
    output: BoundOutput,
    extra_output: IndexMap<String, BoundOutput>,
    views: String,
    label: String,
    admin_meta: Option<AdminMeta>,
}

/// An input operation with its resolver settled.
#[derive(Debug, Clone)]
pub struct BoundInput {
    pub arg: Option<Arg>,
    /// The field's resolver, or identity when it was optional and omitted
    pub resolve: Resolver,
    /// Storage shape the resolver must produce
    pub target: Shape,
    pub obligation: Obligation,
}

#[derive(Debug, Clone)]
pub struct BoundOutput {
    pub ty: OutputType,
    pub resolve: Resolver,
    /// Shape storage hands to the resolver
    pub stored: Shape,
    /// Shape the output type accepts from the resolver
    pub accepted: Shape,
    pub obligation: Obligation,
}

impl FieldInput {
    pub fn new(arg: impl Into<Arg>) -> FieldInput {
        FieldInput {
            arg: arg.into(),
            resolve: None,
        }
    }

    pub fn resolve(self, resolve: Resolver) -> FieldInput {
        FieldInput {
            resolve: Some(resolve),
            ..self
        }
    }
}

impl CreateInput {
    pub fn new(arg: impl Into<Arg>) -> CreateInput {
        CreateInput {
            arg: Some(arg.into()),
            resolve: None,
        }
    }

    /// A create input with no argument, fed only by `resolve`.
    pub fn computed(resolve: Resolver) -> CreateInput {
        CreateInput {
            arg: None,
            resolve: Some(resolve),
        }
    }

    pub fn resolve(self, resolve: Resolver) -> CreateInput {
        CreateInput {
            resolve: Some(resolve),
            ..self
        }
    }
}

impl From<FieldInput> for CreateInput {
    fn from(input: FieldInput) -> CreateInput {
        CreateInput {
            arg: Some(input.arg),
            resolve: input.resolve,
        }
    }
}

impl FieldOutput {
    pub fn new(ty: OutputType) -> FieldOutput {
        FieldOutput { ty, resolve: None }
    }

    pub fn resolve(self, resolve: Resolver) -> FieldOutput {
        FieldOutput {
            resolve: Some(resolve),
            ..self
        }
    }
}

impl FieldType {
    pub fn new(storage: impl Into<StorageField>, output: FieldOutput, views: impl Into<String>) -> FieldType {
        FieldType {
            storage: storage.into(),
            input: FieldInputs::default(),
            output,
            extra_output: IndexMap::new(),
            views: views.into(),
            label: None,
            admin_meta: None,
        }
    }
}

impl AdminMeta {
    pub fn new(f: impl Fn() -> serde_json::Value + Send + Sync + 'static) -> AdminMeta {
        AdminMeta(Arc::new(f))
    }

    pub fn get(&self) -> serde_json::Value {
        (self.0)()
    }
}

impl fmt::Debug for AdminMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminMeta(..)")
    }
}

impl FieldDescriptor {
    /// Binds each operation's argument and resolver against the storage
    /// shapes. Problems go to `issues`; `None` means the field is unusable.
    pub(crate) fn assemble(
        cx: &BuildContext,
        list: &str,
        name: &str,
        field: FieldType,
        issues: &mut ErrorSet,
    ) -> Option<FieldDescriptor> {
        let FieldType {
            storage,
            input,
            output,
            extra_output,
            views,
            label,
            admin_meta,
        } = field;

        let FieldInputs {
            create,
            update,
            filter,
            order_by,
            unique_where,
        } = input;

        let declared = [
            (Operation::Create, create),
            (Operation::Update, update.map(CreateInput::from)),
            (Operation::Filter, filter.map(CreateInput::from)),
            (Operation::OrderBy, order_by.map(CreateInput::from)),
            (Operation::UniqueWhere, unique_where.map(CreateInput::from)),
        ];

        let mut valid = true;
        let mut inputs = IndexMap::new();

        for (op, input) in declared {
            let Some(CreateInput { arg, resolve }) = input else {
                continue;
            };

            if let Some(arg) = &arg {
                let missing: Vec<_> = arg
                    .ty
                    .refs()
                    .into_iter()
                    .filter(|input| !cx.has_list(&input.list))
                    .collect();

                if !missing.is_empty() {
                    for input in missing {
                        issues.field(
                            list,
                            name,
                            format!(
                                "`{op}` argument refers to `{}`, but list `{}` is not registered",
                                input.type_name(),
                                input.list
                            ),
                        );
                    }
                    valid = false;
                    continue;
                }
            }

            let target = storage.shape(op);
            let incoming = arg.as_ref().map(Arg::value_shape);
            let obligation = Obligation::for_input(op, incoming.as_ref(), &target);

            let resolve = match (resolve, obligation) {
                (Some(resolve), _) => resolve,
                (None, Obligation::Optional) => Resolver::identity(),
                (None, Obligation::Mandatory) => {
                    let message = match &incoming {
                        Some(incoming) => format!(
                            "`{op}` argument produces `{}`, which does not fit storage shape `{target}`; a resolver is required",
                            op.resolver_input(incoming)
                        ),
                        None => format!(
                            "`{op}` takes no argument, so a resolver producing `{target}` is required"
                        ),
                    };
                    issues.field(list, name, message);
                    valid = false;
                    continue;
                }
            };

            inputs.insert(
                op,
                BoundInput {
                    arg,
                    resolve,
                    target,
                    obligation,
                },
            );
        }

        let stored = storage.shape(Operation::Output);
        let output = bind_output(output, &stored, |message| {
            issues.field(list, name, message);
        });

        let mut extras = IndexMap::new();
        for (extra, output) in extra_output {
            let bound = bind_output(output, &stored, |message| {
                issues.field(list, name, format!("extra output `{extra}`: {message}"));
            });
            match bound {
                Some(bound) => {
                    extras.insert(extra, bound);
                }
                None => valid = false,
            }
        }

        let output = output?;

        if !valid {
            return None;
        }

        Some(FieldDescriptor {
            list: list.to_string(),
            name: name.to_string(),
            storage,
            inputs,
            output,
            extra_output: extras,
            views,
            label: label.unwrap_or_else(|| name.to_title_case()),
            admin_meta,
        })
    }

    pub fn list(&self) -> &str {
        &self.list
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `List.field`
    pub fn path(&self) -> String {
        format!("{}.{}", self.list, self.name)
    }

    pub fn storage(&self) -> &StorageField {
        &self.storage
    }

    pub fn input(&self, op: Operation) -> Option<&BoundInput> {
        self.inputs.get(&op)
    }

    pub fn inputs(&self) -> impl Iterator<Item = (Operation, &BoundInput)> + '_ {
        self.inputs.iter().map(|(op, input)| (*op, input))
    }

    pub fn output(&self) -> &BoundOutput {
        &self.output
    }

    /// Extra output fields by name, in declaration order.
    pub fn extra_outputs(&self) -> impl Iterator<Item = (&str, &BoundOutput)> + '_ {
        self.extra_output
            .iter()
            .map(|(name, output)| (name.as_str(), output))
    }

    pub fn shape(&self, op: Operation) -> Shape {
        self.storage.shape(op)
    }

    pub fn views(&self) -> &str {
        &self.views
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn admin_meta(&self) -> Option<serde_json::Value> {
        self.admin_meta.as_ref().map(AdminMeta::get)
    }
}

/// Settles an output resolver against the stored shape. Reports through
/// `report` and returns `None` when a required resolver is missing.
fn bind_output(output: FieldOutput, stored: &Shape, report: impl FnOnce(String)) -> Option<BoundOutput> {
    let accepted = output.ty.accepted_shape();
    let obligation = Obligation::for_output(stored, &accepted);

    let resolve = match (output.resolve, obligation) {
        (Some(resolve), _) => resolve,
        (None, Obligation::Optional) => Resolver::identity(),
        (None, Obligation::Mandatory) => {
            report(format!(
                "storage produces `{stored}`, which output type `{}` does not accept; an output resolver is required",
                output.ty.name()
            ));
            return None;
        }
    };

    Some(BoundOutput {
        ty: output.ty,
        resolve,
        stored: stored.clone(),
        accepted,
        obligation,
    })
}
