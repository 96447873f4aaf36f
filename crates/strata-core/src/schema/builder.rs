mod id;

use super::config::{Config, IdStrategy};
use super::context::{BuildContext, FieldData};
use super::descriptor::{FieldDescriptor, FieldType};
use super::error_set::ErrorSet;
use super::list::List;
use super::verify;
use super::Schema;
use crate::Result;

use indexmap::IndexMap;
use std::fmt;

/// Builds a field's type once every list name is known.
pub type FieldTypeFunc = Box<dyn FnOnce(&FieldData<'_>) -> FieldType>;

/// Declaration of a list: its name, id strategy and field type functions.
pub struct ListDef {
    name: String,
    id: IdStrategy,
    fields: Vec<(String, FieldTypeFunc)>,
}

/// Compiles list declarations into a [`Schema`].
///
/// Compilation runs in two phases. First every list name is registered so
/// field types can refer to any list. Then each field type function runs and
/// its result is verified and assembled. All problems are collected and
/// reported together.
#[derive(Default)]
pub struct Builder {
    config: Config,
    lists: Vec<ListDef>,
}

impl ListDef {
    pub fn new(name: impl Into<String>) -> ListDef {
        ListDef {
            name: name.into(),
            id: IdStrategy::default(),
            fields: vec![],
        }
    }

    pub fn id(mut self, id: IdStrategy) -> ListDef {
        self.id = id;
        self
    }

    pub fn field<F>(mut self, name: impl Into<String>, field: F) -> ListDef
    where
        F: FnOnce(&FieldData<'_>) -> FieldType + 'static,
    {
        self.fields.push((name.into(), Box::new(field)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ListDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListDef")
            .field("name", &self.name)
            .field("id", &self.id)
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn list(&mut self, list: ListDef) -> &mut Self {
        self.lists.push(list);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let Builder { config, lists: defs } = self;
        let mut issues = ErrorSet::new();

        let cx = BuildContext::new(config, defs.iter().map(|def| def.name.clone()));
        tracing::debug!(lists = defs.len(), "compiling schema");

        let mut lists = IndexMap::new();

        for def in defs {
            let ListDef {
                name: list,
                id: id_strategy,
                mut fields,
            } = def;

            if lists.contains_key(&list) {
                issues.list(&list, "list is registered more than once");
                continue;
            }

            if !fields.iter().any(|(name, _)| name == "id") {
                let id_field: FieldTypeFunc = Box::new(move |_: &FieldData<'_>| id::field(id_strategy));
                fields.insert(0, ("id".to_string(), id_field));
            }

            let mut descriptors = IndexMap::new();

            for (name, func) in fields {
                if descriptors.contains_key(&name) {
                    issues.field(&list, &name, "field is declared more than once");
                    continue;
                }

                let data = FieldData {
                    cx: &cx,
                    list: &list,
                    field: &name,
                };
                let field_type = func(&data);

                verify::verify_field(&cx, &list, &name, &field_type.storage, &mut issues);

                if let Some(descriptor) =
                    FieldDescriptor::assemble(&cx, &list, &name, field_type, &mut issues)
                {
                    tracing::trace!(field = %descriptor.path(), "assembled field");
                    descriptors.insert(name, descriptor);
                }
            }

            let mut outputs: Vec<&str> = descriptors.keys().map(String::as_str).collect();
            for descriptor in descriptors.values() {
                for (extra, _) in descriptor.extra_outputs() {
                    if outputs.contains(&extra) {
                        issues.field(
                            &list,
                            descriptor.name(),
                            format!("extra output `{extra}` clashes with another output field"),
                        );
                    } else {
                        outputs.push(extra);
                    }
                }
            }

            lists.insert(list.clone(), List::new(list, id_strategy, descriptors));
        }

        verify::verify_relations(&lists, &mut issues);

        if !issues.is_empty() {
            tracing::debug!(issues = issues.len(), "schema rejected");
        }
        issues.into_result()?;

        Ok(Schema::new(cx.into_config(), lists))
    }
}
