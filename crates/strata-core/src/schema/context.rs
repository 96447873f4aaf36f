use super::config::{Config, DatabaseProvider, StorageConfig};
use super::shape::{ListInput, ListInputKind};

use indexmap::IndexSet;

/// Everything a field type can see while it is being built.
#[derive(Debug)]
pub struct BuildContext {
    config: Config,
    lists: IndexSet<String>,
}

/// Arguments to a field type function.
#[derive(Debug, Clone, Copy)]
pub struct FieldData<'a> {
    pub cx: &'a BuildContext,
    pub list: &'a str,
    pub field: &'a str,
}

impl BuildContext {
    pub(crate) fn new(config: Config, lists: impl IntoIterator<Item = String>) -> BuildContext {
        BuildContext {
            config,
            lists: lists.into_iter().collect(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> DatabaseProvider {
        self.config.provider
    }

    pub fn has_list(&self, name: &str) -> bool {
        self.lists.contains(name)
    }

    pub fn lists(&self) -> impl Iterator<Item = &str> + '_ {
        self.lists.iter().map(String::as_str)
    }

    pub fn storage(&self, name: &str) -> Option<&StorageConfig> {
        self.config.storage.get(name)
    }

    /// Reference to a generated input type. The list is checked when the
    /// field is assembled, not here.
    pub fn list_input(&self, list: &str, kind: ListInputKind) -> ListInput {
        ListInput::new(list, kind)
    }

    pub(crate) fn into_config(self) -> Config {
        self.config
    }
}

impl FieldData<'_> {
    pub fn path(&self) -> String {
        format!("{}.{}", self.list, self.field)
    }
}
