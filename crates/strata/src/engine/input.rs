use super::{describe, Engine};
use crate::Result;

use futures::future::join_all;
use indexmap::IndexMap;
use strata_core::{
    err,
    schema::{List, Operation},
    stmt::{Value, ValueRecord},
    Error,
};

impl Engine {
    /// Runs the `op` resolvers of every field concurrently.
    ///
    /// On create, every field with a create input is resolved, with absent
    /// values replaced by the argument's default. On update, only fields
    /// present in `data` are resolved. A resolver's result must fit the
    /// field's storage shape; failures are collected across fields.
    pub(super) async fn resolve_input(
        &self,
        list: &List,
        op: Operation,
        data: &ValueRecord,
    ) -> Result<IndexMap<String, Option<Value>>> {
        if let Some(key) = data.keys().find(|key| {
            list.field(key)
                .and_then(|field| field.input(op))
                .and_then(|input| input.arg.as_ref())
                .is_none()
        }) {
            return Err(Error::invalid_argument(format!(
                "`{key}` is not a {op} input of `{}`",
                list.name()
            )));
        }

        let pending = list.fields().filter_map(|field| {
            let input = field.input(op)?;

            let value = match (&input.arg, data.get(field.name())) {
                (None, _) => None,
                (Some(_), Some(value)) => Some(value.clone()),
                (Some(arg), None) if op == Operation::Create => arg.default.clone(),
                (Some(_), None) => return None,
            };

            Some(async move {
                let cx = self.resolve_cx(list.name(), field.name(), op);
                let resolved = input
                    .resolve
                    .resolve(value, &cx)
                    .await
                    .map_err(|err| Error::resolution(field.path(), err))?;

                if !input.target.admits(resolved.as_ref()) {
                    return Err(Error::resolution(
                        field.path(),
                        err!(
                            "resolver returned {}, which does not fit `{}`",
                            describe(resolved.as_ref()),
                            input.target
                        ),
                    ));
                }

                Ok((field.name().to_string(), resolved))
            })
        });

        let mut resolved = IndexMap::new();
        let mut failures = vec![];

        for result in join_all(pending).await {
            match result {
                Ok((name, value)) => {
                    resolved.insert(name, value);
                }
                Err(err) => failures.push(err),
            }
        }

        if !failures.is_empty() {
            tracing::debug!(list = list.name(), %op, failures = failures.len(), "input resolution failed");
            return Err(Error::resolution_set(failures));
        }

        Ok(resolved)
    }
}
