use super::{describe, id_of, Engine};
use crate::{Output, OutputRecord, RelatedMany, RelatedOne, Result};

use futures::future::join_all;
use strata_core::{
    err,
    schema::{BoundOutput, Cardinality, FieldDescriptor, Operation, StorageField},
    stmt::ValueRecord,
    Error,
};

impl Engine {
    /// Resolves every output field of a stored record concurrently. A
    /// failing field does not affect the others.
    pub(crate) async fn output(&self, list: &str, record: &ValueRecord) -> Result<OutputRecord> {
        let list = self.list(list)?;
        let id = id_of(record)?;

        let outputs = list.fields().flat_map(|field| {
            let extras = field
                .extra_outputs()
                .map(move |(name, output)| (name, field, Some(output)));
            std::iter::once((field.name(), field, None)).chain(extras)
        });

        let pending = outputs.map(|(name, field, extra)| {
            let id = id.clone();
            async move {
                let output = match (field.storage(), extra) {
                    (_, Some(extra)) => {
                        let path = format!("{}.{name}", field.list());
                        self.output_value(field, extra, path, record).await
                    }
                    (StorageField::Relation(_), None) => self.related(field, id),
                    (_, None) => {
                        self.output_value(field, field.output(), field.path(), record)
                            .await
                    }
                };
                (name.to_string(), output)
            }
        });

        let fields = join_all(pending).await.into_iter().collect();
        let output = OutputRecord::new(fields);

        if !output.is_complete() {
            tracing::debug!(
                list = list.name(),
                failures = output.errors().count(),
                "output resolved with failures"
            );
        }

        Ok(output)
    }

    fn related(&self, field: &FieldDescriptor, from: strata_core::stmt::Value) -> Result<Output> {
        let info = self
            .schema
            .relation(field.list(), field.name())
            .ok_or_else(|| err!("`{}` is not a relation field", field.path()))?;

        Ok(match info.cardinality {
            Cardinality::One => Output::One(RelatedOne::new(self.clone(), info, from)),
            Cardinality::Many => Output::Many(RelatedMany::new(self.clone(), info, from)),
        })
    }

    /// Runs one output resolver over the field's stored value. `path` names
    /// the output field in errors.
    async fn output_value(
        &self,
        field: &FieldDescriptor,
        output: &BoundOutput,
        path: String,
        record: &ValueRecord,
    ) -> Result<Output> {
        let stored = record.get(field.name()).cloned();

        let mut cx = self.resolve_cx(field.list(), field.name(), Operation::Output);
        cx.item = Some(record);

        let resolved = output
            .resolve
            .resolve(stored, &cx)
            .await
            .map_err(|err| Error::resolution(path.clone(), err))?;

        if !output.accepted.admits(resolved.as_ref()) {
            return Err(Error::resolution(
                path,
                err!(
                    "output resolver returned {}, which `{}` does not accept",
                    describe(resolved.as_ref()),
                    output.ty.name()
                ),
            ));
        }

        Ok(Output::Value(resolved))
    }
}
