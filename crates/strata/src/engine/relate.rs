use super::create::PreparedCreate;
use super::Engine;
use crate::Result;

use strata_core::{
    err,
    schema::{
        Cardinality, FieldDescriptor, List, RelateMany, RelateOne, RelateOp, RelationInfo,
    },
    stmt::{Side, Value, ValueRecord},
    Error,
};

/// A relation input with every referenced record resolved to an id.
#[derive(Debug)]
pub(super) struct RelationWrite {
    info: RelationInfo,
    path: String,
    steps: Vec<Step>,
}

#[derive(Debug)]
enum Step {
    /// Replace the linked set
    Set(Vec<Value>),
    Disconnect(Value),
    DisconnectAll,
    Connect(Value),
    /// Create a target record, then link it
    Create(PreparedCreate),
}

/// A parsed relation input whose references are not yet resolved.
#[derive(Debug)]
pub(super) struct RelationInput {
    info: RelationInfo,
    path: String,
    input: Input,
}

#[derive(Debug)]
enum Input {
    One(RelateOne),
    Many(RelateMany),
}

impl Engine {
    pub(super) fn parse_relation(
        &self,
        list: &List,
        field: &FieldDescriptor,
        value: &Value,
        op: RelateOp,
    ) -> Result<Option<RelationInput>> {
        let info = self
            .schema
            .relation(list.name(), field.name())
            .ok_or_else(|| err!("`{}` is not a relation field", field.path()))?;
        let path = field.path();

        let input = match info.cardinality {
            Cardinality::One => RelateOne::parse(&path, value, op)?.map(Input::One),
            Cardinality::Many => {
                RelateMany::parse(&path, value, op, self.schema.config().relation_set)?
                    .map(Input::Many)
            }
        };

        Ok(input.map(|input| RelationInput { info, path, input }))
    }

    /// Resolves every unique-where and every nested create in `inputs`. Runs
    /// before the owning record is written so a missing reference or a
    /// failing nested resolver leaves storage untouched.
    pub(super) async fn prepare_relations(
        &self,
        inputs: Vec<RelationInput>,
    ) -> Result<Vec<RelationWrite>> {
        let mut writes = Vec::with_capacity(inputs.len());

        for RelationInput { info, path, input } in inputs {
            let mut steps = vec![];

            match input {
                Input::One(RelateOne::Create(data)) => {
                    steps.push(Step::Create(self.nested_create(&info, &path, data).await?));
                }
                Input::One(RelateOne::Connect(target)) => {
                    steps.push(Step::Connect(self.target_id(&info, &path, &target).await?));
                }
                Input::One(RelateOne::Disconnect) => steps.push(Step::DisconnectAll),
                Input::Many(many) => {
                    if let Some(set) = many.set {
                        let mut ids = Vec::with_capacity(set.len());
                        for target in &set {
                            ids.push(self.target_id(&info, &path, target).await?);
                        }
                        steps.push(Step::Set(ids));
                    }
                    for target in &many.disconnect {
                        steps.push(Step::Disconnect(self.target_id(&info, &path, target).await?));
                    }
                    for target in &many.connect {
                        steps.push(Step::Connect(self.target_id(&info, &path, target).await?));
                    }
                    for data in many.create {
                        steps.push(Step::Create(self.nested_create(&info, &path, data).await?));
                    }
                }
            }

            writes.push(RelationWrite { info, path, steps });
        }

        Ok(writes)
    }

    async fn nested_create(
        &self,
        info: &RelationInfo,
        path: &str,
        data: ValueRecord,
    ) -> Result<PreparedCreate> {
        self.prepare_create(&info.target, data)
            .await
            .map_err(|err| err.context(err!("{path}")))
    }

    async fn target_id(&self, info: &RelationInfo, path: &str, target: &ValueRecord) -> Result<Value> {
        let list = self.list(&info.target)?;
        let unique = self.resolve_unique(list, target).await?;

        match self.driver.find_unique(list.name(), &unique).await? {
            Some(record) => super::id_of(&record),
            None => Err(Error::record_not_found(format!("{} where {unique}", list.name()))
                .context(err!("{path}"))),
        }
    }

    /// Applies prepared writes to the record `from`.
    pub(super) async fn apply_relations(&self, from: &Value, writes: Vec<RelationWrite>) -> Result<()> {
        for RelationWrite { info, path, steps } in writes {
            for step in steps {
                self.apply_step(&info, from, step)
                    .await
                    .map_err(|err| err.context(err!("{path}")))?;
            }

            tracing::trace!(relation = %info.key, from = ?from, "relation written");
        }

        Ok(())
    }

    async fn apply_step(&self, info: &RelationInfo, from: &Value, step: Step) -> Result<()> {
        match step {
            Step::Set(ids) => {
                let current = self.driver.linked(&info.key, info.side, from).await?;

                for to in &current {
                    if !ids.iter().any(|id| id.loosely_eq(to)) {
                        self.unlink(info, from, to).await?;
                    }
                }
                for to in &ids {
                    if !current.iter().any(|id| id.loosely_eq(to)) {
                        self.link(info, from, to).await?;
                    }
                }
            }
            Step::Disconnect(to) => self.unlink(info, from, &to).await?,
            Step::DisconnectAll => {
                for to in self.driver.linked(&info.key, info.side, from).await? {
                    self.unlink(info, from, &to).await?;
                }
            }
            Step::Connect(to) => self.link(info, from, &to).await?,
            Step::Create(prepared) => {
                let created = self.write_create(prepared).await?;
                self.link(info, from, &super::id_of(&created)?).await?;
            }
        }

        Ok(())
    }

    /// Links `from` to `to`, first dropping links a `one` end can no longer
    /// hold.
    async fn link(&self, info: &RelationInfo, from: &Value, to: &Value) -> Result<()> {
        if info.cardinality == Cardinality::One {
            for existing in self.driver.linked(&info.key, info.side, from).await? {
                if !existing.loosely_eq(to) {
                    self.unlink(info, from, &existing).await?;
                }
            }
        }

        if info.pair == Some(Cardinality::One) {
            for existing in self.driver.linked(&info.key, info.side.flip(), to).await? {
                if !existing.loosely_eq(from) {
                    self.unlink(info, &existing, to).await?;
                }
            }
        }

        let (left, right) = ends(info.side, from, to);
        self.driver.connect(&info.key, left, right).await
    }

    async fn unlink(&self, info: &RelationInfo, from: &Value, to: &Value) -> Result<()> {
        let (left, right) = ends(info.side, from, to);
        self.driver.disconnect(&info.key, left, right).await
    }
}

fn ends<'a>(side: Side, from: &'a Value, to: &'a Value) -> (&'a Value, &'a Value) {
    match side {
        Side::Left => (from, to),
        Side::Right => (to, from),
    }
}
