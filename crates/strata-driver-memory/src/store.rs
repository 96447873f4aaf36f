use indexmap::IndexMap;
use std::{cmp::Ordering, collections::HashMap};
use strata_core::{
    err,
    schema::{List, ScalarDefault, ScalarType, StorageField},
    stmt::{
        Filter, FindManyArgsValue, OrderBy, RelationFilter, RelationKey, Side, Value, ValueRecord,
    },
    Error, Result,
};

#[derive(Debug, Default)]
pub(crate) struct Store {
    tables: HashMap<String, Table>,

    /// Linked id pairs per relation, as `(left, right)`
    links: HashMap<RelationKey, Vec<(Value, Value)>>,
}

#[derive(Debug, Default)]
pub(crate) struct Table {
    name: String,
    pub(crate) rows: Vec<ValueRecord>,

    /// Next value per autoincrement field
    sequences: IndexMap<String, Sequence>,

    unique: Vec<String>,
}

#[derive(Debug)]
struct Sequence {
    ty: ScalarType,
    next: i64,
}

impl Store {
    pub(crate) fn register(&mut self, list: &List) {
        let mut table = Table {
            name: list.name().to_string(),
            ..Table::default()
        };

        for field in list.fields() {
            let StorageField::Scalar(scalar) = field.storage() else {
                continue;
            };

            if matches!(scalar.default, Some(ScalarDefault::Autoincrement)) {
                table.sequences.insert(
                    field.name().to_string(),
                    Sequence {
                        ty: scalar.scalar,
                        next: 1,
                    },
                );
            }

            if scalar.is_unique() {
                table.unique.push(field.name().to_string());
            }
        }

        self.tables.insert(table.name.clone(), table);
    }

    pub(crate) fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| err!("no table registered for list `{name}`"))
    }

    pub(crate) fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| err!("no table registered for list `{name}`"))
    }

    pub(crate) fn find_many(&self, list: &str, args: &FindManyArgsValue) -> Result<Vec<ValueRecord>> {
        let table = self.table(list)?;

        let mut rows: Vec<&ValueRecord> = table
            .rows
            .iter()
            .filter(|row| self.matches(&args.filter, row))
            .collect();

        if !args.order_by.is_empty() {
            rows.sort_by(|a, b| order(&args.order_by, a, b));
        }

        if let Some(cursor) = &args.cursor {
            let position = rows
                .iter()
                .position(|row| cursor.matches(row))
                .ok_or_else(|| Error::record_not_found(format!("cursor {list} where {cursor}")))?;
            rows.drain(..=position);
        }

        let skip = usize::try_from(args.skip).unwrap_or(usize::MAX);
        let take = args
            .take
            .map_or(usize::MAX, |take| usize::try_from(take).unwrap_or(usize::MAX));

        Ok(rows.into_iter().skip(skip).take(take).cloned().collect())
    }

    pub(crate) fn count(&self, list: &str, filter: &Filter) -> Result<u64> {
        let table = self.table(list)?;
        let count = table.rows.iter().filter(|row| self.matches(filter, row)).count();
        Ok(count as u64)
    }

    pub(crate) fn connect(&mut self, relation: &RelationKey, left: &Value, right: &Value) {
        let links = self.links.entry(relation.clone()).or_default();

        if !links
            .iter()
            .any(|(l, r)| l.loosely_eq(left) && r.loosely_eq(right))
        {
            links.push((left.clone(), right.clone()));
        }
    }

    pub(crate) fn disconnect(&mut self, relation: &RelationKey, left: &Value, right: &Value) {
        if let Some(links) = self.links.get_mut(relation) {
            links.retain(|(l, r)| !(l.loosely_eq(left) && r.loosely_eq(right)));
        }
    }

    pub(crate) fn linked(&self, relation: &RelationKey, side: Side, id: &Value) -> Vec<Value> {
        let Some(links) = self.links.get(relation) else {
            return vec![];
        };

        links
            .iter()
            .filter_map(|(left, right)| match side {
                Side::Left if left.loosely_eq(id) => Some(right.clone()),
                Side::Right if right.loosely_eq(id) => Some(left.clone()),
                _ => None,
            })
            .collect()
    }

    fn matches(&self, filter: &Filter, row: &ValueRecord) -> bool {
        filter.eval(row, &mut |relation: &RelationFilter, row: &ValueRecord| {
            self.relation_matches(relation, row)
        })
    }

    fn relation_matches(&self, filter: &RelationFilter, row: &ValueRecord) -> bool {
        let Some(id) = row.get("id") else {
            return filter.quantifier.eval([]);
        };
        let Some(target) = self.tables.get(&filter.target) else {
            return filter.quantifier.eval([]);
        };

        let related = self.linked(&filter.relation, filter.side, id);
        let results = target
            .rows
            .iter()
            .filter(|row| {
                row.get("id")
                    .is_some_and(|id| related.iter().any(|linked| linked.loosely_eq(id)))
            })
            .map(|row| self.matches(&filter.filter, row));

        filter.quantifier.eval(results)
    }
}

impl Table {
    pub(crate) fn insert(&mut self, mut record: ValueRecord) -> Result<ValueRecord> {
        for (name, sequence) in &mut self.sequences {
            if record.get(name).map_or(true, Value::is_null) {
                record.insert(name.as_str(), sequence.next_value()?);
            } else if let Some(n) = record.get(name).and_then(Value::as_i64) {
                // keep the sequence ahead of explicitly given values
                sequence.next = sequence.next.max(n.saturating_add(1));
            }
        }

        self.check_unique(&record, None)?;
        self.rows.push(record.clone());

        tracing::trace!(table = %self.name, rows = self.rows.len(), "inserted");
        Ok(record)
    }

    pub(crate) fn update(&mut self, id: &Value, changes: ValueRecord) -> Result<ValueRecord> {
        let index = self
            .rows
            .iter()
            .position(|row| row.get("id").is_some_and(|v| v.loosely_eq(id)))
            .ok_or_else(|| Error::record_not_found(format!("{} where {{id: {id:?}}}", self.name)))?;

        let mut updated = self.rows[index].clone();
        updated.merge(changes);
        self.check_unique(&updated, Some(index))?;

        self.rows[index] = updated.clone();
        Ok(updated)
    }

    fn check_unique(&self, record: &ValueRecord, skip: Option<usize>) -> Result<()> {
        for field in &self.unique {
            let Some(value) = record.get(field).filter(|value| !value.is_null()) else {
                continue;
            };

            let taken = self.rows.iter().enumerate().any(|(index, row)| {
                Some(index) != skip && row.get(field).is_some_and(|other| other.loosely_eq(value))
            });

            if taken {
                return Err(err!(
                    "unique constraint violated: `{}.{field}` already holds {value:?}",
                    self.name
                ));
            }
        }

        Ok(())
    }
}

impl Sequence {
    fn next_value(&mut self) -> Result<Value> {
        let n = self.next;
        self.next = n
            .checked_add(1)
            .ok_or_else(|| err!("autoincrement sequence exhausted"))?;

        match self.ty {
            ScalarType::Int => i32::try_from(n)
                .map(Value::I32)
                .map_err(|_| err!("autoincrement sequence exhausted")),
            _ => Ok(Value::I64(n)),
        }
    }
}

/// Lexicographic order over `order_by`. Nulls and missing values sort first.
fn order(order_by: &[OrderBy], a: &ValueRecord, b: &ValueRecord) -> Ordering {
    for OrderBy { path, direction } in order_by {
        let ordering = match (a.get_path(path), b.get_path(path)) {
            (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
            (None | Some(Value::Null), _) => Ordering::Less,
            (_, None | Some(Value::Null)) => Ordering::Greater,
            (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
        };

        let ordering = direction.apply(ordering);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
