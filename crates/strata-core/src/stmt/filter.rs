use super::{RelationKey, Side, Value, ValueRecord};

use std::cmp::Ordering;

/// A resolved `where` condition, handed to the driver.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Filter {
    /// Matches every record. An empty `where` resolves to this.
    #[default]
    All,

    And(Vec<Filter>),

    Or(Vec<Filter>),

    Not(Box<Filter>),

    /// Condition on a field, or on a subfield of a `multi` field
    Field { path: Vec<String>, op: FieldOp },

    /// Quantified condition over the records linked through a relation
    Relation(RelationFilter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationFilter {
    pub relation: RelationKey,

    /// Side of the link the filtered record sits on
    pub side: Side,

    /// List the related records belong to
    pub target: String,

    pub quantifier: Quantifier,

    /// Condition evaluated against each related record
    pub filter: Box<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Equals(Value),
    NotEquals(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Lt(Value),
    Lte(Value),
    Gt(Value),
    Gte(Value),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    /// Applies the inner operator with string values compared
    /// case-insensitively
    Insensitive(Box<FieldOp>),
}

/// How string operators compare text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    #[default]
    Default,
    Insensitive,
}

/// How a filter over a related set combines its per-record results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// All related records match; true for an empty set
    Every,

    /// At least one related record matches; false for an empty set
    Some,

    /// No related record matches; true for an empty set
    None,
}

impl Filter {
    pub fn field(name: impl Into<String>, op: FieldOp) -> Filter {
        Filter::Field {
            path: vec![name.into()],
            op,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    /// Conjunction that drops `All` operands.
    pub fn and_from_vec(filters: Vec<Filter>) -> Filter {
        let mut operands: Vec<_> = filters.into_iter().filter(|f| !f.is_all()).collect();

        match operands.len() {
            0 => Filter::All,
            1 => operands.remove(0),
            _ => Filter::And(operands),
        }
    }

    /// Evaluates every non-relation condition against `record`. Relation
    /// conditions are delegated to `related`, which receives the relation
    /// filter and must report whether it holds for `record`.
    pub fn eval(
        &self,
        record: &ValueRecord,
        related: &mut dyn FnMut(&RelationFilter, &ValueRecord) -> bool,
    ) -> bool {
        match self {
            Filter::All => true,
            Filter::And(operands) => operands.iter().all(|f| f.eval(record, related)),
            Filter::Or(operands) => operands.iter().any(|f| f.eval(record, related)),
            Filter::Not(operand) => !operand.eval(record, related),
            Filter::Field { path, op } => {
                let null = Value::Null;
                op.matches(record.get_path(path).unwrap_or(&null))
            }
            Filter::Relation(filter) => related(filter, record),
        }
    }
}

impl FieldOp {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldOp::Equals(expect) => value.loosely_eq(expect),
            FieldOp::NotEquals(expect) => !value.loosely_eq(expect),
            FieldOp::In(items) => items.iter().any(|item| value.loosely_eq(item)),
            FieldOp::NotIn(items) => !items.iter().any(|item| value.loosely_eq(item)),
            FieldOp::Lt(bound) => value.compare(bound) == Some(Ordering::Less),
            FieldOp::Lte(bound) => matches!(
                value.compare(bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FieldOp::Gt(bound) => value.compare(bound) == Some(Ordering::Greater),
            FieldOp::Gte(bound) => matches!(
                value.compare(bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FieldOp::Contains(needle) => value.as_str().is_some_and(|v| v.contains(needle.as_str())),
            FieldOp::StartsWith(prefix) => {
                value.as_str().is_some_and(|v| v.starts_with(prefix.as_str()))
            }
            FieldOp::EndsWith(suffix) => value.as_str().is_some_and(|v| v.ends_with(suffix.as_str())),
            FieldOp::Insensitive(op) => op.fold_case().matches(&value.fold_case()),
        }
    }

    /// Wraps `self` for the given mode.
    pub fn with_mode(self, mode: QueryMode) -> FieldOp {
        match mode {
            QueryMode::Default => self,
            QueryMode::Insensitive => FieldOp::Insensitive(Box::new(self)),
        }
    }

    fn fold_case(&self) -> FieldOp {
        let fold = |s: &str| s.to_lowercase();

        match self {
            FieldOp::Equals(v) => FieldOp::Equals(v.fold_case()),
            FieldOp::NotEquals(v) => FieldOp::NotEquals(v.fold_case()),
            FieldOp::In(items) => FieldOp::In(items.iter().map(Value::fold_case).collect()),
            FieldOp::NotIn(items) => FieldOp::NotIn(items.iter().map(Value::fold_case).collect()),
            FieldOp::Lt(v) => FieldOp::Lt(v.fold_case()),
            FieldOp::Lte(v) => FieldOp::Lte(v.fold_case()),
            FieldOp::Gt(v) => FieldOp::Gt(v.fold_case()),
            FieldOp::Gte(v) => FieldOp::Gte(v.fold_case()),
            FieldOp::Contains(s) => FieldOp::Contains(fold(s)),
            FieldOp::StartsWith(s) => FieldOp::StartsWith(fold(s)),
            FieldOp::EndsWith(s) => FieldOp::EndsWith(fold(s)),
            FieldOp::Insensitive(op) => op.fold_case(),
        }
    }
}

impl QueryMode {
    pub fn parse(src: &str) -> Option<QueryMode> {
        match src {
            "default" => Some(QueryMode::Default),
            "insensitive" => Some(QueryMode::Insensitive),
            _ => None,
        }
    }
}

impl Quantifier {
    /// Combines per-record match results.
    pub fn eval(self, matches: impl IntoIterator<Item = bool>) -> bool {
        let mut matches = matches.into_iter();

        match self {
            Quantifier::Every => matches.all(|m| m),
            Quantifier::Some => matches.any(|m| m),
            Quantifier::None => !matches.any(|m| m),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quantifier::Every => "every",
            Quantifier::Some => "some",
            Quantifier::None => "none",
        }
    }
}
