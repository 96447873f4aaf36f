#[derive(Debug, Clone, PartialEq)]
pub struct RelationField {
    pub cardinality: Cardinality,

    /// Name of the related list
    pub target: String,

    /// Field on the target list that points back at this one, if the
    /// relation is two-sided
    pub field: Option<String>,

    /// This side stores the foreign key. `one` relations only.
    pub foreign_key: Option<ForeignKey>,

    /// Name of the implicit link table. `many` relations only.
    pub relation_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cardinality {
    One,
    Many,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKey {
    /// Storage column name for the key
    pub map: Option<String>,
}

impl RelationField {
    pub fn one(target: impl Into<String>) -> RelationField {
        RelationField::new(Cardinality::One, target)
    }

    pub fn many(target: impl Into<String>) -> RelationField {
        RelationField::new(Cardinality::Many, target)
    }

    fn new(cardinality: Cardinality, target: impl Into<String>) -> RelationField {
        RelationField {
            cardinality,
            target: target.into(),
            field: None,
            foreign_key: None,
            relation_name: None,
        }
    }

    pub fn is_one(&self) -> bool {
        self.cardinality == Cardinality::One
    }

    pub fn is_many(&self) -> bool {
        self.cardinality == Cardinality::Many
    }
}

impl Cardinality {
    pub fn name(self) -> &'static str {
        match self {
            Cardinality::One => "one",
            Cardinality::Many => "many",
        }
    }
}
