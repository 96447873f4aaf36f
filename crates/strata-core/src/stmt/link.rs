/// Identifies the link table behind a relation. Both fields of a paired
/// relation map to the same key; the side tells which end a field sits on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationKey {
    /// List on the left side of the link
    pub list: String,

    /// Field on the left side of the link
    pub field: String,
}

/// End of a link a relation field reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl RelationKey {
    pub fn new(list: impl Into<String>, field: impl Into<String>) -> RelationKey {
        RelationKey {
            list: list.into(),
            field: field.into(),
        }
    }
}

impl Side {
    #[must_use]
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl core::fmt::Display for RelationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}.{}", self.list, self.field)
    }
}
