#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering on one field, or one subfield of a `multi` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub path: Vec<String>,
    pub direction: Direction,
}

impl Direction {
    pub fn parse(src: &str) -> Option<Direction> {
        match src {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl OrderBy {
    pub fn field(name: impl Into<String>, direction: Direction) -> OrderBy {
        OrderBy {
            path: vec![name.into()],
            direction,
        }
    }
}
