use super::field::ScalarType;
use super::shape::{ListInput, ListInputKind};
use super::ty::{Arg, InputType};
use crate::stmt::{Value, ValueRecord};

/// Declared arguments of a list query.
#[derive(Debug, Clone, PartialEq)]
pub struct FindManyArgs {
    pub r#where: Arg,
    pub order_by: Arg,
    pub take: Arg,
    pub skip: Arg,
    pub cursor: Arg,
}

impl FindManyArgs {
    pub fn for_list(list: &str) -> FindManyArgs {
        let input = |kind| InputType::Ref(ListInput::new(list, kind));

        FindManyArgs {
            r#where: Arg::new(input(ListInputKind::Where).non_null())
                .with_default(ValueRecord::new()),
            order_by: Arg::new(input(ListInputKind::OrderBy).non_null().list_of().non_null())
                .with_default(Value::List(vec![])),
            take: Arg::new(InputType::Scalar(ScalarType::Int)),
            skip: Arg::new(InputType::Scalar(ScalarType::Int).non_null()).with_default(0),
            cursor: Arg::new(input(ListInputKind::UniqueWhere)),
        }
    }

    /// Arguments by their API name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Arg)> + '_ {
        [
            ("where", &self.r#where),
            ("orderBy", &self.order_by),
            ("take", &self.take),
            ("skip", &self.skip),
            ("cursor", &self.cursor),
        ]
        .into_iter()
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.iter().find(|(arg, _)| *arg == name).map(|(_, arg)| arg)
    }
}
