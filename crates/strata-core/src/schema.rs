mod builder;
pub use builder::{Builder, FieldTypeFunc, ListDef};

mod config;
pub use config::{Config, DatabaseProvider, IdStrategy, StorageConfig};

mod context;
pub use context::{BuildContext, FieldData};

mod derive;
pub use derive::Operation;

mod descriptor;
pub use descriptor::{
    AdminMeta, BoundInput, BoundOutput, CreateInput, FieldDescriptor, FieldInput, FieldInputs,
    FieldOutput, FieldType,
};

mod error_set;

pub mod field;
pub use field::{
    Cardinality, EnumField, FieldMode, ForeignKey, Generated, IndexKind, MultiField,
    RandomEncoding, RelationField, ScalarDefault, ScalarField, ScalarType, StorageField,
};

mod find_many;
pub use find_many::FindManyArgs;

mod list;
pub use list::{List, ListTypeSet};

mod obligation;
pub use obligation::Obligation;

mod relate;
pub use relate::{ManyWhere, RelateMany, RelateOne, RelateToTypes, SetPolicy};

mod resolve;
pub use resolve::{Resolve, ResolveCx, Resolver};

mod shape;
pub use shape::{EnumShape, ListInput, ListInputKind, RelateOp, Related, Shape};

mod ty;
pub use ty::{Arg, EnumType, InputObjectType, InputType, ObjectType, OutputType};

mod verify;

use crate::stmt::{RelationKey, Side};

use indexmap::IndexMap;

/// A compiled, immutable set of lists.
#[derive(Debug)]
pub struct Schema {
    config: Config,
    lists: IndexMap<String, List>,
}

/// Where a relation field sits in the link store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationInfo {
    /// Canonical key shared by both ends of a two-sided relation
    pub key: RelationKey,

    /// Side of the link the field's own records sit on
    pub side: Side,

    pub target: String,

    pub cardinality: Cardinality,

    /// Cardinality of the back-reference, for two-sided relations
    pub pair: Option<Cardinality>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn new(config: Config, lists: IndexMap<String, List>) -> Schema {
        Schema { config, lists }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lists(&self) -> impl Iterator<Item = &List> + '_ {
        self.lists.values()
    }

    pub fn list(&self, name: &str) -> Option<&List> {
        self.lists.get(name)
    }

    #[track_caller]
    pub fn expect_list(&self, name: &str) -> &List {
        match self.lists.get(name) {
            Some(list) => list,
            None => panic!("no list named `{name}`"),
        }
    }

    /// Link-store location of the relation field `list.field`.
    ///
    /// Both ends of a two-sided relation share the key of whichever end sorts
    /// first, and sit on opposite sides of it.
    pub fn relation(&self, list: &str, field: &str) -> Option<RelationInfo> {
        let relation = self.list(list)?.field(field)?.storage().as_relation()?;

        let pair = relation.field.as_ref().and_then(|pair| {
            let storage = self.list(&relation.target)?.field(pair)?.storage();
            Some((pair.as_str(), storage.as_relation()?.cardinality))
        });

        let (key, side) = match pair {
            Some((pair, _)) if (relation.target.as_str(), pair) < (list, field) => {
                (RelationKey::new(&relation.target, pair), Side::Right)
            }
            _ => (RelationKey::new(list, field), Side::Left),
        };

        Some(RelationInfo {
            key,
            side,
            target: relation.target.clone(),
            cardinality: relation.cardinality,
            pair: pair.map(|(_, cardinality)| cardinality),
        })
    }
}
