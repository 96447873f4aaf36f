mod filter;
pub use filter::{FieldOp, Filter, Quantifier, QueryMode, RelationFilter};

mod find_many;
pub use find_many::{CursorPolicy, FindManyArgsValue};

mod link;
pub use link::{RelationKey, Side};

mod order_by;
pub use order_by::{Direction, OrderBy};

mod unique_where;
pub use unique_where::UniqueWhere;

mod value;
pub use value::Value;

mod value_cmp;

mod value_record;
pub use value_record::ValueRecord;
