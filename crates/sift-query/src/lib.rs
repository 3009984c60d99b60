mod page;
mod parse;
mod policy;
mod query;
mod record;
mod value;

pub use page::{PageData, PageError};
pub use parse::{ParseConfig, parse};
pub use policy::{allowed_columns, allowed_fields};
pub use query::{
    AllowedFields, ComparisonFilter, ComparisonOp, DEFAULT_LIMIT, DEFAULT_PAGE, QueryOptions,
    SearchField, SearchQuery, SortField,
};
pub use record::{FieldDef, Record};
pub use value::{FieldKind, FieldValue};
