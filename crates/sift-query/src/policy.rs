use std::sync::OnceLock;

use regex::Regex;

use crate::query::AllowedFields;
use crate::record::Record;

fn column_ident() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("^[a-zA-Z0-9_]+$").unwrap())
}

/// Identity allow-list over a record's logical field names.
///
/// Suitable for the in-memory engine, where logical and physical names
/// coincide.
pub fn allowed_fields<T: Record>() -> AllowedFields {
    T::fields()
        .iter()
        .map(|f| (f.name.to_string(), f.name.to_string()))
        .collect()
}

/// Relational policy: logical name → column name.
///
/// Columns that are not plain identifiers are dropped, so a descriptor table
/// can never smuggle SQL fragments into generated predicates.
pub fn allowed_columns<T: Record>() -> AllowedFields {
    let ident = column_ident();
    T::fields()
        .iter()
        .filter(|f| ident.is_match(f.column))
        .map(|f| (f.name.to_string(), f.column.to_string()))
        .collect()
}
