use crate::value::{FieldKind, FieldValue};

/// One row of a record type's field-descriptor table.
///
/// `name` is the logical, caller-facing field name used in query parameters;
/// `column` is the physical column the relational path maps it to. Fields
/// suppressed from the external representation are simply not listed.
pub struct FieldDef<T> {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    pub get: fn(&T) -> FieldValue,
}

/// A record type the engines can query.
///
/// The descriptor table is authored (or generated) once per type and reused
/// for every request; its order matters because field resolution walks it in
/// declaration order.
pub trait Record: Sized + 'static {
    fn fields() -> &'static [FieldDef<Self>];

    /// Resolve a logical field name against the descriptor table: first
    /// exact match wins, then the first ASCII-case-insensitive match.
    ///
    /// `None` means the field is absent. Callers treat absence as "predicate
    /// fails" or "sort key skipped" — it is never an error.
    fn field(name: &str) -> Option<&'static FieldDef<Self>> {
        let fields = Self::fields();
        fields
            .iter()
            .find(|f| f.name == name)
            .or_else(|| fields.iter().find(|f| f.name.eq_ignore_ascii_case(name)))
    }
}
