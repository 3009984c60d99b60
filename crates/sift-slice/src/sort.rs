use sift_query::FieldValue;

/// Three-way ordering contribution of one sort key, expressed as a strict
/// "comes before" relation. `desc` inverts the relation.
///
/// Mismatched or unsupported variants return `false` both ways, which a
/// stable sort turns into "leave these two in their previous order".
pub fn less(a: &FieldValue, b: &FieldValue, desc: bool) -> bool {
    match (a, b) {
        (FieldValue::Str(a), FieldValue::Str(b)) => ordered(a, b, desc),
        (FieldValue::Int(a), FieldValue::Int(b)) => ordered(a, b, desc),
        (FieldValue::Float(a), FieldValue::Float(b)) => ordered(a, b, desc),
        (FieldValue::Time(a), FieldValue::Time(b)) => ordered(a, b, desc),
        _ => false,
    }
}

fn ordered<T: PartialOrd>(a: &T, b: &T, desc: bool) -> bool {
    if desc { a > b } else { a < b }
}
