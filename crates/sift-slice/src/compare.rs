use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sift_query::{ComparisonOp, FieldValue};

/// Evaluate one comparison predicate against a field value.
///
/// Dispatch follows the value's variant: strings compare lexicographically,
/// numbers parse the operand in their own domain, timestamps parse the
/// operand through [`parse_time`]. Every anomaly — unparseable operand,
/// unsupported value — yields `false`, never an error.
pub fn compare(value: &FieldValue, operand: &str, op: ComparisonOp) -> bool {
    match value {
        FieldValue::Str(s) => apply(s.as_str(), operand, op),
        FieldValue::Int(i) => match operand.parse::<i64>() {
            Ok(b) => apply(i, &b, op),
            Err(_) => false,
        },
        FieldValue::Float(x) => match operand.parse::<f64>() {
            Ok(b) => apply(x, &b, op),
            Err(_) => false,
        },
        FieldValue::Time(t) => match parse_time(operand) {
            Some(b) => apply(t, &b, op),
            None => false,
        },
        FieldValue::Unsupported => false,
    }
}

fn apply<T: PartialOrd + ?Sized>(a: &T, b: &T, op: ComparisonOp) -> bool {
    match op {
        ComparisonOp::Eq => a == b,
        ComparisonOp::Gt => a > b,
        ComparisonOp::Gte => a >= b,
        ComparisonOp::Lt => a < b,
        ComparisonOp::Lte => a <= b,
    }
}

/// Parse a timestamp operand, trying layouts in order: RFC3339, then
/// `%Y-%m-%dT%H:%M:%SZ`, then `%Y-%m-%d %H:%M:%S`, then bare `%Y-%m-%d`
/// (midnight UTC). First successful layout wins.
pub fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ") {
        return Some(t.and_utc());
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    None
}
