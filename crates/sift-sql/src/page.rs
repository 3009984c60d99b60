use chrono::{Duration, NaiveDate, NaiveTime};
use sift_query::{
    AllowedFields, ComparisonOp, FieldKind, PageData, PageError, ParseConfig, QueryOptions, Record,
};
use tracing::debug;

use crate::adapter::{AdapterError, QueryAdapter};

const DAY_FORMAT: &str = "%Y-%m-%d";
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Drive a relational adapter with a query description.
///
/// Field names are translated through `allowed` at every step; fields
/// missing from the policy are skipped silently, matching the in-memory
/// engine. The returned page is always well-formed: adapter failures are
/// attached as `last_error` on an otherwise empty page, and a count timeout
/// degrades to `total = -1` without failing the fetch.
pub fn page<T, A>(
    adapter: &mut A,
    opts: &QueryOptions,
    allowed: &AllowedFields,
    config: &ParseConfig,
) -> PageData<T>
where
    T: Record,
    A: QueryAdapter<T>,
{
    let sep = config.separator.as_str();

    for (field, value) in &opts.filters {
        let Some(col) = allowed.get(field) else {
            continue;
        };
        if value.contains(sep) {
            let values: Vec<String> = value.split(sep).map(str::to_string).collect();
            adapter.where_in(col, &values);
        } else {
            adapter.where_eq(col, value);
        }
    }

    for cmp in &opts.comparisons {
        let Some(col) = allowed.get(&cmp.field) else {
            continue;
        };
        let value = widen_day_boundary::<T>(&cmp.field, cmp.op, &cmp.value);
        adapter.where_cmp(col, cmp.op, &value);
    }

    if let Some(search) = &opts.search {
        let columns: Vec<String> = search
            .fields
            .iter()
            .filter_map(|f| allowed.get(f).cloned())
            .collect();
        if !columns.is_empty() && !search.keyword.is_empty() {
            adapter.search_like(&columns, &search.keyword.to_lowercase());
        }
    }

    for sf in &opts.search_and {
        if sf.keyword.is_empty() {
            continue;
        }
        if let Some(col) = allowed.get(&sf.field) {
            adapter.where_like(col, &sf.keyword.to_lowercase());
        }
    }

    if !opts.select.is_empty() {
        let columns: Vec<String> = opts
            .select
            .iter()
            .filter_map(|f| allowed.get(f).cloned())
            .collect();
        if !columns.is_empty() {
            adapter.select(&columns);
        }
    }

    if !opts.group_by.is_empty() {
        let columns: Vec<String> = opts
            .group_by
            .iter()
            .filter_map(|f| allowed.get(f).cloned())
            .collect();
        if !columns.is_empty() {
            adapter.group_by(&columns);
        }
    }

    for s in &opts.sort {
        if let Some(col) = allowed.get(&s.field) {
            adapter.order_by(col, s.desc);
        }
    }

    let total = match adapter.count() {
        Ok(n) => n,
        Err(AdapterError::Timeout) => {
            debug!("count query timed out, reporting total as unknown");
            -1
        }
        Err(e) => {
            return PageData::degraded(
                opts.page,
                opts.limit,
                0,
                PageError::new(e.status_code(), e.to_string()),
            );
        }
    };

    debug!(offset = opts.offset, limit = opts.limit, "fetching page rows");
    match adapter.fetch(opts.offset, opts.limit) {
        Ok(items) => PageData {
            last_error: None,
            items,
            total,
            page: opts.page,
            limit: opts.limit,
        },
        Err(e) => PageData::degraded(
            opts.page,
            opts.limit,
            total,
            PageError::new(e.status_code(), e.to_string()),
        ),
    }
}

/// A bare `YYYY-MM-DD` operand against a date-typed field covers the whole
/// day: `gt` moves to the next day's start, `lte` to the day's last second,
/// everything else to the day's start. Non-date fields and operands that
/// already carry a time component pass through untouched.
fn widen_day_boundary<T: Record>(field: &str, op: ComparisonOp, value: &str) -> String {
    let Some(def) = T::field(field) else {
        return value.to_string();
    };
    if !matches!(def.kind, FieldKind::Date | FieldKind::DateTime) {
        return value.to_string();
    }
    let Ok(day) = NaiveDate::parse_from_str(value, DAY_FORMAT) else {
        return value.to_string();
    };
    let start = day.and_time(NaiveTime::MIN);
    let widened = match op {
        ComparisonOp::Gt => start + Duration::days(1),
        ComparisonOp::Lte => start + Duration::days(1) - Duration::seconds(1),
        _ => start,
    };
    widened.format(STAMP_FORMAT).to_string()
}
