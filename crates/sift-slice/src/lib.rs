mod compare;
mod sort;

use std::cmp::Ordering;

use sift_query::{AllowedFields, PageData, QueryOptions, Record};

pub use compare::{compare, parse_time};
pub use sort::less;

/// Execute a query description against an in-memory slice.
///
/// Stages run in a fixed order, each over the output of the previous one:
/// comparison filters, equality filters, free search, AND search, sorting,
/// pagination. Every field reference is checked against `allowed` first; a
/// field missing from the policy is skipped as if the caller had never sent
/// it. Data-shape problems (unparseable operands, unsupported field types,
/// unresolvable fields) degrade to non-matches — this function has no error
/// path and always returns a well-formed page.
pub fn slice_page<T>(source: &[T], opts: &QueryOptions, allowed: &AllowedFields) -> PageData<T>
where
    T: Record + Clone,
{
    let offset = opts.page.saturating_sub(1).saturating_mul(opts.limit);

    // Comparison filters: conjunction. A comparison on an allowed field
    // that fails — or cannot resolve — disqualifies the record.
    let mut filtered: Vec<T> = source
        .iter()
        .filter(|item| {
            opts.comparisons.iter().all(|cmp| {
                if !allowed.contains_key(&cmp.field) {
                    return true;
                }
                match T::field(&cmp.field) {
                    Some(def) => compare(&(def.get)(item), &cmp.value, cmp.op),
                    None => false,
                }
            })
        })
        .cloned()
        .collect();

    // Equality filters: stringified exact match, conjunction.
    if !opts.filters.is_empty() {
        filtered.retain(|item| {
            opts.filters.iter().all(|(field, want)| {
                if !allowed.contains_key(field) {
                    return true;
                }
                match T::field(field) {
                    Some(def) => (def.get)(item).to_string() == *want,
                    None => false,
                }
            })
        });
    }

    // Free search: one keyword, any allowed field may match.
    if let Some(search) = &opts.search {
        let keyword = search.keyword.to_lowercase();
        filtered.retain(|item| {
            search.fields.iter().any(|field| {
                allowed.contains_key(field)
                    && T::field(field).is_some_and(|def| {
                        (def.get)(item).to_string().to_lowercase().contains(&keyword)
                    })
            })
        });
    }

    // AND search: every allowed pair must match its own keyword. An empty
    // keyword constrains nothing; an unresolvable field disqualifies.
    if !opts.search_and.is_empty() {
        let pairs: Vec<(&str, String)> = opts
            .search_and
            .iter()
            .map(|sf| (sf.field.as_str(), sf.keyword.to_lowercase()))
            .collect();
        filtered.retain(|item| {
            pairs.iter().all(|(field, keyword)| {
                if !allowed.contains_key(*field) || keyword.is_empty() {
                    return true;
                }
                match T::field(field) {
                    Some(def) => (def.get)(item).to_string().to_lowercase().contains(keyword),
                    None => false,
                }
            })
        });
    }

    // Sort keys apply in reverse declaration order, each pass a full stable
    // sort by that single key. Repeated stable passes leave the first
    // declared key primary. Unknown or disallowed keys are skipped without
    // perturbing the order.
    for key in opts.sort.iter().rev() {
        if !allowed.contains_key(&key.field) {
            continue;
        }
        let Some(def) = T::field(&key.field) else {
            continue;
        };
        filtered.sort_by(|a, b| {
            let va = (def.get)(a);
            let vb = (def.get)(b);
            if less(&va, &vb, key.desc) {
                Ordering::Less
            } else if less(&vb, &va, key.desc) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
    }

    let total = filtered.len() as i64;
    let start = offset.clamp(0, total);
    let end = offset.saturating_add(opts.limit.max(0)).clamp(start, total);
    let items = filtered[start as usize..end as usize].to_vec();

    PageData {
        last_error: None,
        items,
        total,
        page: opts.page,
        limit: opts.limit,
    }
}
