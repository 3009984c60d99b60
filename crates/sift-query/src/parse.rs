use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::query::{
    ComparisonFilter, ComparisonOp, QueryOptions, SearchField, SearchQuery, SortField,
};

/// Parser configuration.
///
/// The separator splits list-valued parameters (`sort`, `search`, `select`,
/// `group`) and marks IN-style filter values in the relational path. It is
/// explicit per call rather than process-wide state; build one at startup
/// and share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    pub separator: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
        }
    }
}

impl ParseConfig {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

/// Keys consumed by the structured rules below; never generic filters.
const RESERVED: [&str; 7] = ["page", "limit", "sort", "search", "keyword", "select", "group"];

fn comparison_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([a-zA-Z0-9_]+)\[(gt|gte|lt|lte|eq)\]$").unwrap())
}

/// Decode raw multi-valued query parameters into a [`QueryOptions`].
///
/// Parameters are `(key, value)` pairs; a repeated key keeps its first
/// value for every single-valued rule. Anomalies never fail the parse:
/// bad or non-positive `page`/`limit` fall back to their defaults, and
/// malformed structured keys degrade to generic equality filters.
pub fn parse(params: &[(String, String)], config: &ParseConfig) -> QueryOptions {
    let sep = config.separator.as_str();
    let mut opts = QueryOptions::default();

    let first = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    if let Some(p) = first("page") {
        if let Ok(page) = p.parse::<i64>() {
            if page > 0 {
                opts.page = page;
            }
        }
    }
    if let Some(l) = first("limit") {
        if let Ok(limit) = l.parse::<i64>() {
            if limit > 0 {
                opts.limit = limit;
            }
        }
    }
    opts.offset = opts.page.saturating_sub(1).saturating_mul(opts.limit);

    if let Some(sort) = first("sort") {
        if !sort.is_empty() {
            for token in sort.split(sep) {
                let (field, desc) = match token.strip_prefix('-') {
                    Some(rest) => (rest, true),
                    None => (token, false),
                };
                opts.sort.push(SortField {
                    field: field.to_string(),
                    desc,
                });
            }
        }
    }

    // Free search requires both halves; either one alone produces nothing.
    if let Some(fields) = first("search") {
        if !fields.is_empty() {
            if let Some(keyword) = first("keyword") {
                if !keyword.is_empty() {
                    opts.search = Some(SearchQuery {
                        fields: fields.split(sep).map(str::to_string).collect(),
                        keyword: keyword.to_string(),
                    });
                }
            }
        }
    }

    if let Some(sel) = first("select") {
        if !sel.is_empty() {
            opts.select = sel.split(sep).map(str::to_string).collect();
        }
    }

    // Grouping forces the selection to the group set and pulls every sort
    // field into the grouping so a relational GROUP BY can cover ORDER BY.
    if let Some(group) = first("group") {
        if !group.is_empty() {
            opts.group_by = group.split(sep).map(str::to_string).collect();
            opts.select = opts.group_by.clone();
            for s in &opts.sort {
                opts.group_by.push(s.field.clone());
            }
        }
    }

    let mut seen = BTreeSet::new();
    for (key, value) in params {
        if RESERVED.contains(&key.as_str()) || !seen.insert(key.as_str()) {
            continue;
        }
        if let Some(field) = key
            .strip_prefix("search_and.")
            .or_else(|| key.strip_prefix("searchAnd."))
        {
            // The pattern needs a non-empty field name; a bare prefix falls
            // through to the generic-filter rule below.
            if !field.is_empty() {
                // Empty keywords are dropped: they constrain nothing.
                if !value.is_empty() {
                    opts.search_and.push(SearchField {
                        field: field.to_string(),
                        keyword: value.clone(),
                    });
                }
                continue;
            }
        }
        if let Some(caps) = comparison_key().captures(key) {
            opts.comparisons.push(ComparisonFilter {
                field: caps[1].to_string(),
                op: ComparisonOp::parse(&caps[2]).unwrap_or(ComparisonOp::Eq),
                value: value.clone(),
            });
            continue;
        }
        opts.filters.insert(key.clone(), value.clone());
    }

    opts
}

impl QueryOptions {
    /// Serialize back to query parameters, the inverse of [`parse`] for the
    /// comparable subset of fields.
    ///
    /// `group_by` is omitted: parsing a `group` key rewrites `select` and
    /// re-appends sort fields, so grouping does not round-trip.
    pub fn to_params(&self, config: &ParseConfig) -> Vec<(String, String)> {
        let sep = config.separator.as_str();
        let mut params = Vec::new();

        params.push(("page".to_string(), self.page.to_string()));
        params.push(("limit".to_string(), self.limit.to_string()));

        if !self.sort.is_empty() {
            let sort = self
                .sort
                .iter()
                .map(|s| {
                    if s.desc {
                        format!("-{}", s.field)
                    } else {
                        s.field.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(sep);
            params.push(("sort".to_string(), sort));
        }

        if let Some(search) = &self.search {
            if !search.fields.is_empty() && !search.keyword.is_empty() {
                params.push(("search".to_string(), search.fields.join(sep)));
                params.push(("keyword".to_string(), search.keyword.clone()));
            }
        }

        if !self.select.is_empty() && self.group_by.is_empty() {
            params.push(("select".to_string(), self.select.join(sep)));
        }

        for sf in &self.search_and {
            if !sf.keyword.is_empty() {
                params.push((format!("search_and.{}", sf.field), sf.keyword.clone()));
            }
        }

        for cmp in &self.comparisons {
            params.push((
                format!("{}[{}]", cmp.field, cmp.op.as_str()),
                cmp.value.clone(),
            ));
        }

        for (field, value) in &self.filters {
            params.push((field.clone(), value.clone()));
        }

        params
    }
}
