use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Logical field name → physical column name.
///
/// This is the authorization boundary: a filter, comparison, sort, search or
/// select field that is not a key in this map is silently ignored by both
/// execution engines. Unknown fields cannot probe query capabilities; the
/// trade-off is that typos are invisible to the caller.
pub type AllowedFields = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "eq",
            ComparisonOp::Gt => "gt",
            ComparisonOp::Gte => "gte",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Lte => "lte",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(ComparisonOp::Eq),
            "gt" => Some(ComparisonOp::Gt),
            "gte" => Some(ComparisonOp::Gte),
            "lt" => Some(ComparisonOp::Lt),
            "lte" => Some(ComparisonOp::Lte),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    #[serde(default)]
    pub desc: bool,
}

/// OR-combined substring search: one keyword matched against every listed
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub fields: Vec<String>,
    pub keyword: String,
}

/// One field of an AND-combined search; each field carries its own keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchField {
    pub field: String,
    pub keyword: String,
}

/// A single `(field, operator, value)` range predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonFilter {
    pub field: String,
    pub op: ComparisonOp,
    pub value: String,
}

/// The canonical query description shared by the in-memory and relational
/// execution engines.
///
/// `offset` is always derived from `page` and `limit`; the parser and
/// [`QueryOptions::normalize`] keep it consistent. `filters` values that
/// contain the configured separator denote an IN-style set in the relational
/// path only — the in-memory engine matches the whole string exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
    pub sort: Vec<SortField>,
    pub search: Option<SearchQuery>,
    pub search_and: Vec<SearchField>,
    pub filters: BTreeMap<String, String>,
    pub select: Vec<String>,
    pub group_by: Vec<String>,
    pub comparisons: Vec<ComparisonFilter>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            offset: 0,
            sort: Vec::new(),
            search: None,
            search_and: Vec::new(),
            filters: BTreeMap::new(),
            select: Vec::new(),
            group_by: Vec::new(),
            comparisons: Vec::new(),
        }
    }
}

impl QueryOptions {
    /// Clamp non-positive `page`/`limit` to their defaults and recompute
    /// `offset`. Options built programmatically or decoded from a wire
    /// message should pass through here before execution.
    pub fn normalize(&mut self) {
        if self.page < 1 {
            self.page = DEFAULT_PAGE;
        }
        if self.limit < 1 {
            self.limit = DEFAULT_LIMIT;
        }
        self.offset = self.page.saturating_sub(1).saturating_mul(self.limit);
    }
}
