use chrono::{TimeZone, Utc};
use sift_query::{
    AllowedFields, ComparisonFilter, ComparisonOp, FieldDef, FieldKind, FieldValue, ParseConfig,
    QueryOptions, Record, SearchField, SearchQuery, SortField, allowed_fields, parse,
};
use sift_slice::slice_page;

#[derive(Debug, Clone, PartialEq)]
struct Employee {
    name: &'static str,
    dept: &'static str,
    age: i64,
    rating: f64,
    joined: (i32, u32, u32),
}

impl Record for Employee {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: [FieldDef<Employee>; 5] = [
            FieldDef {
                name: "name",
                column: "name",
                kind: FieldKind::Str,
                get: |e| FieldValue::Str(e.name.to_string()),
            },
            FieldDef {
                name: "dept",
                column: "dept",
                kind: FieldKind::Str,
                get: |e| FieldValue::Str(e.dept.to_string()),
            },
            FieldDef {
                name: "age",
                column: "age",
                kind: FieldKind::Int,
                get: |e| FieldValue::Int(e.age),
            },
            FieldDef {
                name: "rating",
                column: "rating",
                kind: FieldKind::Float,
                get: |e| FieldValue::Float(e.rating),
            },
            FieldDef {
                name: "joined",
                column: "joined_at",
                kind: FieldKind::Date,
                get: |e| {
                    let (y, m, d) = e.joined;
                    match Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single() {
                        Some(t) => FieldValue::Time(t),
                        None => FieldValue::Unsupported,
                    }
                },
            },
        ];
        &FIELDS
    }
}

fn staff() -> Vec<Employee> {
    vec![
        Employee {
            name: "Alice",
            dept: "eng",
            age: 25,
            rating: 4.5,
            joined: (2021, 3, 1),
        },
        Employee {
            name: "Bob",
            dept: "eng",
            age: 30,
            rating: 3.9,
            joined: (2019, 7, 15),
        },
        Employee {
            name: "Carol",
            dept: "sales",
            age: 30,
            rating: 4.8,
            joined: (2022, 1, 10),
        },
        Employee {
            name: "Dave",
            dept: "sales",
            age: 41,
            rating: 3.2,
            joined: (2018, 11, 2),
        },
    ]
}

fn policy() -> AllowedFields {
    allowed_fields::<Employee>()
}

fn names(page: &sift_query::PageData<Employee>) -> Vec<&'static str> {
    page.items.iter().map(|e| e.name).collect()
}

#[test]
fn comparison_filters_are_conjunctive() {
    let two = vec![staff()[0].clone(), staff()[1].clone()];
    let opts = QueryOptions {
        comparisons: vec![ComparisonFilter {
            field: "age".into(),
            op: ComparisonOp::Gte,
            value: "30".into(),
        }],
        ..QueryOptions::default()
    };
    let page = slice_page(&two, &opts, &policy());
    assert_eq!(names(&page), vec!["Bob"]);
    assert_eq!(page.total, 1);
}

#[test]
fn sort_desc_with_limit_pages_the_top() {
    let two = vec![staff()[0].clone(), staff()[1].clone()];
    let opts = QueryOptions {
        limit: 1,
        sort: vec![SortField {
            field: "age".into(),
            desc: true,
        }],
        ..QueryOptions::default()
    };
    let page = slice_page(&two, &opts, &policy());
    assert_eq!(names(&page), vec!["Bob"]);
    assert_eq!(page.total, 2);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 1);
}

#[test]
fn range_comparisons_combine() {
    let opts = QueryOptions {
        comparisons: vec![
            ComparisonFilter {
                field: "age".into(),
                op: ComparisonOp::Gt,
                value: "25".into(),
            },
            ComparisonFilter {
                field: "age".into(),
                op: ComparisonOp::Lt,
                value: "41".into(),
            },
        ],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Bob", "Carol"]);
}

#[test]
fn date_comparisons_use_instants() {
    let opts = QueryOptions {
        comparisons: vec![ComparisonFilter {
            field: "joined".into(),
            op: ComparisonOp::Gte,
            value: "2021-01-01".into(),
        }],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Alice", "Carol"]);
}

#[test]
fn equality_filters_match_the_stringified_value() {
    let opts = QueryOptions {
        filters: [("age".to_string(), "30".to_string())].into(),
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Bob", "Carol"]);

    let opts = QueryOptions {
        filters: [("dept".to_string(), "sales".to_string())].into(),
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Carol", "Dave"]);
}

#[test]
fn free_search_is_case_insensitive_or() {
    let opts = QueryOptions {
        search: Some(SearchQuery {
            fields: vec!["name".into(), "dept".into()],
            keyword: "AL".into(),
        }),
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    // "AL" hits Alice by name and Carol/Dave by dept "sales".
    assert_eq!(names(&page), vec!["Alice", "Carol", "Dave"]);
}

#[test]
fn and_search_requires_every_pair() {
    let opts = QueryOptions {
        search_and: vec![
            SearchField {
                field: "dept".into(),
                keyword: "eng".into(),
            },
            SearchField {
                field: "name".into(),
                keyword: "b".into(),
            },
        ],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Bob"]);
}

#[test]
fn and_search_empty_keyword_constrains_nothing() {
    let opts = QueryOptions {
        search_and: vec![
            SearchField {
                field: "dept".into(),
                keyword: "sales".into(),
            },
            SearchField {
                field: "name".into(),
                keyword: String::new(),
            },
        ],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Carol", "Dave"]);
}

#[test]
fn and_search_unresolvable_allowed_field_disqualifies() {
    let mut allowed = policy();
    allowed.insert("ghost".into(), "ghost".into());
    let opts = QueryOptions {
        search_and: vec![SearchField {
            field: "ghost".into(),
            keyword: "x".into(),
        }],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &allowed);
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
}

#[test]
fn fields_outside_the_policy_are_invisible() {
    let baseline = slice_page(&staff(), &QueryOptions::default(), &policy());

    let opts = QueryOptions {
        filters: [("salary".to_string(), "1000000".to_string())].into(),
        comparisons: vec![ComparisonFilter {
            field: "salary".into(),
            op: ComparisonOp::Gt,
            value: "0".into(),
        }],
        sort: vec![SortField {
            field: "salary".into(),
            desc: true,
        }],
        search_and: vec![SearchField {
            field: "salary".into(),
            keyword: "9".into(),
        }],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(page.items, baseline.items);
    assert_eq!(page.total, baseline.total);
}

#[test]
fn multi_key_sort_keeps_first_key_primary() {
    let opts = QueryOptions {
        sort: vec![
            SortField {
                field: "dept".into(),
                desc: true,
            },
            SortField {
                field: "name".into(),
                desc: false,
            },
        ],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Carol", "Dave", "Alice", "Bob"]);
}

#[test]
fn repeated_stable_passes_match_single_key_order_within_groups() {
    // Sorting [age asc, name desc] must order names descending within each
    // equal-age group, exactly as a lone name-desc sort would.
    let opts = QueryOptions {
        sort: vec![
            SortField {
                field: "age".into(),
                desc: false,
            },
            SortField {
                field: "name".into(),
                desc: true,
            },
        ],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Alice", "Carol", "Bob", "Dave"]);
}

#[test]
fn float_sort_orders_numerically() {
    let opts = QueryOptions {
        sort: vec![SortField {
            field: "rating".into(),
            desc: true,
        }],
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Carol", "Alice", "Bob", "Dave"]);
}

#[test]
fn pagination_clamps_to_the_result_set() {
    let opts = QueryOptions {
        page: 2,
        limit: 3,
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Dave"]);
    assert_eq!(page.total, 4);

    let opts = QueryOptions {
        page: 9,
        limit: 3,
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert!(page.items.is_empty());
    assert_eq!(page.total, 4);
}

#[test]
fn extreme_page_values_return_an_empty_page() {
    let opts = QueryOptions {
        page: i64::MAX,
        limit: 10,
        ..QueryOptions::default()
    };
    let page = slice_page(&staff(), &opts, &policy());
    assert!(page.items.is_empty());
    assert_eq!(page.total, 4);
}

#[test]
fn empty_source_yields_an_empty_page() {
    let page = slice_page(&[] as &[Employee], &QueryOptions::default(), &policy());
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert!(!page.is_degraded());
}

#[test]
fn parsed_options_drive_the_engine_end_to_end() {
    let params: Vec<(String, String)> = [
        ("limit", "2"),
        ("sort", "-age"),
        ("age[gte]", "30"),
        ("search", "dept"),
        ("keyword", "s"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let opts = parse(&params, &ParseConfig::default());
    let page = slice_page(&staff(), &opts, &policy());
    assert_eq!(names(&page), vec!["Dave", "Carol"]);
    assert_eq!(page.total, 2);
}
