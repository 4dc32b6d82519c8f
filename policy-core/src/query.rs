//! Page/Filter/Sort contract
//!
//! Every list endpoint answers `(filters, page, size, sortBy, direction)`
//! with a deterministic slice of the filtered, comparator-sorted
//! collection. The helpers here are generic over [`Record`] so the same
//! contract serves dashboard policies, my-app policies and raw JSON.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{QueryError, QueryResult};

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ============ Sorting ============

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `asc` sorts descending.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sortable projection of a record field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Project a JSON value. Null and `false` read as empty text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => FieldValue::Number(f),
                _ => FieldValue::Text(n.to_string()),
            },
            Value::Bool(true) => FieldValue::Text("true".to_string()),
            Value::Bool(false) | Value::Null => FieldValue::default(),
            other => FieldValue::Text(other.to_string()),
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Cow::Owned(format!("{}", *n as i64))
            }
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Text(s) if s.is_empty() => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }
}

/// A record whose fields can be looked up by their wire name.
pub trait Record {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, name: &str) -> Option<FieldValue> {
        (**self).field(name)
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).map(FieldValue::from_json)
    }
}

/// Compare two field values in ascending order.
///
/// Empty values sort first, then numbers (numerically), then text.
/// Text compares like a root-locale collation: base letters
/// case-insensitively, then accents (unaccented first), then case
/// (lowercase first).
pub fn compare_fields(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) if !x.is_empty() && !y.is_empty() => {
            locale_compare(x, y)
        }
        _ => a.rank().cmp(&b.rank()),
    }
}

fn locale_compare(a: &str, b: &str) -> Ordering {
    let base = |s: &str| -> String {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect()
    };
    let accented = |s: &str| -> String { s.nfd().flat_map(char::to_lowercase).collect() };

    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| b.cmp(a))
}

/// Sort key of a field; a zero reads as empty, like a missing value.
fn sort_key(value: Option<FieldValue>) -> FieldValue {
    match value {
        Some(FieldValue::Number(n)) if n == 0.0 => FieldValue::default(),
        Some(value) => value,
        None => FieldValue::default(),
    }
}

/// Stable sort by `sort_by`. Without a sort field the input order is kept.
pub fn sort_records<T: Record>(
    records: Vec<T>,
    sort_by: Option<&str>,
    direction: SortDirection,
) -> Vec<T> {
    let Some(field) = sort_by.filter(|f| !f.is_empty()) else {
        return records;
    };

    let mut keyed: Vec<(FieldValue, T)> = records
        .into_iter()
        .map(|r| (sort_key(r.field(field)), r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = compare_fields(a, b);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, r)| r).collect()
}

// ============ Filtering ============

/// Exact-match filters. Filters with no value match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter; `None` or empty values are dropped.
    pub fn with(mut self, field: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.push(field, value);
        self
    }

    pub fn push(&mut self, field: impl Into<String>, value: Option<impl Into<String>>) {
        let value: Option<String> = value.map(Into::into);
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.filters.push((field.into(), value));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.filters.iter().all(|(field, expected)| match record.field(field) {
            Some(FieldValue::Text(actual)) => !actual.is_empty() && actual == *expected,
            _ => false,
        })
    }
}

// ============ Pagination ============

/// Requested page, size and ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (0-indexed)
    pub page: usize,
    /// Page size, at least 1
    pub size: usize,
    pub sort_by: Option<String>,
    pub direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            direction: SortDirection::Asc,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            ..Default::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.direction = direction;
        self
    }

    /// Build a request from raw query-string values.
    ///
    /// Empty strings are treated as absent.
    pub fn parse(
        page: Option<&str>,
        size: Option<&str>,
        sort_by: Option<&str>,
        direction: Option<&str>,
        max_size: usize,
    ) -> QueryResult<Self> {
        let page = match present(page) {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| QueryError::InvalidPage(raw.to_string()))?,
            None => 0,
        };

        let size = match present(size) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| QueryError::InvalidSize(raw.to_string()))?,
            None => DEFAULT_PAGE_SIZE,
        };

        if size > max_size {
            return Err(QueryError::SizeTooLarge {
                requested: size,
                max: max_size,
            });
        }

        Ok(Self {
            page,
            size,
            sort_by: present(sort_by).map(str::to_string),
            direction: present(direction)
                .map(SortDirection::parse)
                .unwrap_or_default(),
        })
    }

    /// Index of the first record on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// One page of results, in the shape the front end expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub size: usize,
    pub number: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
        }
    }
}

/// Slice one page out of an already filtered and sorted collection.
pub fn paginate<T>(records: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = records.len();
    let size = request.size;
    let content: Vec<T> = records
        .into_iter()
        .skip(request.offset())
        .take(size)
        .collect();

    Page {
        number_of_elements: content.len(),
        content,
        total_elements: total,
        total_pages: if size == 0 { 0 } else { total.div_ceil(size) },
        size,
        number: request.page,
        first: request.page == 0,
        last: request.page.saturating_add(1).saturating_mul(size) >= total,
    }
}

/// Filter, sort and paginate.
pub fn query<T: Record>(
    records: impl IntoIterator<Item = T>,
    filters: &FilterSet,
    request: &PageRequest,
) -> Page<T> {
    let matched: Vec<T> = records
        .into_iter()
        .filter(|r| filters.matches(r))
        .collect();
    let sorted = sort_records(matched, request.sort_by.as_deref(), request.direction);
    paginate(sorted, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Value> {
        vec![
            json!({"id": 1, "jurisdiction": "US", "status": "Approved", "name": "beta"}),
            json!({"id": 2, "jurisdiction": "CA", "status": "Pending", "name": "Alpha"}),
            json!({"id": 3, "jurisdiction": "US", "status": "Pending", "name": "alpha"}),
            json!({"id": 4, "jurisdiction": "UK", "status": "Rejected"}),
            json!({"id": 5, "jurisdiction": "US", "status": "Approved", "name": "gamma"}),
        ]
    }

    fn ids(page: &Page<Value>) -> Vec<i64> {
        page.content.iter().map(|v| v["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Desc);
    }

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::parse(None, None, None, None, 100).unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_request_empty_strings_are_absent() {
        let request = PageRequest::parse(Some(""), Some(" "), Some(""), Some(""), 100).unwrap();
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_page_request_rejects_garbage() {
        assert_eq!(
            PageRequest::parse(Some("abc"), None, None, None, 100),
            Err(QueryError::InvalidPage("abc".to_string()))
        );
        assert_eq!(
            PageRequest::parse(Some("-1"), None, None, None, 100),
            Err(QueryError::InvalidPage("-1".to_string()))
        );
        assert_eq!(
            PageRequest::parse(None, Some("0"), None, None, 100),
            Err(QueryError::InvalidSize("0".to_string()))
        );
        assert_eq!(
            PageRequest::parse(None, Some("500"), None, None, 100),
            Err(QueryError::SizeTooLarge {
                requested: 500,
                max: 100
            })
        );
    }

    #[test]
    fn test_paginate_envelope_fields() {
        let page = paginate(sample(), &PageRequest::new(1, 2));
        assert_eq!(ids(&page), vec![3, 4]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.size, 2);
        assert_eq!(page.number, 1);
        assert_eq!(page.number_of_elements, 2);
        assert!(!page.first);
        assert!(!page.last);

        let last = paginate(sample(), &PageRequest::new(2, 2));
        assert_eq!(ids(&last), vec![5]);
        assert!(last.last);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let page = paginate(sample(), &PageRequest::new(9, 2));
        assert!(page.content.is_empty());
        assert_eq!(page.number_of_elements, 0);
        assert_eq!(page.total_elements, 5);
        assert!(page.last);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::<Value>::new(), &PageRequest::default());
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
    }

    #[test]
    fn test_filter_skips_empty_values() {
        let filters = FilterSet::new()
            .with("jurisdiction", Some("US"))
            .with("status", None::<String>)
            .with("businessArea", Some(""));
        assert_eq!(filters.len(), 1);

        let page = query(sample(), &filters, &PageRequest::default());
        assert_eq!(ids(&page), vec![1, 3, 5]);
    }

    #[test]
    fn test_filter_requires_field_presence() {
        let filters = FilterSet::new().with("name", Some("alpha"));
        let page = query(sample(), &filters, &PageRequest::default());
        assert_eq!(ids(&page), vec![3]);
    }

    #[test]
    fn test_filter_does_not_match_numbers() {
        let filters = FilterSet::new().with("id", Some("1"));
        let page = query(sample(), &filters, &PageRequest::default());
        assert!(page.content.is_empty());
    }

    #[test]
    fn test_sort_text_ascending_case_insensitive() {
        let request = PageRequest::default().sorted_by("name", SortDirection::Asc);
        let page = query(sample(), &FilterSet::new(), &request);
        // missing name first, then alpha < Alpha < beta < gamma
        assert_eq!(ids(&page), vec![4, 3, 2, 1, 5]);
    }

    #[test]
    fn test_sort_descending_reverses() {
        let request = PageRequest::default().sorted_by("name", SortDirection::Desc);
        let page = query(sample(), &FilterSet::new(), &request);
        assert_eq!(ids(&page), vec![5, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_numbers() {
        let request = PageRequest::default().sorted_by("id", SortDirection::Desc);
        let page = query(sample(), &FilterSet::new(), &request);
        assert_eq!(ids(&page), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_sort_text_ignores_accents_first() {
        let records = vec![
            json!({"id": 1, "name": "f"}),
            json!({"id": 2, "name": "\u{e9}clair"}),
            json!({"id": 3, "name": "eclair"}),
            json!({"id": 4, "name": "Eclair"}),
        ];
        let sorted = sort_records(records, Some("name"), SortDirection::Asc);
        let order: Vec<_> = sorted.iter().map(|v| v["id"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_sort_zero_reads_as_empty() {
        let records = vec![
            json!({"id": 1, "rank": 3}),
            json!({"id": 2, "rank": 0}),
            json!({"id": 3}),
            json!({"id": 4, "rank": -2}),
        ];
        let sorted = sort_records(records, Some("rank"), SortDirection::Asc);
        let order: Vec<_> = sorted.iter().map(|v| v["id"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_sort_is_stable() {
        let request = PageRequest::default().sorted_by("status", SortDirection::Asc);
        let page = query(sample(), &FilterSet::new(), &request);
        assert_eq!(ids(&page), vec![1, 5, 2, 3, 4]);
    }

    #[test]
    fn test_filter_sort_then_page() {
        let filters = FilterSet::new().with("jurisdiction", Some("US"));
        let request = PageRequest::new(1, 2).sorted_by("id", SortDirection::Desc);
        let page = query(sample(), &filters, &request);
        assert_eq!(ids(&page), vec![1]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.last);
    }

    #[test]
    fn test_compare_fields_mixed_kinds() {
        let empty = FieldValue::default();
        let num = FieldValue::Number(3.0);
        let text = FieldValue::Text("abc".to_string());
        assert_eq!(compare_fields(&empty, &num), Ordering::Less);
        assert_eq!(compare_fields(&num, &text), Ordering::Less);
        assert_eq!(compare_fields(&text, &empty), Ordering::Greater);
    }

    #[test]
    fn test_field_value_text() {
        assert_eq!(FieldValue::Number(7.0).text(), "7");
        assert_eq!(FieldValue::Number(2.5).text(), "2.5");
        assert_eq!(FieldValue::from_json(&Value::Null), FieldValue::default());
        assert_eq!(FieldValue::from_json(&json!(false)), FieldValue::default());
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = paginate(vec![1, 2, 3], &PageRequest::new(0, 2));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 3);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["numberOfElements"], 2);
        assert_eq!(json["first"], true);
        assert_eq!(json["last"], false);
    }
}
