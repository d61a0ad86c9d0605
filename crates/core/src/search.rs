//! Filtered, paginated search over resources.
//!
//! Turns a validated search request into a repository-agnostic [`SearchSpec`]
//! and computes the pagination envelope returned to clients.

use serde::Serialize;

use crate::error::CoreError;
use crate::validation::{
    coerce_int, contains_nul, field, optional_bool, Field, RawInput, Violations,
};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page returned when the client does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a client may request.
pub const MAX_LIMIT: i64 = 100;

pub const MSG_PAGE_NOT_INTEGER: &str = "page must be an integer number";
pub const MSG_PAGE_MIN: &str = "Page must be at least 1";
pub const MSG_LIMIT_NOT_INTEGER: &str = "limit must be an integer number";
pub const MSG_LIMIT_MIN: &str = "Limit must be at least 1";
pub const MSG_LIMIT_MAX: &str = "Limit must not exceed 100";
pub const MSG_SEARCH_NAME_NOT_STRING: &str = "name must be a string";
pub const MSG_SEARCH_NAME_NUL: &str = "name must not contain NUL characters";

// ---------------------------------------------------------------------------
// Request schema
// ---------------------------------------------------------------------------

/// Validated search request. `page` and `limit` already carry their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResource {
    pub name: Option<String>,
    pub status: Option<bool>,
    pub page: i64,
    pub limit: i64,
}

impl Default for SearchResource {
    fn default() -> Self {
        Self {
            name: None,
            status: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Validate search input.
///
/// Values usually arrive as query-string text, so `status`, `page` and
/// `limit` are coerced from strings. An empty string counts as absent.
pub fn validate_search(input: &RawInput) -> Result<SearchResource, CoreError> {
    let mut violations = Violations::new();

    let name = match field(input, "name") {
        Field::Absent | Field::Null => None,
        Field::Present(serde_json::Value::String(name)) if contains_nul(name) => {
            violations.add("name", MSG_SEARCH_NAME_NUL);
            None
        }
        Field::Present(serde_json::Value::String(name)) => Some(name.clone()),
        Field::Present(_) => {
            violations.add("name", MSG_SEARCH_NAME_NOT_STRING);
            None
        }
    };

    let status = if is_empty_text(input, "status") {
        None
    } else {
        optional_bool(
            input,
            "status",
            crate::resource::MSG_STATUS_NOT_BOOLEAN,
            &mut violations,
        )
    };

    let page = bounded_int(
        input,
        "page",
        DEFAULT_PAGE,
        IntBounds {
            not_integer: MSG_PAGE_NOT_INTEGER,
            min: (1, MSG_PAGE_MIN),
            max: None,
        },
        &mut violations,
    );

    let limit = bounded_int(
        input,
        "limit",
        DEFAULT_LIMIT,
        IntBounds {
            not_integer: MSG_LIMIT_NOT_INTEGER,
            min: (1, MSG_LIMIT_MIN),
            max: Some((MAX_LIMIT, MSG_LIMIT_MAX)),
        },
        &mut violations,
    );

    violations.finish(SearchResource {
        name,
        status,
        page,
        limit,
    })
}

struct IntBounds {
    not_integer: &'static str,
    min: (i64, &'static str),
    max: Option<(i64, &'static str)>,
}

fn bounded_int(
    input: &RawInput,
    name: &str,
    default: i64,
    bounds: IntBounds,
    violations: &mut Violations,
) -> i64 {
    let value = match field(input, name) {
        Field::Absent | Field::Null => return default,
        _ if is_empty_text(input, name) => return default,
        Field::Present(value) => value,
    };

    let Some(number) = coerce_int(value) else {
        violations.add(name, bounds.not_integer);
        violations.add(name, bounds.min.1);
        return default;
    };

    if number < bounds.min.0 {
        violations.add(name, bounds.min.1);
    }
    if let Some((max, message)) = bounds.max {
        if number > max {
            violations.add(name, message);
        }
    }
    number
}

fn is_empty_text(input: &RawInput, name: &str) -> bool {
    matches!(input.get(name), Some(serde_json::Value::String(s)) if s.is_empty())
}

// ---------------------------------------------------------------------------
// Filter / pagination builder
// ---------------------------------------------------------------------------

/// Which records a search matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Case-sensitive substring that `name` must contain.
    pub name_contains: Option<String>,
    /// Exact status to match; `None` matches both.
    pub status: Option<bool>,
}

impl ResourceFilter {
    pub fn matches(&self, name: &str, status: bool) -> bool {
        let name_ok = self
            .name_contains
            .as_deref()
            .map_or(true, |needle| name.contains(needle));
        let status_ok = self.status.map_or(true, |wanted| wanted == status);
        name_ok && status_ok
    }
}

/// Result ordering. Searches always list newest first; ties fall back to
/// descending id so page boundaries are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    CreatedAtDesc,
}

/// Repository-agnostic description of one page of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub filter: ResourceFilter,
    pub offset: i64,
    pub limit: i64,
    pub order: SortOrder,
}

/// Build the search spec for a validated request.
pub fn build_search_spec(request: &SearchResource) -> SearchSpec {
    let name_contains = request
        .name
        .as_ref()
        .filter(|name| !name.is_empty())
        .cloned();

    SearchSpec {
        filter: ResourceFilter {
            name_contains,
            status: request.status,
        },
        offset: page_offset(request.page, request.limit),
        limit: request.limit,
        order: SortOrder::CreatedAtDesc,
    }
}

/// Offset of the first row on `page` (1-based).
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit)
}

/// Number of pages needed to show `total` rows, `limit` at a time.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 || total <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Pagination metadata sent alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// `{ "data": [...], "pagination": {...} }`
#[derive(Debug, Clone, Serialize)]
pub struct PageResult<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T: Serialize> PageResult<T> {
    pub fn new(data: Vec<T>, request: &SearchResource, total: i64) -> Self {
        Self {
            data,
            pagination: PageInfo {
                page: request.page,
                limit: request.limit,
                total,
                total_pages: total_pages(total, request.limit),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawInput {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn defaults_apply_when_absent() {
        let req = validate_search(&raw(json!({}))).unwrap();
        assert_eq!(req, SearchResource::default());
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn query_strings_are_coerced() {
        let req = validate_search(&raw(json!({
            "name": "abc",
            "status": "false",
            "page": "2",
            "limit": "5"
        })))
        .unwrap();
        assert_eq!(req.name.as_deref(), Some("abc"));
        assert_eq!(req.status, Some(false));
        assert_eq!(req.page, 2);
        assert_eq!(req.limit, 5);
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let req = validate_search(&raw(json!({"status": "", "page": "", "limit": ""}))).unwrap();
        assert_eq!(req.status, None);
        assert_eq!(req.page, DEFAULT_PAGE);
        assert_eq!(req.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn out_of_range_values_are_rejected_together() {
        let err = validate_search(&raw(json!({"page": "0", "limit": "101"}))).unwrap_err();
        assert_matches!(err, CoreError::Validation(entries) => {
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].field, "page");
            assert_eq!(entries[0].message, MSG_PAGE_MIN);
            assert_eq!(entries[1].field, "limit");
            assert_eq!(entries[1].message, MSG_LIMIT_MAX);
        });
    }

    #[test]
    fn nul_in_name_filter_is_rejected() {
        let err = validate_search(&raw(json!({"name": "a\u{0}"}))).unwrap_err();
        assert_matches!(err, CoreError::Validation(entries) => {
            assert_eq!(entries[0].field, "name");
            assert_eq!(entries[0].message, MSG_SEARCH_NAME_NUL);
        });
    }

    #[test]
    fn non_numeric_page_reports_both_rules() {
        let err = validate_search(&raw(json!({"page": "abc"}))).unwrap_err();
        assert_matches!(err, CoreError::Validation(entries) => {
            assert_eq!(
                entries[0].message,
                format!("{MSG_PAGE_NOT_INTEGER}, {MSG_PAGE_MIN}")
            );
        });
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = validate_search(&raw(json!({"limit": 0}))).unwrap_err();
        assert_matches!(err, CoreError::Validation(entries) => {
            assert_eq!(entries[0].message, MSG_LIMIT_MIN);
        });
    }

    #[test]
    fn bad_status_is_rejected() {
        let err = validate_search(&raw(json!({"status": "nope"}))).unwrap_err();
        assert_matches!(err, CoreError::Validation(entries) => {
            assert_eq!(entries[0].field, "status");
        });
    }

    #[test]
    fn spec_computes_offset() {
        let spec = build_search_spec(&SearchResource {
            page: 2,
            limit: 5,
            ..SearchResource::default()
        });
        assert_eq!(spec.offset, 5);
        assert_eq!(spec.limit, 5);
        assert_eq!(spec.order, SortOrder::CreatedAtDesc);
    }

    #[test]
    fn empty_name_is_no_filter() {
        let spec = build_search_spec(&SearchResource {
            name: Some(String::new()),
            ..SearchResource::default()
        });
        assert_eq!(spec.filter.name_contains, None);
    }

    #[test]
    fn explicit_false_status_is_kept() {
        let spec = build_search_spec(&SearchResource {
            status: Some(false),
            ..SearchResource::default()
        });
        assert_eq!(spec.filter.status, Some(false));
    }

    #[test]
    fn huge_page_does_not_overflow() {
        assert_eq!(page_offset(i64::MAX, 100), i64::MAX);
    }

    #[test]
    fn filter_matching() {
        let filter = ResourceFilter {
            name_contains: Some("Res".to_string()),
            status: Some(false),
        };
        assert!(filter.matches("My Resource", false));
        assert!(!filter.matches("my resource", false));
        assert!(!filter.matches("My Resource", true));
        assert!(ResourceFilter::default().matches("anything", true));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(total_pages(1, 100), 1);
    }

    #[test]
    fn page_result_serializes_camel_case() {
        let request = SearchResource {
            page: 2,
            limit: 5,
            ..SearchResource::default()
        };
        let page = PageResult::new(vec![1, 2], &request, 7);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["data"], json!([1, 2]));
        assert_eq!(json["pagination"]["totalPages"], 2);
        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["pagination"]["total"], 7);
    }
}
