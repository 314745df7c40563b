//! Listing query normalization for the events table.
//!
//! Raw request parameters are untrusted strings. Everything that ends up in
//! a query passes through here first: identifiers (sort column, direction,
//! status) are checked against fixed allow-lists, free text is trimmed and
//! LIKE-escaped, pagination values are clamped. Normalization never fails --
//! anything unrecognized falls back to a default, so downstream layers only
//! ever see a valid [`QuerySpec`].

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Maximum rows per page a per-user preference can request.
pub const MAX_PER_PAGE: i64 = 200;

/// Dropdown sentinel meaning "no filter selected".
pub const NO_FILTER_SENTINEL: &str = "-1";

// ---------------------------------------------------------------------------
// Sort column allow-list
// ---------------------------------------------------------------------------

/// A sortable column. Parsing is the only way to obtain one from user
/// input, so the SQL identifier can never carry attacker-controlled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Date,
    Event,
    UserLogin,
}

impl SortColumn {
    /// Parse an `orderby` request parameter. Unknown values default to
    /// [`SortColumn::Date`].
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("date") => SortColumn::Date,
            Some("event") => SortColumn::Event,
            Some("user_login") => SortColumn::UserLogin,
            _ => SortColumn::Date,
        }
    }

    /// The request-parameter value for this column.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortColumn::Date => "date",
            SortColumn::Event => "event",
            SortColumn::UserLogin => "user_login",
        }
    }

    /// The qualified SQL identifier this column sorts by.
    ///
    /// Returned values are compile-time constants; they are the only
    /// identifiers ever interpolated into an ORDER BY clause.
    pub fn sql_identifier(&self) -> &'static str {
        match self {
            SortColumn::Date => "e.occurred_at",
            SortColumn::Event => "e.event_name",
            SortColumn::UserLogin => "u.user_login",
        }
    }
}

// ---------------------------------------------------------------------------
// Sort direction
// ---------------------------------------------------------------------------

/// Sort direction. Anything other than `asc`/`desc` (case-insensitive)
/// defaults to [`SortOrder::Desc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// SQL keyword for this direction.
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

/// Status bucket a listing request views. Unknown values default to
/// [`StatusFilter::Published`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Published,
    Trashed,
}

impl StatusFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("trashed") => StatusFilter::Trashed,
            _ => StatusFilter::Published,
        }
    }

    /// The stored column value and request-parameter value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Published => "published",
            StatusFilter::Trashed => "trashed",
        }
    }
}

// ---------------------------------------------------------------------------
// Query specification
// ---------------------------------------------------------------------------

/// Raw, untrusted listing parameters as they arrive from the request.
#[derive(Debug, Default, Clone)]
pub struct RawListRequest {
    pub status: Option<String>,
    pub search: Option<String>,
    pub user_filter: Option<String>,
    pub event_filter: Option<String>,
    pub order_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
}

/// A validated listing specification. Always safe to hand to the
/// repository layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub status: StatusFilter,
    /// Trimmed search text; `None` means no search. Escaped at pattern
    /// build time via [`escape_like`].
    pub search: Option<String>,
    /// Exact-match login filter; bound as a parameter, never interpolated.
    pub user_filter: Option<String>,
    /// Exact-match event name filter; bound as a parameter.
    pub event_filter: Option<String>,
    pub order_by: SortColumn,
    pub order: SortOrder,
    /// 1-based page number.
    pub page: i64,
    pub per_page: i64,
}

impl QuerySpec {
    /// Normalize raw request parameters into a valid spec.
    ///
    /// `per_page` is the already-resolved rows-per-page value (per-user
    /// preference or the configured default); it is clamped here as well.
    pub fn from_raw(raw: &RawListRequest, per_page: i64) -> Self {
        QuerySpec {
            status: StatusFilter::parse(raw.status.as_deref()),
            search: normalize_search(raw.search.as_deref()),
            user_filter: normalize_filter(raw.user_filter.as_deref()),
            event_filter: normalize_filter(raw.event_filter.as_deref()),
            order_by: SortColumn::parse(raw.order_by.as_deref()),
            order: SortOrder::parse(raw.order.as_deref()),
            page: parse_page(raw.page.as_deref()),
            per_page: clamp_per_page(per_page),
        }
    }

    /// OFFSET for the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Trim search text; empty input means "no search".
fn normalize_search(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// Normalize a dropdown filter value. Empty input and the `-1` sentinel
/// both mean "no filter".
fn normalize_filter(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() && s != NO_FILTER_SENTINEL => Some(s.to_string()),
        _ => None,
    }
}

/// Parse a 1-based page number. Non-numeric or non-positive input
/// defaults to page 1.
pub fn parse_page(value: Option<&str>) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Clamp a rows-per-page value to valid bounds.
pub fn clamp_per_page(per_page: i64) -> i64 {
    per_page.clamp(1, MAX_PER_PAGE)
}

/// Escape LIKE/ILIKE pattern metacharacters so user text matches literally.
///
/// # Examples
///
/// ```
/// use eventlog_core::listing::escape_like;
/// assert_eq!(escape_like("50% off"), "50\\% off");
/// assert_eq!(escape_like("a_b"), "a\\_b");
/// ```
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
