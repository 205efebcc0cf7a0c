// src/domain/risk/query.rs
use crate::domain::category::CategoryId;
use crate::domain::risk::entity::Risk;
use crate::domain::risk::value_objects::{RiskSeverity, RiskStatus};
use crate::domain::user::UserId;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Closed set of sortable columns. Anything a caller sends is matched against
/// this list; unmatched input never reaches the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskSortField {
    Title,
    Status,
    Severity,
    Category,
    ReviewDate,
    UpdatedAt,
    #[default]
    CreatedAt,
}

impl RiskSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "title" => Some(Self::Title),
            "status" => Some(Self::Status),
            "severity" => Some(Self::Severity),
            "category" | "category_id" => Some(Self::Category),
            "review_date" => Some(Self::ReviewDate),
            "updated_at" => Some(Self::UpdatedAt),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// Optional columns sort their NULLs after every value in either direction.
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Category | Self::ReviewDate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Only "asc" (any case) sorts ascending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(raw) if raw.trim().eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskSort {
    pub field: RiskSortField,
    pub direction: SortDirection,
}

impl RiskSort {
    /// An unrecognised sort field falls back to newest-first regardless of the
    /// requested order; an absent one keeps the requested order on `created_at`.
    pub fn from_params(sort: Option<&str>, order: Option<&str>) -> Self {
        let direction = SortDirection::parse(order);
        match sort.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self {
                field: RiskSortField::CreatedAt,
                direction,
            },
            Some(raw) => RiskSortField::parse(raw).map_or_else(Self::default, |field| Self {
                field,
                direction,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Out-of-range values are replaced by the defaults, never rejected.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .filter(|p| *p >= 1)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .filter(|l| (1..=i64::from(MAX_PAGE_SIZE)).contains(l))
            .and_then(|l| u32::try_from(l).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, limit }
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskFilter {
    pub status: Option<RiskStatus>,
    pub severity: Option<RiskSeverity>,
    pub category_id: Option<CategoryId>,
    pub owner_id: Option<UserId>,
    pub search: Option<String>,
}

impl RiskFilter {
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// `ILIKE` pattern for the search term with `\`, `%` and `_` escaped so they
    /// match literally. Pair with `ESCAPE '\'`.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for ch in term.chars() {
                if matches!(ch, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskListQuery {
    pub filter: RiskFilter,
    pub sort: RiskSort,
    pub page: PageRequest,
}

#[derive(Debug, Clone)]
pub struct RiskPage {
    pub items: Vec<Risk>,
    /// Matching rows before pagination.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_replaces_out_of_range_values() {
        let req = PageRequest::new(Some(0), Some(500));
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 20);

        let req = PageRequest::new(Some(-3), Some(0));
        assert_eq!((req.page(), req.limit()), (1, 20));

        let req = PageRequest::new(Some(3), Some(100));
        assert_eq!((req.page(), req.limit()), (3, 100));
        assert_eq!(req.offset(), 200);
    }

    #[test]
    fn unknown_sort_falls_back_to_newest_first() {
        let sort = RiskSort::from_params(Some("title; DROP TABLE risks"), Some("asc"));
        assert_eq!(sort.field, RiskSortField::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn absent_sort_keeps_requested_order() {
        let sort = RiskSort::from_params(None, Some("ASC"));
        assert_eq!(sort.field, RiskSortField::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn known_sort_fields_are_accepted() {
        let sort = RiskSort::from_params(Some("severity"), Some("asc"));
        assert_eq!(sort.field, RiskSortField::Severity);
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(
            RiskSort::from_params(Some("category"), None).field,
            RiskSortField::Category
        );
        assert_eq!(
            RiskSort::from_params(Some("review_date"), Some("sideways")).direction,
            SortDirection::Desc
        );
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        let filter = RiskFilter::default().with_search(Some(" 100%_done\\ ".into()));
        assert_eq!(filter.search(), Some("100%_done\\"));
        assert_eq!(
            filter.search_pattern().as_deref(),
            Some("%100\\%\\_done\\\\%")
        );
        assert!(
            RiskFilter::default()
                .with_search(Some("   ".into()))
                .search_pattern()
                .is_none()
        );
    }
}
