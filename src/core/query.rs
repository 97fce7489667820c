//! Query parameters and pagination utilities

use crate::core::entity::Pokemon;
use serde::{Deserialize, Serialize};

/// Default page when none (or garbage) is supplied
pub const DEFAULT_PAGE: usize = 1;

/// Default number of items per page
pub const DEFAULT_LIMIT: usize = 20;

/// Upper bound on items per page
pub const MAX_LIMIT: usize = 100;

/// Raw pagination parameters from the URL query string
///
/// Both values are kept as strings so that a malformed value falls back to
/// its default instead of rejecting the request.
///
/// # Example
/// ```rust,ignore
/// // GET /api/pokemon?page=2&limit=10
/// pub async fn list_pokemon(Query(params): Query<ListParams>) -> ... {
///     let request = params.page_request();
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListParams {
    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Number of items per page
    pub limit: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(parse_number(&self.page), parse_number(&self.limit))
    }
}

fn parse_number(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

/// A normalized page request: `page >= 1`, `limit` within `[1, MAX_LIMIT]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Coerce raw values into range, applying defaults for missing ones
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.map_or(DEFAULT_PAGE, |p| to_usize(p.max(1)));
        let limit = limit.map_or(DEFAULT_LIMIT, |l| to_usize(l.clamp(1, MAX_LIMIT as i64)));
        Self { page, limit }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Number of items per page
    pub items_per_page: usize,

    /// Total number of items in the collection
    pub total_items: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next_page: bool,

    /// Whether there is a previous page
    pub has_previous_page: bool,
}

impl Pagination {
    /// Create pagination metadata from calculation
    pub fn new(request: PageRequest, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(request.limit());

        Self {
            current_page: request.page(),
            items_per_page: request.limit(),
            total_items,
            total_pages,
            has_next_page: request.page() < total_pages,
            has_previous_page: request.page() > 1,
        }
    }
}

/// One page of the catalog: the `data` of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonPage {
    pub pokemon: Vec<Pokemon>,
    pub pagination: Pagination,
}

impl PokemonPage {
    /// Slice `collection` according to `request`
    ///
    /// A page past the end yields an empty slice, not an error.
    pub fn from_collection(collection: Vec<Pokemon>, request: PageRequest) -> Self {
        let pagination = Pagination::new(request, collection.len());
        let pokemon = collection
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();

        Self {
            pokemon,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::PokemonAttributes;

    fn collection(size: u64) -> Vec<Pokemon> {
        (1..=size)
            .map(|id| {
                Pokemon::new(
                    id,
                    PokemonAttributes::new(format!("mon-{id}"), vec!["Normal".to_string()]),
                )
            })
            .collect()
    }

    #[test]
    fn test_list_params_defaults() {
        let request = ListParams::default().page_request();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn test_garbage_values_fall_back_to_defaults() {
        let params = ListParams {
            page: Some("abc".to_string()),
            limit: Some("".to_string()),
        };
        assert_eq!(params.page_request(), PageRequest::default());
    }

    #[test]
    fn test_values_are_coerced_into_range() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest::new(Some(1), Some(1)));
        assert_eq!(PageRequest::new(Some(-4), Some(500)).limit(), 100);
        assert_eq!(PageRequest::new(Some(-4), Some(500)).page(), 1);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = Pagination::new(PageRequest::new(Some(1), Some(20)), 145);
        assert_eq!(meta.total_items, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_previous_page);
        assert!(meta.has_next_page);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let meta = Pagination::new(PageRequest::default(), 0);
        let value = serde_json::to_value(meta).unwrap();
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["itemsPerPage"], 20);
        assert_eq!(value["totalPages"], 0);
        assert_eq!(value["hasNextPage"], false);
        assert_eq!(value["hasPreviousPage"], false);
    }

    #[test]
    fn test_page_sizes_match_formula() {
        for total in [0u64, 1, 19, 20, 21, 57] {
            for limit in [1i64, 7, 20, 100] {
                for page in 1i64..=5 {
                    let request = PageRequest::new(Some(page), Some(limit));
                    let result = PokemonPage::from_collection(collection(total), request);

                    let (total, page, limit) = (total as usize, page as usize, limit as usize);
                    let expected = limit.min(total.saturating_sub((page - 1) * limit));
                    assert_eq!(result.pokemon.len(), expected);
                    assert_eq!(
                        result.pagination.has_next_page,
                        page < total.div_ceil(limit)
                    );
                }
            }
        }
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let result =
            PokemonPage::from_collection(collection(10), PageRequest::new(Some(3), Some(20)));
        assert!(result.pokemon.is_empty());
        assert!(!result.pagination.has_next_page);
        assert!(result.pagination.has_previous_page);
        assert_eq!(result.pagination.total_pages, 1);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let request = PageRequest::new(Some(i64::MAX), Some(100));
        let result = PokemonPage::from_collection(collection(3), request);
        assert!(result.pokemon.is_empty());
    }
}
