//! Page request normalization
//!
//! One `PageRequest` per incoming call. Construction clamps pagination
//! values and treats blank search terms as absent, so everything past the
//! boundary works with normalized input only. Transport layers decode the
//! recognized query parameters with [`PageRequest::from_query_pairs`].

use std::collections::HashMap;

use crate::pager::{clamp_limit, clamp_page, DEFAULT_LIMIT};
use crate::sort::SortDirection;

/// Normalized pagination, sort, filter, and search parameters
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Page number, >= 1
    pub page: u64,
    /// Page size, one of the allow-listed values
    pub limit: u64,
    /// Requested sort field; validated later against the entity metadata
    pub sort_field: Option<String>,
    /// Requested sort direction
    pub sort_direction: SortDirection,
    /// Free-text search term; never blank when present
    pub search_term: Option<String>,
    /// Raw per-field filter values; unknown names are dropped downstream
    pub field_filters: HashMap<String, String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_field: None,
            sort_direction: SortDirection::Ascending,
            search_term: None,
            field_filters: HashMap::new(),
        }
    }
}

impl PageRequest {
    /// Create a request for the first page with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number (clamped to >= 1)
    pub fn page(mut self, page: u64) -> Self {
        self.page = clamp_page(page);
        self
    }

    /// Set the page size (clamped to the allow-listed set)
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = clamp_limit(limit);
        self
    }

    /// Set the sort field and direction
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = direction;
        self
    }

    /// Set the search term; blank terms count as absent
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search_term = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Add one field filter
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.insert(field.into(), value.into());
        self
    }

    /// Decode a request from HTTP-style query pairs
    ///
    /// Recognized parameters: `page`, `limit`, `q`, `sort`, `dir`. Every
    /// other non-empty pair is treated as a field filter. Unparsable
    /// numbers fall back to the defaults rather than failing.
    pub fn from_query_pairs(params: &HashMap<String, String>) -> Self {
        let mut request = Self::default();

        for (key, value) in params {
            match key.as_str() {
                "page" => {
                    request.page = value.parse::<u64>().map(clamp_page).unwrap_or(1);
                }
                "limit" => {
                    request.limit = value
                        .parse::<u64>()
                        .map(clamp_limit)
                        .unwrap_or(DEFAULT_LIMIT);
                }
                "q" => {
                    let term = value.trim();
                    if !term.is_empty() {
                        request.search_term = Some(term.to_string());
                    }
                }
                "sort" => {
                    if !value.is_empty() {
                        request.sort_field = Some(value.clone());
                    }
                }
                "dir" => {
                    request.sort_direction = SortDirection::parse(value);
                }
                _ => {
                    if !value.is_empty() {
                        request.field_filters.insert(key.clone(), value.clone());
                    }
                }
            }
        }

        request
    }
}
