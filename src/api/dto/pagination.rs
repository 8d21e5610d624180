//! Pagination query parameters and response metadata.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Validates pagination parameters and applies defaults.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 20
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 100
    ///
    /// # Returns
    ///
    /// `(page, page_size)` tuple ready for repository queries.
    pub fn resolve(&self) -> Result<(i64, i64), String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(20);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&page_size) {
            return Err("Page size must be between 1 and 100".to_string());
        }

        Ok((page as i64, page_size as i64))
    }
}

/// Pagination metadata included in paginated responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Builds metadata from the requested page and the total row count.
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total_items as f64 / page_size as f64).ceil() as u32
        } else {
            0
        };

        Self {
            page: page as u32,
            page_size: page_size as u32,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, page_size: Option<u32>) -> PaginationParams {
        PaginationParams { page, page_size }
    }

    #[test]
    fn test_defaults() {
        let (page, page_size) = params(None, None).resolve().unwrap();
        assert_eq!(page, 1);
        assert_eq!(page_size, 20);
    }

    #[test]
    fn test_custom_page_and_size() {
        let (page, page_size) = params(Some(3), Some(50)).resolve().unwrap();
        assert_eq!(page, 3);
        assert_eq!(page_size, 50);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).resolve().is_err());
    }

    #[test]
    fn test_page_size_zero_is_error() {
        assert!(params(None, Some(0)).resolve().is_err());
    }

    #[test]
    fn test_page_size_at_maximum_is_ok() {
        assert!(params(None, Some(100)).resolve().is_ok());
    }

    #[test]
    fn test_page_size_above_maximum_is_error() {
        assert!(params(None, Some(101)).resolve().is_err());
    }

    #[test]
    fn test_params_parse_from_strings() {
        // Query strings arrive as text; DisplayFromStr turns them into numbers.
        let parsed: PaginationParams =
            serde_json::from_str(r#"{"page": "2", "page_size": "10"}"#).unwrap();
        assert_eq!(parsed.page, Some(2));
        assert_eq!(parsed.page_size, Some(10));
    }

    #[test]
    fn test_meta_rounds_pages_up() {
        let meta = PaginationMeta::new(1, 10, 25);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(1, 10, 30);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
    }
}
