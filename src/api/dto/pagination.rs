//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Query parameters for paginated listings (`?page=&pageSize=`).
///
/// Uses `serde_with` to parse the values from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Validates the parameters and converts them to offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `pageSize`: 10
    ///
    /// # Validation
    ///
    /// - page must be > 0
    /// - pageSize must be between 1 and 100
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(10);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&page_size) {
            return Err("Page size must be between 1 and 100".to_string());
        }

        // Widen before multiplying: page is unbounded caller input and the
        // product can exceed u32.
        let offset = (i64::from(page) - 1) * i64::from(page_size);
        let limit = i64::from(page_size);

        Ok((offset, limit))
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(10)
    }
}
