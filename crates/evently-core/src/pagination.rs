//! Page-based pagination for list endpoints.
//!
//! - `page`: 1-indexed page number (default: 1)
//! - `limit`: items per page, 1-100 (default: 10)
//!
//! Values outside those ranges are rejected with 400 rather than clamped.
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": {
//!     "total": 42,
//!     "page": 2,
//!     "limit": 10,
//!     "total_pages": 5,
//!     "has_more": true
//!   }
//! }
//! ```

use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Treats an empty query value (`?page=`) as absent.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Rejects a page below 1 or a limit outside [1, 100], and any page whose
    /// row window does not fit in an `i64`.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page() < 1 {
            return Err(AppError::bad_request(anyhow!("invalid page number")));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit()) {
            return Err(AppError::bad_request(anyhow!(
                "invalid limit, must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        if self.page().checked_mul(self.limit()).is_none() {
            return Err(AppError::bad_request(anyhow!("invalid page number")));
        }
        Ok(())
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page().max(1) - 1).saturating_mul(self.limit().max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub limit: i64,
    /// Number of pages (ceiling of total / limit)
    pub total_pages: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let page = params.page();
        let limit = params.limit().max(1);
        let total_pages = (total + limit - 1) / limit;

        Self {
            total,
            page,
            limit,
            total_pages,
            has_more: page.saturating_mul(limit) < total,
        }
    }
}
