//! Pagination parameters and response metadata.
//!
//! List endpoints accept `limit` plus either `offset` or a 1-indexed
//! `page`; when both are present, `page` wins. The applied values are
//! echoed back in [`PaginationMeta`] alongside the total count.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Treats an empty query-string value (`?limit=`) as absent.
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

/// Metadata block included in paginated responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// The limit that was applied
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether items remain after this page
    pub has_more: bool,
}

/// Query parameters for paginated list endpoints.
///
/// `limit` is clamped to [1, 100]; `offset` to a minimum of 0; `page` to a
/// minimum of 1.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(10),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Effective offset; derived from `page` when one is given.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), None);
    }

    #[test]
    fn test_limit_clamped() {
        let params = PaginationParams {
            limit: Some(500),
            offset: None,
            page: None,
        };
        assert_eq!(params.limit(), 100);

        let params = PaginationParams {
            limit: Some(0),
            offset: None,
            page: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let params = PaginationParams {
            limit: Some(20),
            offset: Some(5),
            page: Some(3),
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.page(), Some(3));
    }

    #[test]
    fn test_negative_offset_clamped() {
        let params = PaginationParams {
            limit: None,
            offset: Some(-7),
            page: None,
        };
        assert_eq!(params.offset(), 0);
    }
}
