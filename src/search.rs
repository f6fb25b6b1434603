//! Search queries and the wire shapes of the Cloudinary search API.

use crate::{ImageRecord, SEARCH_PAGE_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sort direction on `public_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A folder-scoped image query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Folder path, without wildcard
    pub folder: String,
    /// Cap on the number of records returned
    pub max_results: u32,
    /// Ordering by identifier
    pub sort: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            folder: String::new(),
            max_results: SEARCH_PAGE_LIMIT,
            sort: SortOrder::Desc,
        }
    }
}

impl SearchQuery {
    /// Search expression matching everything below the folder
    pub fn expression(&self) -> String {
        format!("folder:{}/*", self.folder.trim_end_matches('/'))
    }

    /// Order records by identifier in place
    pub fn sort_records(&self, records: &mut [ImageRecord]) {
        match self.sort {
            SortOrder::Asc => records.sort_by(|a, b| a.public_id.cmp(&b.public_id)),
            SortOrder::Desc => records.sort_by(|a, b| b.public_id.cmp(&a.public_id)),
        }
    }
}

/// Body of `POST /v1_1/<cloud>/resources/search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub expression: String,
    pub sort_by: Vec<BTreeMap<String, SortOrder>>,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl SearchRequest {
    /// First page of a query, asking for at most `max_results`
    pub fn first_page(query: &SearchQuery, max_results: u32) -> Self {
        let mut sort = BTreeMap::new();
        sort.insert("public_id".to_string(), query.sort);
        Self {
            expression: query.expression(),
            sort_by: vec![sort],
            max_results: max_results.min(SEARCH_PAGE_LIMIT),
            next_cursor: None,
        }
    }
}

/// Successful search response; unknown fields are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One resource entry as the API reports it
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub public_id: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Resource {
    /// Keep only what the page needs. Entries without a format or pixel
    /// size (raw files, videos without probes) yield `None`.
    pub fn into_record(self) -> Option<ImageRecord> {
        match (self.format, self.width, self.height) {
            (Some(format), Some(width), Some(height)) if !format.is_empty() => Some(ImageRecord {
                public_id: self.public_id,
                format,
                width,
                height,
            }),
            _ => {
                log::warn!("Skipping resource {:?}: missing format or dimensions", self.public_id);
                None
            }
        }
    }
}

/// Error body: `{"error": {"message": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// Project a page of resources into records, dropping incomplete entries
pub fn project(resources: Vec<Resource>) -> Vec<ImageRecord> {
    resources.into_iter().filter_map(Resource::into_record).collect()
}
