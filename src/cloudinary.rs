//! Cloudinary backend: queries the admin search API over HTTPS.
//!
//! One POST per page of up to 500 resources, authenticated with the API key
//! pair. Pagination follows `next_cursor` until the query's cap is reached or
//! the API stops handing out cursors.

use crate::search::{project, ErrorResponse, SearchQuery, SearchRequest, SearchResponse};
use crate::{Credentials, Error, GalleryConfig, ImageRecord, ImageSource, Result};
use log::{debug, warn};
use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

pub struct CloudinarySource {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
    cloud_name: String,
}

impl CloudinarySource {
    /// Search endpoint for a cloud below the given API base
    pub fn endpoint_for(api_base: &str, cloud_name: &str) -> Result<Url> {
        let mut url = Url::parse(api_base)
            .map_err(|e| Error::ConfigError(format!("Invalid API base {:?}: {}", api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError(format!("API base {:?} cannot hold a path", api_base)))?
            .pop_if_empty()
            .extend(["v1_1", cloud_name, "resources", "search"]);
        Ok(url)
    }

    /// The endpoint this source posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn search_page(&self, request: &SearchRequest) -> Result<SearchResponse> {
        debug!(
            "POST {} (max_results={}, cursor={:?})",
            self.endpoint, request.max_results, request.next_cursor
        );
        let resp = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .json(request)
            .send()
            .map_err(|e| Error::FetchError(format!("POST {} failed: {}", self.endpoint, e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| Error::FetchError(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            return Err(Error::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl ImageSource for CloudinarySource {
    fn new(config: &GalleryConfig) -> Result<Self>
    where
        Self: Sized,
    {
        if config.cloud_name.trim().is_empty() {
            return Err(Error::ConfigError("cloud name is empty".into()));
        }
        let credentials = config.credentials.clone().ok_or_else(|| {
            Error::ConfigError("Cloudinary API key and secret are required".into())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: Self::endpoint_for(&config.api_base, &config.cloud_name)?,
            credentials,
            cloud_name: config.cloud_name.clone(),
        })
    }

    fn fetch_images(&self, query: &SearchQuery) -> Result<Vec<ImageRecord>> {
        let cap = query.max_results as usize;
        let mut records = Vec::new();
        let mut request = SearchRequest::first_page(query, query.max_results);

        loop {
            let page = self.search_page(&request)?;
            debug!(
                "Search page: {} resources of {} total",
                page.resources.len(),
                page.total_count
            );
            if page.resources.is_empty() {
                break;
            }
            records.extend(project(page.resources));

            let remaining = cap.saturating_sub(records.len());
            match page.next_cursor {
                Some(cursor) if request.next_cursor.as_deref() == Some(cursor.as_str()) => {
                    warn!("Search API repeated cursor {:?}; stopping", cursor);
                    break;
                }
                Some(cursor) if remaining > 0 => {
                    request.next_cursor = Some(cursor);
                    request.max_results = (remaining as u32).min(crate::SEARCH_PAGE_LIMIT);
                }
                _ => break,
            }
        }

        if records.len() > cap {
            warn!("API returned {} records for a cap of {}", records.len(), cap);
            records.truncate(cap);
        }
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("cloudinary:{}", self.cloud_name)
    }
}
