//! Offline source that reads records from a JSON file.
//!
//! Accepts either a bare array of records (as written by `gallerywall fetch`)
//! or a saved search API response. The file is assumed to be scoped to the
//! folder already; only the query's sort and cap are applied.

use crate::search::{project, SearchQuery, SearchResponse};
use crate::{Error, GalleryConfig, ImageRecord, ImageSource, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Records(Vec<ImageRecord>),
    Search(SearchResponse),
}

pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ImageRecord>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::FetchError(format!("Failed to read fixture {}: {}", self.path.display(), e))
        })?;
        let parsed: FixtureFile = serde_json::from_str(&raw).map_err(|e| {
            Error::DecodeError(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(match parsed {
            FixtureFile::Records(records) => records,
            FixtureFile::Search(resp) => project(resp.resources),
        })
    }
}

impl ImageSource for FixtureSource {
    fn new(config: &GalleryConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let path = config
            .fixture
            .clone()
            .ok_or_else(|| Error::ConfigError("no fixture path configured".into()))?;
        Ok(Self::from_path(path))
    }

    fn fetch_images(&self, query: &SearchQuery) -> Result<Vec<ImageRecord>> {
        let mut records = self.load()?;
        query.sort_records(&mut records);
        records.truncate(query.max_results as usize);
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("fixture:{}", self.path.display())
    }
}
