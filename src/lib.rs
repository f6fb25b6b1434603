//! Gallerywall
//!
//! Builds a single static page that shows a folder of Cloudinary images as two
//! infinitely scrolling marquee strips behind a blurred loading splash.
//!
//! # Features
//!
//! - **Cloudinary source** (default): queries the search API at build time
//! - **Fixture source**: reads saved records from a JSON file, no network
//! - **Seedable sampling**: shuffle and truncate with an optional fixed seed
//!
//! # Example
//!
//! ```no_run
//! use gallerywall::GalleryConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GalleryConfig {
//!     cloud_name: "demo".to_string(),
//!     folder: "wall".to_string(),
//!     fixture: Some("records.json".into()),
//!     ..Default::default()
//! };
//!
//! let source = gallerywall::new_source(&config)?;
//! let page = gallerywall::build_page(&config, &*source)?;
//! page.write_to("dist/index.html")?;
//! println!("fingerprint: {}", page.fingerprint());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub mod delivery;
pub mod fixture;
pub mod page;
pub mod sample;
pub mod search;

// Cloudinary search API backend
#[cfg(feature = "cloudinary")]
pub mod cloudinary;

// Async wrapper around the blocking build pipeline
pub mod async_api;

pub use delivery::{DeliveryUrl, Transform};
pub use page::{LoadState, Page};
pub use sample::Sampler;
pub use search::{SearchQuery, SortOrder};

/// Largest number of records the search API hands out per request.
pub const SEARCH_PAGE_LIMIT: u32 = 500;

/// Configuration for a gallery build
///
/// Defaults mirror the original wall: 500 records fetched, 160 shown, square
/// 1000px crops at quality 30, tiles 180px wide in 8 rows.
///
/// # Examples
///
/// ```
/// let cfg = gallerywall::GalleryConfig::default();
/// assert_eq!(cfg.display_count, 160);
/// assert_eq!(cfg.max_results, 500);
/// ```
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Cloudinary account name, used for both the API and delivery URLs
    pub cloud_name: String,
    /// Folder whose images make up the wall
    pub folder: String,
    /// API credentials (required by the Cloudinary source)
    pub credentials: Option<Credentials>,
    /// Base URL of the admin API
    pub api_base: String,
    /// Base URL of the delivery CDN
    pub delivery_base: String,
    /// Read records from this JSON file instead of the search API
    pub fixture: Option<PathBuf>,
    /// Maximum number of records to fetch
    pub max_results: u32,
    /// Number of records kept after shuffling
    pub display_count: usize,
    /// Fixed shuffle seed; `None` means a fresh random order per build
    pub seed: Option<u64>,
    /// Delivery transformation applied to every image
    pub transform: Transform,
    /// Displayed tile width in CSS pixels
    pub tile_width: u32,
    /// Grid rows per strip
    pub rows: u32,
    /// Duration of one full marquee loop in seconds
    pub scroll_secs: u32,
    /// Alt text shared by every tile
    pub alt_text: String,
    /// Document title, also shown on the splash when no logo is set
    pub title: String,
    /// Optional logo (SVG or PNG) inlined into the splash
    pub logo: Option<PathBuf>,
    /// Optional analytics tag
    pub analytics: Option<Analytics>,
    /// Timeout for API requests in milliseconds
    pub timeout_ms: u64,
    /// User agent sent to the API
    pub user_agent: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            folder: String::new(),
            credentials: None,
            api_base: "https://api.cloudinary.com".to_string(),
            delivery_base: "https://res.cloudinary.com".to_string(),
            fixture: None,
            max_results: SEARCH_PAGE_LIMIT,
            display_count: 160,
            seed: None,
            transform: Transform::default(),
            tile_width: 180,
            rows: 8,
            scroll_secs: 80,
            alt_text: "Gallery image".to_string(),
            title: "Gallery".to_string(),
            logo: None,
            analytics: None,
            timeout_ms: 30000,
            user_agent: concat!("gallerywall/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GalleryConfig {
    /// The search query this configuration describes
    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            folder: self.folder.clone(),
            max_results: self.max_results,
            sort: SortOrder::Desc,
        }
    }

    /// The sampler this configuration describes
    pub fn sampler(&self) -> Sampler {
        Sampler {
            limit: self.display_count,
            seed: self.seed,
        }
    }
}

/// API key pair for the admin API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

/// Third-party analytics tag injected with `async`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    pub src: String,
    pub website_id: String,
}

/// An image reference as returned by the search API
///
/// Only the four attributes the page needs are kept. Identifiers are unique
/// within a folder upstream; nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Opaque identifier, including any folder prefix
    pub public_id: String,
    /// File format such as "jpg" or "webp"
    pub format: String,
    /// Natural width in pixels
    pub width: u32,
    /// Natural height in pixels
    pub height: u32,
}

/// A provider of image records
pub trait ImageSource {
    /// Create a source from the gallery configuration
    fn new(config: &GalleryConfig) -> Result<Self>
    where
        Self: Sized;

    /// Fetch up to `query.max_results` records in the query's order
    fn fetch_images(&self, query: &SearchQuery) -> Result<Vec<ImageRecord>>;

    /// Short human-readable description used in logs
    fn describe(&self) -> String;
}

/// Create the image source selected by the configuration
///
/// A configured fixture file always wins. Otherwise the Cloudinary backend is
/// used when the `cloudinary` feature is enabled (default).
pub fn new_source(config: &GalleryConfig) -> Result<Box<dyn ImageSource + Send>> {
    if config.fixture.is_some() {
        return Ok(Box::new(fixture::FixtureSource::new(config)?));
    }

    #[cfg(feature = "cloudinary")]
    {
        Ok(Box::new(cloudinary::CloudinarySource::new(config)?))
    }

    #[cfg(not(feature = "cloudinary"))]
    {
        Err(Error::ConfigError(
            "no fixture given and the cloudinary feature is disabled".into(),
        ))
    }
}

/// Fetch, sample and lay out the page
///
/// Any failure of the source is returned as-is; there is no fallback to an
/// empty wall.
pub fn build_page(config: &GalleryConfig, source: &dyn ImageSource) -> Result<Page> {
    log::info!("Fetching images from {}", source.describe());
    let records = source.fetch_images(&config.query())?;
    log::info!("Fetched {} records", records.len());

    let sampled = config.sampler().sample(records);
    log::debug!("Keeping {} records after shuffle", sampled.len());

    Page::new(config, sampled)
}
