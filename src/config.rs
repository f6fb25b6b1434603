//! Configuration loading and validation
//!
//! Values come from the environment the same way a hosted build would see
//! them. The binary loads `.env` files before calling [`GalleryConfig::from_env`].

use crate::{Analytics, Credentials, Error, GalleryConfig, Result};
use log::debug;
use url::Url;

/// Upper bound on `max_results` across all paginated requests.
pub const MAX_TOTAL_RESULTS: u32 = 5000;

impl GalleryConfig {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment");
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();

        // CLOUDINARY_URL first so the explicit variables below override it
        if let Some(raw) = get("CLOUDINARY_URL") {
            let (cloud, credentials) = parse_cloudinary_url(&raw)?;
            config.cloud_name = cloud;
            config.credentials = Some(credentials);
        }

        if let Some(cloud) = get("CLOUDINARY_CLOUD_NAME").or_else(|| get("NEXT_PUBLIC_CLOUDINARY_CLOUD_NAME")) {
            config.cloud_name = cloud;
        }
        if let Some(folder) = get("CLOUDINARY_FOLDER") {
            config.folder = folder;
        }

        match (get("CLOUDINARY_API_KEY"), get("CLOUDINARY_API_SECRET")) {
            (Some(api_key), Some(api_secret)) => {
                config.credentials = Some(Credentials { api_key, api_secret });
            }
            (None, None) => {}
            _ => {
                return Err(Error::ConfigError(
                    "CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together".into(),
                ))
            }
        }

        if let Some(seed) = get("GALLERY_SEED") {
            config.seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|e| Error::ConfigError(format!("Invalid GALLERY_SEED: {}", e)))?,
            );
        }

        if let Some(src) = get("GALLERY_ANALYTICS_SRC") {
            let website_id = get("GALLERY_ANALYTICS_ID").ok_or_else(|| {
                Error::ConfigError("GALLERY_ANALYTICS_SRC requires GALLERY_ANALYTICS_ID".into())
            })?;
            config.analytics = Some(Analytics { src, website_id });
        }

        if let Some(title) = get("GALLERY_TITLE") {
            config.title = title;
        }

        debug!("Configuration loaded for cloud {:?}", config.cloud_name);
        Ok(config)
    }

    /// Check the configuration before any network traffic happens
    pub fn validate(&self) -> Result<()> {
        if self.cloud_name.trim().is_empty() {
            return Err(Error::ConfigError("cloud name is empty".into()));
        }
        if self.cloud_name.contains('/') {
            return Err(Error::ConfigError(format!(
                "cloud name {:?} must not contain '/'",
                self.cloud_name
            )));
        }
        if self.folder.trim().is_empty() {
            return Err(Error::ConfigError("source folder is empty".into()));
        }
        if self.max_results == 0 || self.max_results > MAX_TOTAL_RESULTS {
            return Err(Error::ConfigError(format!(
                "max_results must be between 1 and {}, got {}",
                MAX_TOTAL_RESULTS, self.max_results
            )));
        }
        if self.display_count == 0 {
            return Err(Error::ConfigError("display_count must be positive".into()));
        }
        if self.tile_width == 0 || self.rows == 0 || self.scroll_secs == 0 {
            return Err(Error::ConfigError(
                "tile_width, rows and scroll_secs must be positive".into(),
            ));
        }
        if self.fixture.is_none() && self.credentials.is_none() {
            return Err(Error::ConfigError(
                "API credentials are required unless a fixture is given".into(),
            ));
        }
        for (name, base) in [("api_base", &self.api_base), ("delivery_base", &self.delivery_base)] {
            Url::parse(base).map_err(|e| Error::ConfigError(format!("Invalid {}: {}", name, e)))?;
        }
        Ok(())
    }
}

/// Parse `cloudinary://<api_key>:<api_secret>@<cloud_name>`
pub fn parse_cloudinary_url(raw: &str) -> Result<(String, Credentials)> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::ConfigError(format!("Invalid CLOUDINARY_URL: {}", e)))?;
    if url.scheme() != "cloudinary" {
        return Err(Error::ConfigError(format!(
            "CLOUDINARY_URL must use the cloudinary:// scheme, got {}://",
            url.scheme()
        )));
    }

    let cloud = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::ConfigError("CLOUDINARY_URL is missing the cloud name".into()))?
        .to_string();
    let api_key = url.username().to_string();
    let api_secret = url.password().unwrap_or_default().to_string();
    if api_key.is_empty() || api_secret.is_empty() {
        return Err(Error::ConfigError(
            "CLOUDINARY_URL is missing the API key or secret".into(),
        ));
    }

    Ok((cloud, Credentials { api_key, api_secret }))
}
