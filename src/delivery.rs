//! CDN URLs for the rendered images.

use crate::{Error, ImageRecord, Result};
use std::fmt;
use url::Url;

/// Crop mode of a delivery transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crop {
    Fill,
    Fit,
    Thumb,
}

impl Crop {
    fn flag(self) -> &'static str {
        match self {
            Crop::Fill => "c_fill",
            Crop::Fit => "c_fit",
            Crop::Thumb => "c_thumb",
        }
    }
}

/// Transformation flags placed in the delivery path
///
/// The default produces `ar_1:1,c_fill,g_auto,q_30,w_1000`: square crops
/// centred on the detected subject at low quality, since tiles are small and
/// partly desaturated anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    /// Aspect ratio such as "1:1"; `None` keeps the natural ratio
    pub aspect_ratio: Option<String>,
    pub crop: Crop,
    /// Automatic gravity
    pub gravity_auto: bool,
    /// Quality 1..=100
    pub quality: u8,
    /// Delivered width in pixels
    pub width: u32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            aspect_ratio: Some("1:1".to_string()),
            crop: Crop::Fill,
            gravity_auto: true,
            quality: 30,
            width: 1000,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::with_capacity(5);
        if let Some(ar) = &self.aspect_ratio {
            flags.push(format!("ar_{}", ar));
        }
        flags.push(self.crop.flag().to_string());
        if self.gravity_auto {
            flags.push("g_auto".to_string());
        }
        flags.push(format!("q_{}", self.quality));
        flags.push(format!("w_{}", self.width));
        f.write_str(&flags.join(","))
    }
}

/// Builds `<base>/<cloud>/image/upload/<transform>/<public_id>.<format>`
#[derive(Debug, Clone)]
pub struct DeliveryUrl {
    base: Url,
    cloud_name: String,
    transform: String,
}

impl DeliveryUrl {
    pub fn new(delivery_base: &str, cloud_name: &str, transform: &Transform) -> Result<Self> {
        let base = Url::parse(delivery_base).map_err(|e| {
            Error::ConfigError(format!("Invalid delivery base {:?}: {}", delivery_base, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "delivery base {:?} cannot hold a path",
                delivery_base
            )));
        }
        Ok(Self {
            base,
            cloud_name: cloud_name.to_string(),
            transform: transform.to_string(),
        })
    }

    /// URL of one image; folder separators in the identifier stay separators
    pub fn image_url(&self, record: &ImageRecord) -> String {
        let mut url = self.base.clone();
        let file = format!("{}.{}", record.public_id, record.format);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([self.cloud_name.as_str(), "image", "upload", self.transform.as_str()])
                .extend(file.split('/'));
        }
        url.into()
    }
}
