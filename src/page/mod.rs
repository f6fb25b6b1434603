//! Page assembly: document shell, gallery, splash and client script.

pub mod gallery;
pub mod markup;
pub mod splash;
pub mod style;

pub use gallery::{Gallery, GridLayout, ImageLoading, MarqueeStrip, Tile};
pub use splash::{LoadState, Logo, Splash};

use crate::delivery::DeliveryUrl;
use crate::{Analytics, GalleryConfig, ImageRecord, Result};
use markup::{attrs, escape_text};
use sha2::{Digest, Sha256};
use std::path::Path;
use style::StyleParams;

/// A laid-out page, ready to be written
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    alt_text: String,
    gallery: Gallery,
    splash: Splash,
    analytics: Option<Analytics>,
    style: StyleParams,
}

impl Page {
    /// Lay out already-sampled records according to the configuration
    pub fn new(config: &GalleryConfig, records: Vec<ImageRecord>) -> Result<Self> {
        let delivery = DeliveryUrl::new(&config.delivery_base, &config.cloud_name, &config.transform)?;
        let layout = GridLayout {
            tile_width: config.tile_width,
            rows: config.rows,
        };
        let logo = match &config.logo {
            Some(path) => Logo::from_file(path)?,
            None => Logo::Text(config.title.clone()),
        };

        Ok(Self {
            title: config.title.clone(),
            alt_text: config.alt_text.clone(),
            gallery: Gallery::new(records, &delivery, layout, config.alt_text.clone()),
            splash: Splash { logo },
            analytics: config.analytics.clone(),
            style: StyleParams {
                layout,
                scroll_secs: config.scroll_secs,
            },
        })
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn splash(&self) -> &Splash {
        &self.splash
    }

    /// Document as first served: splash visible, gallery parked in a
    /// `<template>` until the client script mounts it.
    pub fn render(&self) -> String {
        self.render_state(LoadState::Loading)
    }

    /// Document as it looks after the load transition; no splash or script.
    pub fn render_loaded(&self) -> String {
        self.render_state(LoadState::Loaded)
    }

    pub fn render_state(&self, state: LoadState) -> String {
        let mut out = String::with_capacity(4096 + self.gallery.len() * 512);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1, viewport-fit=cover\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_text(&self.title)));
        out.push_str(&format!("<style>\n{}</style>\n", style::stylesheet(self.style)));
        if let Some(a) = &self.analytics {
            out.push_str(&format!(
                "<script async{}></script>\n",
                attrs(&[("src", Some(a.src.as_str())), ("data-website-id", Some(a.website_id.as_str()))])
            ));
        }
        out.push_str("</head>\n<body>\n");

        match state {
            LoadState::Loading => {
                out.push_str(&format!(
                    "<main id=\"{}\" data-state=\"{}\"></main>\n",
                    splash::ROOT_ID,
                    state.as_str()
                ));
                out.push_str(&format!(
                    "<template id=\"{}\">{}</template>\n",
                    splash::TEMPLATE_ID,
                    self.gallery.render()
                ));
                out.push_str(&self.splash.render(&self.title));
                out.push('\n');
                out.push_str(&format!("<script>\n{}\n</script>\n", splash::client_script()));
            }
            LoadState::Loaded => {
                out.push_str(&format!(
                    "<main id=\"{}\" data-state=\"{}\">{}</main>\n",
                    splash::ROOT_ID,
                    state.as_str(),
                    self.gallery.render()
                ));
            }
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    /// Hex SHA-256 of the initial document
    pub fn fingerprint(&self) -> String {
        self.fingerprint_state(LoadState::Loading)
    }

    /// Hex SHA-256 of the document rendered in `state`
    pub fn fingerprint_state(&self, state: LoadState) -> String {
        digest(&self.render_state(state))
    }

    /// Write the initial document, creating parent directories
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write_state_to(path, LoadState::Loading).map(|_| ())
    }

    /// Write the document rendered in `state` and return the digest of the
    /// bytes written.
    pub fn write_state_to(&self, path: impl AsRef<Path>, state: LoadState) -> Result<String> {
        let html = self.render_state(state);
        write_document(path.as_ref(), html.as_bytes())?;
        Ok(digest(&html))
    }
}

fn digest(html: &str) -> String {
    hex::encode(Sha256::digest(html.as_bytes()))
}

/// Write `contents` to `path`, creating missing parent directories
pub fn write_document(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    log::info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GalleryConfig {
        GalleryConfig {
            cloud_name: "demo".into(),
            folder: "wall".into(),
            title: "Wall".into(),
            ..Default::default()
        }
    }

    fn records(n: usize) -> Vec<ImageRecord> {
        (0..n)
            .map(|i| ImageRecord {
                public_id: format!("wall/{}", i),
                format: "jpg".into(),
                width: 10,
                height: 10,
            })
            .collect()
    }

    #[test]
    fn loading_document_parks_gallery_in_template() {
        let page = Page::new(&config(), records(3)).unwrap();
        let html = page.render();
        assert!(html.contains("<template id=\"gallery-template\"><div class=\"gallery\">"));
        assert!(html.contains("data-state=\"loading\""));
        assert!(html.contains("id=\"splash\""));
        assert!(html.contains("addEventListener(\"load\""));
    }

    #[test]
    fn loaded_document_has_no_splash() {
        let page = Page::new(&config(), records(3)).unwrap();
        let html = page.render_loaded();
        assert!(!html.contains("id=\"splash\""));
        assert!(!html.contains("<template"));
        assert!(!html.contains("<script"));
        assert_eq!(html.matches("<img").count(), 6);
    }

    #[test]
    fn analytics_tag_is_async() {
        let mut cfg = config();
        cfg.analytics = Some(Analytics {
            src: "https://stats.example/script.js".into(),
            website_id: "site-1".into(),
        });
        let html = Page::new(&cfg, Vec::new()).unwrap().render();
        assert!(html.contains(r#"<script async src="https://stats.example/script.js" data-website-id="site-1"></script>"#));
    }

    #[test]
    fn fingerprint_is_stable_for_same_input() {
        let a = Page::new(&config(), records(4)).unwrap();
        let b = Page::new(&config(), records(4)).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn loaded_fingerprint_covers_loaded_document() {
        let page = Page::new(&config(), records(4)).unwrap();
        let loaded = page.fingerprint_state(LoadState::Loaded);
        assert_ne!(loaded, page.fingerprint());
        assert_eq!(loaded, hex::encode(Sha256::digest(page.render_loaded().as_bytes())));
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/index.html");
        Page::new(&config(), records(1)).unwrap().write_to(&path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn written_digest_matches_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let page = Page::new(&config(), records(2)).unwrap();
        let digest = page.write_state_to(&path, LoadState::Loaded).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(digest, hex::encode(Sha256::digest(&bytes)));
        assert_eq!(digest, page.fingerprint_state(LoadState::Loaded));
    }

    #[test]
    fn write_document_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/records/x.json");
        write_document(&path, b"[]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn splash_logo_alt_is_the_title() {
        let mut cfg = config();
        cfg.title = "Wall Logo".into();
        cfg.alt_text = "tile alt".into();
        let mut page = Page::new(&cfg, records(1)).unwrap();
        page.splash = Splash { logo: Logo::from_bytes("image/png", b"png") };
        let html = page.render();
        assert!(html.contains(r#"<img class="splash-logo" src="data:image/png;base64,cG5n" alt="Wall Logo">"#));
        let splash_start = html.find("id=\"splash\"").unwrap();
        assert!(!html[splash_start..].contains("alt=\"tile alt\""));
    }
}
