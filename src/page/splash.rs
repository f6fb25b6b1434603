//! Splash overlay and the one-shot "page loaded" flag.
//!
//! The flag lives in two places: [`LoadState`] decides which document shape
//! is written at build time, and the inline script produced by
//! [`client_script`] performs the same single transition in the browser.

use super::markup::{attrs, escape_text};
use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;

/// Element id of the container the gallery is mounted into
pub const ROOT_ID: &str = "gallery-root";
/// Element id of the `<template>` holding the unmounted gallery
pub const TEMPLATE_ID: &str = "gallery-template";
/// Element id of the splash overlay
pub const SPLASH_ID: &str = "splash";

/// Gallery fade-in duration
pub const ENTER_MS: u32 = 500;
/// Splash fade-out duration; the overlay is removed afterwards
pub const EXIT_MS: u32 = 800;

/// Two-state loading flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
}

impl LoadState {
    pub fn is_loaded(self) -> bool {
        self == LoadState::Loaded
    }

    /// Move to `Loaded`. Returns `true` only for the call that changed the
    /// state; there is no way back to `Loading`.
    pub fn mark_loaded(&mut self) -> bool {
        match self {
            LoadState::Loading => {
                *self = LoadState::Loaded;
                true
            }
            LoadState::Loaded => false,
        }
    }

    /// Value of the root's `data-state` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
        }
    }
}

/// What the splash shows in its centre
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Logo {
    /// Inline image as a `data:` URI
    Image { data_uri: String },
    /// Fallback text
    Text(String),
}

impl Logo {
    /// Read an SVG/PNG/JPEG/WebP file and inline it
    pub fn from_file(path: &Path) -> Result<Self> {
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => "image/svg+xml",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => {
                return Err(Error::RenderError(format!(
                    "unsupported logo type: {}",
                    path.display()
                )))
            }
        };
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(mime, &bytes))
    }

    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Logo::Image {
            data_uri: format!("data:{};base64,{}", mime, encoded),
        }
    }
}

/// The blurred full-screen overlay shown until load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splash {
    pub logo: Logo,
}

impl Splash {
    pub fn render(&self, alt: &str) -> String {
        let inner = match &self.logo {
            Logo::Image { data_uri } => format!(
                "<img{}>",
                attrs(&[
                    ("class", Some("splash-logo")),
                    ("src", Some(data_uri.as_str())),
                    ("alt", Some(alt)),
                ])
            ),
            Logo::Text(text) => format!("<p class=\"splash-logo splash-text\">{}</p>", escape_text(text)),
        };
        format!(
            "<div id=\"{}\" class=\"splash\" aria-busy=\"true\">{}</div>",
            SPLASH_ID, inner
        )
    }
}

/// Inline script flipping the load flag once.
///
/// Runs immediately when the document is already complete, otherwise on the
/// window `load` event; the listener removes itself. The gallery is cloned
/// out of its `<template>` so none of its images compete with the initial
/// page load.
pub fn client_script() -> String {
    format!(
        r#"(function (win, doc) {{
  var state = "loading";
  function onPageLoad() {{
    if (state === "loaded") {{ return; }}
    state = "loaded";
    win.removeEventListener("load", onPageLoad);
    var root = doc.getElementById("{root}");
    var tpl = doc.getElementById("{template}");
    var splash = doc.getElementById("{splash}");
    if (root) {{
      if (tpl) {{ root.appendChild(tpl.content.cloneNode(true)); }}
      root.setAttribute("data-state", "loaded");
      root.className = "loading-page-enter loading-page-enter-active";
      win.setTimeout(function () {{ root.className = "loading-page-enter-done"; }}, {enter});
    }}
    if (splash) {{
      splash.className = "splash loading-page-exit loading-page-exit-active";
      win.setTimeout(function () {{
        if (splash.parentNode) {{ splash.parentNode.removeChild(splash); }}
      }}, {exit});
    }}
  }}
  if (doc.readyState === "complete") {{
    onPageLoad();
  }} else {{
    win.addEventListener("load", onPageLoad, false);
  }}
}})(window, document);"#,
        root = ROOT_ID,
        template = TEMPLATE_ID,
        splash = SPLASH_ID,
        enter = ENTER_MS,
        exit = EXIT_MS,
    )
}
