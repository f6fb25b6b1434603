//! The image wall: one set of tiles shown as two marquee strips.

use super::markup::attrs;
use crate::delivery::DeliveryUrl;
use crate::ImageRecord;

/// Hides a tile whose image fails to load instead of showing a broken glyph.
pub const ON_ERROR_HIDE: &str = "this.style.visibility='hidden'";

/// Grid geometry shared by both strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Tile width (and height; tiles are square) in CSS pixels
    pub tile_width: u32,
    /// Rows per strip; tiles flow column by column
    pub rows: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { tile_width: 180, rows: 8 }
    }
}

impl GridLayout {
    /// Columns needed to hold `tiles` tiles
    pub fn columns(&self, tiles: usize) -> usize {
        let rows = self.rows.max(1) as usize;
        tiles.div_ceil(rows)
    }

    /// Width of one strip in CSS pixels
    pub fn strip_width(&self, tiles: usize) -> u64 {
        self.columns(tiles) as u64 * self.tile_width as u64
    }
}

/// How the browser should schedule an image fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoading {
    Eager,
    Lazy,
}

impl ImageLoading {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageLoading::Eager => "eager",
            ImageLoading::Lazy => "lazy",
        }
    }
}

/// One image in the wall
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub record: ImageRecord,
    /// Delivery URL
    pub src: String,
}

/// A strip borrows the gallery's tiles, so both strips always show the same
/// images in the same order; only placement and loading hints differ.
#[derive(Debug, Clone, Copy)]
pub struct MarqueeStrip<'a> {
    tiles: &'a [Tile],
    loading: ImageLoading,
    lead: bool,
}

impl<'a> MarqueeStrip<'a> {
    pub fn tiles(&self) -> &'a [Tile] {
        self.tiles
    }

    pub fn loading(&self) -> ImageLoading {
        self.loading
    }

    /// The lead strip is floated left and preloaded
    pub fn is_lead(&self) -> bool {
        self.lead
    }

    fn render(&self, layout: GridLayout, alt: &str, out: &mut String) {
        let class = if self.lead { "strip strip-lead" } else { "strip" };
        out.push_str(&format!("<div class=\"{}\">", class));
        let size = layout.tile_width.to_string();
        for tile in self.tiles {
            out.push_str("<img");
            out.push_str(&attrs(&[
                ("class", Some("tile")),
                ("src", Some(tile.src.as_str())),
                ("width", Some(size.as_str())),
                ("height", Some(size.as_str())),
                ("alt", Some(alt)),
                ("loading", Some(self.loading.as_str())),
                ("rel", self.lead.then_some("preload")),
                ("decoding", Some("async")),
                ("onerror", Some(ON_ERROR_HIDE)),
            ]));
            out.push('>');
        }
        out.push_str("</div>");
    }
}

/// The sampled tiles plus the geometry they are laid out with
#[derive(Debug, Clone)]
pub struct Gallery {
    tiles: Vec<Tile>,
    layout: GridLayout,
    alt_text: String,
}

impl Gallery {
    pub fn new(
        records: Vec<ImageRecord>,
        delivery: &DeliveryUrl,
        layout: GridLayout,
        alt_text: impl Into<String>,
    ) -> Self {
        let tiles = records
            .into_iter()
            .map(|record| Tile {
                src: delivery.image_url(&record),
                record,
            })
            .collect();
        Self {
            tiles,
            layout,
            alt_text: alt_text.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Lead strip (eager, preloaded) followed by the trailing copy (lazy)
    pub fn strips(&self) -> [MarqueeStrip<'_>; 2] {
        [
            MarqueeStrip {
                tiles: &self.tiles,
                loading: ImageLoading::Eager,
                lead: true,
            },
            MarqueeStrip {
                tiles: &self.tiles,
                loading: ImageLoading::Lazy,
                lead: false,
            },
        ]
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(256 + self.tiles.len() * 2 * 256);
        out.push_str("<div class=\"gallery\"><div class=\"marquee\">");
        for strip in self.strips() {
            strip.render(self.layout, &self.alt_text, &mut out);
        }
        out.push_str("</div></div>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transform;

    fn gallery(n: usize) -> Gallery {
        let delivery = DeliveryUrl::new("https://res.cloudinary.com", "demo", &Transform::default()).unwrap();
        let records = (0..n)
            .map(|i| ImageRecord {
                public_id: format!("wall/{}", i),
                format: "jpg".into(),
                width: 640,
                height: 480,
            })
            .collect();
        Gallery::new(records, &delivery, GridLayout::default(), "Wall")
    }

    #[test]
    fn strips_share_tiles() {
        let g = gallery(12);
        let [lead, trail] = g.strips();
        assert_eq!(lead.tiles(), trail.tiles());
        assert!(lead.is_lead());
        assert!(!trail.is_lead());
        assert_eq!(lead.loading(), ImageLoading::Eager);
        assert_eq!(trail.loading(), ImageLoading::Lazy);
    }

    #[test]
    fn render_emits_each_tile_twice() {
        let html = gallery(5).render();
        assert_eq!(html.matches("<img").count(), 10);
        assert_eq!(html.matches("rel=\"preload\"").count(), 5);
        assert_eq!(html.matches("loading=\"lazy\"").count(), 5);
    }

    #[test]
    fn empty_gallery_still_renders_strips() {
        let html = gallery(0).render();
        assert_eq!(html.matches("<img").count(), 0);
        assert_eq!(html.matches("class=\"strip").count(), 2);
    }

    #[test]
    fn grid_columns_round_up() {
        let layout = GridLayout::default();
        assert_eq!(layout.columns(0), 0);
        assert_eq!(layout.columns(160), 20);
        assert_eq!(layout.columns(161), 21);
        assert_eq!(layout.strip_width(160), 3600);
    }
}
