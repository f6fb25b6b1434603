//! Stylesheet for the wall, splash and crossfade

use super::gallery::GridLayout;
use super::splash::{ENTER_MS, EXIT_MS};

/// Inputs the stylesheet depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleParams {
    pub layout: GridLayout,
    /// Seconds for one full loop of the marquee
    pub scroll_secs: u32,
}

/// The strips sit side by side inside `.marquee`, which is exactly two strips
/// wide; sliding it left by half its width and jumping back is seamless
/// because both strips are identical.
pub fn stylesheet(params: StyleParams) -> String {
    let tile = params.layout.tile_width;
    let rows = params.layout.rows.max(1);
    format!(
        r#"*,*::before,*::after{{box-sizing:border-box}}
html,body{{margin:0;padding:0;overflow:hidden;background:#0b0b0c}}
.gallery{{position:relative;width:100vw;height:100lvh;overflow:hidden}}
.marquee{{width:max-content;transform:translateZ(0);filter:grayscale(50%);animation:scy {scroll}s linear infinite}}
.strip{{display:grid;grid-template-rows:repeat({rows},{tile}px);grid-auto-flow:column;grid-auto-columns:{tile}px}}
.strip-lead{{float:left}}
.tile{{display:block;width:{tile}px;height:{tile}px;object-fit:cover}}
@keyframes scy{{from{{transform:translateX(0)}}to{{transform:translateX(-50%)}}}}
.splash{{position:fixed;top:0;left:0;width:100%;height:100lvh;z-index:999;display:flex;align-items:center;justify-content:center;backdrop-filter:blur(24px);-webkit-backdrop-filter:blur(24px);background:rgba(11,11,12,.6)}}
.splash-logo{{width:40%;max-height:100svh;object-fit:contain}}
.splash-text{{color:#f5f5f5;font:600 2rem/1.2 system-ui,sans-serif;text-align:center}}
@media (min-width:768px){{.splash-logo{{width:30%}}}}
@media (min-width:1024px){{.splash-logo{{width:20%}}}}
@media (prefers-color-scheme:dark){{.splash-logo{{filter:brightness(1.5)}}}}
@keyframes fade-in{{from{{opacity:0}}to{{opacity:1}}}}
@keyframes fade-out{{from{{opacity:1}}to{{opacity:0}}}}
.loading-page-enter-active{{animation:fade-in {enter}ms ease-out both}}
.loading-page-exit-active{{animation:fade-out {exit}ms ease-in both;pointer-events:none}}
"#,
        scroll = params.scroll_secs,
        rows = rows,
        tile = tile,
        enter = ENTER_MS,
        exit = EXIT_MS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_uses_layout() {
        let css = stylesheet(StyleParams {
            layout: GridLayout { tile_width: 120, rows: 6 },
            scroll_secs: 40,
        });
        assert!(css.contains("animation:scy 40s linear infinite"));
        assert!(css.contains("grid-template-rows:repeat(6,120px)"));
        assert!(css.contains("fade-in 500ms"));
        assert!(css.contains("fade-out 800ms"));
    }
}
