use std::fmt::Write;
use std::path::Path;

use image::{Rgb, RgbImage};

use super::error::PolyError;
use super::grid::Point;
use super::poly::{PolyTriangle, RenderItem};

/// SVG markup with one filled and stroked path per item.
pub fn to_svg(cfg: &PolyTriangle, items: &[RenderItem]) -> String {
    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg height="{h}" viewBox="0 0 {w} {h}" width="{w}" xmlns="http://www.w3.org/2000/svg">"#,
        w = cfg.width,
        h = cfg.height
    );
    for item in items {
        let [a, b, c] = item.vertices;
        let _ = writeln!(
            svg,
            r#"<path d="M{},{}L{},{}L{},{}Z" fill="{color}" stroke="{color}" stroke-width="{}"/>"#,
            a.x, a.y, b.x, b.y, c.x, c.y, cfg.stroke_width,
            color = item.color
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn edge(a: Point, b: Point, px: f64, py: f64) -> f64 {
    (b.x - a.x) as f64 * (py - a.y as f64) - (b.y - a.y) as f64 * (px - a.x as f64)
}

/// Fills every pixel whose centre lies inside (or on the edge of) an item,
/// later items painting over earlier ones. Strokes are not drawn.
pub fn rasterize(cfg: &PolyTriangle, items: &[RenderItem]) -> RgbImage {
    let width = cfg.width.ceil().max(1.) as u32;
    let height = cfg.height.ceil().max(1.) as u32;
    let mut img = RgbImage::new(width, height);

    for item in items {
        let [a, b, c] = item.vertices;
        let min_x = a.x.min(b.x).min(c.x).max(0) as u32;
        let min_y = a.y.min(b.y).min(c.y).max(0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).max(0) as u32).min(width);
        let max_y = (a.y.max(b.y).max(c.y).max(0) as u32).min(height);
        let fill = item.color.rgb();

        for y in min_y .. max_y {
            for x in min_x .. max_x {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                let w0 = edge(b, c, px, py);
                let w1 = edge(c, a, px, py);
                let w2 = edge(a, b, px, py);
                let inside = (w0 >= 0. && w1 >= 0. && w2 >= 0.)
                    || (w0 <= 0. && w1 <= 0. && w2 <= 0.);
                if inside {
                    img.put_pixel(x, y, Rgb([fill.r, fill.g, fill.b]));
                }
            }
        }
    }

    img
}

/// Writes SVG for a `.svg` path, otherwise a raster image in whatever
/// format the extension names.
pub fn save(path: impl AsRef<Path>, cfg: &PolyTriangle, items: &[RenderItem]) -> Result<(), PolyError> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => std::fs::write(path, to_svg(cfg, items))?,
        Some(_) => rasterize(cfg, items).save(path)?,
        None => return Err(PolyError::ExtensionError),
    }
    Ok(())
}
