//! Drawing decoded trees onto a padded, filled pixmap and encoding the result.

use crate::error::{ExportError, Result};
use sirenia_core::BoundingGeometry;
use std::str::FromStr as _;

/// Pixel dimensions of a padded raster surface at `scale`.
pub fn surface_size(geometry: &BoundingGeometry, padding: f64, scale: f64) -> (u32, u32) {
    let padded = geometry.inflate(padding);
    let px = |v: f64| (v * scale).ceil().max(1.0).min(u32::MAX as f64) as u32;
    (px(padded.width()), px(padded.height()))
}

/// Magnification for a raster export.
///
/// `preferred` is used unless either content extent would exceed `max_px` at that scale, in
/// which case the export drops to 1x.
pub fn scale_factor(geometry: &BoundingGeometry, preferred: f64, max_px: f64) -> f64 {
    if geometry.width() * preferred > max_px || geometry.height() * preferred > max_px {
        tracing::warn!(
            width = geometry.width(),
            height = geometry.height(),
            preferred,
            max_px,
            "diagram too large for high-resolution export; using 1x"
        );
        return 1.0;
    }
    preferred
}

/// Parses a CSS color (`#rgb`, `#rrggbb`, named colors, `rgb(...)`) into a fill color.
pub fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let c = svgtypes::Color::from_str(text.trim()).ok()?;
    Some(tiny_skia::Color::from_rgba8(c.red, c.green, c.blue, c.alpha))
}

/// Renders `tree` into a surface sized for `geometry` plus `padding` on every side.
///
/// The surface is filled with `background` first; the content is scaled to the resolved
/// geometry and offset by the padding.
pub fn draw(
    tree: &usvg::Tree,
    geometry: &BoundingGeometry,
    padding: f64,
    scale: f64,
    background: tiny_skia::Color,
) -> Result<tiny_skia::Pixmap> {
    let (width, height) = surface_size(geometry, padding, scale);
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(ExportError::SurfaceTooLarge { width, height })?;
    pixmap.fill(background);

    let tree_size = tree.size();
    let sx = stretch(geometry.width(), f64::from(tree_size.width()));
    let sy = stretch(geometry.height(), f64::from(tree_size.height()));
    let offset = (padding * scale) as f32;
    let transform = tiny_skia::Transform::from_row(
        (scale * sx) as f32,
        0.0,
        0.0,
        (scale * sy) as f32,
        offset,
        offset,
    );

    resvg::render(tree, transform, &mut pixmap.as_mut());
    tracing::debug!(width, height, scale, "diagram rasterized");
    Ok(pixmap)
}

fn stretch(target: f64, natural: f64) -> f64 {
    if natural > 0.0 && natural.is_finite() && target > 0.0 {
        target / natural
    } else {
        1.0
    }
}

pub fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>> {
    pixmap.encode_png().map_err(|_| ExportError::PngEncode)
}

/// Encodes as baseline JPEG. The surface is always filled with an opaque background, so the
/// alpha channel is dropped.
pub fn encode_jpeg(pixmap: &tiny_skia::Pixmap, quality: u8) -> Result<Vec<u8>> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| ExportError::JpegEncode)?;
    Ok(out)
}
