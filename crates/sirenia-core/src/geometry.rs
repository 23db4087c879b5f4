//! Content bounding boxes for rendered SVG.
//!
//! Resolution walks a fixed fallback chain (root `viewBox`, root `width`/`height`, a live
//! element query, a default box) and stops at the first non-degenerate result. It never fails.

use crate::geom::{Rect, Size, point, size};
use crate::svgroot::RootTag;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingGeometry {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl BoundingGeometry {
    /// Negative or NaN extents are stored as zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> Size {
        size(self.width, self.height)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(point(self.x, self.y), self.size())
    }

    /// A box is usable only when both extents are strictly positive and finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0
            && self.height > 0.0
            && self.width.is_finite()
            && self.height.is_finite())
    }

    /// Grows the box by `padding` on every side.
    pub fn inflate(&self, padding: f64) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

/// Which stage of the fallback chain produced a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    ViewBox,
    SizeAttributes,
    LiveElement,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryQueryError {
    #[error("element is not attached to a live document")]
    Detached,
    #[error("element is not visible")]
    Hidden,
    #[error("geometry query failed: {0}")]
    Failed(String),
}

/// Access to the geometry of the element currently on screen.
///
/// Implementations may fail freely; the resolver treats every error as "no result".
pub trait LiveGeometry {
    fn bounding_box(&self) -> Result<BoundingGeometry, GeometryQueryError>;
}

impl<F> LiveGeometry for F
where
    F: Fn() -> Result<BoundingGeometry, GeometryQueryError>,
{
    fn bounding_box(&self) -> Result<BoundingGeometry, GeometryQueryError> {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingGeometryResolver {
    fallback: BoundingGeometry,
}

impl Default for BoundingGeometryResolver {
    fn default() -> Self {
        Self::with_fallback_size(800.0, 600.0)
    }
}

impl BoundingGeometryResolver {
    pub fn with_fallback_size(width: f64, height: f64) -> Self {
        Self {
            fallback: BoundingGeometry::from_size(width, height),
        }
    }

    pub fn resolve(&self, markup: &str, live: Option<&dyn LiveGeometry>) -> BoundingGeometry {
        self.resolve_with_source(markup, live).0
    }

    pub fn resolve_with_source(
        &self,
        markup: &str,
        live: Option<&dyn LiveGeometry>,
    ) -> (BoundingGeometry, GeometrySource) {
        let attrs = RootAttributes::read(markup);

        if let Some(geo) = attrs.view_box.as_deref().and_then(parse_view_box) {
            if !geo.is_degenerate() {
                return (geo, GeometrySource::ViewBox);
            }
        }

        let width = attrs.width.as_deref().and_then(parse_length);
        let height = attrs.height.as_deref().and_then(parse_length);
        if let (Some(w), Some(h)) = (width, height) {
            let geo = BoundingGeometry::from_size(w, h);
            if !geo.is_degenerate() {
                return (geo, GeometrySource::SizeAttributes);
            }
        }

        if let Some(live) = live {
            match live.bounding_box() {
                Ok(geo) if !geo.is_degenerate() => return (geo, GeometrySource::LiveElement),
                Ok(geo) => tracing::debug!(?geo, "live element reported an empty bounding box"),
                Err(err) => tracing::warn!(%err, "live geometry query failed"),
            }
        }

        tracing::debug!(fallback = ?self.fallback, "using fallback content geometry");
        (self.fallback, GeometrySource::Fallback)
    }
}

/// Root `<svg>` attributes relevant to sizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootAttributes {
    pub view_box: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl RootAttributes {
    /// Reads the root element's sizing attributes. Markup that is not well-formed XML falls back
    /// to a scan of the first `<svg ...>` start tag.
    pub fn read(markup: &str) -> Self {
        match roxmltree::Document::parse(markup) {
            Ok(doc) => {
                let root = doc.root_element();
                Self {
                    view_box: root.attribute("viewBox").map(str::to_string),
                    width: root.attribute("width").map(str::to_string),
                    height: root.attribute("height").map(str::to_string),
                }
            }
            Err(err) => {
                tracing::debug!(%err, "svg is not well-formed xml; scanning root tag");
                Self::scan_start_tag(markup)
            }
        }
    }

    fn scan_start_tag(markup: &str) -> Self {
        let Some(tag) = RootTag::find(markup) else {
            return Self::default();
        };
        Self {
            view_box: tag.value("viewBox").map(str::to_string),
            width: tag.value("width").map(str::to_string),
            height: tag.value("height").map(str::to_string),
        }
    }
}

/// Parses a `viewBox` value leniently: whitespace and commas both separate tokens and
/// non-numeric tokens are skipped. Fewer than four numbers is a miss.
pub fn parse_view_box(raw: &str) -> Option<BoundingGeometry> {
    let mut nums = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite());
    let x = nums.next()?;
    let y = nums.next()?;
    let w = nums.next()?;
    let h = nums.next()?;
    Some(BoundingGeometry::new(x, y, w, h))
}

/// Parses an SVG length, ignoring its unit (`"120px"`, `"120"` and `"120%"` all yield 120).
pub fn parse_length(raw: &str) -> Option<f64> {
    svgtypes::Length::from_str(raw.trim())
        .ok()
        .map(|len| len.number)
        .filter(|v| v.is_finite())
}
