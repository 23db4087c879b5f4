use crate::source::UsvgDecoder;
use sirenia_core::{BoundingGeometry, GeometryQueryError, LiveGeometry};

/// Measures diagram content from a parsed render tree instead of a live document.
///
/// Hosts without an on-screen element use this as the resolver's live-geometry stage.
pub struct RenderedTreeGeometry {
    tree: Option<usvg::Tree>,
}

impl std::fmt::Debug for RenderedTreeGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedTreeGeometry")
            .field("attached", &self.tree.is_some())
            .finish()
    }
}

impl RenderedTreeGeometry {
    pub fn new(tree: usvg::Tree) -> Self {
        Self { tree: Some(tree) }
    }

    pub fn detached() -> Self {
        Self { tree: None }
    }

    /// Parses `markup` once; unparseable markup yields a detached probe.
    pub fn measure(decoder: &UsvgDecoder, markup: &str) -> Self {
        match decoder.parse(markup.as_bytes()) {
            Ok(tree) => Self::new(tree),
            Err(err) => {
                tracing::debug!(%err, "markup could not be measured");
                Self::detached()
            }
        }
    }
}

impl LiveGeometry for RenderedTreeGeometry {
    fn bounding_box(&self) -> Result<BoundingGeometry, GeometryQueryError> {
        let tree = self.tree.as_ref().ok_or(GeometryQueryError::Detached)?;
        let bbox = tree.root().abs_stroke_bounding_box();
        let geo = BoundingGeometry::new(
            f64::from(bbox.x()),
            f64::from(bbox.y()),
            f64::from(bbox.width()),
            f64::from(bbox.height()),
        );
        if geo.is_degenerate() {
            return Err(GeometryQueryError::Hidden);
        }
        Ok(geo)
    }
}
