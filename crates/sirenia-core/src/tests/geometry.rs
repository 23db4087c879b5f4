use crate::geometry::*;
use std::cell::Cell;

fn live_box(geo: BoundingGeometry) -> impl Fn() -> Result<BoundingGeometry, GeometryQueryError> {
    move || Ok(geo)
}

#[test]
fn view_box_wins_over_everything_else() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-8 -8 316.5 120" width="50" height="50"></svg>"#;
    let live = live_box(BoundingGeometry::new(1.0, 2.0, 3.0, 4.0));
    let (geo, source) = BoundingGeometryResolver::default().resolve_with_source(svg, Some(&live));
    assert_eq!(source, GeometrySource::ViewBox);
    assert_eq!(geo, BoundingGeometry::new(-8.0, -8.0, 316.5, 120.0));
}

#[test]
fn view_box_accepts_commas_and_mixed_separators() {
    assert_eq!(
        parse_view_box("0,0, 200  100"),
        Some(BoundingGeometry::new(0.0, 0.0, 200.0, 100.0))
    );
    assert_eq!(parse_view_box("0 0 200"), None);
    assert_eq!(parse_view_box("a b c d"), None);
}

#[test]
fn degenerate_view_box_falls_through_to_size_attributes() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 0 0" width="640px" height="480"></svg>"#;
    let (geo, source) = BoundingGeometryResolver::default().resolve_with_source(svg, None);
    assert_eq!(source, GeometrySource::SizeAttributes);
    assert_eq!(geo, BoundingGeometry::from_size(640.0, 480.0));
}

#[test]
fn size_attributes_require_both_dimensions() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%"></svg>"#;
    let live = live_box(BoundingGeometry::new(5.0, 6.0, 70.0, 80.0));
    let (geo, source) = BoundingGeometryResolver::default().resolve_with_source(svg, Some(&live));
    assert_eq!(source, GeometrySource::LiveElement);
    assert_eq!(geo, BoundingGeometry::new(5.0, 6.0, 70.0, 80.0));
}

#[test]
fn failing_live_query_is_swallowed() {
    let calls = Cell::new(0);
    let live = || -> Result<BoundingGeometry, GeometryQueryError> {
        calls.set(calls.get() + 1);
        Err(GeometryQueryError::Detached)
    };
    let (geo, source) =
        BoundingGeometryResolver::default().resolve_with_source("<svg></svg>", Some(&live));
    assert_eq!(calls.get(), 1);
    assert_eq!(source, GeometrySource::Fallback);
    assert_eq!(geo, BoundingGeometry::from_size(800.0, 600.0));
}

#[test]
fn nothing_available_resolves_to_default_box() {
    let geo = BoundingGeometryResolver::default().resolve("<svg></svg>", None);
    assert_eq!(geo, BoundingGeometry::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn malformed_markup_never_fails() {
    let resolver = BoundingGeometryResolver::with_fallback_size(320.0, 200.0);
    assert_eq!(
        resolver.resolve("not svg at all", None),
        BoundingGeometry::from_size(320.0, 200.0)
    );
    // Unclosed tags: the root start tag is still scanned.
    let broken = r#"<svg viewBox="0 0 90 45"><g><br></g>"#;
    assert_eq!(
        resolver.resolve(broken, None),
        BoundingGeometry::new(0.0, 0.0, 90.0, 45.0)
    );
}

#[test]
fn extents_are_never_negative() {
    let geo = BoundingGeometry::new(0.0, 0.0, -5.0, f64::NAN);
    assert_eq!(geo.width(), 0.0);
    assert_eq!(geo.height(), 0.0);
    assert!(geo.is_degenerate());
}

#[test]
fn inflate_grows_every_side() {
    let geo = BoundingGeometry::new(10.0, 20.0, 100.0, 50.0).inflate(40.0);
    assert_eq!(geo, BoundingGeometry::new(-30.0, -20.0, 180.0, 130.0));
}

#[test]
fn lengths_ignore_units() {
    assert_eq!(parse_length("120px"), Some(120.0));
    assert_eq!(parse_length(" 64 "), Some(64.0));
    assert_eq!(parse_length("auto"), None);
}
