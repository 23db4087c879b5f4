use crate::svg::*;
use sirenia_core::BoundingGeometry;

#[test]
fn numbers_print_without_trailing_zero() {
    assert_eq!(fmt_num(120.0), "120");
    assert_eq!(fmt_num(316.5), "316.5");
    assert_eq!(fmt_num(-40.0), "-40");
    assert_eq!(fmt_num(-0.0), "0");
}

#[test]
fn max_width_is_replaced_and_other_declarations_kept() {
    assert_eq!(
        uncap_max_width(Some("max-width: 316px; background-color: white")),
        "background-color: white; max-width: none;"
    );
    assert_eq!(uncap_max_width(Some("MAX-WIDTH:10px;")), "max-width: none;");
    assert_eq!(uncap_max_width(None), "max-width: none;");
}

#[test]
fn quoted_semicolons_stay_inside_their_declaration() {
    assert_eq!(
        uncap_max_width(Some(r#"content: "a;b"; max-width: 1px"#)),
        r#"content: "a;b"; max-width: none;"#
    );
}

#[test]
fn entities_in_the_root_style_survive_unchanged() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" style="font-family: &quot;trebuchet ms&quot;; max-width: 10px;" viewBox="0 0 10 10"></svg>"#;
    let out = prepare_root(svg, &BoundingGeometry::from_size(10.0, 10.0), None);
    assert!(
        out.contains(r#"style="font-family: &quot;trebuchet ms&quot;; max-width: none;""#),
        "{out}"
    );
    let doc = roxmltree::Document::parse(&out).unwrap();
    assert_eq!(
        doc.root_element().attribute("style"),
        Some(r#"font-family: "trebuchet ms"; max-width: none;"#)
    );
}

#[test]
fn prepare_root_sets_size_style_and_view_box() {
    let svg = r#"<svg id="d" width="100%" style="max-width: 300px;" viewBox="0 0 300 120"><rect width="300" height="120"/></svg>"#;
    let geo = BoundingGeometry::from_size(300.0, 120.0);
    let out = prepare_root(svg, &geo, Some(&geo.inflate(40.0)));

    assert!(out.starts_with(r#"<svg id="d" width="300""#), "{out}");
    assert!(out.contains(r#"height="120""#), "{out}");
    assert!(out.contains(r#"style="max-width: none;""#), "{out}");
    assert!(out.contains(r#"viewBox="-40 -40 380 200""#), "{out}");
    // Only the root is touched.
    assert!(out.contains(r#"<rect width="300" height="120"/>"#), "{out}");
}

#[test]
fn prepare_root_without_view_box_keeps_the_existing_one() {
    let svg = r#"<svg viewBox="0 0 10 10"></svg>"#;
    let out = prepare_root(svg, &BoundingGeometry::from_size(10.0, 10.0), None);
    assert!(out.contains(r#"viewBox="0 0 10 10""#));
    assert!(out.contains(r#"width="10""#));
}

#[test]
fn markup_without_root_is_left_alone() {
    let text = "Syntax error in text";
    assert_eq!(
        prepare_root(text, &BoundingGeometry::from_size(1.0, 1.0), None),
        text
    );
}
