use crate::svgroot::*;

const SVG: &str = r#"<?xml version="1.0"?>
<!-- <svgish> -->
<svg id="my-svg" width="100%" xmlns="http://www.w3.org/2000/svg" style="max-width: 316px;" viewBox="-8 -8 316 120" role="graphics-document document"><g><svg x="1"/></g></svg>"#;

#[test]
fn finds_root_start_tag_after_prolog() {
    let tag = RootTag::find(SVG).unwrap();
    assert!(SVG[tag.span.clone()].starts_with("<svg id=\"my-svg\""));
    assert!(SVG[tag.span.clone()].ends_with("document\">"));
    assert_eq!(tag.value("viewBox"), Some("-8 -8 316 120"));
    assert_eq!(tag.value("width"), Some("100%"));
    assert_eq!(tag.value("height"), None);
}

#[test]
fn quoted_gt_does_not_end_the_tag() {
    let svg = r#"<svg data-x="a>b" width='12'><rect/></svg>"#;
    let tag = RootTag::find(svg).unwrap();
    assert_eq!(tag.value("data-x"), Some("a>b"));
    assert_eq!(tag.value("width"), Some("12"));
}

#[test]
fn replaces_existing_and_appends_missing_attributes() {
    let out = set_root_attributes(
        SVG,
        &[
            ("width", "316".to_string()),
            ("height", "120".to_string()),
            ("viewBox", "-48 -48 396 200".to_string()),
        ],
    )
    .unwrap();

    let tag = RootTag::find(&out).unwrap();
    assert_eq!(tag.value("width"), Some("316"));
    assert_eq!(tag.value("height"), Some("120"));
    assert_eq!(tag.value("viewBox"), Some("-48 -48 396 200"));
    assert_eq!(tag.value("id"), Some("my-svg"));
    // Nested content is untouched.
    assert!(out.ends_with(r#"<g><svg x="1"/></g></svg>"#));
}

#[test]
fn appends_before_self_closing_slash() {
    let out = set_root_attributes("<svg/>", &[("width", "5".to_string())]).unwrap();
    assert_eq!(out, r#"<svg width="5"/>"#);
}

#[test]
fn escapes_quotes_in_values() {
    let out = set_root_attributes("<svg></svg>", &[("style", "font-family: \"A\"".to_string())])
        .unwrap();
    assert_eq!(out, r#"<svg style="font-family: &quot;A&quot;"></svg>"#);
}

#[test]
fn values_are_decoded_and_written_back_once() {
    let svg = r#"<svg style="font-family: &quot;A&amp;B&quot;" data-n='&#60;&#x3e;'></svg>"#;
    let tag = RootTag::find(svg).unwrap();
    assert_eq!(tag.value("style"), Some(r#"font-family: "A&B""#));
    assert_eq!(tag.value("data-n"), Some("<>"));

    let style = tag.value("style").unwrap().to_string();
    let out = set_root_attributes(svg, &[("style", style)]).unwrap();
    assert!(out.starts_with(r#"<svg style="font-family: &quot;A&amp;B&quot;""#), "{out}");
}

#[test]
fn missing_root_is_reported() {
    assert_eq!(set_root_attributes("<html></html>", &[]), None);
    assert_eq!(RootTag::find("<svgfoo>"), None);
}
