//! Root `<svg>` adjustments applied before an export leaves the pipeline.

use sirenia_core::BoundingGeometry;
use sirenia_core::svgroot::{RootTag, set_root_attributes};

/// Formats a coordinate without a trailing `.0` (`120`, `-40`, `316.5`).
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        // Avoid `-0`.
        return "0".to_string();
    }
    format!("{v}")
}

pub fn view_box_value(geo: &BoundingGeometry) -> String {
    format!(
        "{} {} {} {}",
        fmt_num(geo.x()),
        fmt_num(geo.y()),
        fmt_num(geo.width()),
        fmt_num(geo.height())
    )
}

/// Drops any `max-width` declaration from an inline style and appends `max-width: none`.
///
/// Renderers commonly cap the root at its natural width for responsive display; exported files
/// must not inherit that cap.
pub fn uncap_max_width(style: Option<&str>) -> String {
    let mut decls: Vec<&str> = declarations(style.unwrap_or_default())
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| {
            let prop = d.split(':').next().unwrap_or_default().trim();
            !prop.eq_ignore_ascii_case("max-width")
        })
        .collect();
    decls.push("max-width: none");
    let mut out = decls.join("; ");
    out.push(';');
    out
}

/// Splits a declaration list on `;`, ignoring semicolons inside quoted strings.
fn declarations(style: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in style.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == ';' => {
                out.push(&style[start..i]);
                start = i + 1;
            }
            None => {}
        }
    }
    out.push(&style[start..]);
    out
}

/// Pins the root to the resolved content size and, when given, replaces its `viewBox`.
///
/// Markup without a recognizable `<svg>` root is returned unchanged.
pub fn prepare_root(
    svg: &str,
    geometry: &BoundingGeometry,
    view_box: Option<&BoundingGeometry>,
) -> String {
    let style = RootTag::find(svg).and_then(|tag| tag.value("style").map(str::to_string));

    let mut updates = vec![
        ("width", fmt_num(geometry.width())),
        ("height", fmt_num(geometry.height())),
        ("style", uncap_max_width(style.as_deref())),
    ];
    if let Some(vb) = view_box {
        updates.push(("viewBox", view_box_value(vb)));
    }

    set_root_attributes(svg, &updates).unwrap_or_else(|| {
        tracing::warn!("export source has no <svg> root; leaving markup unchanged");
        svg.to_string()
    })
}
