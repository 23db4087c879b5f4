//! Span-aware scanning and editing of the root `<svg ...>` start tag.
//!
//! Only the start tag is touched; the rest of the document is copied through byte-for-byte, so
//! edits work on markup that is not well-formed XML.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn re_attr() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("static regex must compile")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootAttr {
    pub name: String,
    /// Attribute value with entity and character references decoded.
    pub value: String,
    /// Byte span of `name="value"` in the document.
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTag {
    /// Byte span of the whole start tag, `<` through `>`.
    pub span: Range<usize>,
    /// Where a new attribute is inserted (before `>` or `/>`).
    pub insert_at: usize,
    pub attrs: Vec<RootAttr>,
}

impl RootTag {
    pub fn find(svg: &str) -> Option<Self> {
        let start = find_svg_open(svg)?;
        let bytes = svg.as_bytes();

        let mut quote: Option<u8> = None;
        let mut end = None;
        for (i, &b) in bytes.iter().enumerate().skip(start + 4) {
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if b == b'"' || b == b'\'' => quote = Some(b),
                None if b == b'>' => {
                    end = Some(i);
                    break;
                }
                None => {}
            }
        }
        let end = end?;
        let insert_at = if end > start && bytes[end - 1] == b'/' {
            end - 1
        } else {
            end
        };

        let body_start = start + 4;
        let attrs = re_attr()
            .captures_iter(&svg[body_start..end])
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?.as_str().to_string();
                let raw = caps.get(2).or_else(|| caps.get(3))?.as_str();
                let value = htmlize::unescape(raw).into_owned();
                Some(RootAttr {
                    name,
                    value,
                    span: body_start + whole.start()..body_start + whole.end(),
                })
            })
            .collect();

        Some(Self {
            span: start..end + 1,
            insert_at,
            attrs,
        })
    }

    pub fn attr(&self, name: &str) -> Option<&RootAttr> {
        self.attrs.iter().find(|a| a.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.attr(name).map(|a| a.value.as_str())
    }
}

fn find_svg_open(svg: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = svg[from..].find("<svg") {
        let at = from + rel;
        match svg.as_bytes().get(at + 4) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            Some(_) => from = at + 4,
            None => return None,
        }
    }
    None
}

/// Inverse of the decoding done by [`RootTag::find`], for double-quoted output.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Sets attributes on the root `<svg>`, replacing existing ones in place and appending the rest.
///
/// Returns `None` when the document has no `<svg>` start tag.
pub fn set_root_attributes(svg: &str, updates: &[(&str, String)]) -> Option<String> {
    let tag = RootTag::find(svg)?;

    let mut edits: Vec<(Range<usize>, String)> = Vec::with_capacity(updates.len());
    let mut appended = String::new();
    for (name, value) in updates {
        let rendered = format!("{name}=\"{}\"", escape_attr(value));
        match tag.attr(name) {
            Some(existing) => edits.push((existing.span.clone(), rendered)),
            None => {
                appended.push(' ');
                appended.push_str(&rendered);
            }
        }
    }
    if !appended.is_empty() {
        edits.push((tag.insert_at..tag.insert_at, appended));
    }

    // Apply back to front so earlier spans stay valid.
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut out = svg.to_string();
    for (range, text) in edits {
        out.replace_range(range, &text);
    }
    Some(out)
}
