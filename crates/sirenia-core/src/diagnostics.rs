use regex::Regex;
use std::sync::OnceLock;

/// Shown when the engine fails without a message.
pub const GENERIC_SYNTAX_ERROR: &str = "Syntax error in diagram code";

/// Parser errors append the expected-token dump after this marker; it is noise for users.
const GRAMMAR_DUMP_MARKER: &str = "Expecting";

fn re_pointer_line() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(r"([^\n-])(-{3,}\^)").expect("static regex must compile"))
}

/// Cosmetic cleanup of a rendering-engine error message.
///
/// - cuts the message at the first grammar-dump marker and trims it
/// - moves a `----^` pointer run onto its own line when it is glued to preceding text; the run
///   itself is never split
pub fn normalize_render_error(message: &str) -> String {
    let mut msg = message;
    if let Some(idx) = msg.find(GRAMMAR_DUMP_MARKER) {
        msg = msg[..idx].trim();
    }
    if msg.trim().is_empty() {
        return GENERIC_SYNTAX_ERROR.to_string();
    }

    re_pointer_line()
        .replace_all(msg, |caps: &regex::Captures<'_>| {
            format!("{}\n{}", &caps[1], &caps[2])
        })
        .into_owned()
}
