//! Boundary to the Markdown renderer, plus a pulldown-cmark based default.

pub trait MarkupRenderer {
    /// Renders `text` to an HTML fragment. Plain text input must never fail.
    fn render_html(&self, text: &str) -> String;
}

#[derive(Debug, Clone, Copy)]
pub struct MarkdownHtmlRenderer {
    options: pulldown_cmark::Options,
}

impl Default for MarkdownHtmlRenderer {
    fn default() -> Self {
        Self {
            options: pulldown_cmark::Options::ENABLE_TABLES
                | pulldown_cmark::Options::ENABLE_STRIKETHROUGH
                | pulldown_cmark::Options::ENABLE_TASKLISTS,
        }
    }
}

impl MarkdownHtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: pulldown_cmark::Options) -> Self {
        Self { options }
    }
}

impl MarkupRenderer for MarkdownHtmlRenderer {
    fn render_html(&self, text: &str) -> String {
        let parser = pulldown_cmark::Parser::new_ext(text, self.options);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut out, parser);
        out
    }
}
