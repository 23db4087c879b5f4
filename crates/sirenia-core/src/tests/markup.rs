use crate::*;

#[test]
fn renders_common_markdown_constructs() {
    let html = MarkdownHtmlRenderer::new().render_html("# Title\n\n**bold** and ~~gone~~\n");
    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("<del>gone</del>"));
}

#[test]
fn renders_tables() {
    let html = MarkdownHtmlRenderer::new().render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>2</td>"));
}

#[test]
fn plain_text_never_fails() {
    let html = MarkdownHtmlRenderer::new().render_html("just < text & more");
    assert_eq!(html, "<p>just &lt; text &amp; more</p>\n");
}

#[test]
fn default_markdown_document_renders() {
    let html = MarkdownHtmlRenderer::new().render_html(EditorMode::Markdown.default_document());
    assert!(html.contains("<h1>Markdown syntax guide</h1>"));
}
