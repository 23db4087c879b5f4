use crate::diagnostics::GENERIC_SYNTAX_ERROR;
use crate::*;

#[test]
fn grammar_dump_is_truncated() {
    let raw = "Parse error on line 2:\n...A-->B;  C--\n-----------------^\nExpecting 'SEMI', 'NEWLINE', got 'EOF'";
    assert_eq!(
        normalize_render_error(raw),
        "Parse error on line 2:\n...A-->B;  C--\n-----------------^"
    );
}

#[test]
fn pointer_line_is_moved_onto_its_own_line() {
    let raw = "Parse error on line 1:\ngraph TD; A-->-----^";
    assert_eq!(
        normalize_render_error(raw),
        "Parse error on line 1:\ngraph TD; A-->\n-----^"
    );
}

#[test]
fn pointer_line_already_separated_is_untouched() {
    let raw = "bad token\n----^";
    assert_eq!(normalize_render_error(raw), raw);
}

#[test]
fn empty_messages_get_a_generic_text() {
    assert_eq!(normalize_render_error(""), GENERIC_SYNTAX_ERROR);
    assert_eq!(normalize_render_error("Expecting 'EOF'"), GENERIC_SYNTAX_ERROR);
}

#[test]
fn render_error_display_message_is_normalized() {
    let err = DiagramRenderError::new("No diagram type detected Expecting something");
    assert_eq!(err.to_string(), "No diagram type detected Expecting something");
    assert_eq!(err.display_message(), "No diagram type detected");
}

#[test]
fn leading_pointer_run_is_never_split() {
    assert_eq!(normalize_render_error("-----^"), "-----^");
    assert_eq!(normalize_render_error("A-----^"), "A\n-----^");
}
