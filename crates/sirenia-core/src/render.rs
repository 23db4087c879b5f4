//! Boundary to the diagram rendering engine.

use crate::diagnostics::normalize_render_error;
use crate::mode::Theme;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DiagramRenderError {
    pub message: String,
}

impl DiagramRenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message as it should be shown inline next to the editor.
    pub fn display_message(&self) -> String {
        normalize_render_error(&self.message)
    }
}

/// Turns diagram source into SVG markup.
///
/// Implementations are free to block; scheduling and staleness checks happen in the caller.
pub trait DiagramRenderer {
    fn render(&self, source: &str, theme: Theme) -> Result<String, DiagramRenderError>;
}

impl<T: DiagramRenderer + ?Sized> DiagramRenderer for &T {
    fn render(&self, source: &str, theme: Theme) -> Result<String, DiagramRenderError> {
        (**self).render(source, theme)
    }
}

impl<T: DiagramRenderer + ?Sized> DiagramRenderer for Box<T> {
    fn render(&self, source: &str, theme: Theme) -> Result<String, DiagramRenderError> {
        (**self).render(source, theme)
    }
}
