use crate::pipeline::ExportPhase;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export: no diagram has been rendered yet")]
    NoContent,
    #[error("failed to render the diagram as an image: {message}")]
    Decode { message: String },
    #[error("image resolution {width}x{height} is too high to rasterize")]
    SurfaceTooLarge { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("export stopped before finishing (in {phase:?})")]
    Incomplete { phase: ExportPhase },
    #[error("failed to save {filename}: {source}")]
    Save {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Raster-only failures the user can work around by exporting SVG instead.
    pub fn suggests_vector_fallback(&self) -> bool {
        matches!(
            self,
            ExportError::Decode { .. }
                | ExportError::SurfaceTooLarge { .. }
                | ExportError::PngEncode
                | ExportError::JpegEncode
        )
    }
}

/// Terminal failure of an export, tagged with the phase it happened in.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ExportFailure {
    pub phase: ExportPhase,
    #[source]
    pub error: ExportError,
}

impl ExportFailure {
    pub fn new(phase: ExportPhase, error: ExportError) -> Self {
        Self { phase, error }
    }

    /// Message suitable for an alert or toast.
    pub fn user_message(&self) -> String {
        let mut msg = format!("Export failed: {}.", self.error);
        if self.error.suggests_vector_fallback() {
            msg.push_str(" Please try the SVG format instead.");
        }
        msg
    }
}
