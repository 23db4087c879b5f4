#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error(transparent)]
    Config(#[from] sirenia_core::Error),
    #[cfg(feature = "export")]
    #[error(transparent)]
    Export(#[from] sirenia_export::ExportFailure),
    #[cfg(feature = "export")]
    #[error(transparent)]
    Save(#[from] sirenia_export::ExportError),
}

impl StudioError {
    /// Text for an alert; export failures include the vector-format advice.
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "export")]
            StudioError::Export(failure) => failure.user_message(),
            other => other.to_string(),
        }
    }
}
