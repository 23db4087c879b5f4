use crate::error::{ExportError, Result};
use crate::request::ExportFormat;
use base64::Engine as _;
use std::path::{Path, PathBuf};

pub const DIAGRAM_ARTIFACT_KIND: &str = "mermaid-diagram";
pub const DOCUMENT_ARTIFACT_KIND: &str = "document";

/// Milliseconds since the Unix epoch, used to make suggested filenames unique.
pub fn unix_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// `<kind>-<unix-ms>.<extension>`
pub fn suggested_filename(kind: &str, timestamp_ms: i64, extension: &str) -> String {
    format!("{kind}-{timestamp_ms}.{extension}")
}

/// A finished export, ready to be handed to a [`FileSaveSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    bytes: Vec<u8>,
    suggested_filename: String,
    mime_type: String,
}

impl ExportArtifact {
    pub fn new(
        bytes: Vec<u8>,
        suggested_filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            suggested_filename: suggested_filename.into(),
            mime_type: mime_type.into(),
        }
    }

    pub(crate) fn diagram(bytes: Vec<u8>, format: ExportFormat, timestamp_ms: i64) -> Self {
        Self::new(
            bytes,
            suggested_filename(DIAGRAM_ARTIFACT_KIND, timestamp_ms, format.extension()),
            format.mime_type(),
        )
    }

    /// The raw editor text as a downloadable Markdown document.
    pub fn markdown_document(source: &str, timestamp_ms: i64) -> Self {
        Self::new(
            source.as_bytes().to_vec(),
            suggested_filename(DOCUMENT_ARTIFACT_KIND, timestamp_ms, "md"),
            "text/markdown;charset=utf-8",
        )
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn suggested_filename(&self) -> &str {
        &self.suggested_filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Destination for finished artifacts (download prompt, file write, clipboard, ...).
pub trait FileSaveSink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<()>;
}

/// Writes artifacts into a directory under their suggested filename.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl FileSaveSink for DirectorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<()> {
        let path = self.dir.join(artifact.suggested_filename());
        std::fs::write(&path, artifact.bytes()).map_err(|source| ExportError::Save {
            filename: artifact.suggested_filename().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = artifact.bytes().len(), "artifact saved");
        self.saved.push(path);
        Ok(())
    }
}

/// Keeps artifacts in memory; handy for hosts that hand bytes to their own download mechanism.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: Vec<ExportArtifact>,
}

impl FileSaveSink for MemorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}
