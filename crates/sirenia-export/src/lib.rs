#![forbid(unsafe_code)]

//! Turns rendered diagram markup into downloadable SVG, PNG or JPG files.
//!
//! Vector exports are rewritten in place (size, padded `viewBox`, uncapped width). Raster
//! exports are decoded with `usvg`, drawn by `resvg` onto a padded `tiny-skia` surface filled
//! with the theme background, and encoded as PNG or JPEG. See [`pipeline`] for the phases.

pub mod artifact;
pub mod error;
pub mod measure;
pub mod pipeline;
pub mod raster;
pub mod request;
pub mod source;
pub mod svg;

pub use artifact::{DirectorySink, ExportArtifact, FileSaveSink, MemorySink, suggested_filename};
pub use error::{ExportError, ExportFailure, Result};
pub use measure::RenderedTreeGeometry;
pub use pipeline::{ExportPhase, ExportPipeline, ExportPlan};
pub use request::{ExportFormat, ExportRequest};
pub use source::{SourceDecoder, SourceLedger, TransientSource, UsvgDecoder};

#[cfg(test)]
mod tests;
