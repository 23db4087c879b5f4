//! Export as an explicit state machine.
//!
//! ```text
//! Idle -> Preparing -> Serializing -> Complete                    (svg)
//! Idle -> Preparing -> Rasterizing -> Encoding -> Complete        (png, jpg)
//!              \______________\______________\____-> Error
//! ```
//!
//! Each transition is a method that is only honored from its source phase; anything else
//! (including every call after `Complete` or `Error`) is a logged no-op, so an export resolves
//! exactly once. Hosts with their own event loop can step through the transitions by hand;
//! everyone else awaits [`ExportPipeline::run`].

use crate::artifact::{ExportArtifact, unix_millis_now};
use crate::error::{ExportError, ExportFailure, Result};
use crate::raster;
use crate::request::{ExportFormat, ExportRequest};
use crate::source::{SourceDecoder, SourceLedger, TransientSource};
use crate::svg::prepare_root;
use sirenia_core::{BoundingGeometry, BoundingGeometryResolver, ExportConfig, LiveGeometry};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportPhase {
    Idle,
    Preparing,
    Serializing,
    Rasterizing,
    Encoding,
    Complete,
    Error,
}

impl ExportPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, ExportPhase::Complete | ExportPhase::Error)
    }
}

/// Decisions made while preparing: what to draw, how much room around it, at what scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportPlan {
    pub geometry: BoundingGeometry,
    pub padding: f64,
    pub scale: f64,
    pub background: tiny_skia::Color,
}

impl ExportPlan {
    /// Raster surface dimensions in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        raster::surface_size(&self.geometry, self.padding, self.scale)
    }

    /// Content box grown by the padding; the `viewBox` of vector exports.
    pub fn padded_view_box(&self) -> BoundingGeometry {
        self.geometry.inflate(self.padding)
    }
}

enum Stage {
    Idle,
    Serializing(ExportPlan),
    Rasterizing {
        plan: ExportPlan,
        source: Option<TransientSource>,
    },
    Encoding {
        plan: ExportPlan,
        pixmap: tiny_skia::Pixmap,
    },
    Complete(ExportArtifact),
    Failed(ExportFailure),
}

impl Stage {
    fn phase(&self) -> ExportPhase {
        match self {
            Stage::Idle => ExportPhase::Idle,
            Stage::Serializing(_) => ExportPhase::Serializing,
            Stage::Rasterizing { .. } => ExportPhase::Rasterizing,
            Stage::Encoding { .. } => ExportPhase::Encoding,
            Stage::Complete(_) => ExportPhase::Complete,
            Stage::Failed(_) => ExportPhase::Error,
        }
    }

    fn plan(&self) -> Option<&ExportPlan> {
        match self {
            Stage::Serializing(plan)
            | Stage::Rasterizing { plan, .. }
            | Stage::Encoding { plan, .. } => Some(plan),
            _ => None,
        }
    }
}

/// One export, from the rendered markup to a saved artifact.
///
/// The pipeline owns a copy of everything it needs, so several exports can be in flight
/// without sharing state.
pub struct ExportPipeline {
    request: ExportRequest,
    config: ExportConfig,
    resolver: BoundingGeometryResolver,
    ledger: Arc<SourceLedger>,
    timestamp_ms: Option<i64>,
    stage: Stage,
    history: Vec<ExportPhase>,
}

impl std::fmt::Debug for ExportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("format", &self.request.format)
            .field("phase", &self.phase())
            .field("history", &self.history)
            .finish()
    }
}

impl ExportPipeline {
    pub fn new(request: ExportRequest) -> Self {
        Self::with_config(request, ExportConfig::default())
    }

    pub fn with_config(request: ExportRequest, config: ExportConfig) -> Self {
        let resolver = BoundingGeometryResolver::with_fallback_size(
            config.fallback_width,
            config.fallback_height,
        );
        Self {
            request,
            config,
            resolver,
            ledger: SourceLedger::new(),
            timestamp_ms: None,
            stage: Stage::Idle,
            history: vec![ExportPhase::Idle],
        }
    }

    /// Shares a handle ledger across pipelines (leak accounting for a whole session).
    pub fn with_ledger(mut self, ledger: Arc<SourceLedger>) -> Self {
        self.ledger = ledger;
        self
    }

    /// Pins the timestamp used in the suggested filename.
    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    pub fn request(&self) -> &ExportRequest {
        &self.request
    }

    pub fn phase(&self) -> ExportPhase {
        self.stage.phase()
    }

    /// Every phase entered so far, starting with `Idle`.
    pub fn history(&self) -> &[ExportPhase] {
        &self.history
    }

    pub fn plan(&self) -> Option<&ExportPlan> {
        self.stage.plan()
    }

    pub fn ledger(&self) -> &Arc<SourceLedger> {
        &self.ledger
    }

    /// The open image source while a raster export is waiting on its decoder.
    pub fn source(&self) -> Option<&TransientSource> {
        match &self.stage {
            Stage::Rasterizing { source, .. } => source.as_ref(),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&ExportArtifact> {
        match &self.stage {
            Stage::Complete(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ExportFailure> {
        match &self.stage {
            Stage::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// `Idle -> Preparing -> {Serializing | Rasterizing | Error}`.
    pub fn prepare(&mut self, live: Option<&dyn LiveGeometry>) -> ExportPhase {
        if !matches!(self.stage, Stage::Idle) {
            return self.ignored("prepare");
        }
        self.history.push(ExportPhase::Preparing);

        if !self.request.has_content() {
            return self.fail(ExportPhase::Preparing, ExportError::NoContent);
        }

        let (geometry, origin) = self
            .resolver
            .resolve_with_source(&self.request.source_markup, live);
        let scale = if self.request.format.is_raster() {
            raster::scale_factor(&geometry, self.config.scale, self.config.max_canvas_px)
        } else {
            1.0
        };
        let plan = ExportPlan {
            geometry,
            padding: self.config.padding,
            scale,
            background: self.background(),
        };
        tracing::debug!(
            format = ?self.request.format,
            ?origin,
            width = geometry.width(),
            height = geometry.height(),
            scale,
            "export prepared"
        );

        if self.request.format.is_raster() {
            let (width, height) = plan.surface_size();
            if !self.config.surface_fits(width, height) {
                return self.fail(
                    ExportPhase::Preparing,
                    ExportError::SurfaceTooLarge { width, height },
                );
            }
            self.enter(Stage::Rasterizing { plan, source: None })
        } else {
            self.enter(Stage::Serializing(plan))
        }
    }

    /// `Serializing -> Complete`.
    pub fn serialize(&mut self) -> ExportPhase {
        let plan = match &self.stage {
            Stage::Serializing(plan) => *plan,
            _ => return self.ignored("serialize"),
        };
        let view_box = plan.padded_view_box();
        let svg = prepare_root(&self.request.source_markup, &plan.geometry, Some(&view_box));
        let artifact =
            ExportArtifact::diagram(svg.into_bytes(), ExportFormat::Svg, self.timestamp());
        self.enter(Stage::Complete(artifact))
    }

    /// Serializes the sized markup into a transient image source for the decoder.
    ///
    /// Stays in `Rasterizing`; the handle is released when the decode result arrives or the
    /// pipeline is dropped, whichever comes first.
    pub fn open_source(&mut self) -> ExportPhase {
        let plan = match &self.stage {
            Stage::Rasterizing { plan, source: None } => *plan,
            _ => return self.ignored("open_source"),
        };
        let svg = prepare_root(&self.request.source_markup, &plan.geometry, None);
        let source = TransientSource::allocate(svg, &self.ledger);
        self.stage = Stage::Rasterizing {
            plan,
            source: Some(source),
        };
        self.phase()
    }

    /// `Rasterizing -> {Encoding | Error}` once the decoder settles.
    pub fn on_decoded(&mut self, decoded: Result<usvg::Tree>) -> ExportPhase {
        let plan = match &mut self.stage {
            Stage::Rasterizing { plan, source } if source.is_some() => {
                drop(source.take());
                *plan
            }
            _ => return self.ignored("on_decoded"),
        };

        let tree = match decoded {
            Ok(tree) => tree,
            Err(err) => return self.fail(ExportPhase::Rasterizing, err),
        };
        match raster::draw(&tree, &plan.geometry, plan.padding, plan.scale, plan.background) {
            Ok(pixmap) => self.enter(Stage::Encoding { plan, pixmap }),
            Err(err) => self.fail(ExportPhase::Rasterizing, err),
        }
    }

    /// `Encoding -> {Complete | Error}`.
    pub fn encode(&mut self) -> ExportPhase {
        let encoded = match &self.stage {
            Stage::Encoding { pixmap, .. } => match self.request.format {
                ExportFormat::Jpg => raster::encode_jpeg(pixmap, self.config.jpeg_quality),
                // Vector requests never reach this stage.
                ExportFormat::Png | ExportFormat::Svg => raster::encode_png(pixmap),
            },
            _ => return self.ignored("encode"),
        };
        match encoded {
            Ok(bytes) => {
                let artifact =
                    ExportArtifact::diagram(bytes, self.request.format, self.timestamp());
                self.enter(Stage::Complete(artifact))
            }
            Err(err) => self.fail(ExportPhase::Encoding, err),
        }
    }

    /// Drives every transition to a terminal phase.
    pub async fn run(
        mut self,
        live: Option<&dyn LiveGeometry>,
        decoder: &dyn SourceDecoder,
    ) -> std::result::Result<ExportArtifact, ExportFailure> {
        match self.prepare(live) {
            ExportPhase::Serializing => {
                self.serialize();
            }
            ExportPhase::Rasterizing => {
                self.open_source();
                if let Some(source) = self.source() {
                    let decoded = decoder.decode(source).await;
                    self.on_decoded(decoded);
                }
                self.encode();
            }
            _ => {}
        }
        self.into_outcome()
    }

    /// The artifact of a completed export, or why there is none.
    pub fn into_outcome(self) -> std::result::Result<ExportArtifact, ExportFailure> {
        match self.stage {
            Stage::Complete(artifact) => Ok(artifact),
            Stage::Failed(failure) => Err(failure),
            other => {
                let phase = other.phase();
                Err(ExportFailure::new(phase, ExportError::Incomplete { phase }))
            }
        }
    }

    fn background(&self) -> tiny_skia::Color {
        let text = self.config.background_for(self.request.theme);
        raster::parse_color(text).unwrap_or_else(|| {
            tracing::warn!(background = text, "unrecognized export background; using white");
            tiny_skia::Color::WHITE
        })
    }

    fn timestamp(&self) -> i64 {
        self.timestamp_ms.unwrap_or_else(unix_millis_now)
    }

    fn enter(&mut self, stage: Stage) -> ExportPhase {
        let phase = stage.phase();
        if let Stage::Complete(artifact) = &stage {
            tracing::debug!(
                filename = artifact.suggested_filename(),
                bytes = artifact.bytes().len(),
                "export complete"
            );
        }
        self.stage = stage;
        self.history.push(phase);
        phase
    }

    fn fail(&mut self, phase: ExportPhase, error: ExportError) -> ExportPhase {
        tracing::warn!(?phase, %error, "export failed");
        self.enter(Stage::Failed(ExportFailure::new(phase, error)))
    }

    fn ignored(&self, transition: &str) -> ExportPhase {
        let phase = self.phase();
        tracing::debug!(transition, ?phase, "export transition ignored");
        phase
    }
}
