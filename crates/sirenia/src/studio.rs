use crate::error::StudioError;
use sirenia_core::geom::Size;
use sirenia_core::{
    BoundingGeometryResolver, DiagramRenderError, DiagramRenderer, EditorMode, KeyValueStore,
    MarkdownHtmlRenderer, MarkupRenderer, Pane, RenderScheduler, RenderTicket, ScrollCommand,
    ScrollMetrics, ScrollMirror, Session, StudioConfig, Theme, ViewportController,
};
use std::time::Instant;

#[cfg(feature = "export")]
use sirenia_core::LiveGeometry;
#[cfg(feature = "export")]
use sirenia_export::{
    ExportArtifact, ExportFailure, ExportFormat, ExportPipeline, ExportRequest, FileSaveSink,
    SourceDecoder, SourceLedger,
};
#[cfg(feature = "export")]
use std::sync::Arc;

/// The editor/preview pair: one document, its rendered diagram, and everything the user can do
/// to either.
///
/// All time-dependent behavior takes `now` from the caller; drive [`Studio::tick`] from the
/// host's frame or timer loop.
pub struct Studio<S, R, M = MarkdownHtmlRenderer> {
    config: StudioConfig,
    session: Session<S>,
    renderer: R,
    markup: M,
    theme: Theme,
    scheduler: RenderScheduler,
    viewport: ViewportController,
    scroll: ScrollMirror,
    resolver: BoundingGeometryResolver,
    container: Option<Size>,
    svg: Option<String>,
    error: Option<String>,
    #[cfg(feature = "export")]
    ledger: Arc<SourceLedger>,
}

impl<S: KeyValueStore, R: DiagramRenderer> Studio<S, R> {
    /// Restores the persisted session and schedules the first render.
    pub fn new(config: StudioConfig, store: S, renderer: R, now: Instant) -> Self {
        let mut studio = Self {
            session: Session::restore(store),
            renderer,
            markup: MarkdownHtmlRenderer::default(),
            theme: Theme::default(),
            scheduler: RenderScheduler::new(config.render.debounce()),
            viewport: ViewportController::new(&config.viewport),
            scroll: ScrollMirror::new(&config.scroll),
            resolver: BoundingGeometryResolver::with_fallback_size(
                config.export.fallback_width,
                config.export.fallback_height,
            ),
            container: None,
            svg: None,
            error: None,
            #[cfg(feature = "export")]
            ledger: SourceLedger::new(),
            config,
        };
        studio.request_render(now);
        studio
    }

    /// Like [`Studio::new`], reading the configuration from JSON or YAML text.
    pub fn from_config_str(
        config: &str,
        store: S,
        renderer: R,
        now: Instant,
    ) -> Result<Self, StudioError> {
        let config = StudioConfig::parse(config)?;
        Ok(Self::new(config, store, renderer, now))
    }
}

impl<S: KeyValueStore, R: DiagramRenderer, M: MarkupRenderer> Studio<S, R, M> {
    pub fn with_markup_renderer<M2: MarkupRenderer>(self, markup: M2) -> Studio<S, R, M2> {
        Studio {
            config: self.config,
            session: self.session,
            renderer: self.renderer,
            markup,
            theme: self.theme,
            scheduler: self.scheduler,
            viewport: self.viewport,
            scroll: self.scroll,
            resolver: self.resolver,
            container: self.container,
            svg: self.svg,
            error: self.error,
            #[cfg(feature = "export")]
            ledger: self.ledger,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn mode(&self) -> EditorMode {
        self.session.mode()
    }

    pub fn source(&self) -> &str {
        self.session.source()
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Rendered diagram markup from the last successful render.
    pub fn svg(&self) -> Option<&str> {
        self.svg.as_deref()
    }

    /// Normalized engine error from the last failed render.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Replaces the document text; persists it and restarts the render debounce.
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.session.set_source(text);
        self.request_render(now);
    }

    pub fn set_theme(&mut self, theme: Theme, now: Instant) {
        if self.theme == theme {
            return;
        }
        self.theme = theme;
        self.request_render(now);
    }

    /// Activates `mode`, restoring its saved document. The preview and viewport start over.
    pub fn switch_mode(&mut self, mode: EditorMode, now: Instant) {
        self.session.switch_mode(mode);
        self.scheduler.cancel();
        self.clear_preview();
        self.viewport.reset();
        tracing::debug!(%mode, "editor mode switched");
        self.request_render(now);
    }

    /// Restores the built-in document for the current mode.
    pub fn reset_document(&mut self, now: Instant) {
        self.session.reset_to_default();
        self.viewport.reset();
        self.request_render(now);
    }

    pub fn clear_document(&mut self, now: Instant) {
        self.session.clear();
        self.request_render(now);
    }

    /// Text for the clipboard.
    pub fn copy_source(&self) -> &str {
        self.session.source()
    }

    /// The Markdown preview of the current document.
    pub fn preview_html(&self) -> String {
        self.markup.render_html(self.session.source())
    }

    /// Takes the due render, if any, for hosts that render off the main loop.
    ///
    /// Renders for another mode are dropped, and an empty document clears the preview without
    /// reaching the engine; neither yields a ticket.
    pub fn begin_render(&mut self, now: Instant) -> Option<RenderTicket> {
        let ticket = self.scheduler.poll_due(now)?;
        if ticket.mode != EditorMode::Diagram || self.session.mode() != EditorMode::Diagram {
            tracing::debug!(mode = %ticket.mode, "skipping render outside diagram mode");
            return None;
        }
        if ticket.source.trim().is_empty() {
            self.clear_preview();
            return None;
        }
        Some(ticket)
    }

    /// Applies a finished render. Returns `false` when the result was superseded.
    pub fn complete_render(
        &mut self,
        ticket: &RenderTicket,
        result: Result<String, DiagramRenderError>,
    ) -> bool {
        if !self.scheduler.is_current(ticket) || self.session.mode() != EditorMode::Diagram {
            tracing::debug!(
                generation = ticket.generation(),
                "discarding stale render result"
            );
            return false;
        }
        match result {
            Ok(svg) => {
                self.svg = Some(svg);
                self.error = None;
                if self.config.viewport.auto_fit {
                    self.fit_to_view();
                }
            }
            Err(err) => {
                tracing::debug!(%err, "diagram render failed");
                self.error = Some(err.display_message());
                self.svg = None;
            }
        }
        true
    }

    /// Runs the due render on the calling thread. Returns `true` when the preview changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let had_preview = self.svg.is_some() || self.error.is_some();
        let Some(ticket) = self.begin_render(now) else {
            return had_preview && self.svg.is_none() && self.error.is_none();
        };
        let result = self.renderer.render(&ticket.source, ticket.theme);
        self.complete_render(&ticket, result)
    }

    /// Size of the preview viewport, used by fit-to-view.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = Some(size);
    }

    /// Fits the rendered diagram into the container. No-op until both are known.
    pub fn fit_to_view(&mut self) -> bool {
        let (Some(svg), Some(container)) = (self.svg.as_deref(), self.container) else {
            return false;
        };
        let content = self.resolver.resolve(svg, None);
        self.viewport.fit_to_view(content.size(), container);
        true
    }

    pub fn set_sync_scroll(&mut self, enabled: bool) {
        self.scroll.set_enabled(enabled);
    }

    pub fn sync_scroll_enabled(&self) -> bool {
        self.scroll.is_enabled()
    }

    /// Mirrors a pane's scroll position onto the other pane (Markdown mode only).
    pub fn on_scroll(
        &mut self,
        source: Pane,
        source_metrics: ScrollMetrics,
        target_metrics: ScrollMetrics,
        now: Instant,
    ) -> Option<ScrollCommand> {
        self.scroll
            .on_scroll(source, source_metrics, target_metrics, self.mode(), now)
    }

    fn request_render(&mut self, now: Instant) {
        if self.session.mode() != EditorMode::Diagram {
            return;
        }
        let source = self.session.source().to_string();
        self.scheduler.schedule(source, self.theme, EditorMode::Diagram, now);
    }

    fn clear_preview(&mut self) {
        self.svg = None;
        self.error = None;
    }
}

#[cfg(feature = "export")]
impl<S: KeyValueStore, R: DiagramRenderer, M: MarkupRenderer> Studio<S, R, M> {
    /// Handle ledger shared by every export started from this studio.
    pub fn export_ledger(&self) -> &Arc<SourceLedger> {
        &self.ledger
    }

    /// An independent pipeline over the currently rendered diagram.
    pub fn export_pipeline(&self, format: ExportFormat) -> ExportPipeline {
        let request = ExportRequest::new(format, self.svg.clone().unwrap_or_default(), self.theme);
        ExportPipeline::with_config(request, self.config.export.clone())
            .with_ledger(Arc::clone(&self.ledger))
    }

    pub async fn export(
        &self,
        format: ExportFormat,
        live: Option<&dyn LiveGeometry>,
        decoder: &dyn SourceDecoder,
    ) -> Result<ExportArtifact, ExportFailure> {
        self.export_pipeline(format).run(live, decoder).await
    }

    /// Exports and hands the artifact to `sink`.
    pub async fn export_to(
        &self,
        format: ExportFormat,
        live: Option<&dyn LiveGeometry>,
        decoder: &dyn SourceDecoder,
        sink: &mut dyn FileSaveSink,
    ) -> Result<ExportArtifact, StudioError> {
        let artifact = self.export(format, live, decoder).await?;
        sink.save(&artifact)?;
        Ok(artifact)
    }

    /// Saves the raw document text as `document-<unix-ms>.md`.
    pub fn download_markdown(
        &self,
        sink: &mut dyn FileSaveSink,
    ) -> Result<ExportArtifact, StudioError> {
        let artifact = ExportArtifact::markdown_document(
            self.session.source(),
            sirenia_export::artifact::unix_millis_now(),
        );
        sink.save(&artifact)?;
        Ok(artifact)
    }
}
