#![forbid(unsafe_code)]

//! Headless core of the sirenia live preview: viewport navigation, content geometry resolution,
//! scroll mirroring, render scheduling and session persistence.
//!
//! Design goals:
//! - every stateful piece is a plain value mutated through explicit operations
//! - time is injected (`Instant` arguments), so debounce and cooldown behavior is deterministic
//! - external collaborators (diagram engine, markup renderer, storage) sit behind traits

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geom;
pub mod geometry;
pub mod markup;
pub mod mode;
pub mod render;
pub mod schedule;
pub mod scroll;
pub mod session;
pub mod svgroot;
pub mod viewport;

pub use config::{ExportConfig, RenderConfig, ScrollConfig, StudioConfig, ViewportConfig};
pub use diagnostics::normalize_render_error;
pub use error::{Error, Result};
pub use geometry::{
    BoundingGeometry, BoundingGeometryResolver, GeometryQueryError, GeometrySource, LiveGeometry,
};
pub use markup::{MarkdownHtmlRenderer, MarkupRenderer};
pub use mode::{EditorMode, Theme};
pub use render::{DiagramRenderError, DiagramRenderer};
pub use schedule::{RenderScheduler, RenderTicket};
pub use scroll::{Pane, ScrollCommand, ScrollMetrics, ScrollMirror};
pub use session::{FileStore, KeyValueStore, MemoryStore, Session, StoreError};
pub use viewport::{
    PointerButton, ViewportAction, ViewportController, ViewportState, WheelEvent, WheelOutcome,
};

#[cfg(test)]
mod tests;
