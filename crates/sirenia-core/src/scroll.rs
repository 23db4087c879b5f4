//! Proportional scroll synchronization between the editor and the Markdown preview.

use crate::config::ScrollConfig;
use crate::mode::EditorMode;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Editor,
    Preview,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::Editor => Pane::Preview,
            Pane::Preview => Pane::Editor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Distance the pane can actually scroll.
    pub fn scroll_range(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// Instruction for the host: set `pane`'s scroll offset to `scroll_top`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub pane: Pane,
    pub scroll_top: f64,
}

#[derive(Debug, Clone)]
pub struct ScrollMirror {
    enabled: bool,
    cooldown: Duration,
    suppress_until: Option<Instant>,
}

impl Default for ScrollMirror {
    fn default() -> Self {
        Self::new(&ScrollConfig::default())
    }
}

impl ScrollMirror {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            enabled: config.sync_enabled,
            cooldown: config.cooldown(),
            suppress_until: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.suppress_until = None;
        }
    }

    /// True while scroll events are treated as echoes of a mirrored update.
    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppress_until.is_some_and(|until| now < until)
    }

    /// Handles a scroll event from `source` and returns the update for the opposite pane.
    ///
    /// Only active in Markdown mode. After a mirrored update, events from either pane are ignored
    /// for the cooldown window so the target's own scroll event does not bounce back.
    pub fn on_scroll(
        &mut self,
        source: Pane,
        source_metrics: ScrollMetrics,
        target_metrics: ScrollMetrics,
        mode: EditorMode,
        now: Instant,
    ) -> Option<ScrollCommand> {
        if !self.enabled || mode != EditorMode::Markdown || self.is_suppressed(now) {
            return None;
        }

        let range = source_metrics.scroll_range();
        if range <= 0.0 {
            return None;
        }
        let fraction = source_metrics.scroll_top / range;

        self.suppress_until = Some(now + self.cooldown);
        Some(ScrollCommand {
            pane: source.other(),
            scroll_top: (fraction * target_metrics.scroll_range()).max(0.0),
        })
    }
}
