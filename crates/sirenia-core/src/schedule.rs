//! Debounced, last-call-wins render scheduling.
//!
//! Every edit replaces the pending render and bumps a generation token. A render that was already
//! handed out keeps its token; when its result arrives the caller checks
//! [`RenderScheduler::is_current`] and drops superseded output. Nothing in flight is interrupted.

use crate::mode::{EditorMode, Theme};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    generation: u64,
    pub source: String,
    pub theme: Theme,
    pub mode: EditorMode,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Pending {
    due: Instant,
    ticket: RenderTicket,
}

#[derive(Debug, Clone)]
pub struct RenderScheduler {
    delay: Duration,
    generation: u64,
    pending: Option<Pending>,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

impl RenderScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces any pending render with one due `delay` after `now`. Returns the new token.
    pub fn schedule(
        &mut self,
        source: impl Into<String>,
        theme: Theme,
        mode: EditorMode,
        now: Instant,
    ) -> u64 {
        self.generation += 1;
        if self.pending.is_some() {
            tracing::trace!(generation = self.generation, "replacing pending render");
        }
        self.pending = Some(Pending {
            due: now + self.delay,
            ticket: RenderTicket {
                generation: self.generation,
                source: source.into(),
                theme,
                mode,
            },
        });
        self.generation
    }

    /// Drops the pending render and invalidates any render already in flight.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out the pending render once its quiescence delay has elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Option<RenderTicket> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            return self.pending.take().map(|p| p.ticket);
        }
        None
    }

    pub fn is_current(&self, ticket: &RenderTicket) -> bool {
        ticket.generation == self.generation
    }
}
