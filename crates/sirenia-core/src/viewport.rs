//! Pan/zoom state for the diagram preview.
//!
//! [`ViewportState::apply`] is a pure `(state, action) -> state` transition; the
//! [`ViewportController`] wrapper adds input translation (pointer buttons, wheel modifiers) on
//! top of it.

use crate::config::ViewportConfig;
use crate::geom::{Point, Size, Transform, Vector, point, vector};

/// Lower bound for every zoom operation.
pub const MIN_ZOOM: i32 = 5;
/// Upper bound for manual zoom (buttons, wheel).
pub const MAX_ZOOM: i32 = 1000;
/// Upper bound used by fit-to-view. Intentionally tighter than [`MAX_ZOOM`].
pub const MAX_FIT_ZOOM: i32 = 200;
pub const DEFAULT_ZOOM: i32 = 100;
/// Step used by the zoom in/out buttons.
pub const ZOOM_STEP: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    zoom_percent: i32,
    offset: Vector,
    dragging: bool,
    drag_anchor: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom_percent: DEFAULT_ZOOM,
            offset: vector(0.0, 0.0),
            dragging: false,
            drag_anchor: point(0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportAction {
    Zoom(i32),
    PanStart(Point),
    PanMove(Point),
    PanEnd,
    Reset,
    FitToView {
        content: Size,
        container: Size,
        padding: f64,
    },
}

impl ViewportState {
    pub fn zoom_percent(&self) -> i32 {
        self.zoom_percent
    }

    pub fn scale(&self) -> f64 {
        f64::from(self.zoom_percent) / 100.0
    }

    pub fn offset(&self) -> Vector {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_anchor(&self) -> Point {
        self.drag_anchor
    }

    pub fn apply(self, action: ViewportAction) -> Self {
        match action {
            ViewportAction::Zoom(delta) => Self {
                zoom_percent: self
                    .zoom_percent
                    .saturating_add(delta)
                    .clamp(MIN_ZOOM, MAX_ZOOM),
                ..self
            },
            ViewportAction::PanStart(cursor) => Self {
                dragging: true,
                drag_anchor: cursor - self.offset,
                ..self
            },
            // Absolute: offset is always cursor minus anchor.
            ViewportAction::PanMove(cursor) if self.dragging => Self {
                offset: cursor - self.drag_anchor,
                ..self
            },
            ViewportAction::PanMove(_) => self,
            ViewportAction::PanEnd => Self {
                dragging: false,
                ..self
            },
            ViewportAction::Reset => Self {
                zoom_percent: DEFAULT_ZOOM,
                offset: vector(0.0, 0.0),
                ..self
            },
            ViewportAction::FitToView {
                content,
                container,
                padding,
            } => match fit_zoom(content, container, padding) {
                Some(zoom_percent) => Self {
                    zoom_percent,
                    offset: vector(0.0, 0.0),
                    ..self
                },
                None => self,
            },
        }
    }

    /// Maps content coordinates to screen coordinates: scale about `center`, then pan.
    pub fn display_transform(&self, center: Point) -> Transform {
        let s = self.scale();
        Transform::translation(-center.x, -center.y)
            .then_scale(s, s)
            .then_translate(center.to_vector() + self.offset)
    }
}

/// Zoom percent that fits `content` into `container` with `padding` on every side.
///
/// Returns `None` when any dimension is zero (or not finite): there is nothing to fit against.
pub fn fit_zoom(content: Size, container: Size, padding: f64) -> Option<i32> {
    let dims = [content.width, content.height, container.width, container.height];
    if dims.iter().any(|v| *v == 0.0 || !v.is_finite()) {
        return None;
    }

    let available_w = container.width - padding * 2.0;
    let available_h = container.height - padding * 2.0;
    let scale = (available_w / content.width).min(available_h / content.height);

    // `as` saturates for out-of-range floats, so the clamp below always sees a real i32.
    let zoom = (scale * 100.0).round() as i32;
    Some(zoom.clamp(MIN_ZOOM, MAX_FIT_ZOOM))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    pub delta_y: f64,
    pub ctrl: bool,
    pub meta: bool,
}

impl WheelEvent {
    pub fn precision_zoom(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Whether the host should suppress its default wheel handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    Consumed,
    PassThrough,
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    fit_padding: f64,
    wheel_zoom_factor: f64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(&ViewportConfig::default())
    }
}

impl ViewportController {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            state: ViewportState::default(),
            fit_padding: config.fit_padding,
            wheel_zoom_factor: config.wheel_zoom_factor,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn zoom_percent(&self) -> i32 {
        self.state.zoom_percent
    }

    pub fn offset(&self) -> Vector {
        self.state.offset
    }

    pub fn dispatch(&mut self, action: ViewportAction) -> &ViewportState {
        self.state = self.state.apply(action);
        &self.state
    }

    pub fn zoom(&mut self, delta: i32) {
        self.dispatch(ViewportAction::Zoom(delta));
    }

    pub fn zoom_in(&mut self) {
        self.zoom(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(-ZOOM_STEP);
    }

    pub fn pan_start(&mut self, cursor: Point) {
        self.dispatch(ViewportAction::PanStart(cursor));
    }

    /// Starts a pan for primary-button presses only.
    pub fn pointer_down(&mut self, button: PointerButton, cursor: Point) {
        if button == PointerButton::Primary {
            self.pan_start(cursor);
        }
    }

    pub fn pan_move(&mut self, cursor: Point) {
        self.dispatch(ViewportAction::PanMove(cursor));
    }

    pub fn pan_end(&mut self) {
        self.dispatch(ViewportAction::PanEnd);
    }

    pub fn wheel(&mut self, event: WheelEvent) -> WheelOutcome {
        if !event.precision_zoom() {
            return WheelOutcome::PassThrough;
        }
        let delta = (-event.delta_y * self.wheel_zoom_factor).round() as i32;
        self.zoom(delta);
        WheelOutcome::Consumed
    }

    pub fn reset(&mut self) {
        self.dispatch(ViewportAction::Reset);
    }

    pub fn fit_to_view(&mut self, content: Size, container: Size) {
        self.fit_to_view_with_padding(content, container, self.fit_padding);
    }

    pub fn fit_to_view_with_padding(&mut self, content: Size, container: Size, padding: f64) {
        let before = self.state.zoom_percent;
        self.dispatch(ViewportAction::FitToView {
            content,
            container,
            padding,
        });
        tracing::debug!(
            before,
            after = self.state.zoom_percent,
            "viewport fit to container"
        );
    }

    pub fn display_transform(&self, center: Point) -> Transform {
        self.state.display_transform(center)
    }
}
