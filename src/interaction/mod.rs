//! Pointer-driven controllers for the drawing primitives.
//!
//! Controllers only talk to primitives through their public API; the
//! primitives themselves enforce no gesture transitions. A host forwards its
//! pointer events (media pixels, relative to the pane) and an escape/cancel
//! action.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::LinePoint;
use crate::primitives::{
    HorizontalLinePrimitive, LineHandle, TrendLine, TrendLinePrimitive, TrendLineUpdate,
};
use crate::render::{Color, LineStrokeStyle};

/// Public phase of a trend-line gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLineInteractionMode {
    Idle,
    Drawing,
    Selected,
    DraggingHandle(LineHandle),
    DraggingBody,
}

#[derive(Debug, Clone, PartialEq)]
enum TrendGesture {
    Idle,
    Drawing,
    Selected,
    DraggingHandle {
        id: String,
        handle: LineHandle,
        original: (LinePoint, LinePoint),
    },
    DraggingBody {
        id: String,
        origin: LinePoint,
        original: (LinePoint, LinePoint),
    },
}

/// Style applied to trend lines committed by `TrendLineInteraction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewTrendLineStyle {
    pub color: Color,
    pub line_width: Option<f64>,
    pub line_style: Option<LineStrokeStyle>,
}

impl NewTrendLineStyle {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            line_width: None,
            line_style: None,
        }
    }
}

/// Trend-line gesture state machine.
///
/// - idle + press on a line selects it; press on empty pane starts a preview
/// - drawing + move updates the preview end; release commits the line
/// - selected + press on a handle drags that endpoint; press on the body
///   drags both endpoints by the pointer delta; press elsewhere deselects
/// - cancel drops a preview, reverts an in-flight drag, or deselects
///
/// The selection is read from the primitive on every press, so a host may
/// change it through `set_selected_id` between gestures.
#[derive(Debug, Clone)]
pub struct TrendLineInteraction {
    gesture: TrendGesture,
    style: NewTrendLineStyle,
    id_prefix: String,
    next_id: u64,
}

impl TrendLineInteraction {
    #[must_use]
    pub fn new(style: NewTrendLineStyle) -> Self {
        Self {
            gesture: TrendGesture::Idle,
            style,
            id_prefix: "trend".to_owned(),
            next_id: 1,
        }
    }

    /// Prefix of generated line ids (`{prefix}-{n}`).
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn style(&self) -> NewTrendLineStyle {
        self.style
    }

    pub fn set_style(&mut self, style: NewTrendLineStyle) {
        self.style = style;
    }

    #[must_use]
    pub fn mode(&self) -> TrendLineInteractionMode {
        match &self.gesture {
            TrendGesture::Idle => TrendLineInteractionMode::Idle,
            TrendGesture::Drawing => TrendLineInteractionMode::Drawing,
            TrendGesture::Selected => TrendLineInteractionMode::Selected,
            TrendGesture::DraggingHandle { handle, .. } => {
                TrendLineInteractionMode::DraggingHandle(*handle)
            }
            TrendGesture::DraggingBody { .. } => TrendLineInteractionMode::DraggingBody,
        }
    }

    pub fn pointer_down(
        &mut self,
        primitive: &mut TrendLinePrimitive,
        x: f64,
        y: f64,
    ) -> TrendLineInteractionMode {
        let gesture = std::mem::replace(&mut self.gesture, TrendGesture::Idle);
        self.gesture = match gesture {
            // The primitive owns the selection; the host may have changed it
            // since the last press.
            TrendGesture::Idle | TrendGesture::Selected => {
                match primitive.selected_id().map(str::to_owned) {
                    Some(id) => Self::press_selected(primitive, id, x, y),
                    None => Self::press_idle(primitive, x, y),
                }
            }
            // A press while a gesture is already in flight is ignored.
            other => other,
        };
        trace!(mode = ?self.mode(), x, y, "trend pointer down");
        self.mode()
    }

    pub fn pointer_move(&mut self, primitive: &mut TrendLinePrimitive, x: f64, y: f64) {
        if matches!(self.gesture, TrendGesture::Idle | TrendGesture::Selected) {
            return;
        }
        let Some(point) = primitive.coordinate_to_point(x, y) else {
            return;
        };

        match &self.gesture {
            TrendGesture::Drawing => primitive.set_preview_end(Some(point)),
            TrendGesture::DraggingHandle { id, handle, .. } => {
                primitive.update_line(id, TrendLineUpdate::handle(*handle, point));
            }
            TrendGesture::DraggingBody {
                id,
                origin,
                original,
            } => {
                let delta_time = point.time - origin.time;
                let delta_price = point.price - origin.price;
                primitive.update_line(
                    id,
                    TrendLineUpdate::both(
                        original.0.shifted(delta_time, delta_price),
                        original.1.shifted(delta_time, delta_price),
                    ),
                );
            }
            TrendGesture::Idle | TrendGesture::Selected => {}
        }
    }

    /// Ends the current press. Returns the id of a newly committed line.
    pub fn pointer_up(&mut self, primitive: &mut TrendLinePrimitive) -> Option<String> {
        let gesture = std::mem::replace(&mut self.gesture, TrendGesture::Idle);
        match gesture {
            TrendGesture::Drawing => self.commit_preview(primitive),
            TrendGesture::DraggingHandle { .. } | TrendGesture::DraggingBody { .. } => {
                self.gesture = TrendGesture::Selected;
                None
            }
            other => {
                self.gesture = other;
                None
            }
        }
    }

    pub fn cancel(&mut self, primitive: &mut TrendLinePrimitive) {
        let gesture = std::mem::replace(&mut self.gesture, TrendGesture::Idle);
        match gesture {
            TrendGesture::Idle => {}
            TrendGesture::Drawing => primitive.clear_preview(),
            TrendGesture::Selected => {
                primitive.set_selected_id(None);
            }
            TrendGesture::DraggingHandle { id, original, .. }
            | TrendGesture::DraggingBody { id, original, .. } => {
                primitive.update_line(&id, TrendLineUpdate::both(original.0, original.1));
                self.gesture = TrendGesture::Selected;
            }
        }
        debug!(mode = ?self.mode(), "trend interaction cancelled");
    }

    fn press_idle(primitive: &mut TrendLinePrimitive, x: f64, y: f64) -> TrendGesture {
        if let Some(id) = primitive.line_at_point(x, y).map(|line| line.id.clone()) {
            primitive.set_selected_id(Some(&id));
            return TrendGesture::Selected;
        }
        match primitive.coordinate_to_point(x, y) {
            Some(point) => {
                primitive.set_preview_start(Some(point));
                TrendGesture::Drawing
            }
            None => TrendGesture::Idle,
        }
    }

    fn press_selected(
        primitive: &mut TrendLinePrimitive,
        id: String,
        x: f64,
        y: f64,
    ) -> TrendGesture {
        let Some(original) = primitive
            .line(&id)
            .map(|line| (line.start_point, line.end_point))
        else {
            return Self::press_idle(primitive, x, y);
        };

        if let Some(handle) = primitive.handle_at_point(x, y) {
            return TrendGesture::DraggingHandle {
                id,
                handle,
                original,
            };
        }

        match primitive.line_at_point(x, y).map(|line| line.id.clone()) {
            Some(hit) if hit == id => match primitive.coordinate_to_point(x, y) {
                Some(origin) => TrendGesture::DraggingBody {
                    id,
                    origin,
                    original,
                },
                None => TrendGesture::Selected,
            },
            Some(other) => {
                primitive.set_selected_id(Some(&other));
                TrendGesture::Selected
            }
            None => {
                primitive.set_selected_id(None);
                TrendGesture::Idle
            }
        }
    }

    fn commit_preview(&mut self, primitive: &mut TrendLinePrimitive) -> Option<String> {
        let committed = match (primitive.preview_start(), primitive.preview_end()) {
            (Some(start), Some(end)) => {
                let id = format!("{}-{}", self.id_prefix, self.next_id);
                self.next_id += 1;
                let mut line = TrendLine::new(id.clone(), start, end, self.style.color);
                line.line_width = self.style.line_width;
                line.line_style = self.style.line_style;
                primitive.add_line(line);
                debug!(id = %id, "committed trend line");
                Some(id)
            }
            _ => None,
        };
        primitive.clear_preview();
        committed
    }
}

/// Public phase of a horizontal-line gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalLineInteractionMode {
    Idle,
    Selected,
    Dragging,
}

#[derive(Debug, Clone, PartialEq)]
enum HorizontalGesture {
    Idle,
    Selected,
    Dragging { id: String, original_price: f64 },
}

/// Select-and-drag controller for horizontal lines.
#[derive(Debug, Clone)]
pub struct HorizontalLineInteraction {
    gesture: HorizontalGesture,
}

impl Default for HorizontalLineInteraction {
    fn default() -> Self {
        Self {
            gesture: HorizontalGesture::Idle,
        }
    }
}

impl HorizontalLineInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> HorizontalLineInteractionMode {
        match self.gesture {
            HorizontalGesture::Idle => HorizontalLineInteractionMode::Idle,
            HorizontalGesture::Selected => HorizontalLineInteractionMode::Selected,
            HorizontalGesture::Dragging { .. } => HorizontalLineInteractionMode::Dragging,
        }
    }

    /// A press on a line selects it and starts a drag; elsewhere it clears
    /// the selection.
    pub fn pointer_down(
        &mut self,
        primitive: &mut HorizontalLinePrimitive,
        y: f64,
    ) -> HorizontalLineInteractionMode {
        if let HorizontalGesture::Dragging { .. } = self.gesture {
            return self.mode();
        }
        let hit = primitive
            .line_at_y(y)
            .map(|line| (line.id.clone(), line.price));
        self.gesture = match hit {
            Some((id, original_price)) => {
                primitive.set_selected_id(Some(&id));
                HorizontalGesture::Dragging { id, original_price }
            }
            None => {
                // Also drops a selection the host set directly.
                if primitive.selected_id().is_some() {
                    primitive.set_selected_id(None);
                }
                HorizontalGesture::Idle
            }
        };
        self.mode()
    }

    pub fn pointer_move(&mut self, primitive: &mut HorizontalLinePrimitive, y: f64) {
        let HorizontalGesture::Dragging { id, .. } = &self.gesture else {
            return;
        };
        if let Some(price) = primitive.coordinate_to_price(y) {
            primitive.update_line_price(id, price);
        }
    }

    pub fn pointer_up(&mut self) {
        if let HorizontalGesture::Dragging { .. } = self.gesture {
            self.gesture = HorizontalGesture::Selected;
        }
    }

    pub fn cancel(&mut self, primitive: &mut HorizontalLinePrimitive) {
        let gesture = std::mem::replace(&mut self.gesture, HorizontalGesture::Idle);
        match gesture {
            HorizontalGesture::Idle => {}
            HorizontalGesture::Selected => {
                primitive.set_selected_id(None);
            }
            HorizontalGesture::Dragging { id, original_price } => {
                primitive.update_line_price(&id, original_price);
                self.gesture = HorizontalGesture::Selected;
            }
        }
    }
}
