//! Two-point trend lines with endpoint handles and a drawing preview.

mod views;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::geometry::{distance, point_to_segment_distance};
use crate::core::{CoordinateSource, LinePoint, PixelPoint};
use crate::error::{ChartError, ChartResult};
use crate::primitives::{AttachedParams, Attachment, PaneView, SeriesPrimitive};
use crate::render::{Color, LineStrokeStyle};

use views::TrendLinePaneView;
pub use views::TrendLineRenderRecord;

pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Id of the synthetic render record drawn for the in-progress line.
pub const PREVIEW_ID: &str = "preview";

/// A straight segment between two chart-space anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    pub id: String,
    pub start_point: LinePoint,
    pub end_point: LinePoint,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStrokeStyle>,
}

impl TrendLine {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        start_point: LinePoint,
        end_point: LinePoint,
        color: Color,
    ) -> Self {
        Self {
            id: id.into(),
            start_point,
            end_point,
            color,
            line_width: None,
            line_style: None,
        }
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, line_style: LineStrokeStyle) -> Self {
        self.line_style = Some(line_style);
        self
    }

    #[must_use]
    pub fn resolved_line_width(&self) -> f64 {
        self.line_width.unwrap_or(DEFAULT_LINE_WIDTH)
    }

    #[must_use]
    pub fn resolved_line_style(&self) -> LineStrokeStyle {
        self.line_style.unwrap_or_default()
    }
}

/// Partial endpoint update; `None` keeps the current endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLineUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<LinePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<LinePoint>,
}

impl TrendLineUpdate {
    #[must_use]
    pub fn start(point: LinePoint) -> Self {
        Self {
            start_point: Some(point),
            end_point: None,
        }
    }

    #[must_use]
    pub fn end(point: LinePoint) -> Self {
        Self {
            start_point: None,
            end_point: Some(point),
        }
    }

    #[must_use]
    pub fn both(start_point: LinePoint, end_point: LinePoint) -> Self {
        Self {
            start_point: Some(start_point),
            end_point: Some(end_point),
        }
    }

    /// Moves only the endpoint behind `handle`.
    #[must_use]
    pub fn handle(handle: LineHandle, point: LinePoint) -> Self {
        match handle {
            LineHandle::Start => Self::start(point),
            LineHandle::End => Self::end(point),
        }
    }
}

/// Endpoint handle of the selected trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHandle {
    Start,
    End,
}

impl LineHandle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Hit-testing, handle and label parameters, in media pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLineOptions {
    pub hit_threshold_px: f64,
    pub handle_hit_threshold_px: f64,
    pub handle_size_px: f64,
    pub label_offset_px: f64,
    pub label_font_size_px: f64,
    pub label_padding_x_px: f64,
    pub label_padding_y_px: f64,
    pub label_corner_radius_px: f64,
    pub label_text_color: Color,
    pub preview_color: Color,
    pub preview_line_style: LineStrokeStyle,
}

impl Default for TrendLineOptions {
    fn default() -> Self {
        Self {
            hit_threshold_px: 8.0,
            handle_hit_threshold_px: 10.0,
            handle_size_px: 6.0,
            label_offset_px: 8.0,
            label_font_size_px: 11.0,
            label_padding_x_px: 6.0,
            label_padding_y_px: 3.0,
            label_corner_radius_px: 4.0,
            label_text_color: Color::WHITE,
            preview_color: Color::from_rgb8(0xf5, 0x9e, 0x0b),
            preview_line_style: LineStrokeStyle::Dashed,
        }
    }
}

impl TrendLineOptions {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.hit_threshold_px, "hit_threshold_px"),
            (self.handle_hit_threshold_px, "handle_hit_threshold_px"),
            (self.label_offset_px, "label_offset_px"),
            (self.label_padding_x_px, "label_padding_x_px"),
            (self.label_padding_y_px, "label_padding_y_px"),
            (self.label_corner_radius_px, "label_corner_radius_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "trend line option `{name}` must be finite and >= 0"
                )));
            }
        }
        for (value, name) in [
            (self.handle_size_px, "handle_size_px"),
            (self.label_font_size_px, "label_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "trend line option `{name}` must be finite and > 0"
                )));
            }
        }
        self.label_text_color.validate()?;
        self.preview_color.validate()?;
        Ok(self)
    }
}

/// Absolute and relative change from `start` to `end`.
///
/// A zero start price yields a non-finite percentage; it is rendered as is.
#[must_use]
pub fn price_change(start: LinePoint, end: LinePoint) -> (f64, f64) {
    let price_diff = end.price - start.price;
    (price_diff, price_diff / start.price * 100.0)
}

/// Formats a price change as `+10 (+10.00%)` / `-10 (-10.00%)`.
///
/// The absolute change is rounded to a whole number with halves going towards
/// positive infinity (`-2.5` becomes `-2`); the percentage keeps two decimals.
/// Non-negative values get an explicit `+`.
#[must_use]
pub fn format_price_change(price_diff: f64, percent_diff: f64) -> String {
    let diff_sign = if price_diff >= 0.0 { "+" } else { "" };
    let percent_sign = if percent_diff >= 0.0 { "+" } else { "" };
    // `+ 0.0` folds a rounded negative zero into zero.
    let rounded = (price_diff + 0.5).floor() + 0.0;
    format!("{diff_sign}{rounded} ({percent_sign}{percent_diff:.2}%)")
}

/// Owns a set of trend lines, the selection and the drawing preview.
///
/// Collection order is insertion order; it is both paint order and hit-test
/// priority. The preview is never part of the collection.
#[derive(Debug)]
pub struct TrendLinePrimitive {
    options: TrendLineOptions,
    lines: Vec<TrendLine>,
    selected_id: Option<String>,
    preview_start: Option<LinePoint>,
    preview_end: Option<LinePoint>,
    attachment: Option<Attachment>,
    pane_view: TrendLinePaneView,
}

impl Default for TrendLinePrimitive {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendLinePrimitive {
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_options(TrendLineOptions::default())
    }

    pub fn with_options(options: TrendLineOptions) -> ChartResult<Self> {
        Ok(Self::from_valid_options(options.validate()?))
    }

    fn from_valid_options(options: TrendLineOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            selected_id: None,
            preview_start: None,
            preview_end: None,
            attachment: None,
            pane_view: TrendLinePaneView::new(options),
        }
    }

    #[must_use]
    pub fn options(&self) -> TrendLineOptions {
        self.options
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Appends `line`. Duplicate ids are accepted; the caller owns id
    /// uniqueness.
    pub fn add_line(&mut self, line: TrendLine) {
        if self.lines.iter().any(|existing| existing.id == line.id) {
            warn!(id = %line.id, "trend line id already present");
        }
        trace!(id = %line.id, "add trend line");
        self.lines.push(line);
        self.request_update();
    }

    /// Removes every line with `id`. Returns whether anything was removed.
    pub fn remove_line(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        let removed = self.lines.len() != before;
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        trace!(id, removed, "remove trend line");
        self.request_update();
        removed
    }

    pub fn clear_lines(&mut self) {
        debug!(count = self.lines.len(), "clear trend lines");
        self.lines.clear();
        self.selected_id = None;
        self.request_update();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[TrendLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: &str) -> Option<&TrendLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Applies `update` to the first line with `id`. Returns whether it
    /// exists.
    pub fn update_line(&mut self, id: &str, update: TrendLineUpdate) -> bool {
        let found = match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                if let Some(start_point) = update.start_point {
                    line.start_point = start_point;
                }
                if let Some(end_point) = update.end_point {
                    line.end_point = end_point;
                }
                true
            }
            None => false,
        };
        trace!(id, found, "update trend line");
        self.request_update();
        found
    }

    /// First line (insertion order) within the configured hit threshold.
    #[must_use]
    pub fn line_at_point(&self, x: f64, y: f64) -> Option<&TrendLine> {
        self.line_at_point_within(x, y, self.options.hit_threshold_px)
    }

    /// First line (insertion order) whose pixel segment is within `threshold`
    /// of `(x, y)`. Lines with an endpoint outside the viewport are skipped.
    #[must_use]
    pub fn line_at_point_within(&self, x: f64, y: f64, threshold: f64) -> Option<&TrendLine> {
        let series = &*self.attachment.as_ref()?.series;
        let pointer = PixelPoint::new(x, y);
        self.lines.iter().find(|line| {
            let (Some(start), Some(end)) = (
                to_pixel(series, line.start_point),
                to_pixel(series, line.end_point),
            ) else {
                return false;
            };
            point_to_segment_distance(pointer, start, end) <= threshold
        })
    }

    /// Handle of the selected line under `(x, y)`, using the configured
    /// handle threshold.
    #[must_use]
    pub fn handle_at_point(&self, x: f64, y: f64) -> Option<LineHandle> {
        self.handle_at_point_within(x, y, self.options.handle_hit_threshold_px)
    }

    /// Handle of the selected line within `threshold` of `(x, y)`; the start
    /// handle wins when both qualify. `None` without a selection.
    #[must_use]
    pub fn handle_at_point_within(&self, x: f64, y: f64, threshold: f64) -> Option<LineHandle> {
        let series = &*self.attachment.as_ref()?.series;
        let line = self.line(self.selected_id.as_deref()?)?;
        let start = to_pixel(series, line.start_point)?;
        let end = to_pixel(series, line.end_point)?;
        let pointer = PixelPoint::new(x, y);

        if distance(pointer, start) <= threshold {
            Some(LineHandle::Start)
        } else if distance(pointer, end) <= threshold {
            Some(LineHandle::End)
        } else {
            None
        }
    }

    /// Selects the line with `id`, or clears the selection for `None`.
    ///
    /// An id that matches no line leaves the selection unchanged. Returns
    /// whether the selection now matches the request.
    pub fn set_selected_id(&mut self, id: Option<&str>) -> bool {
        let applied = match id {
            Some(id) if self.line(id).is_some() => {
                self.selected_id = Some(id.to_owned());
                true
            }
            Some(_) => false,
            None => {
                self.selected_id = None;
                true
            }
        };
        self.request_update();
        applied
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Starts (or restarts) the preview; any preview end is discarded.
    pub fn set_preview_start(&mut self, point: Option<LinePoint>) {
        self.preview_start = point;
        self.preview_end = None;
        self.request_update();
    }

    pub fn set_preview_end(&mut self, point: Option<LinePoint>) {
        self.preview_end = point;
        self.request_update();
    }

    pub fn clear_preview(&mut self) {
        self.preview_start = None;
        self.preview_end = None;
        self.request_update();
    }

    #[must_use]
    pub fn preview_start(&self) -> Option<LinePoint> {
        self.preview_start
    }

    #[must_use]
    pub fn preview_end(&self) -> Option<LinePoint> {
        self.preview_end
    }

    /// Converts a pane pixel to chart coordinates; `None` if either axis
    /// cannot represent it.
    #[must_use]
    pub fn coordinate_to_point(&self, x: f64, y: f64) -> Option<LinePoint> {
        let series = &self.attachment.as_ref()?.series;
        Some(LinePoint::new(
            series.coordinate_to_time(x)?,
            series.coordinate_to_price(y)?,
        ))
    }

    /// Render records from the last `update_all_views`.
    #[must_use]
    pub fn render_records(&self) -> &[TrendLineRenderRecord] {
        self.pane_view.records()
    }

    fn request_update(&self) {
        if let Some(attachment) = &self.attachment {
            attachment.request_update();
        }
    }
}

impl SeriesPrimitive for TrendLinePrimitive {
    fn attached(&mut self, params: AttachedParams) {
        debug!(lines = self.lines.len(), "trend line primitive attached");
        self.attachment = Some(Attachment::from_params(params));
    }

    fn detached(&mut self) {
        if self.attachment.take().is_some() {
            debug!("trend line primitive detached");
        }
        self.pane_view.set_records(Vec::new());
    }

    fn update_all_views(&mut self) {
        let Some(attachment) = &self.attachment else {
            self.pane_view.set_records(Vec::new());
            return;
        };
        let series = &*attachment.series;

        let mut records = Vec::with_capacity(self.lines.len() + 1);
        for line in &self.lines {
            let (Some(start), Some(end)) = (
                to_pixel(series, line.start_point),
                to_pixel(series, line.end_point),
            ) else {
                continue;
            };
            let (price_diff, percent_diff) = price_change(line.start_point, line.end_point);
            records.push(TrendLineRenderRecord {
                id: line.id.clone(),
                start,
                end,
                color: line.color,
                line_width: line.resolved_line_width(),
                line_style: line.resolved_line_style(),
                is_selected: self.selected_id.as_deref() == Some(line.id.as_str()),
                price_diff,
                percent_diff,
            });
        }

        if let (Some(start_point), Some(end_point)) = (self.preview_start, self.preview_end) {
            if let (Some(start), Some(end)) =
                (to_pixel(series, start_point), to_pixel(series, end_point))
            {
                let (price_diff, percent_diff) = price_change(start_point, end_point);
                records.push(TrendLineRenderRecord {
                    id: PREVIEW_ID.to_owned(),
                    start,
                    end,
                    color: self.options.preview_color,
                    line_width: DEFAULT_LINE_WIDTH,
                    line_style: self.options.preview_line_style,
                    is_selected: false,
                    price_diff,
                    percent_diff,
                });
            }
        }

        trace!(
            lines = self.lines.len(),
            records = records.len(),
            "updated trend line views"
        );
        self.pane_view.set_records(records);
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        vec![&self.pane_view]
    }
}

fn to_pixel(series: &dyn CoordinateSource, point: LinePoint) -> Option<PixelPoint> {
    Some(PixelPoint::new(
        series.time_to_coordinate(point.time)?,
        series.price_to_coordinate(point.price)?,
    ))
}
