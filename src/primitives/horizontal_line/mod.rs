//! Horizontal support/resistance lines.

mod views;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::primitives::{
    AttachedParams, Attachment, PaneView, PriceAxisView, SeriesPrimitive,
};
use crate::render::{Color, LineStrokeStyle};

use views::{HorizontalLinePaneView, format_axis_price};
pub use views::{HorizontalLineAxisView, HorizontalLineRenderRecord};

pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// A horizontal line spanning the full pane width at `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalLine {
    pub id: String,
    pub price: f64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStrokeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl HorizontalLine {
    #[must_use]
    pub fn new(id: impl Into<String>, price: f64, color: Color) -> Self {
        Self {
            id: id.into(),
            price,
            color,
            line_width: None,
            line_style: None,
            label: None,
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
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
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

/// Hit-testing and drawing parameters, in media pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalLineOptions {
    pub hit_threshold_px: f64,
    pub handle_length_px: f64,
    pub handle_width_px: f64,
    pub label_inset_px: f64,
    pub label_offset_px: f64,
    pub label_font_size_px: f64,
    /// Decimals shown in the price-axis label.
    pub axis_label_precision: usize,
    pub axis_label_text_color: Color,
}

impl Default for HorizontalLineOptions {
    fn default() -> Self {
        Self {
            hit_threshold_px: 5.0,
            handle_length_px: 6.0,
            handle_width_px: 3.0,
            label_inset_px: 8.0,
            label_offset_px: 4.0,
            label_font_size_px: 11.0,
            axis_label_precision: 0,
            axis_label_text_color: Color::WHITE,
        }
    }
}

impl HorizontalLineOptions {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.hit_threshold_px, "hit_threshold_px"),
            (self.label_inset_px, "label_inset_px"),
            (self.label_offset_px, "label_offset_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "horizontal line option `{name}` must be finite and >= 0"
                )));
            }
        }
        for (value, name) in [
            (self.handle_length_px, "handle_length_px"),
            (self.handle_width_px, "handle_width_px"),
            (self.label_font_size_px, "label_font_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "horizontal line option `{name}` must be finite and > 0"
                )));
            }
        }
        if self.axis_label_precision > 12 {
            return Err(ChartError::InvalidData(
                "axis label precision must be <= 12".to_owned(),
            ));
        }
        self.axis_label_text_color.validate()?;
        Ok(self)
    }
}

/// Owns a set of horizontal lines and publishes them to a chart pane and its
/// price axis.
///
/// Collection order is insertion order; it is both paint order and hit-test
/// priority.
#[derive(Debug)]
pub struct HorizontalLinePrimitive {
    options: HorizontalLineOptions,
    lines: Vec<HorizontalLine>,
    selected_id: Option<String>,
    attachment: Option<Attachment>,
    pane_view: HorizontalLinePaneView,
    axis_views: Vec<HorizontalLineAxisView>,
}

impl Default for HorizontalLinePrimitive {
    fn default() -> Self {
        Self::new()
    }
}

impl HorizontalLinePrimitive {
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_options(HorizontalLineOptions::default())
    }

    pub fn with_options(options: HorizontalLineOptions) -> ChartResult<Self> {
        Ok(Self::from_valid_options(options.validate()?))
    }

    fn from_valid_options(options: HorizontalLineOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            selected_id: None,
            attachment: None,
            pane_view: HorizontalLinePaneView::new(options),
            axis_views: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> HorizontalLineOptions {
        self.options
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Appends `line`. Duplicate ids are accepted; the caller owns id
    /// uniqueness.
    pub fn add_line(&mut self, line: HorizontalLine) {
        if self.lines.iter().any(|existing| existing.id == line.id) {
            warn!(id = %line.id, "horizontal line id already present");
        }
        trace!(id = %line.id, price = line.price, "add horizontal line");
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
        trace!(id, removed, "remove horizontal line");
        self.request_update();
        removed
    }

    pub fn clear_lines(&mut self) {
        debug!(count = self.lines.len(), "clear horizontal lines");
        self.lines.clear();
        self.selected_id = None;
        self.request_update();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[HorizontalLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: &str) -> Option<&HorizontalLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Moves the first line with `id` to `price`. Returns whether it exists.
    pub fn update_line_price(&mut self, id: &str, price: f64) -> bool {
        let found = match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.price = price;
                true
            }
            None => false,
        };
        trace!(id, price, found, "update horizontal line price");
        self.request_update();
        found
    }

    /// First line (insertion order) within the configured hit threshold of `y`.
    #[must_use]
    pub fn line_at_y(&self, y: f64) -> Option<&HorizontalLine> {
        self.line_at_y_within(y, self.options.hit_threshold_px)
    }

    /// First line (insertion order) whose pixel y is within `threshold` of
    /// `y`. Overlapping lines are not ranked by distance.
    #[must_use]
    pub fn line_at_y_within(&self, y: f64, threshold: f64) -> Option<&HorizontalLine> {
        let series = &self.attachment.as_ref()?.series;
        self.lines.iter().find(|line| {
            series
                .price_to_coordinate(line.price)
                .is_some_and(|line_y| (line_y - y).abs() <= threshold)
        })
    }

    /// Converts a pane y to a price, for dragging.
    #[must_use]
    pub fn coordinate_to_price(&self, y: f64) -> Option<f64> {
        self.attachment.as_ref()?.series.coordinate_to_price(y)
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

    /// Render records from the last `update_all_views`.
    #[must_use]
    pub fn render_records(&self) -> &[HorizontalLineRenderRecord] {
        self.pane_view.records()
    }

    /// Axis labels from the last `update_all_views`.
    #[must_use]
    pub fn axis_views(&self) -> &[HorizontalLineAxisView] {
        &self.axis_views
    }

    fn request_update(&self) {
        if let Some(attachment) = &self.attachment {
            attachment.request_update();
        }
    }
}

impl SeriesPrimitive for HorizontalLinePrimitive {
    fn attached(&mut self, params: AttachedParams) {
        debug!(lines = self.lines.len(), "horizontal line primitive attached");
        self.attachment = Some(Attachment::from_params(params));
    }

    fn detached(&mut self) {
        if self.attachment.take().is_some() {
            debug!("horizontal line primitive detached");
        }
        self.pane_view.set_records(Vec::new());
        self.axis_views.clear();
    }

    fn update_all_views(&mut self) {
        let Some(attachment) = &self.attachment else {
            self.pane_view.set_records(Vec::new());
            self.axis_views.clear();
            return;
        };

        let mut records = Vec::with_capacity(self.lines.len());
        let mut axis_views = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let Some(y) = attachment.series.price_to_coordinate(line.price) else {
                continue;
            };
            records.push(HorizontalLineRenderRecord {
                id: line.id.clone(),
                y,
                price: line.price,
                color: line.color,
                line_width: line.resolved_line_width(),
                line_style: line.resolved_line_style(),
                label: line.label.clone(),
                is_selected: self.selected_id.as_deref() == Some(line.id.as_str()),
            });
            axis_views.push(HorizontalLineAxisView {
                price: line.price,
                color: line.color,
                coordinate: y,
                text: format_axis_price(line.price, self.options.axis_label_precision),
                text_color: self.options.axis_label_text_color,
            });
        }

        trace!(
            lines = self.lines.len(),
            visible = records.len(),
            "updated horizontal line views"
        );
        self.pane_view.set_records(records);
        self.axis_views = axis_views;
    }

    fn pane_views(&self) -> Vec<&dyn PaneView> {
        vec![&self.pane_view]
    }

    fn price_axis_views(&self) -> Vec<&dyn PriceAxisView> {
        self.axis_views
            .iter()
            .map(|view| view as &dyn PriceAxisView)
            .collect()
    }
}
