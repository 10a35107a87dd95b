use tracing::warn;

use crate::config::{ChartSpec, ErrorBarPolicy};
use crate::error::{ReportError, Result};
use crate::render::axis::Axis;
use crate::render::canvas::Canvas;
use crate::render::color::Color;
use crate::render::primitives::*;
use crate::selection::EffectRow;

const TITLE_SIZE: f64 = 12.0;
const LABEL_SIZE: f64 = 10.0;
const TICK_SIZE: f64 = 10.0;
const TICK_LENGTH: f64 = 3.5;
const TICK_LABEL_ROTATION: f64 = 60.0;
/// Total cap length; caps extend 5pt either side of the stem.
const CAP_WIDTH: f64 = 10.0;
const MARKER_RADIUS: f64 = 3.0;

pub const X_LABEL: &str = "Treatment Variable and Level";
pub const Y_LABEL: &str = "ATE";

/// An annotated ATE chart: one point per row with asymmetric confidence bars.
#[derive(Debug, Clone)]
pub struct ErrorBarChart<'a> {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width_in: f64,
    pub height_in: f64,
    pub rows: &'a [EffectRow],
    pub policy: ErrorBarPolicy,
}

impl<'a> ErrorBarChart<'a> {
    pub fn for_target(spec: &ChartSpec, rows: &'a [EffectRow], policy: ErrorBarPolicy) -> Self {
        Self {
            title: spec.title(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            width_in: spec.width_in,
            height_in: spec.height_in,
            rows,
            policy,
        }
    }
}

/// Lengths of the (below, above) bars for `row` under `policy`.
pub fn error_bar_lengths(row: &EffectRow, policy: ErrorBarPolicy) -> Result<(f64, f64)> {
    let below = checked_length(row, "lower", row.error_below(), policy)?;
    let above = checked_length(row, "upper", row.error_above(), policy)?;
    Ok((below, above))
}

fn checked_length(row: &EffectRow, side: &'static str, length: f64, policy: ErrorBarPolicy) -> Result<f64> {
    if length >= 0.0 || length.is_nan() {
        return Ok(length);
    }
    match policy {
        ErrorBarPolicy::Clamp => {
            warn!(label = %row.label(), side, length, "Clamping negative error bar to zero");
            Ok(0.0)
        }
        ErrorBarPolicy::Reject => Err(ReportError::NegativeErrorBar {
            label: row.label(),
            side,
            length,
        }),
    }
}

/// Distinct x labels in first-appearance order, and the slot each row lands in.
/// Rows sharing a label share a slot, as on a categorical axis.
pub fn category_slots(rows: &[EffectRow]) -> (Vec<String>, Vec<usize>) {
    let mut categories: Vec<String> = Vec::new();
    let mut slots = Vec::with_capacity(rows.len());
    for row in rows {
        let label = row.label();
        let slot = match categories.iter().position(|existing| *existing == label) {
            Some(idx) => idx,
            None => {
                categories.push(label);
                categories.len() - 1
            }
        };
        slots.push(slot);
    }
    (categories, slots)
}

struct Bar {
    slot: usize,
    ate: f64,
    low: f64,
    high: f64,
}

#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Render the chart to an SVG string.
pub fn render(chart: &ErrorBarChart<'_>) -> Result<String> {
    let (categories, slots) = category_slots(chart.rows);

    let mut bars = Vec::with_capacity(chart.rows.len());
    for (row, &slot) in chart.rows.iter().zip(&slots) {
        if !row.ate.is_finite() {
            warn!(label = %row.label(), "Skipping row without a finite ATE");
            continue;
        }
        let (below, above) = error_bar_lengths(row, chart.policy)?;
        // A missing bound draws no bar on that side.
        let low = if below.is_finite() { row.ate - below } else { row.ate };
        let high = if above.is_finite() { row.ate + above } else { row.ate };
        bars.push(Bar { slot, ate: row.ate, low, high });
    }

    let (data_lo, data_hi) = if bars.is_empty() {
        (0.0, 1.0)
    } else {
        bars.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), bar| {
            (lo.min(bar.low), hi.max(bar.high))
        })
    };
    let pad = (data_hi - data_lo) * 0.05;
    let y_axis = Axis::auto_linear(data_lo - pad, data_hi + pad, 6).with_label(&chart.y_label);

    let mut canvas = Canvas::from_inches(chart.width_in, chart.height_in);
    let area = layout(&canvas, &categories, &y_axis);

    let title_style = TextStyle {
        size: TITLE_SIZE,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    canvas.text(area.left + area.width / 2.0, area.top - 8.0, &chart.title, &title_style);

    draw_y_axis(&mut canvas, &area, &y_axis);
    draw_x_axis(&mut canvas, &area, &categories, &chart.x_label);

    let bar_style = LineStyle::solid(Color::SERIES, 1.5);
    let marker_style = Style::filled(Color::SERIES);
    for bar in &bars {
        let x = slot_center(&area, bar.slot, categories.len());
        let y = y_axis.data_to_pixel(bar.ate, area.bottom(), area.top);
        let y_lo = y_axis.data_to_pixel(bar.low, area.bottom(), area.top);
        let y_hi = y_axis.data_to_pixel(bar.high, area.bottom(), area.top);
        canvas.error_bar(x, y_lo, y_hi, CAP_WIDTH, &bar_style);
        canvas.circle(x, y, MARKER_RADIUS, &marker_style);
    }

    canvas.frame(
        area.left,
        area.top,
        area.width,
        area.height,
        &LineStyle::solid(Color::BLACK, 0.8),
    );

    Ok(canvas.finish_svg())
}

fn slot_center(area: &PlotArea, slot: usize, slots: usize) -> f64 {
    let step = area.width / slots.max(1) as f64;
    area.left + (slot as f64 + 0.5) * step
}

/// Margins sized to fit the y tick labels, the rotated x tick labels and the title.
fn layout(canvas: &Canvas, categories: &[String], y_axis: &Axis) -> PlotArea {
    let tick_style = TextStyle { size: TICK_SIZE, ..Default::default() };

    let widest_y_tick = y_axis
        .tick_labels
        .iter()
        .map(|label| canvas.measure_text(label, &tick_style))
        .fold(0.0_f64, f64::max);
    let left = 12.0 + LABEL_SIZE + 8.0 + widest_y_tick + TICK_LENGTH + 4.0;

    let widest_x_tick = categories
        .iter()
        .map(|label| canvas.measure_text(label, &tick_style))
        .fold(0.0_f64, f64::max);
    let angle = TICK_LABEL_ROTATION.to_radians();
    let rotated_extent = widest_x_tick * angle.sin() + TICK_SIZE * angle.cos();
    let bottom = (TICK_LENGTH + 4.0 + rotated_extent + LABEL_SIZE + 14.0).min(canvas.height * 0.6);

    let top = TITLE_SIZE * 1.3 + 14.0;
    let right = 15.0;

    PlotArea {
        left,
        top,
        width: (canvas.width - left - right).max(50.0),
        height: (canvas.height - top - bottom).max(50.0),
    }
}

fn draw_y_axis(canvas: &mut Canvas, area: &PlotArea, axis: &Axis) {
    let tick_line = LineStyle::solid(Color::BLACK, 0.6);
    let label_style = TextStyle {
        size: TICK_SIZE,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };

    for (value, label) in axis.tick_positions.iter().zip(&axis.tick_labels) {
        let py = axis.data_to_pixel(*value, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }
        canvas.line(area.left - TICK_LENGTH, py, area.left, py, &tick_line);
        canvas.text(area.left - TICK_LENGTH - 3.0, py, label, &label_style);
    }

    let axis_label_style = TextStyle {
        size: LABEL_SIZE,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    canvas.text_rotated(
        12.0 + LABEL_SIZE / 2.0,
        area.top + area.height / 2.0,
        &axis.label,
        &axis_label_style,
        -90.0,
    );
}

fn draw_x_axis(canvas: &mut Canvas, area: &PlotArea, categories: &[String], x_label: &str) {
    let tick_line = LineStyle::solid(Color::BLACK, 0.6);
    let tick_label_style = TextStyle {
        size: TICK_SIZE,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };

    let label_y = area.bottom() + TICK_LENGTH + 3.0;
    for (slot, category) in categories.iter().enumerate() {
        let x = slot_center(area, slot, categories.len());
        canvas.line(x, area.bottom(), x, area.bottom() + TICK_LENGTH, &tick_line);
        canvas.text_rotated(x, label_y, category, &tick_label_style, -TICK_LABEL_ROTATION);
    }

    let axis_label_style = TextStyle {
        size: LABEL_SIZE,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    canvas.text(
        area.left + area.width / 2.0,
        canvas.height - 8.0,
        x_label,
        &axis_label_style,
    );
}
