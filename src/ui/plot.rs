use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::data::stats::StreamCount;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;
const PIE_SIZE: f32 = 280.0;

// ---------------------------------------------------------------------------
// Weight over time (stacked bars, one chart per stream)
// ---------------------------------------------------------------------------

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn date_label(day: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Render weight by date, stacked and coloured by stream.
pub fn weight_chart(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };

    // Bars of one date stack in stream order; `base` tracks the running top.
    let mut base: HashMap<NaiveDate, f64> = HashMap::new();
    let mut bars: HashMap<&str, Vec<Bar>> = HashMap::new();
    for row in &state.output.weight_over_time {
        let offset = base.entry(row.date).or_insert(0.0);
        let bar = Bar::new(day_number(row.date), row.weight)
            .base_offset(*offset)
            .width(0.9)
            .name(format!("{}  {}", row.stream, row.date));
        *offset += row.weight;
        bars.entry(row.stream.as_str()).or_default().push(bar);
    }

    Plot::new("weight_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Weight")
        .x_axis_formatter(|mark, _range| date_label(mark.value))
        .label_formatter(|_name, value| format!("{}\n{:.2}", date_label(value.x), value.y))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Dataset order keeps legend and colours stable across filters.
            for stream in &ds.streams {
                let Some(stream_bars) = bars.remove(stream.as_str()) else {
                    continue;
                };
                let chart = BarChart::new(stream_bars)
                    .name(stream)
                    .color(state.color_map.color_for(stream))
                    .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                        format!("{}\nWeight: {:.2}", bar.name, bar.value)
                    }));
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Stream distribution (pie)
// ---------------------------------------------------------------------------

/// Render the share of records per stream, labelled with name and count.
pub fn stream_pie(ui: &mut Ui, state: &AppState) {
    let counts = &state.output.stream_counts;
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(PIE_SIZE), Sense::hover());
        let center = response.rect.center();
        let radius = PIE_SIZE * 0.45;

        let mut angle = -FRAC_PI_2;
        let mut slices = Vec::with_capacity(counts.len());
        for c in counts {
            let sweep = TAU * c.count as f32 / total as f32;
            let color = state.color_map.color_for(&c.stream);
            paint_slice(&painter, center, radius, angle, angle + sweep, color);
            slices.push((angle, angle + sweep));
            angle += sweep;
        }
        for (c, &(from, to)) in counts.iter().zip(&slices) {
            let mid = (from + to) / 2.0;
            painter.text(
                center + Vec2::angled(mid) * radius * 0.65,
                Align2::CENTER_CENTER,
                format!("{}\n{}", c.stream, c.count),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }

        if let Some(c) = hovered_slice(&response, center, radius, counts, &slices) {
            let share = 100.0 * c.count as f64 / total as f64;
            response.on_hover_text_at_pointer(format!("{}: {} ({share:.1}%)", c.stream, c.count));
        }

        ui.vertical(|ui: &mut Ui| {
            for c in counts {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, state.color_map.color_for(&c.stream));
                    ui.label(format!("{} ({})", c.stream, c.count));
                });
            }
        });
    });
}

/// Fill one slice from `from` to `to` (radians, clockwise from the x axis).
fn paint_slice(painter: &egui::Painter, center: Pos2, radius: f32, from: f32, to: f32, color: Color32) {
    // Fan pieces of at most a quarter turn stay convex.
    let pieces = ((to - from) / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece = (to - from) / pieces as f32;
    for p in 0..pieces {
        let start = from + piece * p as f32;
        let steps = 16;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for s in 0..=steps {
            let a = start + piece * s as f32 / steps as f32;
            points.push(center + Vec2::angled(a) * radius);
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }

    let edge = Stroke::new(1.5, Color32::WHITE);
    painter.line_segment([center, center + Vec2::angled(from) * radius], edge);
    painter.line_segment([center, center + Vec2::angled(to) * radius], edge);
}

fn hovered_slice<'a>(
    response: &egui::Response,
    center: Pos2,
    radius: f32,
    counts: &'a [StreamCount],
    slices: &[(f32, f32)],
) -> Option<&'a StreamCount> {
    let pos = response.hover_pos()?;
    let d = pos - center;
    if d.length() > radius {
        return None;
    }
    // Slices start at -π/2; shift so the first one begins at 0.
    let angle = (d.angle() + FRAC_PI_2).rem_euclid(TAU) - FRAC_PI_2;
    slices
        .iter()
        .position(|&(from, to)| from <= angle && angle < to)
        .map(|i| &counts[i])
}
