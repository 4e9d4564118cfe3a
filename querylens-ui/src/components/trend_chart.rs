//! Trend Chart Component
//!
//! Daily total, successful and failed queries drawn on an HTML5 canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use querylens::metrics::TrendPoint;
use querylens::ViewModel;

/// Series colours: total, successful, failed
const SERIES: [(&str, &str); 3] = [
    ("Total", "#2196F3"),
    ("Successful", "#4CAF50"),
    ("Failed", "#F44336"),
];

/// Query trend line chart
#[component]
pub fn TrendChart(model: Memo<ViewModel>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let points = create_memo(move |_| model.with(|m| m.trend.clone()));

    create_effect(move |_| {
        let points = points.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &points);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="320"
                class="w-full h-64 md:h-80 rounded-lg"
            />

            <div class="flex justify-center flex-wrap gap-4 mt-4">
                {SERIES
                    .iter()
                    .map(|(name, color)| view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", color)
                            />
                            <span class="text-sm text-gray-300">{*name}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Y-axis range: zero up to the largest total plus 10% headroom
fn y_max(points: &[TrendPoint]) -> f64 {
    let max = points.iter().map(|p| p.total).max().unwrap_or(0) as f64;
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Horizontal position of point `index` of `count` across `width`
fn x_at(index: usize, count: usize, width: f64) -> f64 {
    if count <= 1 {
        width / 2.0
    } else {
        index as f64 / (count - 1) as f64 * width
    }
}

/// Every n-th index gets a date label, keeping at most `max_labels`
fn label_stride(count: usize, max_labels: usize) -> usize {
    count.div_ceil(max_labels.max(1)).max(1)
}

fn draw_chart(canvas: &HtmlCanvasElement, points: &[TrendPoint]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if points.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text(
            "No data for the selected time range",
            width / 2.0 - 130.0,
            height / 2.0,
        );
        return;
    }

    let top = y_max(points);

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = top - (i as f64 / 5.0) * top;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let to_xy = |index: usize, value: u64| {
        (
            margin_left + x_at(index, points.len(), chart_width),
            margin_top + (top - value as f64) / top * chart_height,
        )
    };

    let series: [fn(&TrendPoint) -> u64; 3] = [|p| p.total, |p| p.successful, |p| p.failed];
    for ((_, color), value_of) in SERIES.iter().zip(series) {
        ctx.set_stroke_style(&(*color).into());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (i, point) in points.iter().enumerate() {
            let (x, y) = to_xy(i, value_of(point));
            if i == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();

        ctx.set_fill_style(&(*color).into());
        for (i, point) in points.iter().enumerate() {
            let (x, y) = to_xy(i, value_of(point));
            ctx.begin_path();
            let _ = ctx.arc(x, y, 3.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    // X-axis date labels
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    let stride = label_stride(points.len(), 6);
    for (i, point) in points.iter().enumerate().step_by(stride) {
        let (x, _) = to_xy(i, 0);
        let label = point.date.get(5..).unwrap_or(&point.date);
        let _ = ctx.fill_text(label, x - 15.0, height - 10.0);
    }
}
