//! Confidence Chart Component
//!
//! Pie of the three confidence buckets drawn on a canvas. Clicking a slice
//! (or its legend entry) runs the gated per-user drilldown action.

use std::f64::consts::{FRAC_PI_2, PI};

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use querylens::interaction::segment_drilldown;
use querylens::metrics::{ConfidenceLevel, ConfidenceSlice};
use querylens::ViewModel;

use crate::state::GlobalState;

const SIZE: f64 = 280.0;
const RADIUS: f64 = 110.0;

/// Confidence distribution pie with legend
#[component]
pub fn ConfidenceChart(model: Memo<ViewModel>) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let canvas_ref = create_node_ref::<html::Canvas>();
    let slices = create_memo(move |_| model.with(|m| m.confidence.clone()));

    create_effect(move |_| {
        let slices = slices.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_pie(&canvas, &slices);
        }
    });

    let on_segment = move |level: ConfidenceLevel| {
        let notice = state.view.with(|view| segment_drilldown(view, level));
        state.notify(notice);
    };

    let on_canvas_click = move |ev: ev::MouseEvent| {
        let hit = slices.with(|slices| {
            slice_at(
                slices,
                ev.offset_x() as f64 - SIZE / 2.0,
                ev.offset_y() as f64 - SIZE / 2.0,
                RADIUS,
            )
        });
        if let Some(level) = hit {
            on_segment(level);
        }
    };

    view! {
        <div class="flex flex-col md:flex-row items-center gap-6">
            <canvas
                node_ref=canvas_ref
                width=SIZE.to_string()
                height=SIZE.to_string()
                style=format!("width: {}px; height: {}px", SIZE, SIZE)
                class="cursor-pointer"
                on:click=on_canvas_click
            />

            <div class="space-y-2">
                {move || {
                    slices
                        .get()
                        .into_iter()
                        .map(|slice| {
                            let level = slice.level;
                            view! {
                                <button
                                    class="flex items-center space-x-2 hover:bg-gray-700 rounded px-2 py-1 w-full text-left"
                                    on:click=move |_| on_segment(level)
                                >
                                    <span
                                        class="w-3 h-3 rounded-full"
                                        style=format!("background-color: {}", slice.color)
                                    />
                                    <span class="text-sm text-gray-300">{slice.name}</span>
                                    <span class="text-sm font-semibold ml-auto">
                                        {format!("{} ({}%)", slice.value, slice.percentage)}
                                    </span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// Fractions of the full turn covered by each slice, in drawing order
fn slice_fractions(slices: &[ConfidenceSlice]) -> Vec<f64> {
    let total: u64 = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return vec![0.0; slices.len()];
    }
    slices
        .iter()
        .map(|s| s.value as f64 / total as f64)
        .collect()
}

/// Slice under a point given relative to the pie centre
///
/// Slices start at twelve o'clock and run clockwise (canvas y grows down).
fn slice_at(slices: &[ConfidenceSlice], dx: f64, dy: f64, radius: f64) -> Option<ConfidenceLevel> {
    if dx * dx + dy * dy > radius * radius {
        return None;
    }
    let turn = ((dy.atan2(dx) + FRAC_PI_2).rem_euclid(2.0 * PI)) / (2.0 * PI);

    let mut start = 0.0;
    for (slice, fraction) in slices.iter().zip(slice_fractions(slices)) {
        if fraction > 0.0 && turn < start + fraction {
            return Some(slice.level);
        }
        start += fraction;
    }
    None
}

fn draw_pie(canvas: &HtmlCanvasElement, slices: &[ConfidenceSlice]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let center = SIZE / 2.0;
    ctx.clear_rect(0.0, 0.0, SIZE, SIZE);

    let fractions = slice_fractions(slices);
    if fractions.iter().all(|f| *f == 0.0) {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", center - 28.0, center);
        return;
    }

    let mut angle = -FRAC_PI_2;
    for (slice, fraction) in slices.iter().zip(fractions) {
        let sweep = fraction * 2.0 * PI;
        ctx.set_fill_style(&slice.color.into());
        ctx.begin_path();
        ctx.move_to(center, center);
        let _ = ctx.arc(center, center, RADIUS, angle, angle + sweep);
        ctx.close_path();
        ctx.fill();
        angle += sweep;
    }

    // Donut hole
    ctx.set_fill_style(&"#1f2937".into());
    ctx.begin_path();
    let _ = ctx.arc(center, center, RADIUS * 0.55, 0.0, 2.0 * PI);
    ctx.fill();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(level: ConfidenceLevel, value: u64) -> ConfidenceSlice {
        ConfidenceSlice {
            level,
            name: level.label(),
            value,
            percentage: 0,
            color: level.color(),
        }
    }

    fn sample() -> Vec<ConfidenceSlice> {
        vec![
            slice(ConfidenceLevel::High, 50),
            slice(ConfidenceLevel::Medium, 25),
            slice(ConfidenceLevel::Low, 25),
        ]
    }

    #[test]
    fn test_hit_test_follows_clockwise_order() {
        let slices = sample();
        // Right of centre: first quarter turn, still High
        assert_eq!(slice_at(&slices, 50.0, 0.0, RADIUS), Some(ConfidenceLevel::High));
        // Below-left: third quarter, Medium
        assert_eq!(slice_at(&slices, -30.0, 40.0, RADIUS), Some(ConfidenceLevel::Medium));
        // Upper-left: last quarter, Low
        assert_eq!(slice_at(&slices, -50.0, -10.0, RADIUS), Some(ConfidenceLevel::Low));
    }

    #[test]
    fn test_outside_radius_misses() {
        assert_eq!(slice_at(&sample(), RADIUS, RADIUS, RADIUS), None);
    }

    #[test]
    fn test_empty_distribution_has_no_slices() {
        let slices = vec![
            slice(ConfidenceLevel::High, 0),
            slice(ConfidenceLevel::Medium, 0),
            slice(ConfidenceLevel::Low, 0),
        ];
        assert_eq!(slice_at(&slices, 10.0, 10.0, RADIUS), None);
        assert_eq!(slice_fractions(&slices), vec![0.0, 0.0, 0.0]);
    }
}
