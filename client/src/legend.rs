use leptos::prelude::*;

use popmap_shared::{LegendStats, legend_label, symbol_radius, year_label};

use crate::app::{ActiveDataset, CursorState};
use crate::markers::{ClientMarker, format_count};

const CIRCLE_CX: f64 = 95.0;
const BASELINE_Y: f64 = 185.0;
const LABEL_X: f64 = 200.0;
/// Fixed label rows for max, mean, min.
const LABEL_ROWS: [f64; 3] = [90.0, 135.0, 180.0];

/// Legend with three nested reference circles (max, midpoint mean, min) and
/// labels rounded to the nearest 1000, recomputed on every attribute change.
#[component]
pub fn Legend() -> impl IntoView {
    let markers: RwSignal<Vec<ClientMarker>> = expect_context();
    let CursorState(cursor) = expect_context();
    let ActiveDataset(active) = expect_context();

    let heading = move || {
        cursor.with(|c| {
            c.current()
                .map(|attribute| format!("Population in {}", year_label(attribute)))
        })
    };

    let circles = move || {
        let Some(info) = active.get() else {
            return Vec::new();
        };
        let stats = markers.with(|ms| LegendStats::compute(ms.iter().map(|m| m.value)));
        stats
            .entries()
            .iter()
            .zip(LABEL_ROWS)
            .filter_map(|((name, value), label_y)| {
                let radius = symbol_radius(*value, info.scale_factor);
                if !radius.is_finite() {
                    return None;
                }
                let label = format_count(legend_label(*value) as f64);
                Some(view! {
                    <circle
                        class="legend-circle"
                        id=*name
                        cx=CIRCLE_CX.to_string()
                        cy=(BASELINE_Y - radius).to_string()
                        r=radius.to_string()
                        fill=info.fill.clone()
                        fill-opacity="0.8"
                        stroke=info.stroke.clone()
                    />
                    <text x=LABEL_X.to_string() y=label_y.to_string()>{label}</text>
                })
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div
            class="legend"
            style:display=move || if cursor.with(|c| c.is_empty()) { "none" } else { "block" }
        >
            <h3>{heading}</h3>
            <svg width="300" height="200">{circles}</svg>
        </div>
    }
}
