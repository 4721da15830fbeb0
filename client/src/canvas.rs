use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, WheelEvent};

use popmap_shared::DatasetInfo;

use crate::app::{ActiveDataset, DatasetGeneration, Hovered};
use crate::colors::fill_with_alpha;
use crate::markers::{self, ClientMarker};
use crate::viewport::Viewport;

const BACKGROUND: &str = "#0f1118";
const GRATICULE: &str = "rgba(255,255,255,0.06)";
const GRATICULE_STEP_DEG: f64 = 30.0;
const FILL_OPACITY: f64 = 0.6;
const STROKE_WIDTH: f64 = 2.0;

/// Canvas 2D marker renderer with drag-pan, wheel-zoom, and hover tracking.
#[component]
pub fn MapCanvas() -> impl IntoView {
    let markers_sig: RwSignal<Vec<ClientMarker>> = expect_context();
    let viewport: RwSignal<Viewport> = expect_context();
    let Hovered(hovered) = expect_context();
    let ActiveDataset(active) = expect_context();
    let DatasetGeneration(generation) = expect_context();
    let mouse_pos: RwSignal<(f64, f64)> = expect_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Drag state
    let is_dragging = Rc::new(Cell::new(false));
    let last_x = Rc::new(Cell::new(0.0f64));
    let last_y = Rc::new(Cell::new(0.0f64));

    // Bump on window resize so the redraw effect picks up new canvas dims.
    let resize_tick: RwSignal<u64> = RwSignal::new(0);
    Effect::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = Closure::<dyn Fn()>::new(move || {
            resize_tick.update(|tick| *tick += 1);
        });
        let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        cb.forget();
    });

    // Refit the viewport whenever a dataset finishes loading.
    Effect::new(move || {
        generation.get();
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let bounds = markers_sig.with_untracked(|ms| world_bounds(ms));
        if let Some((min_x, min_y, max_x, max_y)) = bounds {
            let (w, h) = css_size(&canvas);
            viewport.update(|vp| vp.fit_bounds(min_x, min_y, max_x, max_y, w, h));
        }
    });

    // Redraw on data, viewport, style, or canvas-size changes.
    Effect::new(move || {
        resize_tick.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let info = active.get();
        markers_sig.with(|ms| {
            viewport.with(|vp| draw(&canvas, ms, vp, info.as_ref()));
        });
    });

    let set_hover = move |hit: Option<usize>| {
        let previous = hovered.get_untracked();
        if hit == previous {
            return;
        }
        markers_sig.update(|ms| {
            if let Some(old) = previous.and_then(|i| ms.get_mut(i)) {
                old.hover.pointer_leave();
            }
            if let Some(new) = hit.and_then(|i| ms.get_mut(i)) {
                new.hover.pointer_enter();
            }
        });
        hovered.set(hit);
    };

    let on_wheel = move |e: WheelEvent| {
        e.prevent_default();
        let delta = e.delta_y();
        let x = e.offset_x() as f64;
        let y = e.offset_y() as f64;
        viewport.update(|vp| vp.zoom_at(delta, x, y));
    };

    let on_pointer_down = {
        let is_dragging = is_dragging.clone();
        let last_x = last_x.clone();
        let last_y = last_y.clone();
        move |e: PointerEvent| {
            is_dragging.set(true);
            set_hover(None);
            last_x.set(e.client_x() as f64);
            last_y.set(e.client_y() as f64);

            if let Some(target) = e.target()
                && let Ok(el) = target.dyn_into::<web_sys::HtmlElement>()
            {
                el.set_pointer_capture(e.pointer_id()).ok();
                el.style().set_property("cursor", "grabbing").ok();
            }
        }
    };

    let on_pointer_move = {
        let is_dragging = is_dragging.clone();
        let last_x = last_x.clone();
        let last_y = last_y.clone();
        move |e: PointerEvent| {
            if is_dragging.get() {
                let dx = e.client_x() as f64 - last_x.get();
                let dy = e.client_y() as f64 - last_y.get();
                last_x.set(e.client_x() as f64);
                last_y.set(e.client_y() as f64);
                viewport.update(|vp| vp.pan(dx, dy));
            } else {
                let local = canvas_ref
                    .get_untracked()
                    .map(|el| {
                        let rect = el.get_bounding_client_rect();
                        (
                            e.client_x() as f64 - rect.left(),
                            e.client_y() as f64 - rect.top(),
                        )
                    })
                    .unwrap_or((e.offset_x() as f64, e.offset_y() as f64));
                let hit = markers_sig.with_untracked(|ms| {
                    viewport.with_untracked(|vp| markers::hit_test(ms, vp, local.0, local.1))
                });
                set_hover(hit);
                if hit.is_some() {
                    mouse_pos.set((e.client_x() as f64, e.client_y() as f64));
                }
            }
        }
    };

    let on_pointer_up = {
        let is_dragging = is_dragging.clone();
        move |e: PointerEvent| {
            is_dragging.set(false);

            if let Some(target) = e.target()
                && let Ok(el) = target.dyn_into::<web_sys::HtmlElement>()
            {
                el.style().set_property("cursor", "grab").ok();
            }
        }
    };

    let on_pointer_leave = move |_: PointerEvent| {
        set_hover(None);
    };

    view! {
        <div
            class="map-surface"
            on:wheel=on_wheel
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointerleave=on_pointer_leave
        >
            <canvas
                node_ref=canvas_ref
                style="position: absolute; inset: 0; width: 100%; height: 100%; touch-action: none; cursor: grab;"
            />
        </div>
    }
}

fn css_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    (canvas.client_width() as f64, canvas.client_height() as f64)
}

fn world_bounds(markers: &[ClientMarker]) -> Option<(f64, f64, f64, f64)> {
    let first = markers.first()?;
    let mut bounds = (first.world.0, first.world.1, first.world.0, first.world.1);
    for marker in &markers[1..] {
        bounds.0 = bounds.0.min(marker.world.0);
        bounds.1 = bounds.1.min(marker.world.1);
        bounds.2 = bounds.2.max(marker.world.0);
        bounds.3 = bounds.3.max(marker.world.1);
    }
    Some(bounds)
}

fn draw(
    canvas: &HtmlCanvasElement,
    markers: &[ClientMarker],
    vp: &Viewport,
    info: Option<&DatasetInfo>,
) {
    let (css_w, css_h) = css_size(canvas);
    if css_w <= 0.0 || css_h <= 0.0 {
        return;
    }
    let dpr = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0);
    canvas.set_width((css_w * dpr) as u32);
    canvas.set_height((css_h * dpr) as u32);

    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    ctx.scale(dpr, dpr).ok();

    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, css_w, css_h);

    draw_graticule(&ctx, vp, css_w, css_h);

    let Some(info) = info else {
        return;
    };
    let fill = fill_with_alpha(&info.fill, FILL_OPACITY);
    ctx.set_line_width(STROKE_WIDTH);

    for marker in markers {
        if marker.radius <= 0.0 {
            continue;
        }
        let (sx, sy) = vp.world_to_screen(marker.world.0, marker.world.1);
        if sx + marker.radius < 0.0
            || sy + marker.radius < 0.0
            || sx - marker.radius > css_w
            || sy - marker.radius > css_h
        {
            continue;
        }
        ctx.begin_path();
        if ctx.arc(sx, sy, marker.radius, 0.0, TAU).is_err() {
            continue;
        }
        ctx.set_fill_style_str(&fill);
        ctx.fill();
        if marker.hover.is_hovered() {
            ctx.set_stroke_style_str(&info.highlight);
        } else {
            ctx.set_stroke_style_str(&info.stroke);
        }
        ctx.stroke();
    }
}

/// Faint meridian/parallel lines so panning has a spatial reference even
/// without a base tile layer.
fn draw_graticule(ctx: &CanvasRenderingContext2d, vp: &Viewport, css_w: f64, css_h: f64) {
    ctx.set_stroke_style_str(GRATICULE);
    ctx.set_line_width(1.0);
    ctx.begin_path();

    let mut lon = -180.0;
    while lon <= 180.0 {
        let (sx, _) = vp.world_to_screen(lon, 0.0);
        if sx >= 0.0 && sx <= css_w {
            ctx.move_to(sx, 0.0);
            ctx.line_to(sx, css_h);
        }
        lon += GRATICULE_STEP_DEG;
    }

    let mut lat = -90.0;
    while lat <= 90.0 {
        let (_, sy) = vp.world_to_screen(0.0, -lat);
        if sy >= 0.0 && sy <= css_h {
            ctx.move_to(0.0, sy);
            ctx.line_to(css_w, sy);
        }
        lat += GRATICULE_STEP_DEG;
    }

    ctx.stroke();
}
