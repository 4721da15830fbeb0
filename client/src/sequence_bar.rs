use leptos::prelude::*;
use wasm_bindgen::JsCast;

use popmap_shared::year_label;

use crate::app::CursorState;

const SKIP_BACK_SVG: &str = r#"<svg width="14" height="12" viewBox="0 0 14 12" fill="currentColor" xmlns="http://www.w3.org/2000/svg"><rect x="1" y="1" width="2" height="10" rx="0.5"/><path d="M13 1v10L5.5 6z"/></svg>"#;
const SKIP_FWD_SVG: &str = r#"<svg width="14" height="12" viewBox="0 0 14 12" fill="currentColor" xmlns="http://www.w3.org/2000/svg"><rect x="11" y="1" width="2" height="10" rx="0.5"/><path d="M1 1v10l7.5-5z"/></svg>"#;

/// Year scrubber: a bounded slider plus step buttons, hidden while the
/// cursor is disabled. Every discrete input event applies exactly one cursor
/// transition — scrubbing is intentionally not debounced.
#[component]
pub fn SequenceBar() -> impl IntoView {
    let CursorState(cursor) = expect_context();

    let on_range_input = move |e: web_sys::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        let index: usize = input.value().parse().unwrap_or(0);
        cursor.update(|c| {
            c.set_index(index);
        });
    };

    let step_back = move |_| {
        cursor.update(|c| {
            c.step_backward();
        });
    };
    let step_forward = move |_| {
        cursor.update(|c| {
            c.step_forward();
        });
    };

    let year = move || {
        cursor.with(|c| {
            c.current()
                .map(|attribute| year_label(attribute).to_owned())
                .unwrap_or_default()
        })
    };

    view! {
        <div
            class="sequence-bar"
            style:display=move || if cursor.with(|c| c.is_empty()) { "none" } else { "flex" }
        >
            <button class="skip" on:click=step_back inner_html=SKIP_BACK_SVG />
            <input
                class="range-slider"
                type="range"
                min="0"
                step="1"
                max=move || cursor.with(|c| c.len().saturating_sub(1).to_string())
                prop:value=move || cursor.with(|c| c.index().to_string())
                on:input=on_range_input
            />
            <button class="skip" on:click=step_forward inner_html=SKIP_FWD_SVG />
            <span class="sequence-year">{year}</span>
        </div>
    }
}
