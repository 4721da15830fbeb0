use leptos::prelude::*;

use crate::app::Hovered;
use crate::markers::ClientMarker;

/// Popup following the pointer over a hovered marker: display name plus the
/// active attribute's year and value.
#[component]
pub fn Tooltip() -> impl IntoView {
    let markers: RwSignal<Vec<ClientMarker>> = expect_context();
    let Hovered(hovered) = expect_context();
    let mouse_pos: RwSignal<(f64, f64)> = expect_context();

    let content = move || {
        hovered
            .get()
            .and_then(|index| markers.with(|ms| ms.get(index).map(|m| (m.name.clone(), m.popup.clone()))))
    };

    view! {
        <div
            class="tooltip"
            style:display=move || if content().is_some() { "block" } else { "none" }
            style:left=move || format!("{}px", mouse_pos.get().0 + 14.0)
            style:top=move || format!("{}px", mouse_pos.get().1 - 34.0)
        >
            <div class="tooltip-title">{move || content().map(|(name, _)| name)}</div>
            <div class="tooltip-body">{move || content().map(|(_, popup)| popup)}</div>
        </div>
    }
}
