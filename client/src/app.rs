use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use gloo_storage::Storage;
use popmap_shared::{DatasetInfo, POPULATION_MARKER, SequenceCursor, extract_attributes};

use crate::canvas::MapCanvas;
use crate::fetch;
use crate::legend::Legend;
use crate::markers::{self, ClientMarker};
use crate::sequence_bar::SequenceBar;
use crate::tooltip::Tooltip;
use crate::viewport::Viewport;

/// Newtype wrappers give same-shaped signals distinct types for Leptos
/// context (without them, `provide_context` overwrites one with the other).
#[derive(Clone, Copy)]
pub(crate) struct Hovered(pub RwSignal<Option<usize>>);
#[derive(Clone, Copy)]
pub(crate) struct CursorState(pub RwSignal<SequenceCursor>);
#[derive(Clone, Copy)]
pub(crate) struct ActiveDataset(pub RwSignal<Option<DatasetInfo>>);
/// Bumped once per completed dataset load; the canvas refits its viewport on it.
#[derive(Clone, Copy)]
pub(crate) struct DatasetGeneration(pub RwSignal<u64>);

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

#[derive(serde::Serialize, serde::Deserialize, Default)]
#[serde(default)]
struct Settings {
    dataset_id: Option<String>,
}

const SETTINGS_KEY: &str = "popmap_settings";

fn load_dataset(
    info: DatasetInfo,
    markers_sig: RwSignal<Vec<ClientMarker>>,
    cursor: RwSignal<SequenceCursor>,
    phase: RwSignal<LoadPhase>,
    generation: RwSignal<u64>,
) {
    phase.set(LoadPhase::Loading);
    spawn_local(async move {
        match fetch::feature_collection(&info.data_url).await {
            Ok(collection) => {
                let attributes = extract_attributes(&collection, POPULATION_MARKER);
                let next_cursor = SequenceCursor::new(attributes);
                let built = markers::build(&collection, &info, next_cursor.current());
                cursor.set(next_cursor);
                markers_sig.set(built);
                generation.update(|g| *g += 1);
                phase.set(LoadPhase::Ready);
            }
            Err(e) => phase.set(LoadPhase::Failed(e)),
        }
    });
}

/// Root application component. Provides global reactive signals via context.
#[component]
pub fn App() -> impl IntoView {
    let markers_sig: RwSignal<Vec<ClientMarker>> = RwSignal::new(Vec::new());
    let viewport: RwSignal<Viewport> = RwSignal::new(Viewport::default());
    let hovered: RwSignal<Option<usize>> = RwSignal::new(None);
    let mouse_pos: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));
    let cursor: RwSignal<SequenceCursor> = RwSignal::new(SequenceCursor::default());
    let active: RwSignal<Option<DatasetInfo>> = RwSignal::new(None);
    let catalog: RwSignal<Vec<DatasetInfo>> = RwSignal::new(Vec::new());
    let phase: RwSignal<LoadPhase> = RwSignal::new(LoadPhase::Loading);
    let generation: RwSignal<u64> = RwSignal::new(0);

    provide_context(markers_sig);
    provide_context(viewport);
    provide_context(mouse_pos);
    provide_context(Hovered(hovered));
    provide_context(CursorState(cursor));
    provide_context(ActiveDataset(active));
    provide_context(DatasetGeneration(generation));

    let select_dataset = move |info: DatasetInfo| {
        hovered.set(None);
        let _ = gloo_storage::LocalStorage::set(
            SETTINGS_KEY,
            &Settings {
                dataset_id: Some(info.id.clone()),
            },
        );
        active.set(Some(info.clone()));
        load_dataset(info, markers_sig, cursor, phase, generation);
    };

    // Fetch the catalog once on mount, then load the remembered (or first)
    // dataset.
    Effect::new(move || {
        spawn_local(async move {
            match fetch::dataset_list().await {
                Ok(list) => {
                    catalog.set(list.clone());
                    let saved: Settings =
                        gloo_storage::LocalStorage::get(SETTINGS_KEY).unwrap_or_default();
                    let initial = saved
                        .dataset_id
                        .as_deref()
                        .and_then(|id| list.iter().find(|info| info.id == id))
                        .or_else(|| list.first())
                        .cloned();
                    match initial {
                        Some(info) => {
                            active.set(Some(info.clone()));
                            load_dataset(info, markers_sig, cursor, phase, generation);
                        }
                        None => phase.set(LoadPhase::Failed("no datasets available".into())),
                    }
                }
                Err(e) => phase.set(LoadPhase::Failed(e)),
            }
        });
    });

    // The single attribute-change notification path: any cursor transition
    // re-derives every marker's radius and popup; the legend follows the
    // marker signal.
    Effect::new(move || {
        let attribute = cursor.with(|c| c.current().map(str::to_owned));
        let Some(attribute) = attribute else {
            return;
        };
        let Some(info) = active.get_untracked() else {
            return;
        };
        markers_sig.update(|ms| markers::apply_attribute(ms, &info, &attribute));
    });

    let error_message = move || match phase.get() {
        LoadPhase::Failed(message) => Some(format!("Failed to load map data: {message}")),
        _ => None,
    };

    view! {
        <div class="app-shell">
            <header class="hud-bar">
                <h1>"popmap"</h1>
                <span class="hud-title">
                    {move || active.with(|a| a.as_ref().map(|info| info.title.clone()))}
                </span>
                <div class="dataset-switcher">
                    <For
                        each=move || catalog.get()
                        key=|info| info.id.clone()
                        children=move |info: DatasetInfo| {
                            let id = info.id.clone();
                            let title = info.title.clone();
                            view! {
                                <button
                                    class="dataset-tab"
                                    class:active=move || {
                                        active
                                            .with(|a| {
                                                a.as_ref().map(|d| d.id.as_str()) == Some(id.as_str())
                                            })
                                    }
                                    on:click=move |_| select_dataset(info.clone())
                                >
                                    {title}
                                </button>
                            }
                        }
                    />
                </div>
            </header>
            <MapCanvas />
            <SequenceBar />
            <Legend />
            <Tooltip />
            <div
                class="error-banner"
                style:display=move || if error_message().is_some() { "block" } else { "none" }
            >
                {error_message}
            </div>
            <div
                class="loading-veil"
                style:display=move || {
                    if phase.get() == LoadPhase::Loading { "flex" } else { "none" }
                }
            >
                "Loading map data"
            </div>
            <footer class="attribution">
                {move || active.with(|a| a.as_ref().map(|info| info.attribution.clone()))}
            </footer>
        </div>
    }
}
