use leptos::{html::Section, logging::log, prelude::*};

use crate::components::{error::ErrorView, loading::LoadingView};
use crate::locator::{viewport::observe_once, LocatorAction, MapLoadError, MapPhase};
use crate::views::locator::handle::LocatorHandle;

/// What covers the map canvas.
#[derive(Debug, Clone, PartialEq)]
enum Overlay {
    /// Placeholder until the engine is attached.
    Skeleton,
    Error(MapLoadError),
    Hidden,
}

fn overlay_for(phase: MapPhase, error: Option<&MapLoadError>) -> Overlay {
    match (phase, error) {
        (MapPhase::Unloaded | MapPhase::Loading, _) => Overlay::Skeleton,
        (MapPhase::Failed, Some(err)) => Overlay::Error(err.clone()),
        _ => Overlay::Hidden,
    }
}

#[component]
pub fn MapPanel(handle: LocatorHandle, root_margin: String) -> impl IntoView {
    let snapshot = handle.snapshot();
    let section = NodeRef::<Section>::new();

    // Start loading once the map scrolls near the viewport.
    Effect::new(move |_| {
        let Some(section) = section.get() else {
            return;
        };
        let watching = observe_once(&section, &root_margin, move || {
            handle.dispatch(LocatorAction::EnsureMap)
        });
        if !watching {
            log!("map: no intersection observer, loading on demand only");
        }
    });

    let overlay = move || {
        let overlay = snapshot.with(|s| overlay_for(s.map_phase, s.map_error.as_ref()));
        match overlay {
            Overlay::Skeleton => Some(view! { <LoadingView message=None /> }.into_any()),
            Overlay::Error(err) => Some(
                view! {
                    <ErrorView
                        message=Some(err.user_message().to_string())
                        hint=err.user_hint().to_string()
                    />
                }
                .into_any(),
            ),
            Overlay::Hidden => None,
        }
    };

    view! {
        <section id="mapSection" class="map-section" node_ref=section>
            <div id="map" class="map-canvas" node_ref=handle.map_node()></div>
            {overlay}
        </section>
    }
}
