pub mod center_card;
pub mod filter_bar;
pub mod handle;
pub mod map_panel;

use leptos::prelude::*;

use crate::data::store::PageData;
use center_card::CenterCard;
use filter_bar::{FilterBar, Notice, ViewTabs};
use handle::LocatorHandle;
use map_panel::MapPanel;

#[component]
pub fn LocatorPage(page: PageData) -> impl IntoView {
    let categories = page.store.categories();
    let records = page.store.records().to_vec();
    let embedded_settings = page.settings.to_embedded();
    let root_margin = page.settings.observer_root_margin.clone();

    let handle = LocatorHandle::new(page);
    let snapshot = handle.snapshot();

    view! {
        <section
            id="locator"
            class="locator"
            data-view=move || snapshot.with(|s| s.view.as_str())
            data-settings=embedded_settings
        >
            <header class="locator-header">
                <h1>"مراکز خدمات"</h1>
                <ViewTabs handle=handle />
            </header>
            <FilterBar handle=handle categories=categories />
            <Notice handle=handle />
            <div class="locator-body">
                <div id="centersList" class="centers-list">
                    {records
                        .into_iter()
                        .map(|record| view! { <CenterCard handle=handle record=record /> })
                        .collect_view()}
                </div>
                <MapPanel handle=handle root_margin=root_margin />
            </div>
        </section>
    }
}
