#![recursion_limit = "512"]

pub mod app;
pub mod components;
pub mod data;
pub mod locator;
pub mod settings;
pub mod views;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    // The cards rendered by the server are the record source in the browser.
    let page = crate::data::document::read_page_data();
    leptos::mount::hydrate_body(move || view! { <App page=page.clone()/> });
}
