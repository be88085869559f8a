use std::cell::Cell;

use js_sys::{Array, Reflect};
use leptos::logging::warn;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Calls `on_visible` once, the first time `target` comes within `root_margin`
/// of the viewport. Returns false when the browser has no intersection observer.
pub fn observe_once<F>(target: &Element, root_margin: &str, on_visible: F) -> bool
where
    F: FnOnce() + 'static,
{
    let Some(window) = web_sys::window() else {
        return false;
    };
    if !Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false) {
        return false;
    }

    let pending = Cell::new(Some(on_visible));
    let callback: Closure<dyn FnMut(Array, IntersectionObserver)> =
        Closure::new(move |entries: Array, observer: IntersectionObserver| {
            let hit = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|entry| entry.is_intersecting());
            if hit {
                observer.disconnect();
                if let Some(on_visible) = pending.take() {
                    on_visible();
                }
            }
        });

    let options = IntersectionObserverInit::new();
    options.set_root_margin(root_margin);
    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(err) => {
            warn!("map: intersection observer unavailable: {err:?}");
            return false;
        }
    };
    observer.observe(target);
    callback.forget();
    true
}
