use js_sys::Promise;
use leptos::logging::log;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, HtmlLinkElement, HtmlScriptElement};

use crate::locator::{errors::MapLoadError, leaflet::leaflet_available};
use crate::settings::LocatorSettings;

/// Injects the Leaflet stylesheet, then its script, and checks the engine is usable.
pub async fn load_leaflet_assets(settings: &LocatorSettings) -> Result<(), MapLoadError> {
    if leaflet_available() {
        return Ok(());
    }
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MapLoadError::NoDocument)?;

    load_stylesheet(&document, &settings.leaflet_css).await?;
    load_script(&document, &settings.leaflet_js).await?;

    if !leaflet_available() {
        return Err(MapLoadError::EngineMissing);
    }
    log!("map assets loaded from {}", settings.leaflet_js);
    Ok(())
}

async fn load_stylesheet(document: &Document, href: &str) -> Result<(), MapLoadError> {
    let failed = || MapLoadError::Stylesheet {
        href: href.to_string(),
    };
    let link: HtmlLinkElement = create(document, "link").ok_or_else(failed)?;
    link.set_rel("stylesheet");
    link.set_href(href);
    append_and_wait(document, &link).await.map_err(|_| failed())
}

async fn load_script(document: &Document, src: &str) -> Result<(), MapLoadError> {
    let failed = || MapLoadError::Script {
        src: src.to_string(),
    };
    let script: HtmlScriptElement = create(document, "script").ok_or_else(failed)?;
    script.set_src(src);
    script.set_defer(true);
    append_and_wait(document, &script).await.map_err(|_| failed())
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Option<T> {
    document.create_element(tag).ok()?.dyn_into::<T>().ok()
}

async fn append_and_wait(document: &Document, element: &HtmlElement) -> Result<(), JsValue> {
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;

    let loaded = Promise::new(&mut |resolve, reject| {
        element.set_onload(Some(&resolve));
        element.set_onerror(Some(&reject));
    });
    head.append_child(element)?;
    JsFuture::from(loaded).await.map(|_| ())
}
