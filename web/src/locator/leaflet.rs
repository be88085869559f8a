//! Thin binding to the Leaflet global (`window.L`) once its script is loaded.

use shared_types::{LatLong, MapBounds};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::locator::{errors::MapLoadError, map_adapter::MapSurface};
use crate::settings::LocatorSettings;

#[wasm_bindgen(inline_js = r#"
export function leafletAvailable() {
    return typeof window !== 'undefined' && !!window.L;
}

export function createMap(element) {
    return L.map(element, { zoomControl: true, scrollWheelZoom: false, tap: true });
}

export function addTileLayer(map, url, attribution, maxZoom) {
    return L.tileLayer(url, { maxZoom, attribution }).addTo(map);
}

export function createLayerGroup(map) {
    return L.layerGroup().addTo(map);
}

export function addMarker(group, lat, lng, popupHtml) {
    const marker = L.marker([lat, lng]);
    marker.bindPopup(popupHtml);
    marker.addTo(group);
    return marker;
}

export function removeMarker(group, marker) {
    group.removeLayer(marker);
}

export function setView(map, lat, lng, zoom, animate) {
    map.setView([lat, lng], zoom, { animate });
}

export function fitBounds(map, south, west, north, east) {
    map.fitBounds([[south, west], [north, east]]);
}

export function openPopup(marker) {
    if (marker && marker.openPopup) marker.openPopup();
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = leafletAvailable)]
    pub fn leaflet_available() -> bool;

    #[wasm_bindgen(catch, js_name = createMap)]
    fn create_map(element: &HtmlElement) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = addTileLayer)]
    fn add_tile_layer(
        map: &JsValue,
        url: &str,
        attribution: &str,
        max_zoom: u8,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = createLayerGroup)]
    fn create_layer_group(map: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = addMarker)]
    fn add_marker(group: &JsValue, lat: f64, lng: f64, popup_html: &str) -> JsValue;

    #[wasm_bindgen(js_name = removeMarker)]
    fn remove_marker(group: &JsValue, marker: &JsValue);

    #[wasm_bindgen(js_name = setView)]
    fn set_view(map: &JsValue, lat: f64, lng: f64, zoom: f64, animate: bool);

    #[wasm_bindgen(js_name = fitBounds)]
    fn fit_bounds(map: &JsValue, south: f64, west: f64, north: f64, east: f64);

    #[wasm_bindgen(js_name = openPopup)]
    fn open_popup(marker: &JsValue);
}

/// A Leaflet map with one tile layer and one marker layer.
pub struct LeafletMap {
    map: JsValue,
    markers: JsValue,
}

impl LeafletMap {
    pub fn create(element: &HtmlElement, settings: &LocatorSettings) -> Result<Self, MapLoadError> {
        if !leaflet_available() {
            return Err(MapLoadError::EngineMissing);
        }
        let map = create_map(element).map_err(engine_error)?;
        add_tile_layer(
            &map,
            &settings.tile_url,
            &settings.tile_attribution,
            settings.tile_max_zoom,
        )
        .map_err(engine_error)?;
        let markers = create_layer_group(&map).map_err(engine_error)?;

        Ok(Self { map, markers })
    }
}

fn engine_error(err: JsValue) -> MapLoadError {
    MapLoadError::Engine(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl MapSurface for LeafletMap {
    type Marker = JsValue;

    fn add_marker(&mut self, position: LatLong, popup_html: &str) -> JsValue {
        add_marker(&self.markers, position.lat, position.long, popup_html)
    }

    fn remove_marker(&mut self, marker: JsValue) {
        remove_marker(&self.markers, &marker);
    }

    fn set_view(&mut self, center: LatLong, zoom: f64, animate: bool) {
        set_view(&self.map, center.lat, center.long, zoom, animate);
    }

    fn fit_bounds(&mut self, bounds: MapBounds) {
        fit_bounds(
            &self.map,
            bounds.south_west.lat,
            bounds.south_west.long,
            bounds.north_east.lat,
            bounds.north_east.long,
        );
    }

    fn open_popup(&mut self, marker: &JsValue) {
        open_popup(marker);
    }
}
