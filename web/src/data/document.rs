use leptos::logging::warn;
use shared_types::{CenterAttributes, RecordStore};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::data::store::PageData;
use crate::settings::LocatorSettings;

pub const CARD_SELECTOR: &str = "#centersList .center-card";
pub const ROOT_ID: &str = "locator";

/// Rebuilds the page data from the server-rendered markup before hydration.
pub fn read_page_data() -> PageData {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        warn!("no document; starting the locator empty");
        return PageData::default();
    };

    PageData {
        store: read_store(&document),
        settings: read_settings(&document),
    }
}

pub fn read_store(document: &Document) -> RecordStore {
    let cards = match document.query_selector_all(CARD_SELECTOR) {
        Ok(cards) => cards,
        Err(err) => {
            warn!("could not query center cards: {err:?}");
            return RecordStore::default();
        }
    };

    let attributes: Vec<CenterAttributes> = (0..cards.length())
        .filter_map(|idx| cards.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|card| read_attributes(&card))
        .collect();

    RecordStore::from_attributes(&attributes)
}

fn read_attributes(card: &Element) -> CenterAttributes {
    let attr = |name: &str| card.get_attribute(name).unwrap_or_default();
    CenterAttributes {
        name: attr("data-name"),
        address: attr("data-address"),
        devices: attr("data-devices"),
        devices_label: attr("data-devices-label"),
        lat: attr("data-lat"),
        lng: attr("data-lng"),
        phone: attr("data-phone"),
    }
}

pub fn read_settings(document: &Document) -> LocatorSettings {
    let embedded = document
        .get_element_by_id(ROOT_ID)
        .and_then(|root| root.get_attribute("data-settings"));
    LocatorSettings::from_embedded(embedded.as_deref())
}
