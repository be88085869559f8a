use leptos::prelude::*;
use shared_types::LocationRecord;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use crate::locator::LocatorAction;
use crate::views::locator::handle::LocatorHandle;

/// Clicks that land on a link inside the card follow the link instead of selecting.
fn clicked_link(ev: &MouseEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest("a").ok().flatten())
        .is_some()
}

#[component]
pub fn CenterCard(handle: LocatorHandle, record: LocationRecord) -> impl IntoView {
    let id = record.id;
    let snapshot = handle.snapshot();
    let attributes = record.to_attributes();
    let route = record.route_link();
    let mappable = record.is_mappable();
    let phone = record.phone.clone().map(|phone| {
        let href = format!("tel:{}", urlencoding::encode(&phone));
        (phone, href)
    });

    let on_card_click = move |ev: MouseEvent| {
        if !clicked_link(&ev) {
            handle.dispatch(LocatorAction::Select(id));
        }
    };

    view! {
        <article
            class="center-card"
            class:active=move || snapshot.with(|s| s.is_active(id))
            hidden=move || !snapshot.with(|s| s.is_visible(id))
            data-id=id.to_string()
            data-name=attributes.name
            data-address=attributes.address
            data-devices=attributes.devices
            data-devices-label=attributes.devices_label
            data-lat=attributes.lat
            data-lng=attributes.lng
            data-phone=attributes.phone
            on:click=on_card_click
        >
            <h3 class="center-name">{record.name}</h3>
            <p class="center-address">{record.address}</p>
            <p class="center-devices">{record.device_categories_label}</p>
            <div class="center-actions">
                {phone.map(|(phone, href)| view! { <a class="center-phone" href=href>{phone}</a> })}
                {route.map(|href| {
                    view! {
                        <a class="center-route" data-route="" href=href target="_blank" rel="noopener">
                            "مسیریابی"
                        </a>
                    }
                })}
                {mappable.then(|| {
                    view! {
                        <button
                            type="button"
                            class="center-focus"
                            data-focus=""
                            on:click=move |ev: MouseEvent| {
                                ev.stop_propagation();
                                handle.dispatch(LocatorAction::ShowOnMap(id));
                            }
                        >
                            "نمایش روی نقشه"
                        </button>
                    }
                })}
            </div>
        </article>
    }
}
