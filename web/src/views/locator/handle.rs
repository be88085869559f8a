use leptos::{
    html::Div,
    logging::{error, log},
    prelude::*,
    task::spawn_local,
};

use crate::data::store::PageData;
use crate::locator::{
    assets::load_leaflet_assets, geolocate::current_position, leaflet::LeafletMap, Followup,
    LocatorAction, LocatorController, LocatorSnapshot, MapLoadError,
};

/// Shared by every locator component. The controller is the only thing that
/// mutates widget state; components read the published snapshot.
#[derive(Clone, Copy)]
pub struct LocatorHandle {
    controller: StoredValue<LocatorController<LeafletMap>, LocalStorage>,
    snapshot: RwSignal<LocatorSnapshot>,
    map_node: NodeRef<Div>,
}

impl LocatorHandle {
    pub fn new(page: PageData) -> Self {
        let controller = LocatorController::new(page.store, page.settings);
        let snapshot = RwSignal::new(controller.snapshot());
        Self {
            controller: StoredValue::new_local(controller),
            snapshot,
            map_node: NodeRef::new(),
        }
    }

    pub fn snapshot(&self) -> RwSignal<LocatorSnapshot> {
        self.snapshot
    }

    pub fn map_node(&self) -> NodeRef<Div> {
        self.map_node
    }

    pub fn dispatch(self, action: LocatorAction) {
        let Some(followup) = self.controller.try_update_value(|c| c.apply(action)) else {
            return;
        };
        self.publish();
        self.run(followup);
    }

    fn publish(self) {
        if let Some(snapshot) = self.controller.try_with_value(|c| c.snapshot()) {
            self.snapshot.set(snapshot);
        }
    }

    fn run(self, followup: Followup) {
        match followup {
            Followup::Nothing => {}
            Followup::LoadMap => self.load_map(),
            Followup::RequestPosition => self.locate(),
        }
    }

    fn load_map(self) {
        let Some(settings) = self.controller.try_with_value(|c| c.settings().clone()) else {
            return;
        };
        let map_node = self.map_node;

        spawn_local(async move {
            let surface = match load_leaflet_assets(&settings).await {
                Ok(()) => match map_node.get_untracked() {
                    Some(container) => LeafletMap::create(&container, &settings),
                    None => Err(MapLoadError::NoContainer),
                },
                Err(err) => Err(err),
            };

            match surface {
                Ok(surface) => {
                    log!("map ready");
                    self.controller.update_value(|c| c.map_loaded(surface));
                }
                Err(err) => {
                    error!("map failed to load: {err}");
                    self.controller.update_value(|c| c.map_failed(err));
                }
            }
            self.publish();
        });
    }

    fn locate(self) {
        let Some(options) = self.controller.try_with_value(|c| c.geolocation_options()) else {
            return;
        };

        spawn_local(async move {
            let followup = match current_position(options).await {
                Ok(origin) => self
                    .controller
                    .try_update_value(|c| c.position_found(origin))
                    .unwrap_or_default(),
                Err(err) => {
                    self.controller.update_value(|c| c.geolocation_failed(err));
                    Followup::Nothing
                }
            };
            self.publish();
            self.run(followup);
        });
    }
}
