use leptos::logging::log;
use shared_types::{LatLong, RecordId, RecordStore};

use crate::locator::{
    errors::{GeolocationError, MapLoadError},
    filter::{compute_visible, visible_records, FilterOutcome, FilterState},
    geolocate::{nearest, GeolocationOptions},
    map_adapter::{MapAdapter, MapPhase, MapSurface, MapViewConfig},
};
use crate::settings::LocatorSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Map => "map",
        }
    }
}

/// UI events the locator reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorAction {
    SetQuery(String),
    SetCategory(String),
    ApplyFilters,
    Reset,
    Select(RecordId),
    ShowOnMap(RecordId),
    SetView(ViewMode),
    EnsureMap,
    LocateNearest,
    DismissNotice,
}

/// Asynchronous work the host must start after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub enum Followup {
    #[default]
    Nothing,
    LoadMap,
    RequestPosition,
}

impl Followup {
    fn or(self, other: Followup) -> Followup {
        match self {
            Followup::Nothing => other,
            _ => self,
        }
    }
}

/// What the view renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocatorSnapshot {
    pub filter: FilterState,
    pub visible: Vec<bool>,
    pub count: usize,
    pub active: Option<RecordId>,
    pub view: ViewMode,
    pub map_phase: MapPhase,
    pub map_error: Option<MapLoadError>,
    pub notice: Option<GeolocationError>,
}

impl LocatorSnapshot {
    pub fn is_visible(&self, id: RecordId) -> bool {
        self.visible.get(id.0).copied().unwrap_or(false)
    }

    pub fn is_active(&self, id: RecordId) -> bool {
        self.active == Some(id)
    }
}

pub struct LocatorController<S: MapSurface> {
    store: RecordStore,
    settings: LocatorSettings,
    filter: FilterState,
    outcome: FilterOutcome,
    active: Option<RecordId>,
    view: ViewMode,
    notice: Option<GeolocationError>,
    map: MapAdapter<S>,
}

impl<S: MapSurface> LocatorController<S> {
    pub fn new(store: RecordStore, settings: LocatorSettings) -> Self {
        let filter = FilterState::default();
        let outcome = compute_visible(&store, &filter);
        let map = MapAdapter::new(MapViewConfig::from(&settings));
        Self {
            store,
            settings,
            filter,
            outcome,
            active: None,
            view: ViewMode::List,
            notice: None,
            map,
        }
    }

    pub fn settings(&self) -> &LocatorSettings {
        &self.settings
    }

    pub fn map(&self) -> &MapAdapter<S> {
        &self.map
    }

    pub fn geolocation_options(&self) -> GeolocationOptions {
        GeolocationOptions::from(&self.settings)
    }

    pub fn apply(&mut self, action: LocatorAction) -> Followup {
        match action {
            LocatorAction::SetQuery(query) => {
                self.filter.query = query;
                self.refilter();
                Followup::Nothing
            }
            LocatorAction::SetCategory(category) => {
                self.filter.set_category(&category);
                self.refilter();
                Followup::Nothing
            }
            LocatorAction::ApplyFilters => {
                self.refilter();
                Followup::Nothing
            }
            LocatorAction::Reset => {
                self.reset();
                Followup::Nothing
            }
            LocatorAction::Select(id) => self.select(id),
            LocatorAction::ShowOnMap(id) => {
                let focus = self.select(id);
                focus.or(self.set_view(ViewMode::Map))
            }
            LocatorAction::SetView(mode) => self.set_view(mode),
            LocatorAction::EnsureMap => self.ensure_map(),
            LocatorAction::LocateNearest => {
                self.notice = None;
                Followup::RequestPosition
            }
            LocatorAction::DismissNotice => {
                self.notice = None;
                Followup::Nothing
            }
        }
    }

    pub fn map_loaded(&mut self, surface: S) {
        let visible = visible_records(&self.store, &self.outcome);
        self.map.attach(surface, &visible);
    }

    pub fn map_failed(&mut self, error: MapLoadError) {
        self.map.fail(error);
    }

    /// Focuses the visible center closest to `origin` and switches to the map.
    pub fn position_found(&mut self, origin: LatLong) -> Followup {
        let visible = visible_records(&self.store, &self.outcome);
        match nearest(origin, visible) {
            Some(best) => {
                log!("nearest center {} at {:.2} km", best.id, best.distance_km);
                let focus = self.select(best.id);
                focus.or(self.set_view(ViewMode::Map))
            }
            None => {
                self.notice = Some(GeolocationError::NoEligibleRecord);
                Followup::Nothing
            }
        }
    }

    pub fn geolocation_failed(&mut self, error: GeolocationError) {
        log!("geolocation failed: {error}");
        self.notice = Some(error);
    }

    pub fn snapshot(&self) -> LocatorSnapshot {
        LocatorSnapshot {
            filter: self.filter.clone(),
            visible: self.outcome.mask().to_vec(),
            count: self.outcome.count(),
            active: self.active,
            view: self.view,
            map_phase: self.map.phase(),
            map_error: self.map.error().cloned(),
            notice: self.notice,
        }
    }

    fn refilter(&mut self) {
        self.outcome = compute_visible(&self.store, &self.filter);
        let visible = visible_records(&self.store, &self.outcome);
        self.map.sync_markers(&visible);
    }

    fn reset(&mut self) {
        self.filter = FilterState::default();
        self.refilter();
        self.active = None;
        let visible = visible_records(&self.store, &self.outcome);
        self.map.fit_to_visible(&visible);
    }

    fn select(&mut self, id: RecordId) -> Followup {
        let Some(record) = self.store.get(id) else {
            return Followup::Nothing;
        };
        self.active = Some(id);
        if self.map.focus(record).start_loading {
            Followup::LoadMap
        } else {
            Followup::Nothing
        }
    }

    fn set_view(&mut self, mode: ViewMode) -> Followup {
        self.view = mode;
        match mode {
            ViewMode::Map => self.ensure_map(),
            ViewMode::List => Followup::Nothing,
        }
    }

    fn ensure_map(&mut self) -> Followup {
        if self.map.ensure_ready() {
            Followup::LoadMap
        } else {
            Followup::Nothing
        }
    }
}
