use std::collections::BTreeMap;

use leptos::logging::{log, warn};
use shared_types::{LatLong, LocationRecord, MapBounds, RecordId};

use crate::locator::{errors::MapLoadError, popup::popup_html};
use crate::settings::LocatorSettings;

/// Rendering capability the adapter drives once the map engine is loaded.
pub trait MapSurface {
    type Marker;

    fn add_marker(&mut self, position: LatLong, popup_html: &str) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
    fn set_view(&mut self, center: LatLong, zoom: f64, animate: bool);
    fn fit_bounds(&mut self, bounds: MapBounds);
    fn open_popup(&mut self, marker: &Self::Marker);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapPhase {
    #[default]
    Unloaded,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewConfig {
    pub fallback_center: LatLong,
    pub fallback_zoom: f64,
    pub focus_zoom: f64,
    pub fit_padding: f64,
}

impl From<&LocatorSettings> for MapViewConfig {
    fn from(settings: &LocatorSettings) -> Self {
        Self {
            fallback_center: settings.fallback_center,
            fallback_zoom: settings.fallback_zoom,
            focus_zoom: settings.focus_zoom,
            fit_padding: settings.fit_padding,
        }
    }
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self::from(&LocatorSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewChange {
    NotReady,
    Fitted(MapBounds),
    Centered { center: LatLong, zoom: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    Applied { popup_opened: bool },
    /// Applied once the map finishes loading.
    Pending,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub outcome: FocusOutcome,
    pub start_loading: bool,
}

pub struct MapAdapter<S: MapSurface> {
    phase: MapPhase,
    surface: Option<S>,
    markers: BTreeMap<RecordId, S::Marker>,
    pending_focus: Option<(RecordId, LatLong)>,
    error: Option<MapLoadError>,
    config: MapViewConfig,
}

impl<S: MapSurface> MapAdapter<S> {
    pub fn new(config: MapViewConfig) -> Self {
        Self {
            phase: MapPhase::Unloaded,
            surface: None,
            markers: BTreeMap::new(),
            pending_focus: None,
            error: None,
            config,
        }
    }

    pub fn phase(&self) -> MapPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == MapPhase::Ready
    }

    pub fn error(&self) -> Option<&MapLoadError> {
        self.error.as_ref()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[cfg(test)]
    pub fn has_marker(&self, id: RecordId) -> bool {
        self.markers.contains_key(&id)
    }

    #[cfg(test)]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Returns true when the caller should start loading the map engine.
    /// Loading, Ready and Failed all make this a no-op.
    pub fn ensure_ready(&mut self) -> bool {
        if self.phase != MapPhase::Unloaded {
            return false;
        }
        log!("map: loading engine");
        self.phase = MapPhase::Loading;
        true
    }

    /// Hands the loaded engine to the adapter, then runs the first marker sync,
    /// the first bounds fit and any focus requested while loading.
    pub fn attach(&mut self, surface: S, visible: &[&LocationRecord]) {
        if matches!(self.phase, MapPhase::Ready | MapPhase::Failed) {
            warn!("map: ignoring engine attach in phase {:?}", self.phase);
            return;
        }
        self.surface = Some(surface);
        self.phase = MapPhase::Ready;

        let placed = self.sync_markers(visible);
        self.fit_to_visible(visible);
        log!("map: ready with {placed} markers");

        if let Some((id, position)) = self.pending_focus.take() {
            self.apply_focus(id, position);
        }
    }

    pub fn fail(&mut self, error: MapLoadError) {
        if self.phase == MapPhase::Ready {
            return;
        }
        warn!("map: engine failed to load: {error}");
        self.phase = MapPhase::Failed;
        self.pending_focus = None;
        self.error = Some(error);
    }

    /// Replaces every marker with one per visible, mappable record.
    pub fn sync_markers(&mut self, visible: &[&LocationRecord]) -> usize {
        let Some(surface) = self.surface.as_mut().filter(|_| self.phase == MapPhase::Ready) else {
            return 0;
        };

        for (_, marker) in std::mem::take(&mut self.markers) {
            surface.remove_marker(marker);
        }

        for record in visible {
            let Some(position) = record.valid_coordinates() else {
                continue;
            };
            let marker = surface.add_marker(position, &popup_html(record));
            self.markers.insert(record.id, marker);
        }

        self.markers.len()
    }

    pub fn fit_to_visible(&mut self, visible: &[&LocationRecord]) -> ViewChange {
        let Some(surface) = self.surface.as_mut().filter(|_| self.phase == MapPhase::Ready) else {
            return ViewChange::NotReady;
        };

        let points: Vec<LatLong> = visible.iter().filter_map(|r| r.valid_coordinates()).collect();
        match MapBounds::enclosing(points.iter()) {
            Some(bounds) => {
                let padded = bounds.pad(self.config.fit_padding);
                surface.fit_bounds(padded);
                ViewChange::Fitted(padded)
            }
            None => {
                let (center, zoom) = (self.config.fallback_center, self.config.fallback_zoom);
                surface.set_view(center, zoom, false);
                ViewChange::Centered { center, zoom }
            }
        }
    }

    /// Pans to a record and opens its popup, loading the map first if needed.
    pub fn focus(&mut self, record: &LocationRecord) -> FocusRequest {
        // Only the latest selection may be panned to once the map attaches.
        self.pending_focus = None;
        let start_loading = self.ensure_ready();
        let Some(position) = record.valid_coordinates() else {
            return FocusRequest {
                outcome: FocusOutcome::Skipped,
                start_loading,
            };
        };

        let outcome = match self.phase {
            MapPhase::Ready => self.apply_focus(record.id, position),
            MapPhase::Unloaded | MapPhase::Loading => {
                self.pending_focus = Some((record.id, position));
                FocusOutcome::Pending
            }
            MapPhase::Failed => FocusOutcome::Skipped,
        };

        FocusRequest {
            outcome,
            start_loading,
        }
    }

    fn apply_focus(&mut self, id: RecordId, position: LatLong) -> FocusOutcome {
        let Some(surface) = self.surface.as_mut() else {
            return FocusOutcome::Skipped;
        };
        surface.set_view(position, self.config.focus_zoom, true);

        let popup_opened = match self.markers.get(&id) {
            Some(marker) => {
                surface.open_popup(marker);
                true
            }
            None => false,
        };
        FocusOutcome::Applied { popup_opened }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum SurfaceCall {
        AddMarker(LatLong),
        RemoveMarker(u32),
        SetView { center: LatLong, zoom: f64 },
        FitBounds(MapBounds),
        OpenPopup(u32),
    }

    /// Surface that records what the adapter asked of it.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<SurfaceCall>,
        pub live: BTreeMap<u32, (LatLong, String)>,
        next_marker: u32,
    }

    impl RecordingSurface {
        pub fn views(&self) -> Vec<&SurfaceCall> {
            self.calls
                .iter()
                .filter(|c| matches!(c, SurfaceCall::SetView { .. } | SurfaceCall::FitBounds(_)))
                .collect()
        }
    }

    impl MapSurface for RecordingSurface {
        type Marker = u32;

        fn add_marker(&mut self, position: LatLong, popup_html: &str) -> u32 {
            self.next_marker += 1;
            self.live
                .insert(self.next_marker, (position, popup_html.to_string()));
            self.calls.push(SurfaceCall::AddMarker(position));
            self.next_marker
        }

        fn remove_marker(&mut self, marker: u32) {
            self.live.remove(&marker);
            self.calls.push(SurfaceCall::RemoveMarker(marker));
        }

        fn set_view(&mut self, center: LatLong, zoom: f64, _animate: bool) {
            self.calls.push(SurfaceCall::SetView { center, zoom });
        }

        fn fit_bounds(&mut self, bounds: MapBounds) {
            self.calls.push(SurfaceCall::FitBounds(bounds));
        }

        fn open_popup(&mut self, marker: &u32) {
            self.calls.push(SurfaceCall::OpenPopup(*marker));
        }
    }
}
