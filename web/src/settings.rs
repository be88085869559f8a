use serde::{Deserialize, Serialize};
use shared_types::LatLong;

/// Tunables for the locator widget. Every field falls back to its default when
/// missing from the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorSettings {
    pub leaflet_css: String,
    pub leaflet_js: String,
    pub tile_url: String,
    pub tile_attribution: String,
    pub tile_max_zoom: u8,
    pub fallback_center: LatLong,
    pub fallback_zoom: f64,
    pub focus_zoom: f64,
    pub fit_padding: f64,
    pub observer_root_margin: String,
    pub geolocation_timeout_ms: u32,
    pub geolocation_max_age_ms: u32,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            leaflet_css: "assets/vendor/leaflet/leaflet.css".to_string(),
            leaflet_js: "assets/vendor/leaflet/leaflet.js".to_string(),
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; OpenStreetMap".to_string(),
            tile_max_zoom: 19,
            // Tehran city center
            fallback_center: LatLong::new(35.6892, 51.3890),
            fallback_zoom: 11.0,
            focus_zoom: 14.0,
            fit_padding: 0.18,
            observer_root_margin: "250px".to_string(),
            geolocation_timeout_ms: 7_000,
            geolocation_max_age_ms: 60_000,
        }
    }
}

impl LocatorSettings {
    /// Reads settings embedded in the page, keeping defaults when the payload is
    /// absent or unreadable.
    pub fn from_embedded(raw: Option<&str>) -> Self {
        match raw.map(serde_json::from_str::<LocatorSettings>) {
            Some(Ok(settings)) => settings,
            Some(Err(err)) => {
                leptos::logging::warn!("ignoring malformed locator settings: {err}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn to_embedded(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let settings = LocatorSettings::from_embedded(Some(r#"{"focus_zoom": 16.0}"#));
        assert_eq!(settings.focus_zoom, 16.0);
        assert_eq!(settings.fallback_zoom, 11.0);
        assert_eq!(settings.leaflet_js, "assets/vendor/leaflet/leaflet.js");
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        assert_eq!(
            LocatorSettings::from_embedded(Some("{not json")),
            LocatorSettings::default()
        );
        assert_eq!(LocatorSettings::from_embedded(None), LocatorSettings::default());
    }

    #[test]
    fn embedded_form_reads_back() {
        let settings = LocatorSettings {
            fit_padding: 0.25,
            ..Default::default()
        };
        let reread = LocatorSettings::from_embedded(Some(&settings.to_embedded()));
        assert_eq!(reread, settings);
    }
}
