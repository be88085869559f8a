use js_sys::{Promise, Reflect};
use shared_types::{LatLong, LocationRecord, RecordId};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::locator::errors::GeolocationError;
use crate::settings::LocatorSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

impl From<&LocatorSettings> for GeolocationOptions {
    fn from(settings: &LocatorSettings) -> Self {
        Self {
            high_accuracy: false,
            timeout_ms: settings.geolocation_timeout_ms,
            maximum_age_ms: settings.geolocation_max_age_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub id: RecordId,
    pub distance_km: f64,
}

/// Closest mappable record to `origin`. Ties keep the earlier record.
pub fn nearest<'a, I>(origin: LatLong, candidates: I) -> Option<Nearest>
where
    I: IntoIterator<Item = &'a LocationRecord>,
{
    candidates
        .into_iter()
        .filter_map(|record| {
            record.valid_coordinates().map(|position| Nearest {
                id: record.id,
                distance_km: origin.distance_km(&position),
            })
        })
        .fold(None, |best: Option<Nearest>, candidate| match best {
            Some(b) if b.distance_km <= candidate.distance_km => Some(b),
            _ => Some(candidate),
        })
}

/// Asks the browser for a single position fix.
pub async fn current_position(options: GeolocationOptions) -> Result<LatLong, GeolocationError> {
    let navigator = web_sys::window()
        .map(|w| w.navigator())
        .ok_or(GeolocationError::Unavailable)?;
    if !Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false) {
        return Err(GeolocationError::Unavailable);
    }
    let geolocation = navigator
        .geolocation()
        .map_err(|_| GeolocationError::Unavailable)?;

    let position_options = web_sys::PositionOptions::new();
    position_options.set_enable_high_accuracy(options.high_accuracy);
    position_options.set_timeout(options.timeout_ms);
    position_options.set_maximum_age(options.maximum_age_ms);

    let request = Promise::new(&mut |resolve, reject| {
        if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
            &resolve,
            Some(&reject),
            &position_options,
        ) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });

    let position = JsFuture::from(request)
        .await
        .map_err(|_| GeolocationError::Denied)?;
    read_coords(&position).ok_or(GeolocationError::Denied)
}

fn read_coords(position: &JsValue) -> Option<LatLong> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let long = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(LatLong::new(lat, long)).filter(LatLong::is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(id: usize, coordinates: Option<LatLong>) -> LocationRecord {
        LocationRecord {
            id: RecordId(id),
            coordinates,
            ..Default::default()
        }
    }

    #[test]
    fn picks_the_closest_mappable_record() {
        let origin = LatLong::new(35.70, 51.40);
        let centers = [
            center(0, Some(LatLong::new(35.80, 51.40))),
            center(1, None),
            center(2, Some(LatLong::new(35.71, 51.40))),
            center(3, Some(LatLong::new(35.75, 51.45))),
        ];

        let best = nearest(origin, &centers).expect("three mappable centers");
        assert_eq!(best.id, RecordId(2));
        assert!((best.distance_km - 1.11).abs() < 0.01, "got {}", best.distance_km);
    }

    #[test]
    fn ties_keep_store_order() {
        let origin = LatLong::new(35.70, 51.40);
        let centers = [
            center(0, Some(LatLong::new(35.72, 51.40))),
            center(1, Some(LatLong::new(35.72, 51.40))),
        ];
        assert_eq!(nearest(origin, &centers).map(|n| n.id), Some(RecordId(0)));
    }

    #[test]
    fn no_mappable_record_yields_none() {
        let origin = LatLong::new(35.70, 51.40);
        let centers = [center(0, None), center(1, Some(LatLong::new(f64::NAN, 0.0)))];
        assert!(nearest(origin, &centers).is_none());
        assert!(nearest(origin, std::iter::empty()).is_none());
    }

    #[test]
    fn options_follow_settings() {
        let options = GeolocationOptions::from(&LocatorSettings::default());
        assert_eq!(
            options,
            GeolocationOptions {
                high_accuracy: false,
                timeout_ms: 7_000,
                maximum_age_ms: 60_000,
            }
        );
    }
}
