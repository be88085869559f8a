use serde::{Deserialize, Serialize};

pub mod record;
pub mod store;

pub use record::{CenterAttributes, LocationRecord, RecordId};
pub use store::RecordStore;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct LatLong {
    pub lat: f64,
    pub long: f64,
}

impl LatLong {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Both components are finite numbers.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.long.is_finite()
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &LatLong) -> f64 {
        haversine_km(self.lat, self.long, other.lat, other.long)
    }
}

/// Haversine great-circle distance between two lat/long points in kilometers.
pub fn haversine_km(lat1: f64, long1: f64, lat2: f64, long2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_long = (long2 - long1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1_r.cos() * lat2_r.cos() * (d_long / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct MapBounds {
    pub north_east: LatLong,
    pub south_west: LatLong,
}

impl MapBounds {
    /// Smallest envelope containing every valid point, or `None` when there is none.
    pub fn enclosing<'a, I>(points: I) -> Option<MapBounds>
    where
        I: IntoIterator<Item = &'a LatLong>,
    {
        points
            .into_iter()
            .filter(|p| p.is_valid())
            .fold(None, |acc: Option<MapBounds>, p| {
                Some(match acc {
                    None => MapBounds {
                        north_east: *p,
                        south_west: *p,
                    },
                    Some(b) => MapBounds {
                        north_east: LatLong::new(
                            b.north_east.lat.max(p.lat),
                            b.north_east.long.max(p.long),
                        ),
                        south_west: LatLong::new(
                            b.south_west.lat.min(p.lat),
                            b.south_west.long.min(p.long),
                        ),
                    },
                })
            })
    }

    /// Widens every side by `ratio` times the envelope span on that axis.
    pub fn pad(&self, ratio: f64) -> MapBounds {
        let lat_buffer = (self.north_east.lat - self.south_west.lat).abs() * ratio;
        let long_buffer = (self.north_east.long - self.south_west.long).abs() * ratio;
        MapBounds {
            north_east: LatLong::new(
                self.north_east.lat + lat_buffer,
                self.north_east.long + long_buffer,
            ),
            south_west: LatLong::new(
                self.south_west.lat - lat_buffer,
                self.south_west.long - long_buffer,
            ),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_same_point_is_zero() {
        let dist = haversine_km(35.6892, 51.389, 35.6892, 51.389);
        assert!(dist.abs() < 1e-9, "Same point should be 0km, got {dist}");
    }

    #[test]
    fn haversine_two_km_across_tehran() {
        // 0.018 degrees of latitude is almost exactly 2km
        let dist = haversine_km(35.6892, 51.389, 35.7072, 51.389);
        assert!(
            (dist - 2.0).abs() < 0.1,
            "Expected ~2km between the two Tehran points, got {dist}"
        );
    }

    #[test]
    fn haversine_tehran_to_isfahan() {
        // Tehran to Isfahan is ~340km as the crow flies
        let dist = haversine_km(35.6892, 51.389, 32.6546, 51.668);
        assert!(
            (dist - 338.0).abs() < 10.0,
            "Tehran to Isfahan should be ~338km, got {dist}"
        );
    }

    #[test]
    fn enclosing_skips_invalid_points() {
        let points = [
            LatLong::new(35.70, 51.40),
            LatLong::new(f64::NAN, 51.0),
            LatLong::new(35.75, 51.30),
            LatLong::new(35.80, f64::INFINITY),
        ];
        let bounds = MapBounds::enclosing(points.iter()).expect("two valid points");
        assert_eq!(bounds.north_east, LatLong::new(35.75, 51.40));
        assert_eq!(bounds.south_west, LatLong::new(35.70, 51.30));
    }

    #[test]
    fn enclosing_of_nothing_is_none() {
        assert!(MapBounds::enclosing([].iter()).is_none());
        let invalid = [LatLong::new(f64::NAN, f64::NAN)];
        assert!(MapBounds::enclosing(invalid.iter()).is_none());
    }

    #[test]
    fn pad_grows_each_side_by_ratio_of_span() {
        let bounds = MapBounds {
            north_east: LatLong::new(36.0, 52.0),
            south_west: LatLong::new(35.0, 51.0),
        };
        let padded = bounds.pad(0.18);
        assert!((padded.north_east.lat - 36.18).abs() < 1e-9);
        assert!((padded.south_west.long - 50.82).abs() < 1e-9);
        assert!((padded.north_east.long - 52.18).abs() < 1e-9);
        assert!((padded.south_west.lat - 34.82).abs() < 1e-9);
    }
}
