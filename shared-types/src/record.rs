use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::LatLong;

const ROUTE_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Position of a record in its store. Stable for the lifetime of the store.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct RecordId(pub usize);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LocationRecord {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub device_categories: BTreeSet<String>,
    #[serde(default)]
    pub device_categories_label: String,
    #[serde(default)]
    pub coordinates: Option<LatLong>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl LocationRecord {
    /// Coordinates usable for map placement and distance ranking.
    pub fn valid_coordinates(&self) -> Option<LatLong> {
        self.coordinates.filter(LatLong::is_valid)
    }

    pub fn is_mappable(&self) -> bool {
        self.valid_coordinates().is_some()
    }

    /// Directions link for this center, absent when it cannot be placed on a map.
    pub fn route_link(&self) -> Option<String> {
        self.valid_coordinates().map(|LatLong { lat, long }| {
            let destination = format!("{lat},{long}");
            format!("{ROUTE_BASE_URL}{}", urlencoding::encode(&destination))
        })
    }

    pub fn from_attributes(id: RecordId, attrs: &CenterAttributes) -> Self {
        let coordinates = match (parse_coordinate(&attrs.lat), parse_coordinate(&attrs.lng)) {
            (Some(lat), Some(long)) => Some(LatLong::new(lat, long)),
            _ => None,
        };

        LocationRecord {
            id,
            name: attrs.name.clone(),
            address: attrs.address.clone(),
            device_categories: split_categories(&attrs.devices),
            device_categories_label: attrs.devices_label.clone(),
            coordinates,
            phone: Some(attrs.phone.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }

    pub fn to_attributes(&self) -> CenterAttributes {
        let (lat, lng) = match self.coordinates {
            Some(LatLong { lat, long }) if lat.is_finite() && long.is_finite() => {
                (lat.to_string(), long.to_string())
            }
            _ => (String::new(), String::new()),
        };

        CenterAttributes {
            name: self.name.clone(),
            address: self.address.clone(),
            devices: self
                .device_categories
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
            devices_label: self.device_categories_label.clone(),
            lat,
            lng,
            phone: self.phone.clone().unwrap_or_default(),
        }
    }
}

/// String-typed attributes a center card carries in the host document
/// (`data-name`, `data-devices`, `data-lat`, ...).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CenterAttributes {
    pub name: String,
    pub address: String,
    pub devices: String,
    pub devices_label: String,
    pub lat: String,
    pub lng: String,
    pub phone: String,
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn split_categories(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> CenterAttributes {
        CenterAttributes {
            name: "Vazir Service".to_string(),
            address: "Vali-Asr St.".to_string(),
            devices: " iphone, samsung ,,xiaomi".to_string(),
            devices_label: "iPhone / Samsung / Xiaomi".to_string(),
            lat: "35.7219".to_string(),
            lng: " 51.4106 ".to_string(),
            phone: "021-8888 1234".to_string(),
        }
    }

    #[test]
    fn parses_delimited_categories() {
        let record = LocationRecord::from_attributes(RecordId(0), &attrs());
        let categories: Vec<_> = record.device_categories.iter().cloned().collect();
        assert_eq!(categories, vec!["iphone", "samsung", "xiaomi"]);
    }

    #[test]
    fn parses_coordinates_with_whitespace() {
        let record = LocationRecord::from_attributes(RecordId(3), &attrs());
        assert_eq!(record.id, RecordId(3));
        assert_eq!(record.coordinates, Some(LatLong::new(35.7219, 51.4106)));
        assert!(record.is_mappable());
    }

    #[test]
    fn malformed_coordinates_are_unmappable() {
        for (lat, lng) in [("", "51.4"), ("abc", "51.4"), ("35.7", "NaN"), ("inf", "51.4")] {
            let record = LocationRecord::from_attributes(
                RecordId(0),
                &CenterAttributes {
                    lat: lat.to_string(),
                    lng: lng.to_string(),
                    ..attrs()
                },
            );
            assert!(record.coordinates.is_none(), "({lat}, {lng}) should not parse");
            assert!(record.route_link().is_none());
        }
    }

    #[test]
    fn blank_phone_is_absent() {
        let record = LocationRecord::from_attributes(
            RecordId(0),
            &CenterAttributes {
                phone: "   ".to_string(),
                ..attrs()
            },
        );
        assert!(record.phone.is_none());
    }

    #[test]
    fn route_link_encodes_destination() {
        let record = LocationRecord::from_attributes(RecordId(0), &attrs());
        assert_eq!(
            record.route_link().as_deref(),
            Some("https://www.google.com/maps/dir/?api=1&destination=35.7219%2C51.4106")
        );
    }

    #[test]
    fn attributes_survive_a_render_and_reread() {
        let record = LocationRecord::from_attributes(RecordId(1), &attrs());
        let reread = LocationRecord::from_attributes(RecordId(1), &record.to_attributes());
        assert_eq!(record, reread);
    }
}
