use serde::{Deserialize, Serialize};

use crate::record::{CenterAttributes, LocationRecord, RecordId};

/// Ordered, read-only set of centers. Record ids are positions in this store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RecordStore {
    records: Vec<LocationRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| LocationRecord {
                id: RecordId(idx),
                ..record
            })
            .collect();
        Self { records }
    }

    pub fn from_attributes<'a, I>(cards: I) -> Self
    where
        I: IntoIterator<Item = &'a CenterAttributes>,
    {
        let records = cards
            .into_iter()
            .enumerate()
            .map(|(idx, attrs)| LocationRecord::from_attributes(RecordId(idx), attrs))
            .collect();
        Self { records }
    }

    pub fn get(&self, id: RecordId) -> Option<&LocationRecord> {
        self.records.get(id.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocationRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct category identifiers. Records are walked in store order and
    /// each record contributes its categories in sorted order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for category in self.records.iter().flat_map(|r| r.device_categories.iter()) {
            if !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a LocationRecord;
    type IntoIter = std::slice::Iter<'a, LocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, devices: &[&str]) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            device_categories: devices.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn ids_follow_store_order() {
        let store = RecordStore::new(vec![
            LocationRecord {
                id: RecordId(42),
                ..record("a", &[])
            },
            record("b", &[]),
        ]);
        let ids: Vec<_> = store.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(0), RecordId(1)]);
        assert_eq!(store.get(RecordId(1)).map(|r| r.name.as_str()), Some("b"));
        assert!(store.get(RecordId(2)).is_none());
    }

    #[test]
    fn categories_follow_store_order_then_sorted_within_record() {
        let store = RecordStore::new(vec![
            record("a", &["samsung"]),
            record("b", &["xiaomi", "iphone", "samsung"]),
            record("c", &["huawei"]),
        ]);
        assert_eq!(
            store.categories(),
            vec!["samsung", "iphone", "xiaomi", "huawei"]
        );
    }

    #[test]
    fn deserializes_data_file_records() {
        let json = r#"[
            {"name": "One", "address": "Addr 1", "device_categories": ["iphone"],
             "coordinates": {"lat": 35.7, "long": 51.4}, "phone": "021-1"},
            {"name": "Two", "address": "Addr 2"}
        ]"#;
        let records: Vec<LocationRecord> = serde_json::from_str(json).expect("valid json");
        let store = RecordStore::new(records);
        assert_eq!(store.len(), 2);
        assert!(store.get(RecordId(0)).is_some_and(LocationRecord::is_mappable));
        assert!(store.get(RecordId(1)).is_some_and(|r| r.coordinates.is_none()));
    }
}
