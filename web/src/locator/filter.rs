use shared_types::{LocationRecord, RecordId, RecordStore};

/// Current search box text and selected device category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub query: String,
    pub category: Option<String>,
}

impl FilterState {
    pub fn new(query: impl Into<String>, category: Option<&str>) -> Self {
        let mut state = Self {
            query: query.into(),
            category: None,
        };
        state.set_category(category.unwrap_or_default());
        state
    }

    /// An empty selector value clears the category.
    pub fn set_category(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.category = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn is_empty(&self) -> bool {
        normalize(&self.query).is_empty() && self.category.is_none()
    }
}

pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

struct Predicate<'a> {
    query: String,
    category: Option<&'a str>,
}

impl<'a> Predicate<'a> {
    fn new(filter: &'a FilterState) -> Self {
        Self {
            query: normalize(&filter.query),
            category: filter
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty()),
        }
    }

    fn accepts(&self, record: &LocationRecord) -> bool {
        let category_ok = self
            .category
            .map_or(true, |c| record.device_categories.contains(c));
        let query_ok = self.query.is_empty()
            || [
                &record.name,
                &record.address,
                &record.device_categories_label,
            ]
            .iter()
            .any(|field| normalize(field).contains(&self.query));

        category_ok && query_ok
    }
}

pub fn matches(record: &LocationRecord, filter: &FilterState) -> bool {
    Predicate::new(filter).accepts(record)
}

/// Visible subset of a store for one filter state, in store order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    visible: Vec<RecordId>,
    mask: Vec<bool>,
}

impl FilterOutcome {
    pub fn visible(&self) -> &[RecordId] {
        &self.visible
    }

    pub fn count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_visible(&self, id: RecordId) -> bool {
        self.mask.get(id.0).copied().unwrap_or(false)
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }
}

pub fn compute_visible(store: &RecordStore, filter: &FilterState) -> FilterOutcome {
    let predicate = Predicate::new(filter);
    let mask: Vec<bool> = store.iter().map(|r| predicate.accepts(r)).collect();
    let visible = store
        .iter()
        .zip(&mask)
        .filter(|(_, visible)| **visible)
        .map(|(r, _)| r.id)
        .collect();

    FilterOutcome { visible, mask }
}

/// Resolves the visible ids back to records.
pub fn visible_records<'a>(store: &'a RecordStore, outcome: &FilterOutcome) -> Vec<&'a LocationRecord> {
    outcome
        .visible()
        .iter()
        .filter_map(|id| store.get(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::LatLong;

    fn center(name: &str, address: &str, devices: &[&str], label: &str) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            address: address.to_string(),
            device_categories: devices.iter().map(|d| d.to_string()).collect(),
            device_categories_label: label.to_string(),
            coordinates: Some(LatLong::new(35.7, 51.4)),
            ..Default::default()
        }
    }

    fn sample_store() -> RecordStore {
        RecordStore::new(vec![
            center("Vazir Repair", "Enghelab Sq.", &["iphone"], "iPhone"),
            center("Tajrish Mobile", "Tajrish Sq.", &["samsung"], "Samsung"),
            center("Azadi Service", "Vazir Ave., Azadi", &["samsung", "xiaomi"], "Samsung, Xiaomi"),
            center("Pasdaran Center", "Pasdaran St.", &["iphone", "huawei"], "iPhone, Huawei"),
            LocationRecord {
                coordinates: None,
                ..center("Narmak Point", "Narmak", &["xiaomi"], "Xiaomi")
            },
        ])
    }

    #[test]
    fn vazir_query_shows_two_of_five() {
        let store = sample_store();
        let outcome = compute_visible(&store, &FilterState::new("vazir", None));

        assert_eq!(outcome.count(), 2);
        assert_eq!(outcome.visible(), &[RecordId(0), RecordId(2)]);
        for id in [1, 3, 4] {
            assert!(!outcome.is_visible(RecordId(id)), "record {id} should be hidden");
        }
    }

    #[test]
    fn query_is_trimmed_and_case_folded() {
        let store = sample_store();
        let outcome = compute_visible(&store, &FilterState::new("  TAJRISH ", None));
        assert_eq!(outcome.visible(), &[RecordId(1)]);
    }

    #[test]
    fn label_is_searchable() {
        let store = sample_store();
        let outcome = compute_visible(&store, &FilterState::new("huawei", None));
        assert_eq!(outcome.visible(), &[RecordId(3)]);
    }

    #[test]
    fn category_and_query_must_both_hold() {
        let store = sample_store();
        let by_category = compute_visible(&store, &FilterState::new("", Some("samsung")));
        assert_eq!(by_category.visible(), &[RecordId(1), RecordId(2)]);

        let both = compute_visible(&store, &FilterState::new("azadi", Some("samsung")));
        assert_eq!(both.visible(), &[RecordId(2)]);

        let none = compute_visible(&store, &FilterState::new("azadi", Some("iphone")));
        assert_eq!(none.count(), 0);
    }

    #[test]
    fn blank_category_means_any() {
        let filter = FilterState::new("", Some("   "));
        assert!(filter.category.is_none());
        assert!(filter.is_empty());
        assert_eq!(compute_visible(&sample_store(), &filter).count(), 5);
    }

    #[test]
    fn unmappable_records_still_filter_into_the_list() {
        let store = sample_store();
        let outcome = compute_visible(&store, &FilterState::new("narmak", None));
        assert_eq!(outcome.visible(), &[RecordId(4)]);
    }

    #[test]
    fn outcome_agrees_with_predicate_for_every_record() {
        let store = sample_store();
        let filters = [
            FilterState::default(),
            FilterState::new("sq.", None),
            FilterState::new("a", Some("xiaomi")),
            FilterState::new("nothing matches this", None),
            FilterState::new("", Some("huawei")),
        ];
        for filter in &filters {
            let outcome = compute_visible(&store, filter);
            for record in &store {
                assert_eq!(
                    outcome.is_visible(record.id),
                    matches(record, filter),
                    "record {} disagrees with predicate for {filter:?}",
                    record.id
                );
            }
            assert_eq!(outcome.count(), outcome.mask().iter().filter(|v| **v).count());
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let store = sample_store();
        let filter = FilterState::new("service", Some("samsung"));
        assert_eq!(compute_visible(&store, &filter), compute_visible(&store, &filter));
    }

    #[test]
    fn visible_records_keep_store_order() {
        let store = sample_store();
        let outcome = compute_visible(&store, &FilterState::new("sq.", None));
        let names: Vec<_> = visible_records(&store, &outcome)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Vazir Repair", "Tajrish Mobile"]);
    }
}
