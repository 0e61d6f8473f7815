//! Joins city economics with gazetteer locations.

use std::collections::HashMap;

use job_insights_dataset::{CityDataset, LocationDataset};
use job_insights_query_models::JoinedCity;

/// Located cities with a name index.
///
/// Ids are positions in `cities`: dense, 0-based, and stable for the
/// lifetime of one load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedCities {
    cities: Vec<JoinedCity>,
    index: HashMap<String, usize>,
}

impl JoinedCities {
    /// Every located city in id order.
    #[must_use]
    pub fn as_slice(&self) -> &[JoinedCity] {
        &self.cities
    }

    /// Looks up a city by its exact `"City, ST"` key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JoinedCity> {
        self.index.get(name).and_then(|&id| self.cities.get(id))
    }

    /// Looks up a city by id.
    #[must_use]
    pub fn by_id(&self, id: usize) -> Option<&JoinedCity> {
        self.cities.get(id)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Attaches a location to every city that has one.
///
/// Cities are visited in key order. A city without a gazetteer entry is
/// logged and skipped; the remaining cities get consecutive ids.
#[must_use]
pub fn join(cities: &CityDataset, locations: &LocationDataset) -> JoinedCities {
    let mut joined = JoinedCities::default();

    for economics in cities.iter() {
        let Some(location) = locations.get(&economics.name) else {
            log::warn!("join: no location for city {:?}, skipping", economics.name);
            continue;
        };

        let id = joined.cities.len();
        joined.index.insert(economics.name.clone(), id);
        joined.cities.push(JoinedCity::new(id, economics, location));
    }

    log::info!(
        "join: located {} of {} cities",
        joined.cities.len(),
        cities.len()
    );

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{economics, location};

    #[test]
    fn drops_unlocated_cities_and_assigns_dense_ids() {
        let cities: CityDataset = [
            economics("Austin, TX", 1.0),
            economics("Atlantis, ZZ", 2.0),
            economics("Boise, ID", 3.0),
        ]
        .into_iter()
        .collect();
        let locations: LocationDataset = [location("Austin", "TX"), location("Boise", "ID")]
            .into_iter()
            .collect();

        let joined = join(&cities, &locations);

        assert_eq!(joined.len(), 2);
        assert!(!joined.contains("Atlantis, ZZ"));
        for (position, city) in joined.as_slice().iter().enumerate() {
            assert_eq!(city.id, position);
            assert_eq!(joined.get(&city.name), Some(city));
        }
    }

    #[test]
    fn lookups_are_exact() {
        let cities: CityDataset = [economics("Austin, TX", 1.0)].into_iter().collect();
        let locations: LocationDataset = [location("Austin", "TX")].into_iter().collect();
        let joined = join(&cities, &locations);

        assert!(joined.get("austin, tx").is_none());
        assert!(joined.get("Austin,TX").is_none());
        assert_eq!(joined.by_id(0).unwrap().name, "Austin, TX");
        assert!(joined.by_id(1).is_none());
    }

    #[test]
    fn empty_inputs_join_to_nothing() {
        let joined = join(&CityDataset::default(), &LocationDataset::default());
        assert!(joined.is_empty());
    }
}
