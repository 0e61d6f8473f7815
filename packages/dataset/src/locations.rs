//! US cities gazetteer loader.

use std::collections::HashMap;

use job_insights_dataset_models::{LocationInfo, city_key};

use crate::config::LocationColumns;
use crate::{LoadOutcome, LoadWarning, float_field, ingest, key_field, truncated_field};

/// Gazetteer entries keyed by `"City, ST"`.
///
/// The gazetteer is far larger than the economics dataset; only exact key
/// lookups are needed, so it is stored unordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationDataset {
    locations: HashMap<String, LocationInfo>,
}

impl LocationDataset {
    /// Looks up a location by its exact `"City, ST"` key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LocationInfo> {
        self.locations.get(key)
    }

    /// Number of locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl FromIterator<LocationInfo> for LocationDataset {
    fn from_iter<I: IntoIterator<Item = LocationInfo>>(iter: I) -> Self {
        Self {
            locations: iter
                .into_iter()
                .map(|location| (location.key(), location))
                .collect(),
        }
    }
}

/// Parses the US cities gazetteer CSV.
///
/// The key is built as `"{city}, {state_id}"`. A repeated city+state pair
/// keeps the first row.
#[must_use]
pub fn load_locations(text: &str, columns: &LocationColumns) -> LoadOutcome<LocationDataset> {
    let mut locations = HashMap::new();

    let (rows_loaded, warnings) = ingest("locations", text, |record| {
        let location = LocationInfo {
            city: key_field(record, columns.city)?.to_string(),
            state_id: key_field(record, columns.state_id)?.to_string(),
            fips: truncated_field(record, columns.fips)?,
            latitude: float_field(record, columns.latitude)?,
            longitude: float_field(record, columns.longitude)?,
            population: truncated_field(record, columns.population)?,
            density: truncated_field(record, columns.density)?,
        };

        let key = city_key(&location.city, &location.state_id);
        if locations.contains_key(&key) {
            return Err(LoadWarning::DuplicateKey {
                line: record.line,
                key,
            });
        }

        locations.insert(key, location);
        Ok(())
    });

    LoadOutcome {
        dataset: LocationDataset { locations },
        rows_loaded,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "city,city_ascii,state_id,state_name,county_fips,county_name,lat,lng,population,density";

    fn load(rows: &[&str]) -> LoadOutcome<LocationDataset> {
        let text = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        load_locations(&text, &LocationColumns::default())
    }

    #[test]
    fn keys_by_city_and_state() {
        let outcome = load(&[
            r#""Austin","Austin","TX","Texas","48453","Travis","30.3005","-97.7522","1659251","1181""#,
        ]);

        let austin = outcome.dataset.get("Austin, TX").unwrap();
        assert_eq!(austin.fips, 48453);
        assert!((austin.latitude - 30.3005).abs() < f64::EPSILON);
        assert!((austin.longitude - -97.7522).abs() < f64::EPSILON);
        assert_eq!(austin.population, 1_659_251);
        assert_eq!(austin.density, 1181);
    }

    #[test]
    fn density_is_truncated() {
        let outcome = load(&["Reno,Reno,NV,Nevada,32031,Washoe,39.5,-119.8,264165,983.4"]);
        assert_eq!(outcome.dataset.get("Reno, NV").unwrap().density, 983);
    }

    #[test]
    fn bad_coordinates_drop_the_row() {
        let outcome = load(&[
            "Reno,Reno,NV,Nevada,32031,Washoe,north,-119.8,264165,983",
            "Boise,Boise,ID,Idaho,16001,Ada,43.6,-116.2,235684,1130",
        ]);

        assert_eq!(outcome.dataset.len(), 1);
        assert!(outcome.dataset.get("Reno, NV").is_none());
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn duplicate_city_state_keeps_first() {
        let outcome = load(&[
            "Reno,Reno,NV,Nevada,32031,Washoe,39.5,-119.8,264165,983",
            "Reno,Reno,NV,Nevada,32031,Washoe,0,0,1,1",
        ]);

        assert_eq!(outcome.dataset.get("Reno, NV").unwrap().population, 264_165);
        assert!(matches!(
            outcome.warnings[0],
            LoadWarning::DuplicateKey { line: 3, .. }
        ));
    }
}
