//! City economics loader.

use std::collections::BTreeMap;

use job_insights_dataset_models::CityEconomics;

use crate::config::CityColumns;
use crate::{LoadOutcome, LoadWarning, float_field, ingest, key_field, truncated_field};

/// City economics keyed by `"City, ST"`, one record per city.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityDataset {
    cities: BTreeMap<String, CityEconomics>,
}

impl CityDataset {
    /// Looks up a city by its exact key.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CityEconomics> {
        self.cities.get(name)
    }

    /// Iterates cities in key order.
    pub fn iter(&self) -> impl Iterator<Item = &CityEconomics> {
        self.cities.values()
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl FromIterator<CityEconomics> for CityDataset {
    fn from_iter<I: IntoIterator<Item = CityEconomics>>(iter: I) -> Self {
        Self {
            cities: iter
                .into_iter()
                .map(|city| (city.name.clone(), city))
                .collect(),
        }
    }
}

/// Parses the city economics CSV.
///
/// Rows with the wrong field count, an empty city name, or an unparseable
/// number are dropped. A repeated city name keeps the first row.
#[must_use]
pub fn load_cities(text: &str, columns: &CityColumns) -> LoadOutcome<CityDataset> {
    let mut cities = BTreeMap::new();

    let (rows_loaded, warnings) = ingest("cities", text, |record| {
        let name = key_field(record, columns.city_name)?;

        let city = CityEconomics {
            name: name.to_string(),
            mean_salary_adjusted: float_field(record, columns.mean_salary_adjusted)?,
            mean_salary_unadjusted: float_field(record, columns.mean_salary_unadjusted)?,
            mean_salary_unadjusted_all_occupations: float_field(
                record,
                columns.mean_salary_unadjusted_all_occupations,
            )?,
            quantity_software_jobs: truncated_field(record, columns.quantity_software_jobs)?,
            median_home_price: truncated_field(record, columns.median_home_price)?,
            cost_of_living_average: float_field(record, columns.cost_of_living_average)?,
            rent_average: float_field(record, columns.rent_average)?,
        };

        if cities.contains_key(name) {
            return Err(LoadWarning::DuplicateKey {
                line: record.line,
                key: name.to_string(),
            });
        }

        cities.insert(city.name.clone(), city);
        Ok(())
    });

    LoadOutcome {
        dataset: CityDataset { cities },
        rows_loaded,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use job_insights_csv::RowError;

    use super::*;

    const HEADER: &str = "id,state,adj,unadj,all,jobs,home,city,col,rent";

    fn load(rows: &[&str]) -> LoadOutcome<CityDataset> {
        let text = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        load_cities(&text, &CityColumns::default())
    }

    #[test]
    fn parses_city_row_by_column_index() {
        let outcome = load(&[
            r#"x,x,150000.4,180000.6,90000,50000,800000,"Austin, TX",102.3,2200.7"#,
        ]);

        assert!(outcome.warnings.is_empty());
        let city = outcome.dataset.get("Austin, TX").unwrap();
        assert!((city.mean_salary_adjusted - 150_000.4).abs() < f64::EPSILON);
        assert!((city.mean_salary_unadjusted - 180_000.6).abs() < f64::EPSILON);
        assert_eq!(city.quantity_software_jobs, 50_000);
        assert_eq!(city.median_home_price, 800_000);
        assert!((city.cost_of_living_average - 102.3).abs() < f64::EPSILON);
        assert!((city.rent_average - 2200.7).abs() < f64::EPSILON);
    }

    #[test]
    fn integer_metrics_truncate() {
        let outcome = load(&[r#"x,x,1,1,1,123.9,456789.99,"Reno, NV",1,1"#]);
        let city = outcome.dataset.get("Reno, NV").unwrap();
        assert_eq!(city.quantity_software_jobs, 123);
        assert_eq!(city.median_home_price, 456_789);
    }

    #[test]
    fn drops_rows_with_wrong_field_count() {
        let outcome = load(&[
            r#"x,x,1,1,1,1,1,"Reno, NV",1"#,
            r#"x,x,1,1,1,1,1,"Boise, ID",1,1"#,
        ]);

        assert_eq!(outcome.rows_loaded, 1);
        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(
            outcome.warnings,
            vec![LoadWarning::Row(RowError::FieldCount {
                line: 2,
                expected: 10,
                found: 9,
            })]
        );
    }

    #[test]
    fn bad_number_drops_only_that_row() {
        let outcome = load(&[
            r#"x,x,oops,1,1,1,1,"Reno, NV",1,1"#,
            r#"x,x,1,1,1,1,1,"Boise, ID",1,1"#,
        ]);

        assert!(outcome.dataset.get("Reno, NV").is_none());
        assert!(outcome.dataset.get("Boise, ID").is_some());
        assert!(matches!(
            outcome.warnings[0],
            LoadWarning::InvalidNumber {
                line: 2,
                column: 2,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_city_keeps_first() {
        let outcome = load(&[
            r#"x,x,1,1,1,1,1,"Reno, NV",1,1"#,
            r#"x,x,2,2,2,2,2,"Reno, NV",2,2"#,
        ]);

        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(outcome.dataset.get("Reno, NV").unwrap().median_home_price, 1);
        assert_eq!(
            outcome.warnings,
            vec![LoadWarning::DuplicateKey {
                line: 3,
                key: "Reno, NV".to_string(),
            }]
        );
    }

    #[test]
    fn reloading_is_idempotent() {
        let rows = [
            r#"x,x,1,1,1,1,1,"Reno, NV",1,1"#,
            "broken,row",
            r#"x,x,3,3,3,3,3,"Boise, ID",3,3"#,
        ];
        assert_eq!(load(&rows), load(&rows));
    }
}
