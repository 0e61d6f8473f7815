#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types served by the job insights query layer.
//!
//! A [`JoinedCity`] is the canonical map entity: city economics plus the
//! gazetteer coordinates for the same `"City, ST"` key. A
//! [`CompanyCityView`] is one company's presence in one located city.
//! Both can be placed on a map through [`MapLocation`].

pub mod color;
pub mod metric;

use job_insights_dataset_models::{CityEconomics, LocationInfo, split_city_key, state::state_name};
use serde::{Deserialize, Serialize};

pub use color::{ColorConfig, Rgb, ValueRange};
pub use metric::{CityMetric, CompanyCityMetric, CompanyMetric, MetricSelection};

/// Maximum number of items in a side-by-side comparison.
pub const MAX_COMPARISON_ITEMS: usize = 4;

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// City economics joined with the city's gazetteer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedCity {
    /// Dense 0-based id, stable only for one load.
    pub id: usize,
    /// `"City, ST"` key.
    pub name: String,
    /// Mean software developer salary adjusted for cost of living.
    pub mean_salary_adjusted: f64,
    /// Mean software developer salary, unadjusted.
    pub mean_salary_unadjusted: f64,
    /// Mean salary across all occupations, unadjusted.
    pub mean_salary_unadjusted_all_occupations: f64,
    /// Number of software jobs in the city.
    pub quantity_software_jobs: i64,
    /// Median home price.
    pub median_home_price: i64,
    /// Cost-of-living index.
    pub cost_of_living_average: f64,
    /// Average monthly rent.
    pub rent_average: f64,
    /// County FIPS code from the gazetteer.
    pub fips: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Population estimate.
    pub population: i64,
    /// Residents per square mile.
    pub density: i64,
}

impl JoinedCity {
    /// Combines a city's economics with its location under `id`.
    #[must_use]
    pub fn new(id: usize, economics: &CityEconomics, location: &LocationInfo) -> Self {
        Self {
            id,
            name: economics.name.clone(),
            mean_salary_adjusted: economics.mean_salary_adjusted,
            mean_salary_unadjusted: economics.mean_salary_unadjusted,
            mean_salary_unadjusted_all_occupations: economics
                .mean_salary_unadjusted_all_occupations,
            quantity_software_jobs: economics.quantity_software_jobs,
            median_home_price: economics.median_home_price,
            cost_of_living_average: economics.cost_of_living_average,
            rent_average: economics.rent_average,
            fips: location.fips,
            latitude: location.latitude,
            longitude: location.longitude,
            population: location.population,
            density: location.density,
        }
    }

    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Two-letter state id taken from the key.
    #[must_use]
    pub fn state_id(&self) -> Option<&str> {
        split_city_key(&self.name).map(|(_, state)| state)
    }

    /// Full state name, when the state id is a US state or DC.
    #[must_use]
    pub fn state_name(&self) -> Option<&'static str> {
        self.state_id().and_then(state_name)
    }

    /// Median home price divided by adjusted mean salary.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn home_price_to_salary_ratio(&self) -> Option<f64> {
        (self.mean_salary_adjusted > 0.0)
            .then(|| self.median_home_price as f64 / self.mean_salary_adjusted)
    }

    /// Software jobs per 1,000 residents.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn software_jobs_per_thousand(&self) -> Option<f64> {
        (self.population > 0)
            .then(|| self.quantity_software_jobs as f64 / self.population as f64 * 1000.0)
    }

    /// `ln(population) / ln(density)`; undefined unless both exceed 1.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn urbanization_score(&self) -> Option<f64> {
        (self.population > 1 && self.density > 1)
            .then(|| (self.population as f64).ln() / (self.density as f64).ln())
    }
}

/// One company's jobs in one located city.
///
/// Ids are assigned fresh per query result and carry no meaning across
/// queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCityView {
    /// Position in the query result.
    pub id: usize,
    /// Title-cased company name.
    pub company: String,
    /// `"City, ST"` key.
    pub city: String,
    /// Truncating average total yearly compensation in this city.
    pub average_total_comp: i64,
    /// Number of the company's jobs in this city.
    pub job_count: u64,
    /// Latitude of the city.
    pub latitude: f64,
    /// Longitude of the city.
    pub longitude: f64,
}

impl CompanyCityView {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Anything that can be pinned on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MapLocation {
    City(JoinedCity),
    CompanyCity(CompanyCityView),
}

impl MapLocation {
    #[must_use]
    pub const fn id(&self) -> usize {
        match self {
            Self::City(city) => city.id,
            Self::CompanyCity(view) => view.id,
        }
    }

    /// Display name: the `"City, ST"` key in both cases.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::City(city) => &city.name,
            Self::CompanyCity(view) => &view.city,
        }
    }

    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            Self::City(city) => city.coordinate(),
            Self::CompanyCity(view) => view.coordinate(),
        }
    }
}

impl From<JoinedCity> for MapLocation {
    fn from(city: JoinedCity) -> Self {
        Self::City(city)
    }
}

impl From<CompanyCityView> for MapLocation {
    fn from(view: CompanyCityView) -> Self {
        Self::CompanyCity(view)
    }
}

/// Company-wide compensation overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    /// Truncating average over every datapoint.
    pub average_total_comp: i64,
    pub min_total_comp: i64,
    pub max_total_comp: i64,
    /// `max_total_comp - min_total_comp`.
    pub comp_spread: i64,
    /// Level averages, highest first.
    pub levels: Vec<LevelAverage>,
    /// Number of distinct cities with at least one job.
    pub total_locations: usize,
    /// Number of datapoints.
    pub total_positions: usize,
    /// Number of distinct levels.
    pub unique_levels: usize,
}

/// Average compensation for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelAverage {
    pub level: String,
    pub average_total_comp: i64,
}

/// Whether a bigger value is the better one for a comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// How a comparison cell is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    Best,
    Worst,
    Neutral,
}

/// One value in a comparison row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonCell {
    /// Name of the compared item.
    pub item: String,
    pub value: f64,
    pub highlight: Highlight,
}

/// One metric compared across every selected item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub title: String,
    pub direction: Direction,
    pub cells: Vec<ComparisonCell>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn austin() -> JoinedCity {
        JoinedCity::new(
            3,
            &CityEconomics {
                name: "Austin, TX".to_string(),
                mean_salary_adjusted: 100_000.0,
                mean_salary_unadjusted: 120_000.0,
                mean_salary_unadjusted_all_occupations: 60_000.0,
                quantity_software_jobs: 20_000,
                median_home_price: 500_000,
                cost_of_living_average: 101.0,
                rent_average: 1800.0,
            },
            &LocationInfo {
                city: "Austin".to_string(),
                state_id: "TX".to_string(),
                fips: 48453,
                latitude: 30.3,
                longitude: -97.75,
                population: 1_000_000,
                density: 1000,
            },
        )
    }

    #[test]
    fn joins_economics_and_location() {
        let city = austin();
        assert_eq!(city.id, 3);
        assert_eq!(city.name, "Austin, TX");
        assert_eq!(city.fips, 48453);
        assert_eq!(city.state_id(), Some("TX"));
        assert_eq!(city.state_name(), Some("Texas"));
    }

    #[test]
    fn derived_ratios() {
        let city = austin();
        assert!((city.home_price_to_salary_ratio().unwrap() - 5.0).abs() < 1e-9);
        assert!((city.software_jobs_per_thousand().unwrap() - 20.0).abs() < 1e-9);
        assert!((city.urbanization_score().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn derived_ratios_guard_zero() {
        let mut city = austin();
        city.mean_salary_adjusted = 0.0;
        city.population = 0;
        city.density = 1;
        assert_eq!(city.home_price_to_salary_ratio(), None);
        assert_eq!(city.software_jobs_per_thousand(), None);
        assert_eq!(city.urbanization_score(), None);
    }

    #[test]
    fn map_location_shares_accessors() {
        let city: MapLocation = austin().into();
        let view: MapLocation = CompanyCityView {
            id: 0,
            company: "Apple".to_string(),
            city: "Austin, TX".to_string(),
            average_total_comp: 160_000,
            job_count: 2,
            latitude: 30.3,
            longitude: -97.75,
        }
        .into();

        assert_eq!(city.name(), view.name());
        assert_eq!(city.coordinate(), view.coordinate());
        assert_eq!(city.id(), 3);
        assert_eq!(view.id(), 0);
    }
}
