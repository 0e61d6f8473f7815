#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query layer over the loaded job insight datasets.
//!
//! [`Catalog`] is the single owner of everything derived from one load: the
//! joined city list, the company map, and the per-metric color scales. It
//! is fully built by [`Catalog::new`] and read-only afterwards, so every
//! query is a pure function of the catalog and its arguments.

pub mod color;
pub mod compare;
pub mod join;

use job_insights_dataset::{CompanyDataset, DatasetConfig, Datasets};
use job_insights_dataset_models::Company;
use job_insights_query_models::{
    CityMetric, CompanyCityMetric, CompanyCityView, CompanyMetric, CompanyProfile, JoinedCity,
    LevelAverage, MapLocation, MetricSelection, Rgb,
};
use thiserror::Error;

pub use color::ColorScales;
pub use compare::{
    Comparable, ComparisonSet, compare_cities, compare_companies, compare_company_cities,
};
pub use join::{JoinedCities, join};

/// Companies with this many datapoints or fewer are left out of general
/// browsing.
pub const DEFAULT_MIN_DATAPOINTS: u64 = 20;

/// Errors returned by catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No located city has this `"City, ST"` key.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// No company has this name.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// The comparison set has no room left.
    #[error("Comparison is full ({max} items)")]
    ComparisonFull {
        /// Capacity of the set.
        max: usize,
    },

    /// The item is already part of the comparison.
    #[error("Already selected: {0}")]
    AlreadySelected(String),
}

/// Everything derived from one load of the datasets.
#[derive(Debug, Clone)]
pub struct Catalog {
    cities: JoinedCities,
    companies: CompanyDataset,
    colors: ColorScales,
}

impl Catalog {
    /// Joins the datasets and builds the color scales.
    #[must_use]
    pub fn new(datasets: Datasets) -> Self {
        let cities = join(&datasets.cities, &datasets.locations);
        let colors = ColorScales::new(cities.as_slice(), &datasets.companies);

        log::info!(
            "catalog: {} located cities, {} companies",
            cities.len(),
            datasets.companies.len()
        );

        Self {
            cities,
            companies: datasets.companies,
            colors,
        }
    }

    /// Loads the datasets named by `config` and builds a catalog from them.
    ///
    /// Unreadable files leave the matching dataset empty.
    #[must_use]
    pub fn load(config: &DatasetConfig) -> Self {
        Self::new(Datasets::load(config))
    }

    /// Every located city in id order.
    #[must_use]
    pub fn cities(&self) -> &[JoinedCity] {
        self.cities.as_slice()
    }

    /// Every company, keyed by title-cased name.
    #[must_use]
    pub const fn companies(&self) -> &CompanyDataset {
        &self.companies
    }

    /// Color scales built for this load.
    #[must_use]
    pub const fn colors(&self) -> &ColorScales {
        &self.colors
    }

    /// Color of `location` under `selection`.
    #[must_use]
    pub fn color_for(&self, selection: MetricSelection, location: &MapLocation) -> Rgb {
        self.colors.color_for(selection, location)
    }

    /// The `n` cities with the highest `metric`, highest first.
    ///
    /// Equal values keep their id order. Asking for more cities than exist
    /// returns all of them.
    #[must_use]
    pub fn top_by_metric(&self, metric: CityMetric, n: usize) -> Vec<JoinedCity> {
        let mut cities = self.cities.as_slice().to_vec();
        cities.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
        cities.truncate(n);
        cities
    }

    /// Looks up a located city by its exact `"City, ST"` key.
    ///
    /// # Errors
    ///
    /// * [`QueryError::CityNotFound`] if no located city has that key
    pub fn by_name(&self, name: &str) -> Result<&JoinedCity, QueryError> {
        self.cities
            .get(name)
            .ok_or_else(|| QueryError::CityNotFound(name.to_string()))
    }

    /// Looks up a company; the name is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// * [`QueryError::CompanyNotFound`] if no company has that name
    pub fn company(&self, name: &str) -> Result<&Company, QueryError> {
        self.companies
            .get(name)
            .ok_or_else(|| QueryError::CompanyNotFound(name.to_string()))
    }

    /// The `n` located cities where `company` ranks highest by `metric`.
    ///
    /// Cities without a location are skipped. Result ids are assigned fresh
    /// for this call. A known company with no located cities yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// * [`QueryError::CompanyNotFound`] if no company has that name
    pub fn top_company_cities(
        &self,
        company: &str,
        metric: CompanyCityMetric,
        n: usize,
    ) -> Result<Vec<CompanyCityView>, QueryError> {
        let company = self.company(company)?;

        let mut located: Vec<_> = company
            .city_summaries
            .iter()
            .filter_map(|(name, summary)| Some((self.cities.get(name)?, summary)))
            .collect();

        located.sort_by(|(_, a), (_, b)| {
            metric
                .summary_value(b)
                .total_cmp(&metric.summary_value(a))
        });

        Ok(located
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(id, (city, summary))| CompanyCityView {
                id,
                company: company.name.clone(),
                city: city.name.clone(),
                average_total_comp: summary.average().unwrap_or_default(),
                job_count: summary.job_count,
                latitude: city.latitude,
                longitude: city.longitude,
            })
            .collect())
    }

    /// Companies with more than `min_datapoints` datapoints, highest
    /// `metric` first. Equal values keep name order.
    #[must_use]
    pub fn companies_above_threshold(
        &self,
        metric: CompanyMetric,
        min_datapoints: u64,
    ) -> Vec<&Company> {
        let mut companies: Vec<&Company> = self
            .companies
            .iter()
            .filter(|company| company.datapoint_count() > min_datapoints)
            .collect();

        companies.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
        companies
    }

    /// [`Self::companies_above_threshold`] with [`DEFAULT_MIN_DATAPOINTS`].
    #[must_use]
    pub fn browsable_companies(&self, metric: CompanyMetric) -> Vec<&Company> {
        self.companies_above_threshold(metric, DEFAULT_MIN_DATAPOINTS)
    }

    /// Company names containing `query`, ignoring case, in name order.
    ///
    /// An empty query matches every company. Whitespace is matched
    /// literally, like any other character.
    #[must_use]
    pub fn search_company_names(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.companies
            .names()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Average total compensation over every datapoint of `company`.
    ///
    /// # Errors
    ///
    /// * [`QueryError::CompanyNotFound`] if no company has that name
    pub fn nationwide_average(&self, company: &str) -> Result<i64, QueryError> {
        Ok(self.company(company)?.avg_total_comp_all_levels)
    }

    /// Number of datapoints recorded for `company`.
    ///
    /// # Errors
    ///
    /// * [`QueryError::CompanyNotFound`] if no company has that name
    pub fn datapoint_count(&self, company: &str) -> Result<u64, QueryError> {
        Ok(self.company(company)?.datapoint_count())
    }

    /// Company-wide compensation overview.
    ///
    /// # Errors
    ///
    /// * [`QueryError::CompanyNotFound`] if no company has that name
    pub fn company_profile(&self, company: &str) -> Result<CompanyProfile, QueryError> {
        let company = self.company(company)?;

        Ok(CompanyProfile {
            name: company.name.clone(),
            average_total_comp: company.avg_total_comp_all_levels,
            min_total_comp: company.min_total_yearly_comp,
            max_total_comp: company.max_total_yearly_comp,
            comp_spread: company.comp_spread(),
            levels: company
                .sorted_levels()
                .into_iter()
                .map(|(level, average_total_comp)| LevelAverage {
                    level,
                    average_total_comp,
                })
                .collect(),
            total_locations: company.city_summaries.len(),
            total_positions: company.city_jobs.values().map(Vec::len).sum(),
            unique_levels: company.avg_total_comp_by_level.len(),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use job_insights_dataset::companies::CompanyAccumulator;
    use job_insights_dataset_models::{
        CityEconomics, Company, CompensationRecord, LocationInfo, split_city_key,
    };
    use job_insights_query_models::JoinedCity;

    pub fn economics(name: &str, adjusted: f64) -> CityEconomics {
        CityEconomics {
            name: name.to_string(),
            mean_salary_adjusted: adjusted,
            mean_salary_unadjusted: adjusted,
            mean_salary_unadjusted_all_occupations: adjusted / 2.0,
            quantity_software_jobs: 100,
            median_home_price: 300_000,
            cost_of_living_average: 100.0,
            rent_average: 1500.0,
        }
    }

    pub fn location(city: &str, state_id: &str) -> LocationInfo {
        LocationInfo {
            city: city.to_string(),
            state_id: state_id.to_string(),
            fips: 1,
            latitude: 40.0,
            longitude: -100.0,
            population: 100_000,
            density: 1000,
        }
    }

    pub fn joined_city(id: usize, name: &str, adjusted: f64) -> JoinedCity {
        let (city, state_id) = split_city_key(name).unwrap();
        JoinedCity::new(id, &economics(name, adjusted), &location(city, state_id))
    }

    /// A company with one `L3` job per `(city, comp)` pair.
    pub fn company(name: &str, jobs: &[(&str, i64)]) -> Company {
        let mut accumulator = CompanyAccumulator::new(name.to_string());
        for &(city, total_yearly_comp) in jobs {
            accumulator.record(CompensationRecord {
                level: "L3".to_string(),
                title: "SWE".to_string(),
                total_yearly_comp,
                city: city.to_string(),
            });
        }
        accumulator.finish()
    }
}
