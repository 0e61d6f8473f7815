#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record types for the three bundled datasets.
//!
//! City economics, US city locations, and per-company compensation records
//! are all keyed by the same `"City, ST"` string. Nothing here knows how
//! the records are parsed; see `job_insights_dataset` for the loaders.

pub mod state;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Builds the `"City, ST"` join key shared by every dataset.
#[must_use]
pub fn city_key(city: &str, state_id: &str) -> String {
    format!("{city}, {state_id}")
}

/// Splits a `"City, ST"` key into its city and state parts.
///
/// Returns `None` when the key has no `", "` separator.
#[must_use]
pub fn split_city_key(key: &str) -> Option<(&str, &str)> {
    key.rsplit_once(", ")
}

/// Title-cases a company name: the first letter of every whitespace
/// separated word is upper-cased and the rest lower-cased.
///
/// Applied at ingestion and to lookup queries so that `"GOOGLE"`,
/// `"google"` and `"Google"` all name the same company.
#[must_use]
pub fn normalize_company_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Integer average of `sum / count`, truncating toward zero.
///
/// Returns `None` for an empty set instead of dividing by zero.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn truncating_average(sum: i64, count: u64) -> Option<i64> {
    if count == 0 {
        None
    } else {
        Some(sum / count as i64)
    }
}

/// Economic statistics for software developers in one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityEconomics {
    /// Join key, e.g. `"Austin, TX"`.
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
}

/// Gazetteer entry for one US city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    /// City name without the state (e.g. `"Austin"`).
    pub city: String,
    /// Two-letter state abbreviation.
    pub state_id: String,
    /// County FIPS code.
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

impl LocationInfo {
    /// The `"City, ST"` key this location is indexed under.
    #[must_use]
    pub fn key(&self) -> String {
        city_key(&self.city, &self.state_id)
    }
}

/// A single salary datapoint for a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationRecord {
    /// Free-form level name (e.g. `"L4"`, `"Senior"`).
    pub level: String,
    /// Job title.
    pub title: String,
    /// Total yearly compensation.
    pub total_yearly_comp: i64,
    /// `"City, ST"` key of the job's location.
    pub city: String,
}

/// Sufficient statistics for one company's jobs in one city.
///
/// Only the running sum and count are stored; the average is always
/// computed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySummary {
    /// Sum of total yearly compensation over every job.
    pub total_yearly_comp: i64,
    /// Number of jobs.
    pub job_count: u64,
}

impl CitySummary {
    /// Folds one job's compensation into the summary. The sum saturates
    /// at the `i64` bounds.
    pub const fn record(&mut self, total_yearly_comp: i64) {
        self.total_yearly_comp = self.total_yearly_comp.saturating_add(total_yearly_comp);
        self.job_count += 1;
    }

    /// Truncating average compensation, or `None` with no jobs.
    #[must_use]
    pub const fn average(&self) -> Option<i64> {
        truncating_average(self.total_yearly_comp, self.job_count)
    }
}

/// All compensation data for one company.
///
/// Built by the company loader and never mutated afterwards. The per-level
/// and overall averages are computed once, after every row is ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Title-cased company name.
    pub name: String,
    /// Lowest total yearly compensation seen.
    pub min_total_yearly_comp: i64,
    /// Highest total yearly compensation seen.
    pub max_total_yearly_comp: i64,
    /// Every job, grouped by city key.
    pub city_jobs: BTreeMap<String, Vec<CompensationRecord>>,
    /// Running sum and count per city key.
    pub city_summaries: BTreeMap<String, CitySummary>,
    /// Truncating average compensation per level.
    pub avg_total_comp_by_level: BTreeMap<String, i64>,
    /// Truncating average compensation over every job.
    pub avg_total_comp_all_levels: i64,
}

impl Company {
    /// Total number of datapoints across all cities.
    #[must_use]
    pub fn datapoint_count(&self) -> u64 {
        self.city_summaries.values().map(|s| s.job_count).sum()
    }

    /// Difference between the highest and lowest compensation, saturating
    /// at `i64::MAX`.
    #[must_use]
    pub const fn comp_spread(&self) -> i64 {
        self.max_total_yearly_comp.saturating_sub(self.min_total_yearly_comp)
    }

    /// Level averages, highest first. Equal averages are ordered by level
    /// name so the output is deterministic.
    #[must_use]
    pub fn sorted_levels(&self) -> Vec<(String, i64)> {
        let mut levels: Vec<(String, i64)> = self
            .avg_total_comp_by_level
            .iter()
            .map(|(level, avg)| (level.clone(), *avg))
            .collect();

        levels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        levels
    }
}
