//! Selectable metrics.
//!
//! A metric names a numeric attribute used to sort results and to pick
//! colors. Each metric carries a fixed low/high color pair; the value range
//! the colors are spread over is computed from the loaded data.

use job_insights_dataset_models::{CitySummary, Company};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{CompanyCityView, JoinedCity, Rgb};

/// Metrics over joined cities.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CityMetric {
    /// Mean salary adjusted for cost of living.
    AdjustedSalary,
    /// Mean salary, unadjusted.
    UnadjustedSalary,
    /// Number of software jobs.
    SoftwareJobs,
    /// Median home price.
    HomePrice,
}

impl CityMetric {
    /// Every city metric, in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AdjustedSalary => "Adjusted Salary",
            Self::UnadjustedSalary => "Unadjusted Salary",
            Self::SoftwareJobs => "Software Jobs",
            Self::HomePrice => "Home Price",
        }
    }

    /// The metric's value for `city`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn value(self, city: &JoinedCity) -> f64 {
        match self {
            Self::AdjustedSalary => city.mean_salary_adjusted,
            Self::UnadjustedSalary => city.mean_salary_unadjusted,
            Self::SoftwareJobs => city.quantity_software_jobs as f64,
            Self::HomePrice => city.median_home_price as f64,
        }
    }

    /// Colors for the lowest and highest values.
    #[must_use]
    pub const fn color_pair(self) -> (Rgb, Rgb) {
        match self {
            Self::AdjustedSalary => (Rgb::LIGHT_GREEN, Rgb::DARK_GREEN),
            Self::UnadjustedSalary => (Rgb::LIGHT_BLUE, Rgb::DARK_BLUE),
            Self::SoftwareJobs => (Rgb::LIGHT_PURPLE, Rgb::DARK_PURPLE),
            Self::HomePrice => (Rgb::LIGHT_ORANGE, Rgb::DARK_ORANGE),
        }
    }
}

/// Metrics over one company's presence in one city.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CompanyCityMetric {
    /// Average total yearly compensation in the city.
    AverageTotalComp,
    /// Number of jobs in the city.
    JobCount,
}

impl CompanyCityMetric {
    /// Every company-city metric, in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AverageTotalComp => "Average Total Compensation",
            Self::JobCount => "Number of Jobs",
        }
    }

    /// The metric's value for a raw city summary. An empty summary averages
    /// to zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summary_value(self, summary: &CitySummary) -> f64 {
        match self {
            Self::AverageTotalComp => summary.average().unwrap_or_default() as f64,
            Self::JobCount => summary.job_count as f64,
        }
    }

    /// The metric's value for a company-city view.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn value(self, view: &CompanyCityView) -> f64 {
        match self {
            Self::AverageTotalComp => view.average_total_comp as f64,
            Self::JobCount => view.job_count as f64,
        }
    }

    #[must_use]
    pub const fn color_pair(self) -> (Rgb, Rgb) {
        match self {
            Self::AverageTotalComp => (Rgb::LIGHT_GREEN, Rgb::DARK_GREEN),
            Self::JobCount => (Rgb::LIGHT_BLUE, Rgb::DARK_BLUE),
        }
    }
}

/// Metrics for ranking whole companies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CompanyMetric {
    /// Average total compensation across all levels.
    AverageTotalComp,
    /// Total number of datapoints.
    Datapoints,
}

impl CompanyMetric {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AverageTotalComp => "Average Total Compensation",
            Self::Datapoints => "Number of Datapoints",
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self, company: &Company) -> f64 {
        match self {
            Self::AverageTotalComp => company.avg_total_comp_all_levels as f64,
            Self::Datapoints => company.datapoint_count() as f64,
        }
    }
}

/// The metric currently driving map colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "metric", rename_all = "camelCase")]
pub enum MetricSelection {
    City(CityMetric),
    CompanyCity(CompanyCityMetric),
}

impl MetricSelection {
    /// Every selection available in one browsing mode.
    #[must_use]
    pub fn all(company_mode: bool) -> Vec<Self> {
        if company_mode {
            CompanyCityMetric::iter().map(Self::CompanyCity).collect()
        } else {
            CityMetric::iter().map(Self::City).collect()
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::City(metric) => metric.title(),
            Self::CompanyCity(metric) => metric.title(),
        }
    }
}
