#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loaders for the three bundled datasets.
//!
//! Each loader takes the raw text of one CSV file and returns a keyed,
//! immutable dataset together with the warnings collected while reading it.
//! Malformed rows are dropped and reported, never fatal. Only a missing or
//! unreadable file is an error, and [`Datasets::load`] degrades that to an
//! empty dataset so the rest of the system keeps working.

pub mod cities;
pub mod companies;
pub mod config;
pub mod locations;

use std::path::{Path, PathBuf};

use job_insights_csv::{Reader, Record, RowError};
use thiserror::Error;

pub use cities::{CityDataset, load_cities};
pub use companies::{CompanyDataset, load_companies};
pub use config::DatasetConfig;
pub use locations::{LocationDataset, load_locations};

/// Errors that can occur while reading dataset resources.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required input file could not be located or read.
    #[error("Resource unavailable: {path}: {source}")]
    ResourceUnavailable {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// A row that was dropped during a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    /// The row's field count differs from the header's.
    #[error(transparent)]
    Row(#[from] RowError),

    /// A numeric column could not be parsed.
    #[error("line {line}: column {column} is not a number: {value:?}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Column index.
        column: usize,
        /// The offending text.
        value: String,
    },

    /// A key column was empty.
    #[error("line {line}: column {column} is empty")]
    EmptyKey {
        /// 1-based line number.
        line: usize,
        /// Column index.
        column: usize,
    },

    /// A key that must be unique appeared again; the first record is kept.
    #[error("line {line}: duplicate key {key:?}")]
    DuplicateKey {
        /// 1-based line number of the repeat.
        line: usize,
        /// The repeated key.
        key: String,
    },
}

/// Result of loading one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome<T> {
    /// The keyed dataset.
    pub dataset: T,
    /// Number of rows that made it into the dataset.
    pub rows_loaded: usize,
    /// Every dropped row, in file order.
    pub warnings: Vec<LoadWarning>,
}

/// Reads a resource file into memory.
///
/// # Errors
///
/// Returns [`DatasetError::ResourceUnavailable`] if the file cannot be read.
pub fn read_resource(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs `ingest_row` over every data row of `text`, collecting warnings.
///
/// Rows rejected by the reader or by `ingest_row` are logged and skipped.
/// Returns the number of rows accepted and the warnings.
fn ingest<F>(label: &str, text: &str, mut ingest_row: F) -> (usize, Vec<LoadWarning>)
where
    F: FnMut(&Record) -> Result<(), LoadWarning>,
{
    let mut loaded = 0;
    let mut warnings = Vec::new();

    for row in Reader::new(text) {
        let result = row
            .map_err(LoadWarning::from)
            .and_then(|record| ingest_row(&record));

        match result {
            Ok(()) => loaded += 1,
            Err(warning) => {
                log::warn!("{label}: dropping row: {warning}");
                warnings.push(warning);
            }
        }
    }

    log::info!(
        "{label}: loaded {loaded} row(s), dropped {}",
        warnings.len()
    );

    (loaded, warnings)
}

/// Reads a required non-empty text column.
fn key_field(record: &Record, column: usize) -> Result<&str, LoadWarning> {
    let value = record.field(column);
    if value.is_empty() {
        return Err(LoadWarning::EmptyKey {
            line: record.line,
            column,
        });
    }
    Ok(value)
}

/// Parses a floating point column. Non-finite values are rejected.
fn float_field(record: &Record, column: usize) -> Result<f64, LoadWarning> {
    let value = record.field(column);
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadWarning::InvalidNumber {
            line: record.line,
            column,
            value: value.to_string(),
        })
}

/// Parses a column as floating point and truncates it toward zero.
///
/// Values outside the `i64` range are rejected rather than saturated.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncated_field(record: &Record, column: usize) -> Result<i64, LoadWarning> {
    let value = float_field(record, column)?.trunc();
    if (i64::MIN as f64..i64::MAX as f64).contains(&value) {
        Ok(value as i64)
    } else {
        Err(LoadWarning::InvalidNumber {
            line: record.line,
            column,
            value: record.field(column).to_string(),
        })
    }
}

/// The three datasets loaded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    /// City economics keyed by `"City, ST"`.
    pub cities: CityDataset,
    /// Companies keyed by title-cased name.
    pub companies: CompanyDataset,
    /// Gazetteer entries keyed by `"City, ST"`.
    pub locations: LocationDataset,
}

impl Datasets {
    /// Loads every dataset named by `config`.
    ///
    /// A file that cannot be read is logged and replaced by an empty
    /// dataset; queries against it then return empty results.
    #[must_use]
    pub fn load(config: &DatasetConfig) -> Self {
        let cities = load_or_empty(&config.cities_path(), |text| {
            load_cities(text, &config.cities.columns).dataset
        });
        let companies = load_or_empty(&config.companies_path(), |text| {
            load_companies(text, &config.companies.columns).dataset
        });
        let locations = load_or_empty(&config.locations_path(), |text| {
            load_locations(text, &config.locations.columns).dataset
        });

        Self {
            cities,
            companies,
            locations,
        }
    }

    /// Loads every dataset from in-memory text using `config`'s layouts.
    #[must_use]
    pub fn from_texts(
        config: &DatasetConfig,
        cities: &str,
        companies: &str,
        locations: &str,
    ) -> Self {
        Self {
            cities: load_cities(cities, &config.cities.columns).dataset,
            companies: load_companies(companies, &config.companies.columns).dataset,
            locations: load_locations(locations, &config.locations.columns).dataset,
        }
    }
}

fn load_or_empty<T: Default>(path: &Path, load: impl FnOnce(&str) -> T) -> T {
    match read_resource(path) {
        Ok(text) => load(&text),
        Err(e) => {
            log::error!("{e}; continuing with an empty dataset");
            T::default()
        }
    }
}
