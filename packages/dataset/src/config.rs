//! Dataset file locations and column layouts.
//!
//! The defaults mirror the bundled fixture files and are embedded at compile
//! time from `config/default.toml`. Every table may be partially overridden:
//! missing keys fall back to the defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::DatasetError;

/// The embedded default configuration.
const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Where the three datasets live and how their columns are laid out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory the dataset file names are resolved against.
    pub data_dir: PathBuf,
    /// City economics CSV.
    pub cities: DatasetFile<CityColumns>,
    /// Company salary CSV.
    pub companies: DatasetFile<CompanyColumns>,
    /// US cities gazetteer CSV.
    pub locations: DatasetFile<LocationColumns>,
}

/// One dataset file and its column layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetFile<C> {
    /// File name relative to [`DatasetConfig::data_dir`].
    pub file: PathBuf,
    /// Column indexes to read.
    #[serde(default)]
    pub columns: C,
}

/// Column indexes for the city economics CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CityColumns {
    pub mean_salary_adjusted: usize,
    pub mean_salary_unadjusted: usize,
    pub mean_salary_unadjusted_all_occupations: usize,
    pub quantity_software_jobs: usize,
    pub median_home_price: usize,
    pub city_name: usize,
    pub cost_of_living_average: usize,
    pub rent_average: usize,
}

impl Default for CityColumns {
    fn default() -> Self {
        Self {
            mean_salary_adjusted: 2,
            mean_salary_unadjusted: 3,
            mean_salary_unadjusted_all_occupations: 4,
            quantity_software_jobs: 5,
            median_home_price: 6,
            city_name: 7,
            cost_of_living_average: 8,
            rent_average: 9,
        }
    }
}

/// Column indexes for the company salary CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanyColumns {
    pub company: usize,
    pub level: usize,
    pub title: usize,
    pub total_yearly_comp: usize,
    pub city: usize,
}

impl Default for CompanyColumns {
    fn default() -> Self {
        Self {
            company: 1,
            level: 2,
            title: 3,
            total_yearly_comp: 4,
            city: 5,
        }
    }
}

/// Column indexes for the US cities gazetteer CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocationColumns {
    pub city: usize,
    pub state_id: usize,
    pub fips: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub population: usize,
    pub density: usize,
}

impl Default for LocationColumns {
    fn default() -> Self {
        Self {
            city: 0,
            state_id: 2,
            fips: 4,
            latitude: 6,
            longitude: 7,
            population: 8,
            density: 9,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cities: DatasetFile {
                file: PathBuf::from("SoftwareDeveloperIncomeExpensesperUSACity.csv"),
                columns: CityColumns::default(),
            },
            companies: DatasetFile {
                file: PathBuf::from("Levels_Fyi_Salary_Data.csv"),
                columns: CompanyColumns::default(),
            },
            locations: DatasetFile {
                file: PathBuf::from("uscities.csv"),
                columns: LocationColumns::default(),
            },
        }
    }
}

impl DatasetConfig {
    /// Parses the configuration embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Config`] if the embedded TOML is malformed.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Config`] if the TOML is malformed.
    pub fn from_toml_str(toml: &str) -> Result<Self, DatasetError> {
        Ok(toml::de::from_str(toml)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ResourceUnavailable`] if the file cannot be
    /// read, or [`DatasetError::Config`] if it is malformed.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let text = crate::read_resource(path)?;
        Self::from_toml_str(&text)
    }

    /// Full path of the city economics CSV.
    #[must_use]
    pub fn cities_path(&self) -> PathBuf {
        self.data_dir.join(&self.cities.file)
    }

    /// Full path of the company salary CSV.
    #[must_use]
    pub fn companies_path(&self) -> PathBuf {
        self.data_dir.join(&self.companies.file)
    }

    /// Full path of the US cities gazetteer CSV.
    #[must_use]
    pub fn locations_path(&self) -> PathBuf {
        self.data_dir.join(&self.locations.file)
    }
}
