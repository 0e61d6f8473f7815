#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for browsing software job insights.
//!
//! Loads the three datasets once, builds the query catalog, and prints the
//! result of a single command as a table or, with `--json`, as JSON.

mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use job_insights_dataset::DatasetConfig;
use job_insights_dataset_models::Company;
use job_insights_query::{
    Catalog, ComparisonSet, DEFAULT_MIN_DATAPOINTS, QueryError, compare_cities,
    compare_companies, compare_company_cities,
};
use job_insights_query_models::{
    CityMetric, CompanyCityMetric, CompanyMetric, MapLocation, MetricSelection,
};

#[derive(Parser)]
#[command(name = "job_insights", about = "Software job insights by city and company")]
struct Cli {
    /// TOML file describing dataset file names and column layouts
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the dataset files (overrides the config's `data_dir`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List located cities ranked by a metric
    Cities {
        /// One of `ADJUSTED_SALARY`, `UNADJUSTED_SALARY`, `SOFTWARE_JOBS`, `HOME_PRICE`
        #[arg(long, default_value = "ADJUSTED_SALARY")]
        metric: CityMetric,
        /// Maximum number of cities to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Show one city by its "City, ST" name
    City {
        name: String,
    },
    /// List companies with enough datapoints, ranked by a metric
    Companies {
        /// One of `AVERAGE_TOTAL_COMP`, `DATAPOINTS`
        #[arg(long, default_value = "AVERAGE_TOTAL_COMP")]
        metric: CompanyMetric,
        /// Companies with this many datapoints or fewer are hidden
        #[arg(long, default_value_t = DEFAULT_MIN_DATAPOINTS)]
        min_datapoints: u64,
    },
    /// Show a company's compensation profile
    Company {
        name: String,
    },
    /// List the located cities where a company ranks highest
    CompanyCities {
        company: String,
        /// One of `AVERAGE_TOTAL_COMP`, `JOB_COUNT`
        #[arg(long, default_value = "AVERAGE_TOTAL_COMP")]
        metric: CompanyCityMetric,
        /// Maximum number of cities to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Search company names (case-insensitive substring)
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Compare 2 to 4 cities side by side
    CompareCities {
        #[arg(required = true, num_args = 2..=4)]
        names: Vec<String>,
    },
    /// Compare 2 to 4 companies side by side
    CompareCompanies {
        #[arg(required = true, num_args = 2..=4)]
        names: Vec<String>,
    },
    /// Compare one company's presence in 2 to 4 cities
    CompareCompanyCities {
        company: String,
        #[arg(required = true, num_args = 2..=4)]
        cities: Vec<String>,
    },
}

fn load_config(cli: &Cli) -> Result<DatasetConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DatasetConfig::from_path(path)?,
        None => DatasetConfig::embedded()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }
    Ok(config)
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    log::debug!("Loading datasets from {}", config.data_dir.display());
    let catalog = Catalog::load(&config);

    match cli.command {
        Commands::Cities { metric, limit } => {
            let cities = catalog.top_by_metric(metric, limit);
            if cli.json {
                output::print_json(&cities)?;
            } else {
                output::print_cities(&catalog, metric, &cities);
            }
        }
        Commands::City { name } => {
            let city = catalog.by_name(&name)?;
            if cli.json {
                output::print_json(city)?;
            } else {
                let color = catalog.color_for(
                    MetricSelection::City(CityMetric::AdjustedSalary),
                    &MapLocation::City(city.clone()),
                );
                output::print_city(city, color);
            }
        }
        Commands::Companies {
            metric,
            min_datapoints,
        } => {
            let companies = catalog.companies_above_threshold(metric, min_datapoints);
            let rows: Vec<output::CompanyRow> =
                companies.iter().map(|c| output::CompanyRow::new(c)).collect();
            if cli.json {
                output::print_json(&rows)?;
            } else {
                output::print_companies(&rows);
            }
        }
        Commands::Company { name } => {
            let profile = catalog.company_profile(&name)?;
            if cli.json {
                output::print_json(&profile)?;
            } else {
                output::print_profile(&profile);
            }
        }
        Commands::CompanyCities {
            company,
            metric,
            limit,
        } => {
            let views = catalog.top_company_cities(&company, metric, limit)?;
            if cli.json {
                output::print_json(&views)?;
            } else if views.is_empty() {
                println!("No located cities for {company}");
            } else {
                output::print_company_cities(&catalog, metric, &views);
            }
        }
        Commands::Search { query } => {
            let names = catalog.search_company_names(&query);
            if cli.json {
                output::print_json(&names)?;
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        Commands::CompareCities { names } => {
            let mut set = ComparisonSet::new();
            for name in &names {
                set.add(catalog.by_name(name)?.clone())?;
            }
            output::print_rows(&compare_cities(set.items()), cli.json)?;
        }
        Commands::CompareCompanies { names } => {
            let mut set: ComparisonSet<&Company> = ComparisonSet::new();
            for name in &names {
                set.add(catalog.company(name)?)?;
            }
            output::print_rows(&compare_companies(set.items()), cli.json)?;
        }
        Commands::CompareCompanyCities { company, cities } => {
            let views = catalog.top_company_cities(
                &company,
                CompanyCityMetric::AverageTotalComp,
                usize::MAX,
            )?;
            let mut set = ComparisonSet::new();
            for city in &cities {
                let view = views
                    .iter()
                    .find(|view| &view.city == city)
                    .ok_or_else(|| QueryError::CityNotFound(city.clone()))?;
                set.add(view.clone())?;
            }
            output::print_rows(&compare_company_cities(set.items()), cli.json)?;
        }
    }

    Ok(())
}
