//! Table and JSON rendering for command results.

use job_insights_dataset_models::Company;
use job_insights_query::Catalog;
use job_insights_query_models::{
    CityMetric, CompanyCityMetric, CompanyCityView, CompanyProfile, ComparisonRow, Highlight,
    JoinedCity, MapLocation, MetricSelection, Rgb,
};
use serde::Serialize;

/// Compact company listing; the full [`Company`] carries every datapoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub name: String,
    pub average_total_comp: i64,
    pub datapoints: u64,
}

impl CompanyRow {
    #[must_use]
    pub fn new(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            average_total_comp: company.avg_total_comp_all_levels,
            datapoints: company.datapoint_count(),
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Whole numbers print without decimals, anything else with one.
#[allow(clippy::float_cmp)]
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

const fn marker(highlight: Highlight) -> &'static str {
    match highlight {
        Highlight::Best => "+",
        Highlight::Worst => "-",
        Highlight::Neutral => " ",
    }
}

pub fn print_cities(catalog: &Catalog, metric: CityMetric, cities: &[JoinedCity]) {
    println!("{:<28} {:>16} COLOR", "CITY", metric.title().to_uppercase());
    println!("{}", "-".repeat(55));
    for city in cities {
        let color = catalog.color_for(
            MetricSelection::City(metric),
            &MapLocation::City(city.clone()),
        );
        println!(
            "{:<28} {:>16} {}",
            city.name,
            format_value(metric.value(city)),
            color.to_hex()
        );
    }
}

pub fn print_city(city: &JoinedCity, color: Rgb) {
    println!("{}", city.name);
    if let Some(state) = city.state_name() {
        println!("  State:                  {state}");
    }
    println!("  Adjusted mean salary:   {:.0}", city.mean_salary_adjusted);
    println!("  Unadjusted mean salary: {:.0}", city.mean_salary_unadjusted);
    println!(
        "  All occupations salary: {:.0}",
        city.mean_salary_unadjusted_all_occupations
    );
    println!("  Software jobs:          {}", city.quantity_software_jobs);
    println!("  Median home price:      {}", city.median_home_price);
    println!("  Cost of living:         {:.1}", city.cost_of_living_average);
    println!("  Average rent:           {:.0}", city.rent_average);
    println!("  Population:             {}", city.population);
    println!("  Density:                {}", city.density);
    println!(
        "  Coordinates:            {:.4}, {:.4}",
        city.latitude, city.longitude
    );
    if let Some(ratio) = city.home_price_to_salary_ratio() {
        println!("  Home price / salary:    {ratio:.2}");
    }
    if let Some(per_thousand) = city.software_jobs_per_thousand() {
        println!("  Jobs per 1,000:         {per_thousand:.2}");
    }
    if let Some(score) = city.urbanization_score() {
        println!("  Urbanization score:     {score:.2}");
    }
    println!("  Salary color:           {}", color.to_hex());
}

pub fn print_companies(rows: &[CompanyRow]) {
    println!("{:<32} {:>14} {:>10}", "COMPANY", "AVG COMP", "DATAPOINTS");
    println!("{}", "-".repeat(58));
    for row in rows {
        println!(
            "{:<32} {:>14} {:>10}",
            row.name, row.average_total_comp, row.datapoints
        );
    }
}

pub fn print_profile(profile: &CompanyProfile) {
    println!("{}", profile.name);
    println!("  Average total comp: {}", profile.average_total_comp);
    println!(
        "  Range:              {} - {} (spread {})",
        profile.min_total_comp, profile.max_total_comp, profile.comp_spread
    );
    println!("  Locations:          {}", profile.total_locations);
    println!("  Positions:          {}", profile.total_positions);
    println!("  Levels:             {}", profile.unique_levels);
    println!();
    println!("  {:<24} {:>14}", "LEVEL", "AVG COMP");
    for level in &profile.levels {
        println!("  {:<24} {:>14}", level.level, level.average_total_comp);
    }
}

pub fn print_company_cities(
    catalog: &Catalog,
    metric: CompanyCityMetric,
    views: &[CompanyCityView],
) {
    println!("{:<28} {:>14} {:>6} COLOR", "CITY", "AVG COMP", "JOBS");
    println!("{}", "-".repeat(58));
    for view in views {
        let color = catalog.color_for(
            MetricSelection::CompanyCity(metric),
            &MapLocation::CompanyCity(view.clone()),
        );
        println!(
            "{:<28} {:>14} {:>6} {}",
            view.city,
            view.average_total_comp,
            view.job_count,
            color.to_hex()
        );
    }
}

/// Prints comparison rows; `+` marks the best value and `-` the worst.
pub fn print_rows(rows: &[ComparisonRow], json: bool) -> Result<(), serde_json::Error> {
    if json {
        return print_json(rows);
    }

    let Some(first) = rows.first() else {
        return Ok(());
    };

    print!("{:<28}", "");
    for cell in &first.cells {
        print!(" {:>24}", cell.item);
    }
    println!();

    for row in rows {
        print!("{:<28}", row.title);
        for cell in &row.cells {
            print!(
                " {:>23}{}",
                format_value(cell.value),
                marker(cell.highlight)
            );
        }
        println!();
    }

    Ok(())
}
