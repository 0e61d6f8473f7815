//! Per-metric color scales built once per load.

use std::collections::HashMap;

use job_insights_dataset::CompanyDataset;
use job_insights_query_models::{
    CityMetric, ColorConfig, CompanyCityMetric, JoinedCity, MapLocation, MetricSelection, Rgb,
    ValueRange,
};

/// One [`ColorConfig`] per selectable metric.
///
/// City ranges span every joined city; company-city ranges span every city
/// summary of every company. Narrowing a view to a top-N subset never
/// changes a range, so colors stay comparable between views of the same
/// metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScales {
    city: HashMap<CityMetric, ColorConfig>,
    company_city: HashMap<CompanyCityMetric, ColorConfig>,
}

impl ColorScales {
    #[must_use]
    pub fn new(cities: &[JoinedCity], companies: &CompanyDataset) -> Self {
        let city = CityMetric::all()
            .into_iter()
            .map(|metric| {
                let range = ValueRange::from_values(cities.iter().map(|c| metric.value(c)));
                (metric, ColorConfig::new(metric.color_pair(), range))
            })
            .collect();

        let company_city = CompanyCityMetric::all()
            .into_iter()
            .map(|metric| {
                let range = ValueRange::from_values(
                    companies
                        .iter()
                        .flat_map(|company| company.city_summaries.values())
                        .map(|summary| metric.summary_value(summary)),
                );
                (metric, ColorConfig::new(metric.color_pair(), range))
            })
            .collect();

        Self { city, company_city }
    }

    #[must_use]
    pub fn city(&self, metric: CityMetric) -> Option<&ColorConfig> {
        self.city.get(&metric)
    }

    #[must_use]
    pub fn company_city(&self, metric: CompanyCityMetric) -> Option<&ColorConfig> {
        self.company_city.get(&metric)
    }

    /// Color of `location` under `selection`.
    ///
    /// A city metric applied to a company-city pin, or the reverse, is gray.
    #[must_use]
    pub fn color_for(&self, selection: MetricSelection, location: &MapLocation) -> Rgb {
        match (selection, location) {
            (MetricSelection::City(metric), MapLocation::City(city)) => self
                .city(metric)
                .map_or(Rgb::GRAY, |config| config.color_for(metric.value(city))),
            (MetricSelection::CompanyCity(metric), MapLocation::CompanyCity(view)) => self
                .company_city(metric)
                .map_or(Rgb::GRAY, |config| config.color_for(metric.value(view))),
            _ => Rgb::GRAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use job_insights_query_models::CompanyCityView;

    use super::*;
    use crate::fixtures::{company, joined_city};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn true_minimum_lands_inside_the_padded_range() {
        let cities = vec![joined_city(0, "Austin, TX", 100.0), joined_city(1, "Boise, ID", 200.0)];
        let scales = ColorScales::new(&cities, &CompanyDataset::default());

        let config = scales.city(CityMetric::AdjustedSalary).unwrap();
        let low = config.range.normalize(100.0);
        let high = config.range.normalize(200.0);
        assert!(close(low, 1.0 / 12.0));
        assert!(close(high, 11.0 / 12.0));
        assert!(low > 0.0 && high < 1.0);
    }

    #[test]
    fn mismatched_selection_is_gray() {
        let cities = vec![joined_city(0, "Austin, TX", 100.0)];
        let scales = ColorScales::new(&cities, &CompanyDataset::default());
        let location = MapLocation::City(cities[0].clone());

        let color = scales.color_for(
            MetricSelection::CompanyCity(CompanyCityMetric::JobCount),
            &location,
        );
        assert_eq!(color, Rgb::GRAY);
    }

    #[test]
    fn single_city_gets_midpoint_color() {
        let cities = vec![joined_city(0, "Austin, TX", 100.0)];
        let scales = ColorScales::new(&cities, &CompanyDataset::default());

        let color = scales.color_for(
            MetricSelection::City(CityMetric::AdjustedSalary),
            &MapLocation::City(cities[0].clone()),
        );
        assert_eq!(color, Rgb::LIGHT_GREEN.lerp(Rgb::DARK_GREEN, 0.5));
    }

    #[test]
    fn company_city_range_spans_every_company() {
        let companies: CompanyDataset = [
            company("Acme", &[("Austin, TX", 100), ("Austin, TX", 200)]),
            company("Initech", &[("Boise, ID", 300), ("Nowhere, ZZ", 500)]),
        ]
        .into_iter()
        .collect();
        let scales = ColorScales::new(&[], &companies);

        let comp = scales.company_city(CompanyCityMetric::AverageTotalComp).unwrap();
        // averages 150, 300, 500 padded by 35
        assert!(close(comp.range.min, 115.0));
        assert!(close(comp.range.max, 535.0));

        let jobs = scales.company_city(CompanyCityMetric::JobCount).unwrap();
        assert!(close(jobs.range.min, 0.9));
        assert!(close(jobs.range.max, 2.1));

        let view = CompanyCityView {
            id: 0,
            company: "Acme".to_string(),
            city: "Austin, TX".to_string(),
            average_total_comp: 535,
            job_count: 2,
            latitude: 0.0,
            longitude: 0.0,
        };
        assert_eq!(
            scales.color_for(
                MetricSelection::CompanyCity(CompanyCityMetric::AverageTotalComp),
                &MapLocation::CompanyCity(view),
            ),
            Rgb::DARK_GREEN
        );
    }
}
