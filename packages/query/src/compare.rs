//! Side-by-side comparisons of up to [`MAX_COMPARISON_ITEMS`] items.

use job_insights_dataset_models::Company;
use job_insights_query_models::{
    ComparisonCell, ComparisonRow, CompanyCityView, Direction, Highlight, JoinedCity,
    MAX_COMPARISON_ITEMS,
};

use crate::QueryError;

/// Something that can be selected for comparison.
pub trait Comparable {
    /// Label shown above the item's column; also its identity within a set.
    fn comparison_label(&self) -> String;
}

impl Comparable for JoinedCity {
    fn comparison_label(&self) -> String {
        self.name.clone()
    }
}

impl Comparable for CompanyCityView {
    fn comparison_label(&self) -> String {
        format!("{} ({})", self.company, self.city)
    }
}

impl Comparable for Company {
    fn comparison_label(&self) -> String {
        self.name.clone()
    }
}

impl<T: Comparable + ?Sized> Comparable for &T {
    fn comparison_label(&self) -> String {
        (**self).comparison_label()
    }
}

/// An ordered selection of distinct items, at most [`MAX_COMPARISON_ITEMS`]
/// long.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSet<T> {
    items: Vec<T>,
}

impl<T> Default for ComparisonSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Comparable> ComparisonSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item`.
    ///
    /// # Errors
    ///
    /// * [`QueryError::AlreadySelected`] if an item with the same label is
    ///   already in the set
    /// * [`QueryError::ComparisonFull`] if the set already holds
    ///   [`MAX_COMPARISON_ITEMS`] items
    pub fn add(&mut self, item: T) -> Result<(), QueryError> {
        let label = item.comparison_label();
        if self.contains(&label) {
            return Err(QueryError::AlreadySelected(label));
        }
        if self.is_full() {
            return Err(QueryError::ComparisonFull {
                max: MAX_COMPARISON_ITEMS,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes the item labelled `label`, if present.
    pub fn remove(&mut self, label: &str) -> Option<T> {
        let position = self
            .items
            .iter()
            .position(|item| item.comparison_label() == label)?;
        Some(self.items.remove(position))
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.items.iter().any(|item| item.comparison_label() == label)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPARISON_ITEMS
    }
}

/// Builds one row, marking the extreme values.
///
/// The maximum is checked first, so when every value is equal each cell
/// takes the maximum's highlight.
#[allow(clippy::float_cmp)]
fn row<T: Comparable>(
    title: &str,
    direction: Direction,
    items: &[T],
    value: impl Fn(&T) -> f64,
) -> ComparisonRow {
    let values: Vec<f64> = items.iter().map(&value).collect();
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    let (at_max, at_min) = match direction {
        Direction::HigherIsBetter => (Highlight::Best, Highlight::Worst),
        Direction::LowerIsBetter => (Highlight::Worst, Highlight::Best),
    };

    let cells = items
        .iter()
        .zip(values)
        .map(|(item, value)| ComparisonCell {
            item: item.comparison_label(),
            value,
            highlight: if value == max {
                at_max
            } else if value == min {
                at_min
            } else {
                Highlight::Neutral
            },
        })
        .collect();

    ComparisonRow {
        title: title.to_string(),
        direction,
        cells,
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compare_cities(cities: &[JoinedCity]) -> Vec<ComparisonRow> {
    use Direction::{HigherIsBetter, LowerIsBetter};

    vec![
        row("Adjusted Mean Salary", HigherIsBetter, cities, |c| {
            c.mean_salary_adjusted
        }),
        row("Unadjusted Mean Salary", HigherIsBetter, cities, |c| {
            c.mean_salary_unadjusted
        }),
        row("Software Jobs", HigherIsBetter, cities, |c| {
            c.quantity_software_jobs as f64
        }),
        row("Median Home Price", LowerIsBetter, cities, |c| {
            c.median_home_price as f64
        }),
        row("Cost of Living", LowerIsBetter, cities, |c| {
            c.cost_of_living_average
        }),
        row("Average Rent", LowerIsBetter, cities, |c| c.rent_average),
        row("Population", HigherIsBetter, cities, |c| c.population as f64),
        row("Density", HigherIsBetter, cities, |c| c.density as f64),
    ]
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compare_company_cities(views: &[CompanyCityView]) -> Vec<ComparisonRow> {
    vec![
        row(
            "Average Total Yearly Comp",
            Direction::HigherIsBetter,
            views,
            |v| v.average_total_comp as f64,
        ),
        row("Number of Jobs", Direction::HigherIsBetter, views, |v| {
            v.job_count as f64
        }),
    ]
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compare_companies(companies: &[&Company]) -> Vec<ComparisonRow> {
    vec![
        row(
            "Average Total Compensation",
            Direction::HigherIsBetter,
            companies,
            |c| c.avg_total_comp_all_levels as f64,
        ),
        row("Total Datapoints", Direction::HigherIsBetter, companies, |c| {
            c.datapoint_count() as f64
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{company, joined_city};

    fn highlights(row: &ComparisonRow) -> Vec<Highlight> {
        row.cells.iter().map(|cell| cell.highlight).collect()
    }

    #[test]
    fn set_rejects_duplicates_and_overflow() {
        let mut set = ComparisonSet::new();
        set.add(joined_city(0, "Austin, TX", 1.0)).unwrap();
        assert!(matches!(
            set.add(joined_city(0, "Austin, TX", 1.0)),
            Err(QueryError::AlreadySelected(name)) if name == "Austin, TX"
        ));

        for (id, name) in ["Boise, ID", "Reno, NV", "Tulsa, OK"].into_iter().enumerate() {
            set.add(joined_city(id + 1, name, 1.0)).unwrap();
        }
        assert!(set.is_full());
        assert!(matches!(
            set.add(joined_city(9, "Omaha, NE", 1.0)),
            Err(QueryError::ComparisonFull { max: 4 })
        ));

        assert_eq!(set.remove("Reno, NV").unwrap().name, "Reno, NV");
        assert_eq!(set.len(), 3);
        assert!(set.remove("Reno, NV").is_none());
        set.add(joined_city(9, "Omaha, NE", 1.0)).unwrap();
    }

    #[test]
    fn higher_is_better_marks_extremes() {
        let cities = [
            joined_city(0, "Austin, TX", 300.0),
            joined_city(1, "Boise, ID", 200.0),
            joined_city(2, "Reno, NV", 100.0),
        ];
        let rows = compare_cities(&cities);

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].title, "Adjusted Mean Salary");
        assert_eq!(
            highlights(&rows[0]),
            vec![Highlight::Best, Highlight::Neutral, Highlight::Worst]
        );
    }

    #[test]
    fn lower_is_better_inverts_extremes() {
        let mut cheap = joined_city(0, "Boise, ID", 1.0);
        cheap.median_home_price = 200_000;
        let mut pricey = joined_city(1, "Austin, TX", 1.0);
        pricey.median_home_price = 800_000;

        let rows = compare_cities(&[cheap, pricey]);
        let home = rows.iter().find(|r| r.title == "Median Home Price").unwrap();
        assert_eq!(home.direction, Direction::LowerIsBetter);
        assert_eq!(highlights(home), vec![Highlight::Best, Highlight::Worst]);
    }

    #[test]
    fn ties_take_the_maximum_highlight() {
        let cities = [joined_city(0, "Austin, TX", 5.0), joined_city(1, "Boise, ID", 5.0)];
        let rows = compare_cities(&cities);

        assert_eq!(highlights(&rows[0]), vec![Highlight::Best, Highlight::Best]);
        let rent = rows.iter().find(|r| r.title == "Average Rent").unwrap();
        assert_eq!(highlights(rent), vec![Highlight::Worst, Highlight::Worst]);
    }

    #[test]
    fn companies_compare_on_average_and_datapoints() {
        let acme = company("Acme", &[("Austin, TX", 100), ("Austin, TX", 300)]);
        let initech = company("Initech", &[("Boise, ID", 500)]);

        let rows = compare_companies(&[&acme, &initech]);
        assert_eq!(rows[0].cells[0].item, "Acme");
        assert!((rows[0].cells[0].value - 200.0).abs() < f64::EPSILON);
        assert_eq!(highlights(&rows[0]), vec![Highlight::Worst, Highlight::Best]);
        assert_eq!(highlights(&rows[1]), vec![Highlight::Best, Highlight::Worst]);
    }

    #[test]
    fn company_city_labels_include_the_city() {
        let view = CompanyCityView {
            id: 0,
            company: "Acme".to_string(),
            city: "Austin, TX".to_string(),
            average_total_comp: 1,
            job_count: 1,
            latitude: 0.0,
            longitude: 0.0,
        };
        assert_eq!(view.comparison_label(), "Acme (Austin, TX)");
        let rows = compare_company_cities(std::slice::from_ref(&view));
        assert_eq!(highlights(&rows[1]), vec![Highlight::Best]);
    }
}
