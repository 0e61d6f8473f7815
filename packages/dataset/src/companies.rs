//! Company salary loader.
//!
//! Rows are folded into a per-company [`CompanyAccumulator`] as they are
//! read. Once every row has been ingested, each accumulator is finished
//! exactly once into an immutable [`Company`] with its level and overall
//! averages filled in.

use std::collections::BTreeMap;

use job_insights_dataset_models::{
    CitySummary, Company, CompensationRecord, normalize_company_name,
};

use crate::config::CompanyColumns;
use crate::{LoadOutcome, ingest, key_field, truncated_field};

/// Companies keyed by title-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDataset {
    companies: BTreeMap<String, Company>,
}

impl CompanyDataset {
    /// Looks up a company. The name is title-cased before matching.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Company> {
        self.companies.get(&normalize_company_name(name))
    }

    /// Iterates companies in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Company> {
        self.companies.values()
    }

    /// Iterates company names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.companies.keys().map(String::as_str)
    }

    /// Number of companies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

impl FromIterator<Company> for CompanyDataset {
    fn from_iter<I: IntoIterator<Item = Company>>(iter: I) -> Self {
        Self {
            companies: iter
                .into_iter()
                .map(|company| (company.name.clone(), company))
                .collect(),
        }
    }
}

/// Raw per-company state while rows are still being read.
#[derive(Debug, Clone)]
pub struct CompanyAccumulator {
    name: String,
    comp_range: Option<(i64, i64)>,
    city_jobs: BTreeMap<String, Vec<CompensationRecord>>,
    city_summaries: BTreeMap<String, CitySummary>,
}

impl CompanyAccumulator {
    /// Starts an empty accumulator for `name` (already normalized).
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            comp_range: None,
            city_jobs: BTreeMap::new(),
            city_summaries: BTreeMap::new(),
        }
    }

    /// Folds one job into the running totals.
    pub fn record(&mut self, job: CompensationRecord) {
        let comp = job.total_yearly_comp;
        self.comp_range = Some(match self.comp_range {
            Some((min, max)) => (min.min(comp), max.max(comp)),
            None => (comp, comp),
        });

        self.city_summaries
            .entry(job.city.clone())
            .or_default()
            .record(comp);
        self.city_jobs.entry(job.city.clone()).or_default().push(job);
    }

    /// Computes the derived averages and freezes the company.
    ///
    /// The overall average is the sum of every record's compensation over
    /// the record count, never an average of partial averages.
    #[must_use]
    pub fn finish(self) -> Company {
        let mut by_level: BTreeMap<&str, CitySummary> = BTreeMap::new();
        let mut all_levels = CitySummary::default();

        for job in self.city_jobs.values().flatten() {
            by_level
                .entry(job.level.as_str())
                .or_default()
                .record(job.total_yearly_comp);
            all_levels.record(job.total_yearly_comp);
        }

        let avg_total_comp_by_level = by_level
            .into_iter()
            .filter_map(|(level, totals)| Some((level.to_string(), totals.average()?)))
            .collect();

        let (min_total_yearly_comp, max_total_yearly_comp) = self.comp_range.unwrap_or_default();

        Company {
            avg_total_comp_by_level,
            avg_total_comp_all_levels: all_levels.average().unwrap_or_default(),
            name: self.name,
            min_total_yearly_comp,
            max_total_yearly_comp,
            city_jobs: self.city_jobs,
            city_summaries: self.city_summaries,
        }
    }
}

/// Parses the company salary CSV.
///
/// Rows with the wrong field count, an empty company or city, or an
/// unparseable compensation are dropped. Company names are title-cased so
/// differently-cased spellings merge into one company.
#[must_use]
pub fn load_companies(text: &str, columns: &CompanyColumns) -> LoadOutcome<CompanyDataset> {
    let mut accumulators: BTreeMap<String, CompanyAccumulator> = BTreeMap::new();

    let (rows_loaded, warnings) = ingest("companies", text, |record| {
        let name = normalize_company_name(key_field(record, columns.company)?);
        let job = CompensationRecord {
            level: record.field(columns.level).to_string(),
            title: record.field(columns.title).to_string(),
            total_yearly_comp: truncated_field(record, columns.total_yearly_comp)?,
            city: key_field(record, columns.city)?.to_string(),
        };

        accumulators
            .entry(name)
            .or_insert_with_key(|name| CompanyAccumulator::new(name.clone()))
            .record(job);
        Ok(())
    });

    let dataset = accumulators
        .into_values()
        .map(CompanyAccumulator::finish)
        .collect();

    LoadOutcome {
        dataset,
        rows_loaded,
        warnings,
    }
}
