use std::path::Path;

use crate::data::aggregate::aggregate;
use crate::data::export::export_csv;
use crate::data::filter::filter_records;
use crate::data::model::{Bucket, ClimateDataset, FilterSpec, MetricSpec, PeriodType};

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Everything the user can change that affects the result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisConfig {
    pub filter: FilterSpec,
    pub period: PeriodType,
    pub metric: MetricSpec,
}

/// One-line message for the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Any change to the dataset or the configuration recomputes `buckets`
/// from scratch; the previous result is simply replaced.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<ClimateDataset>,

    /// Current filter / period / metric selection.
    config: AnalysisConfig,

    /// Result of the last run.
    buckets: Vec<Bucket>,

    /// Number of records that passed the filter in the last run.
    pub filtered_count: usize,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl AppState {
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Ingest a newly loaded dataset and recompute.
    ///
    /// The year range is widened to cover the dataset so a fresh load
    /// never starts out empty.
    pub fn set_dataset(&mut self, dataset: ClimateDataset) {
        if let Some((lo, hi)) = dataset.year_range {
            self.config.filter.year_start = lo;
            self.config.filter.year_end = hi;
        }
        self.dataset = Some(dataset);
        self.status = None;
        self.recompute();
    }

    /// Replace the configuration, recomputing only when it changed.
    pub fn set_config(&mut self, config: AnalysisConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.recompute();
    }

    /// Re-run filter and aggregation against the loaded dataset.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            self.buckets.clear();
            self.filtered_count = 0;
            return;
        };

        let filtered = filter_records(&ds.records, &self.config.filter);
        self.filtered_count = filtered.len();
        self.buckets = aggregate(&filtered, self.config.period, &self.config.metric);

        log::debug!(
            "recomputed: {} of {} records → {} buckets ({:?}, {:?})",
            self.filtered_count,
            ds.len(),
            self.buckets.len(),
            self.config.period,
            self.config.metric.kind,
        );
    }

    /// Write the current buckets to `path` and report the outcome in the
    /// status line.
    pub fn export_to(&mut self, path: &Path) {
        match export_csv(path, self.config.period, &self.buckets) {
            Ok(()) => {
                log::info!("Exported {} buckets to {}", self.buckets.len(), path.display());
                self.status = Some(Status::Info(format!(
                    "Exported {} buckets to {}",
                    self.buckets.len(),
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{MetricField, MonthSelection, Record};

    fn dataset() -> ClimateDataset {
        ClimateDataset::from_records(vec![
            Record::new(2019, 6, 1, 25.0, 15.0),
            Record::new(2020, 1, 1, 10.0, 2.0),
            Record::new(2020, 1, 2, 20.0, -1.0),
            Record::new(2020, 2, 1, 15.0, 5.0),
        ])
    }

    #[test]
    fn nothing_to_compute_without_data() {
        let mut state = AppState::default();
        state.recompute();
        assert!(state.buckets().is_empty());
        assert_eq!(state.config().filter.year_start, 2010);
    }

    #[test]
    fn loading_widens_year_range_and_computes() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.config().filter.year_start, 2019);
        assert_eq!(state.config().filter.year_end, 2020);
        assert_eq!(state.filtered_count, 4);
        assert_eq!(state.buckets().len(), 2);
    }

    #[test]
    fn config_change_replaces_result() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        let mut config = *state.config();
        config.filter.month = MonthSelection::Month(1);
        config.period = PeriodType::Monthly;
        config.metric = MetricSpec::count_above(MetricField::Tx, 12.0);
        state.set_config(config);

        assert_eq!(state.filtered_count, 2);
        assert_eq!(state.buckets().len(), 1);
        assert_eq!(state.buckets()[0].value, 1.0);
    }

    #[test]
    fn export_reports_outcome_in_status() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let dir = tempfile::tempdir().unwrap();
        state.export_to(&dir.path().join("missing").join("out.csv"));
        assert!(matches!(state.status, Some(Status::Error(_))));

        state.export_to(&dir.path().join("out.csv"));
        match &state.status {
            Some(Status::Info(msg)) => assert!(msg.starts_with("Exported 2 buckets"), "{msg}"),
            other => panic!("expected an info status, got {other:?}"),
        }
    }
}
