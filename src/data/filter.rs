use super::model::{FilterSpec, MonthSelection, Record, SeasonSelection};

// ---------------------------------------------------------------------------
// Record filter
// ---------------------------------------------------------------------------

impl FilterSpec {
    /// Whether a single record passes the filter.
    ///
    /// Month and season are applied together, so a month outside the
    /// selected season matches nothing.
    pub fn matches(&self, record: &Record) -> bool {
        if record.year < self.year_start || record.year > self.year_end {
            return false;
        }
        if let MonthSelection::Month(m) = self.month {
            if record.month != m {
                return false;
            }
        }
        if let SeasonSelection::Season(season) = self.season {
            if !season.contains(record.month) {
                return false;
            }
        }
        true
    }
}

/// Return the records that pass `spec`, in input order.
pub fn filter_records(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    records.iter().filter(|r| spec.matches(r)).copied().collect()
}
