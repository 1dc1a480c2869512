use std::collections::HashMap;

use super::model::{Bucket, MetricKind, MetricSpec, PeriodKey, PeriodType, Record, Season};

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Key of the bucket a record falls into, or `None` when its month has no
/// season (only possible for out-of-range months).
pub fn period_key(record: &Record, period: PeriodType) -> Option<PeriodKey> {
    let year = record.year;
    match period {
        PeriodType::Annual => Some(PeriodKey::Annual { year }),
        PeriodType::Seasonal => {
            Season::of_month(record.month).map(|season| PeriodKey::Seasonal { year, season })
        }
        PeriodType::Monthly => Some(PeriodKey::Monthly {
            year,
            month: record.month,
        }),
    }
}

/// Group `records` by `period` and reduce each group with `metric`.
///
/// Buckets come out in the order their key was first seen. Each record's
/// metric field is read exactly once.
pub fn aggregate(records: &[Record], period: PeriodType, metric: &MetricSpec) -> Vec<Bucket> {
    let mut index: HashMap<PeriodKey, usize> = HashMap::new();
    let mut groups: Vec<(PeriodKey, Vec<f64>)> = Vec::new();

    for record in records {
        let Some(key) = period_key(record, period) else {
            log::debug!(
                "skipping {}-{}-{}: month outside 1..=12",
                record.year,
                record.month,
                record.day
            );
            continue;
        };
        let value = metric.field.extract(record);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(value);
    }

    groups
        .into_iter()
        .map(|(key, values)| Bucket {
            key,
            value: reduce(&values, metric),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Metric reducer
// ---------------------------------------------------------------------------

/// Reduce one bucket's values to a scalar.
///
/// * `Average` of an empty slice is `NaN`, and a single `NaN` input poisons
///   the mean.
/// * Threshold counts are strict: a value equal to the threshold is in
///   neither count. `NaN` values are never counted.
pub fn reduce(values: &[f64], metric: &MetricSpec) -> f64 {
    match metric.kind {
        MetricKind::Average => {
            if values.is_empty() {
                f64::NAN
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
        MetricKind::CountAbove => values.iter().filter(|&&v| v > metric.threshold).count() as f64,
        MetricKind::CountBelow => values.iter().filter(|&&v| v < metric.threshold).count() as f64,
    }
}
