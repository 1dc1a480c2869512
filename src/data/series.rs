use super::model::{Bucket, PeriodKey, Season};

// ---------------------------------------------------------------------------
// Chart series: buckets → (x, y) polylines
// ---------------------------------------------------------------------------

/// One named line on the chart.
///
/// `segments` are runs of consecutive points with a value; a bucket whose
/// value is `NaN` ends the current segment so the gap stays visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl Series {
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// x coordinate of a bucket: the year, plus a month fraction for monthly data.
pub fn x_of(key: &PeriodKey) -> f64 {
    match *key {
        PeriodKey::Annual { year } | PeriodKey::Seasonal { year, .. } => year as f64,
        PeriodKey::Monthly { year, month } => year as f64 + (month as f64 - 1.0) / 12.0,
    }
}

/// Split buckets into chart series, sorted along the x axis.
///
/// Seasonal data gets one series per season so each season is followed
/// across years; annual and monthly data form a single series.
pub fn chart_series(buckets: &[Bucket]) -> Vec<Series> {
    let is_seasonal = buckets
        .iter()
        .any(|b| matches!(b.key, PeriodKey::Seasonal { .. }));

    if !is_seasonal {
        if buckets.is_empty() {
            return Vec::new();
        }
        return vec![build_series("value".to_string(), buckets.iter())];
    }

    Season::ALL
        .iter()
        .filter_map(|&season| {
            let members: Vec<&Bucket> = buckets
                .iter()
                .filter(|b| matches!(b.key, PeriodKey::Seasonal { season: s, .. } if s == season))
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(build_series(season.name().to_string(), members.into_iter()))
            }
        })
        .collect()
}

fn build_series<'a>(label: String, buckets: impl Iterator<Item = &'a Bucket>) -> Series {
    let mut sorted: Vec<&Bucket> = buckets.collect();
    sorted.sort_by(|a, b| x_of(&a.key).total_cmp(&x_of(&b.key)));

    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for bucket in sorted {
        if bucket.has_value() {
            current.push([x_of(&bucket.key), bucket.value]);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    Series { label, segments }
}
