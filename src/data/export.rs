use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{Bucket, PeriodKey, PeriodType};

/// File name offered by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "chart_data.csv";

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Column names for a period's bucket shape.
pub fn header(period: PeriodType) -> &'static [&'static str] {
    match period {
        PeriodType::Annual => &["year", "value"],
        PeriodType::Seasonal => &["year", "season", "value"],
        PeriodType::Monthly => &["year", "month", "value"],
    }
}

/// One CSV row per bucket shape; `None` serializes as an empty field.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Row {
    Annual {
        year: i32,
        value: Option<f64>,
    },
    Seasonal {
        year: i32,
        season: &'static str,
        value: Option<f64>,
    },
    Monthly {
        year: i32,
        month: u32,
        value: Option<f64>,
    },
}

impl From<&Bucket> for Row {
    fn from(bucket: &Bucket) -> Self {
        let value = bucket.has_value().then_some(bucket.value);
        match bucket.key {
            PeriodKey::Annual { year } => Row::Annual { year, value },
            PeriodKey::Seasonal { year, season } => Row::Seasonal {
                year,
                season: season.name(),
                value,
            },
            PeriodKey::Monthly { year, month } => Row::Monthly { year, month, value },
        }
    }
}

/// Serialize `buckets` as CSV.  A `NaN` value is written as an empty field.
///
/// The header is always written, so an empty result still yields a
/// well-formed file.
pub fn write_csv<W: Write>(writer: W, period: PeriodType, buckets: &[Bucket]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header(period)).context("writing CSV header")?;

    for bucket in buckets {
        wtr.serialize(Row::from(bucket))
            .with_context(|| format!("writing row for {}", bucket.key))?;
    }

    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}

/// Write `buckets` to a CSV file at `path`.
pub fn export_csv(path: &Path, period: PeriodType, buckets: &[Bucket]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, period, buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Season;

    fn to_string(period: PeriodType, buckets: &[Bucket]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, period, buckets).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn annual_shape() {
        let out = to_string(
            PeriodType::Annual,
            &[Bucket {
                key: PeriodKey::Annual { year: 2020 },
                value: 2.0,
            }],
        );
        assert_eq!(out, "year,value\n2020,2.0\n");
    }

    #[test]
    fn seasonal_shape_uses_season_names() {
        let out = to_string(
            PeriodType::Seasonal,
            &[Bucket {
                key: PeriodKey::Seasonal {
                    year: 2020,
                    season: Season::Autumn,
                },
                value: 12.5,
            }],
        );
        assert_eq!(out, "year,season,value\n2020,autumn,12.5\n");
    }

    #[test]
    fn nan_is_an_empty_cell() {
        let out = to_string(
            PeriodType::Monthly,
            &[Bucket {
                key: PeriodKey::Monthly { year: 2020, month: 3 },
                value: f64::NAN,
            }],
        );
        assert_eq!(out, "year,month,value\n2020,3,\n");
    }

    #[test]
    fn empty_result_still_has_header() {
        assert_eq!(to_string(PeriodType::Monthly, &[]), "year,month,value\n");
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        let buckets = [Bucket {
            key: PeriodKey::Annual { year: 1999 },
            value: -0.25,
        }];
        export_csv(&path, PeriodType::Annual, &buckets).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "year,value\n1999,-0.25\n");
    }
}
