use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_YEAR: i32 = 1990;
const LAST_YEAR: i32 = 2020;

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// SplitMix64 stream; enough for reproducible weather noise.
struct Noise(u64);

impl Noise {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Roughly normal anomaly: sum of twelve uniforms, re-centred.
    fn anomaly(&mut self, std_dev: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.next_unit()).sum();
        (sum - 6.0) * std_dev
    }
}

/// Seasonal mean of TX for a day of year, peaking in late July, with a
/// slow warming trend.
fn tx_climatology(year: i32, day_of_year: u32) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * (day_of_year as f64 - 200.0) / 365.25;
    let trend = 0.03 * (year - FIRST_YEAR) as f64;
    16.0 + 11.0 * phase.cos() + trend
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let mut noise = Noise(42);

    let mut years = Vec::new();
    let mut months = Vec::new();
    let mut days = Vec::new();
    let mut tx_values = Vec::new();
    let mut tn_values: Vec<Option<f64>> = Vec::new();

    for year in FIRST_YEAR..=LAST_YEAR {
        let mut day_of_year = 0;
        for month in 1..=12u32 {
            for day in 1..=days_in_month(year, month) {
                day_of_year += 1;
                let tx = round1(tx_climatology(year, day_of_year) + noise.anomaly(3.0));
                let spread = 8.0 + noise.anomaly(1.5).abs();
                // Roughly one day in two hundred has no minimum reading.
                let tn = if noise.next_unit() < 0.005 {
                    None
                } else {
                    Some(round1(tx - spread))
                };

                years.push(year);
                months.push(month as i32);
                days.push(day as i32);
                tx_values.push(tx);
                tn_values.push(tn);
            }
        }
    }

    // ---- CSV: headerless year,month,day,TX,TN ----
    let csv_path = "sample_climate.csv";
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(csv_path)
        .with_context(|| format!("creating {csv_path}"))?;
    for i in 0..years.len() {
        let tn = tn_values[i].map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([
            years[i].to_string(),
            months[i].to_string(),
            days[i].to_string(),
            tx_values[i].to_string(),
            tn,
        ])?;
    }
    wtr.flush()?;

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int32, false),
        Field::new("month", DataType::Int32, false),
        Field::new("day", DataType::Int32, false),
        Field::new("TX", DataType::Float64, true),
        Field::new("TN", DataType::Float64, true),
    ]));

    let n_rows = years.len();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int32Array::from(years)),
            Arc::new(Int32Array::from(months)),
            Arc::new(Int32Array::from(days)),
            Arc::new(Float64Array::from(tx_values)),
            Arc::new(Float64Array::from(tn_values)),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sample_climate.parquet";
    let file = std::fs::File::create(parquet_path)
        .with_context(|| format!("creating {parquet_path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {n_rows} daily records ({FIRST_YEAR}–{LAST_YEAR}) to {csv_path} and {parquet_path}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_follows_leap_rules() {
        assert_eq!(days_in_month(2020, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2019, 2), 28);
        let year_len: u32 = (1..=12).map(|m| days_in_month(2016, m)).sum();
        assert_eq!(year_len, 366);
    }

    #[test]
    fn noise_is_reproducible_and_bounded() {
        let mut a = Noise(7);
        let mut b = Noise(7);
        for _ in 0..1000 {
            let u = a.next_unit();
            assert!((0.0..1.0).contains(&u));
            assert_eq!(u, b.next_unit());
        }
        let mut n = Noise(1);
        for _ in 0..1000 {
            assert!(n.anomaly(2.0).abs() <= 12.0);
        }
    }
}
