use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array,
    StringArray, UInt16Array, UInt32Array, UInt8Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ClimateDataset, Record};

/// Column order of the tabular formats.
pub const COLUMNS: [&str; 5] = ["year", "month", "day", "TX", "TN"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load daily temperature records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – headerless rows `year,month,day,TX,TN`
/// * `.json`         – `[{ "year": 2020, "month": 1, "day": 1, "TX": 10.0, "TN": 2.0 }, ...]`
///                     or `[[2020, 1, 1, 10.0, 2.0], ...]`
/// * `.parquet`      – columns `year`, `month`, `day`, `TX`, `TN`
///
/// A missing or non-numeric TX / TN becomes `NaN`; a bad date field fails
/// the whole load.
pub fn load_file(path: &Path) -> Result<ClimateDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(ClimateDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// Raw numeric cells of one row, `None` where the cell was empty / null.
struct RawRow {
    year: Option<f64>,
    month: Option<f64>,
    day: Option<f64>,
    tx: Option<f64>,
    tn: Option<f64>,
}

impl RawRow {
    fn into_record(self, row: &str) -> Result<Record> {
        let year = integral(self.year, row, "year")?;
        let month = integral(self.month, row, "month")?;
        let day = integral(self.day, row, "day")?;

        let year = i32::try_from(year)
            .ok()
            .with_context(|| format!("{row}: year {year} out of range"))?;
        if !(1..=12).contains(&month) {
            bail!("{row}: month {month} is not in 1..=12");
        }
        if !(1..=31).contains(&day) {
            bail!("{row}: day {day} is not in 1..=31");
        }

        Ok(Record {
            year,
            month: month as u32,
            day: day as u32,
            tx: self.tx.unwrap_or(f64::NAN),
            tn: self.tn.unwrap_or(f64::NAN),
        })
    }
}

fn integral(value: Option<f64>, row: &str, col: &str) -> Result<i64> {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        Some(v) => bail!("{row}: {col} '{v}' is not a whole number"),
        None => bail!("{row}: missing {col}"),
    }
}

fn parse_cell(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: no header, five columns in fixed order.
///
/// A first row whose year cell holds text is taken as a header and skipped;
/// an empty year cell is a data row and fails like any other.
fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV rows from any reader.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut first_row = true;

    for result in reader.records() {
        let row = result.context("reading CSV row")?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let label = format!("line {line}");

        if row.iter().all(|f| f.is_empty()) {
            continue;
        }
        let is_first = std::mem::replace(&mut first_row, false);
        let year_cell = row.get(0).unwrap_or("");
        if is_first && !year_cell.is_empty() && parse_cell(year_cell).is_none() {
            log::debug!("treating {label} as a header row");
            continue;
        }
        if row.len() < COLUMNS.len() {
            bail!("{label}: expected {} columns, found {}", COLUMNS.len(), row.len());
        }

        let cell = |i: usize| row.get(i).and_then(parse_cell);
        let raw = RawRow {
            year: cell(0),
            month: cell(1),
            day: cell(2),
            tx: cell(3),
            tn: cell(4),
        };
        records.push(raw.into_record(&label)?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse a JSON array of record objects or 5-element arrays.
pub fn parse_json(text: &str) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let label = format!("row {i}");
            let raw = match row {
                JsonValue::Object(obj) => {
                    let get = |name: &str| {
                        obj.iter()
                            .find(|(k, _)| k.eq_ignore_ascii_case(name))
                            .and_then(|(_, v)| json_number(v))
                    };
                    RawRow {
                        year: get("year"),
                        month: get("month"),
                        day: get("day"),
                        tx: get("TX"),
                        tn: get("TN"),
                    }
                }
                JsonValue::Array(cells) => {
                    if cells.len() < COLUMNS.len() {
                        bail!("{label}: expected {} values, found {}", COLUMNS.len(), cells.len());
                    }
                    RawRow {
                        year: json_number(&cells[0]),
                        month: json_number(&cells[1]),
                        day: json_number(&cells[2]),
                        tx: json_number(&cells[3]),
                        tn: json_number(&cells[4]),
                    }
                }
                _ => bail!("{label} is neither an object nor an array"),
            };
            raw.into_record(&label)
        })
        .collect()
}

fn json_number(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_cell(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one row per day.
///
/// Columns are matched by name, ignoring case; any integer or float
/// physical type is accepted.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<&ArrayRef> = Vec::with_capacity(COLUMNS.len());
        for name in COLUMNS {
            let idx = schema
                .fields()
                .iter()
                .position(|f| f.name().eq_ignore_ascii_case(name))
                .with_context(|| format!("Parquet file missing '{name}' column"))?;
            columns.push(batch.column(idx));
        }

        for row in 0..batch.num_rows() {
            let label = format!("row {}", offset + row);
            let raw = RawRow {
                year: cell_f64(columns[0], row),
                month: cell_f64(columns[1], row),
                day: cell_f64(columns[2], row),
                tx: cell_f64(columns[3], row),
                tn: cell_f64(columns[4], row),
            };
            records.push(raw.into_record(&label)?);
        }
        offset += batch.num_rows();
    }

    Ok(records)
}

/// Read one numeric cell as `f64`; `None` for nulls and unsupported types.
fn cell_f64(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Int16 => any.downcast_ref::<Int16Array>().map(|a| a.value(row) as f64),
        DataType::Int8 => any.downcast_ref::<Int8Array>().map(|a| a.value(row) as f64),
        DataType::UInt32 => any.downcast_ref::<UInt32Array>().map(|a| a.value(row) as f64),
        DataType::UInt16 => any.downcast_ref::<UInt16Array>().map(|a| a.value(row) as f64),
        DataType::UInt8 => any.downcast_ref::<UInt8Array>().map(|a| a.value(row) as f64),
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .and_then(|a| parse_cell(a.value(row))),
        other => {
            log::warn!("unsupported parquet column type {other:?}");
            None
        }
    }
}
