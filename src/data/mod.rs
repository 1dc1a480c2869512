//! Data layer: records, loading, filtering, aggregation and export.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → ClimateDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  year range / month / season → Vec<Record>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  group by period, reduce by metric → Vec<Bucket>
//!   └───────────┘
//!        │
//!        ├──► series   (chart lines)
//!        └──► export   (CSV)
//! ```
//!
//! `filter` and `aggregate` are pure; everything with I/O lives in
//! `loader` and `export`.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod series;
