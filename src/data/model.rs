use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Record – one daily observation
// ---------------------------------------------------------------------------

/// One daily temperature observation.
///
/// `tx` / `tn` are `NaN` when the source cell was empty or not a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    /// 1..=31
    pub day: u32,
    /// Daily maximum temperature.
    pub tx: f64,
    /// Daily minimum temperature.
    pub tn: f64,
}

impl Record {
    pub fn new(year: i32, month: u32, day: u32, tx: f64, tn: f64) -> Self {
        Record {
            year,
            month,
            day,
            tx,
            tn,
        }
    }
}

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

/// Fixed three-month seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    /// Months belonging to this season.
    pub fn months(self) -> [u32; 3] {
        match self {
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Autumn => [9, 10, 11],
            Season::Winter => [12, 1, 2],
        }
    }

    pub fn contains(self, month: u32) -> bool {
        self.months().contains(&month)
    }

    /// Season of a calendar month. `None` outside 1..=12.
    pub fn of_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Configuration tokens
// ---------------------------------------------------------------------------

/// Raised when a configuration token is outside its documented domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{token}'")]
pub struct ParseTokenError {
    pub kind: &'static str,
    pub token: String,
}

impl ParseTokenError {
    fn new(kind: &'static str, token: &str) -> Self {
        ParseTokenError {
            kind,
            token: token.to_string(),
        }
    }
}

impl FromStr for Season {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            _ => Err(ParseTokenError::new("season", s)),
        }
    }
}

/// Month filter: everything, or one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelection {
    #[default]
    All,
    Month(u32),
}

impl FromStr for MonthSelection {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MonthSelection::All);
        }
        match s.parse::<u32>() {
            Ok(m @ 1..=12) => Ok(MonthSelection::Month(m)),
            _ => Err(ParseTokenError::new("month", s)),
        }
    }
}

/// Season filter: everything, or one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonSelection {
    #[default]
    All,
    Season(Season),
}

impl FromStr for SeasonSelection {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(SeasonSelection::All)
        } else {
            s.parse().map(SeasonSelection::Season)
        }
    }
}

/// Record filter: inclusive year range plus optional month / season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub year_start: i32,
    pub year_end: i32,
    pub month: MonthSelection,
    pub season: SeasonSelection,
}

impl FilterSpec {
    /// A filter that keeps every record.
    pub fn all() -> Self {
        FilterSpec {
            year_start: i32::MIN,
            year_end: i32::MAX,
            month: MonthSelection::All,
            season: SeasonSelection::All,
        }
    }

    pub fn years(year_start: i32, year_end: i32) -> Self {
        FilterSpec {
            year_start,
            year_end,
            ..FilterSpec::all()
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec::years(2010, 2020)
    }
}

/// Grouping granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodType {
    #[default]
    Annual,
    Seasonal,
    Monthly,
}

impl PeriodType {
    pub const ALL: [PeriodType; 3] = [PeriodType::Annual, PeriodType::Seasonal, PeriodType::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            PeriodType::Annual => "Annual",
            PeriodType::Seasonal => "Seasonal",
            PeriodType::Monthly => "Monthly",
        }
    }
}

impl FromStr for PeriodType {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" | "year" => Ok(PeriodType::Annual),
            "seasonal" | "season" => Ok(PeriodType::Seasonal),
            "monthly" | "month" => Ok(PeriodType::Monthly),
            _ => Err(ParseTokenError::new("period", s)),
        }
    }
}

/// Which temperature column a metric reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricField {
    #[default]
    Tx,
    Tn,
}

impl MetricField {
    pub fn extract(self, record: &Record) -> f64 {
        match self {
            MetricField::Tx => record.tx,
            MetricField::Tn => record.tn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricField::Tx => "TX",
            MetricField::Tn => "TN",
        }
    }
}

impl FromStr for MetricField {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TX" => Ok(MetricField::Tx),
            "TN" => Ok(MetricField::Tn),
            _ => Err(ParseTokenError::new("field", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricKind {
    #[default]
    Average,
    CountAbove,
    CountBelow,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Average, MetricKind::CountAbove, MetricKind::CountBelow];

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Average => "Average",
            MetricKind::CountAbove => "Days above threshold",
            MetricKind::CountBelow => "Days below threshold",
        }
    }

    pub fn uses_threshold(self) -> bool {
        !matches!(self, MetricKind::Average)
    }
}

impl FromStr for MetricKind {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "average" => Ok(MetricKind::Average),
            "countAbove" | "aboveThreshold" => Ok(MetricKind::CountAbove),
            "countBelow" | "belowThreshold" => Ok(MetricKind::CountBelow),
            _ => Err(ParseTokenError::new("metric", s)),
        }
    }
}

/// Reduction applied to each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricSpec {
    pub field: MetricField,
    pub kind: MetricKind,
    /// Ignored by [`MetricKind::Average`].
    pub threshold: f64,
}

impl MetricSpec {
    pub fn average(field: MetricField) -> Self {
        MetricSpec {
            field,
            kind: MetricKind::Average,
            threshold: 0.0,
        }
    }

    pub fn count_above(field: MetricField, threshold: f64) -> Self {
        MetricSpec {
            field,
            kind: MetricKind::CountAbove,
            threshold,
        }
    }

    pub fn count_below(field: MetricField, threshold: f64) -> Self {
        MetricSpec {
            field,
            kind: MetricKind::CountBelow,
            threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// Bucket – aggregation output
// ---------------------------------------------------------------------------

/// Grouping key of a bucket; the variant follows the [`PeriodType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    Annual { year: i32 },
    Seasonal { year: i32, season: Season },
    Monthly { year: i32, month: u32 },
}

impl PeriodKey {
    pub fn year(&self) -> i32 {
        match *self {
            PeriodKey::Annual { year }
            | PeriodKey::Seasonal { year, .. }
            | PeriodKey::Monthly { year, .. } => year,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Annual { year } => write!(f, "{year}"),
            PeriodKey::Seasonal { year, season } => write!(f, "{year} {season}"),
            PeriodKey::Monthly { year, month } => write!(f, "{year}-{month:02}"),
        }
    }
}

/// One aggregated row. `value` is `NaN` when the bucket has no usable data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub key: PeriodKey,
    pub value: f64,
}

impl Bucket {
    pub fn has_value(&self) -> bool {
        !self.value.is_nan()
    }
}

// ---------------------------------------------------------------------------
// ClimateDataset – the complete loaded file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ClimateDataset {
    pub records: Vec<Record>,
    /// Inclusive (min, max) year, `None` for an empty dataset.
    pub year_range: Option<(i32, i32)>,
}

impl ClimateDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let year_range = records.iter().fold(None, |acc, r| match acc {
            None => Some((r.year, r.year)),
            Some((lo, hi)) => Some((r.year.min(lo), r.year.max(hi))),
        });
        ClimateDataset {
            records,
            year_range,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
