//! End-to-end checks of load → filter → aggregate → export.

use climate_viewer::data::aggregate::{aggregate, period_key};
use climate_viewer::data::export::write_csv;
use climate_viewer::data::filter::filter_records;
use climate_viewer::data::loader::{load_file, read_csv};
use climate_viewer::data::model::{
    Bucket, FilterSpec, MetricField, MetricKind, MetricSpec, MonthSelection, PeriodKey, PeriodType,
    Record, Season, SeasonSelection,
};

fn scenario_records() -> Vec<Record> {
    vec![
        Record::new(2020, 1, 1, 10.0, 2.0),
        Record::new(2020, 1, 2, 20.0, -1.0),
        Record::new(2020, 2, 1, 15.0, 5.0),
    ]
}

/// Two years of synthetic daily data with a few repeated values.
fn two_years() -> Vec<Record> {
    let mut records = Vec::new();
    for year in [2019, 2020] {
        for month in 1..=12u32 {
            for day in 1..=28u32 {
                let tx = ((month * 3 + day) % 25) as f64;
                records.push(Record::new(year, month, day, tx, tx - 8.0));
            }
        }
    }
    records
}

#[test]
fn monthly_average_scenario() {
    let filtered = filter_records(&scenario_records(), &FilterSpec::years(2020, 2020));
    let buckets = aggregate(&filtered, PeriodType::Monthly, &MetricSpec::average(MetricField::Tx));
    assert_eq!(
        buckets,
        vec![
            Bucket {
                key: PeriodKey::Monthly { year: 2020, month: 1 },
                value: 15.0,
            },
            Bucket {
                key: PeriodKey::Monthly { year: 2020, month: 2 },
                value: 15.0,
            },
        ]
    );
}

#[test]
fn annual_count_above_scenario() {
    let filtered = filter_records(&scenario_records(), &FilterSpec::years(2020, 2020));
    let buckets = aggregate(
        &filtered,
        PeriodType::Annual,
        &MetricSpec::count_above(MetricField::Tx, 12.0),
    );
    assert_eq!(
        buckets,
        vec![Bucket {
            key: PeriodKey::Annual { year: 2020 },
            value: 2.0,
        }]
    );
}

#[test]
fn threshold_equal_value_is_not_counted_above() {
    let buckets = aggregate(
        &scenario_records(),
        PeriodType::Annual,
        &MetricSpec::count_above(MetricField::Tx, 15.0),
    );
    // Only the 20-degree day; the 15-degree day sits on the threshold.
    assert_eq!(buckets[0].value, 1.0);
}

#[test]
fn identity_filter_returns_input() {
    let records = two_years();
    assert_eq!(filter_records(&records, &FilterSpec::all()), records);
}

#[test]
fn conflicting_month_and_season_is_empty_not_error() {
    let spec = FilterSpec {
        month: MonthSelection::Month(6),
        season: SeasonSelection::Season(Season::Winter),
        ..FilterSpec::all()
    };
    let filtered = filter_records(&two_years(), &spec);
    assert!(filtered.is_empty());
    assert!(aggregate(&filtered, PeriodType::Seasonal, &MetricSpec::default()).is_empty());
}

#[test]
fn grouping_is_exhaustive_and_disjoint() {
    let records = two_years();
    let counting = MetricSpec::count_above(MetricField::Tx, f64::NEG_INFINITY);

    for period in PeriodType::ALL {
        let buckets = aggregate(&records, period, &counting);
        let total: f64 = buckets.iter().map(|b| b.value).sum();
        assert_eq!(total as usize, records.len(), "{period:?}");

        for record in &records {
            let key = period_key(record, period).unwrap();
            let owners = buckets.iter().filter(|b| b.key == key).count();
            assert_eq!(owners, 1, "{period:?} {record:?}");
        }
    }
}

#[test]
fn average_matches_mean_and_counts_partition() {
    let records = two_years();
    let threshold = 12.0;

    for period in PeriodType::ALL {
        let avg = aggregate(&records, period, &MetricSpec::average(MetricField::Tn));
        let above = aggregate(&records, period, &MetricSpec::count_above(MetricField::Tn, threshold));
        let below = aggregate(&records, period, &MetricSpec::count_below(MetricField::Tn, threshold));

        for ((a, hi), lo) in avg.iter().zip(&above).zip(&below) {
            let members: Vec<f64> = records
                .iter()
                .filter(|r| period_key(r, period) == Some(a.key))
                .map(|r| r.tn)
                .collect();
            let mean = members.iter().sum::<f64>() / members.len() as f64;
            assert!((a.value - mean).abs() < 1e-9);

            let equal = members.iter().filter(|&&v| v == threshold).count() as f64;
            assert_eq!(hi.value + lo.value + equal, members.len() as f64);
        }
    }
}

#[test]
fn winter_season_collects_december_with_same_year() {
    let records = vec![
        Record::new(2019, 12, 31, 2.0, -3.0),
        Record::new(2020, 1, 1, 4.0, -1.0),
        Record::new(2020, 12, 1, 6.0, 0.0),
    ];
    let buckets = aggregate(&records, PeriodType::Seasonal, &MetricSpec::average(MetricField::Tx));
    assert_eq!(buckets.len(), 2);
    assert_eq!(
        buckets[1],
        Bucket {
            key: PeriodKey::Seasonal {
                year: 2020,
                season: Season::Winter
            },
            value: 5.0,
        }
    );
}

#[test]
fn export_round_trip_preserves_values() {
    let records = two_years();
    let metric = MetricSpec {
        field: MetricField::Tx,
        kind: MetricKind::Average,
        threshold: 0.0,
    };
    let buckets = aggregate(&records, PeriodType::Monthly, &metric);

    let mut buf = Vec::new();
    write_csv(&mut buf, PeriodType::Monthly, &buckets).unwrap();

    let mut rdr = csv::Reader::from_reader(buf.as_slice());
    let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, vec!["year", "month", "value"]);
    let parsed: Vec<f64> = rdr
        .records()
        .map(|r| r.unwrap()[2].parse::<f64>().unwrap())
        .collect();

    assert_eq!(parsed.len(), buckets.len());
    for (b, v) in buckets.iter().zip(parsed) {
        assert!((b.value - v).abs() < 1e-9);
    }
}

#[test]
fn csv_file_through_the_whole_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("station.csv");
    std::fs::write(&path, "2020,1,1,10,2\n2020,1,2,20,-1\n2020,2,1,15,5\n2021,7,1,33,\n").unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.year_range, Some((2020, 2021)));

    let buckets = aggregate(
        &filter_records(&ds.records, &FilterSpec::all()),
        PeriodType::Annual,
        &MetricSpec::average(MetricField::Tn),
    );
    assert_eq!(buckets[0].value, 2.0);
    // The 2021 bucket has only a missing TN: a hole, not zero.
    assert!(buckets[1].value.is_nan());

    let mut buf = Vec::new();
    write_csv(&mut buf, PeriodType::Annual, &buckets).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "year,value\n2020,2.0\n2021,\n");
}

#[test]
fn loader_output_matches_scenario_records() {
    let parsed = read_csv("2020,1,1,10,2\n2020,1,2,20,-1\n2020,2,1,15,5\n".as_bytes()).unwrap();
    assert_eq!(parsed, scenario_records());
}
