#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use ridgeline_chart::RidgelineColumns;

pub fn day(year: i32, month: u32, day: u32) -> i32 {
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    (date - NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()).num_days() as i32
}

/// Batch with `date` (Date32), `province` (Utf8) and `cases` (Float64) columns
pub fn make_batch(rows: &[(i32, &str, Option<f64>)]) -> RecordBatch {
    let time: ArrayRef = Arc::new(Date32Array::from(
        rows.iter().map(|r| r.0).collect::<Vec<_>>(),
    ));
    let group: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.1).collect::<Vec<_>>(),
    ));
    let value: ArrayRef = Arc::new(Float64Array::from(
        rows.iter().map(|r| r.2).collect::<Vec<_>>(),
    ));
    RecordBatch::try_from_iter(vec![("date", time), ("province", group), ("cases", value)])
        .unwrap()
}

/// Like [`make_batch`] with an Int64 time column, e.g. epoch seconds
pub fn make_numeric_batch(rows: &[(i64, &str, Option<f64>)]) -> RecordBatch {
    let time: ArrayRef = Arc::new(Int64Array::from(
        rows.iter().map(|r| r.0).collect::<Vec<_>>(),
    ));
    let group: ArrayRef = Arc::new(StringArray::from(
        rows.iter().map(|r| r.1).collect::<Vec<_>>(),
    ));
    let value: ArrayRef = Arc::new(Float64Array::from(
        rows.iter().map(|r| r.2).collect::<Vec<_>>(),
    ));
    RecordBatch::try_from_iter(vec![("date", time), ("province", group), ("cases", value)])
        .unwrap()
}

/// Two groups sampled hourly from `start` seconds, with a bump and some noise
pub fn hourly(start: i64) -> RecordBatch {
    let mut rows = Vec::new();
    for i in 0..48i64 {
        let t = start + 3600 * i;
        let x = i as f64;
        let noise = if i % 7 == 3 { 4.0 } else { 0.0 };
        rows.push((t, "Noord", Some(10.0 + 20.0 * (-(x - 24.0).powi(2) / 60.0).exp() + noise)));
        rows.push((t, "Zuid", Some(5.0 + 0.25 * x)));
    }
    make_numeric_batch(&rows)
}

pub fn columns() -> RidgelineColumns {
    RidgelineColumns::new("date", "province", "cases")
}

/// Three provinces with 20 daily rows each, rows shuffled across groups
pub fn three_groups() -> RecordBatch {
    let start = day(2020, 3, 1);
    let mut rows = Vec::new();
    for i in 0..20 {
        let t = start + i;
        let x = i as f64;
        rows.push((t, "Zeeland", Some(5.0 + (x - 10.0).abs())));
        rows.push((t, "Drenthe", Some(2.0 * x)));
        rows.push((t, "Utrecht", Some(40.0 - x)));
    }
    make_batch(&rows)
}

/// North always double South over four increasing dates
pub fn north_south() -> RecordBatch {
    let d = day(2020, 4, 1);
    make_batch(&[
        (d, "North", Some(2.0)),
        (d + 1, "North", Some(6.0)),
        (d + 2, "North", Some(10.0)),
        (d + 3, "North", Some(4.0)),
        (d, "South", Some(1.0)),
        (d + 1, "South", Some(3.0)),
        (d + 2, "South", Some(5.0)),
        (d + 3, "South", Some(2.0)),
    ])
}
