//! CSV acquisition and the (time, group) aggregation feeding the renderer.

use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, Date32Array, Float64Array, StringArray};
use arrow::compute::{cast, concat_batches};
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{debug, info};
use ridgeline_chart::RidgelineColumns;
use ridgeline_scales::temporal::days_from_date;

pub const DEFAULT_DELIMITER: char = ';';

/// Rows sampled to read the header line
const HEADER_SAMPLE_ROWS: usize = 16;

/// Where the CSV text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Url(String),
}

impl FromStr for InputSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

impl InputSource {
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => {
                std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
            }
            Self::Url(url) => {
                info!("downloading {url}");
                let response = reqwest::blocking::get(url)
                    .and_then(|r| r.error_for_status())
                    .with_context(|| format!("failed to download {url}"))?;
                Ok(response.bytes()?.to_vec())
            }
        }
    }
}

/// Parse delimited text into one batch of string columns with lowercase names.
///
/// Every column is read as text so that sparse or mixed columns never fail
/// type inference; typed parsing happens in [`aggregate`].
pub fn read_csv(bytes: &[u8], delimiter: char) -> Result<RecordBatch> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, received `{delimiter}`");
    }
    let delimiter = delimiter as u8;
    let format = Format::default()
        .with_header(true)
        .with_delimiter(delimiter);
    let (header, _) = format
        .infer_schema(Cursor::new(bytes), Some(HEADER_SAMPLE_ROWS))
        .context("failed to read CSV header")?;
    let schema = Arc::new(Schema::new(
        header
            .fields()
            .iter()
            .map(|f| Field::new(f.name().trim().to_lowercase(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_delimiter(delimiter)
        .build(Cursor::new(bytes))?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let table = concat_batches(&schema, &batches)?;
    debug!(
        "read {} rows with columns {:?}",
        table.num_rows(),
        schema.fields().iter().map(|f| f.name()).collect::<Vec<_>>()
    );
    Ok(table)
}

/// Lowercase column names so they match the table produced by [`read_csv`]
pub fn lowercase_columns(columns: &RidgelineColumns) -> RidgelineColumns {
    RidgelineColumns::new(
        columns.time.to_lowercase(),
        columns.group.to_lowercase(),
        columns.value.to_lowercase(),
    )
}

/// Leading `YYYY-MM-DD` of a date or date-time string
fn parse_day(text: &str) -> Result<i32> {
    let date = NaiveDate::parse_from_str(text.get(..10).unwrap_or(text), "%Y-%m-%d")?;
    Ok(days_from_date(&date) as i32)
}

fn present(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|s| !s.is_empty())
}

fn text_column(table: &RecordBatch, name: &str) -> Result<ArrayRef> {
    let column = table
        .column_by_name(name)
        .with_context(|| format!("column `{name}` not found"))?;
    Ok(cast(column, &DataType::Utf8)?)
}

/// Sum `columns.value` per (time, group) pair, sorted by time then group.
///
/// Rows without a date or group are dropped and missing values count as 0.
/// The result has a Date32 time column, a Utf8 group column and a Float64
/// value column under the original names.
pub fn aggregate(table: &RecordBatch, columns: &RidgelineColumns) -> Result<RecordBatch> {
    let time = text_column(table, &columns.time)?;
    let group = text_column(table, &columns.group)?;
    let value = text_column(table, &columns.value)?;
    let time = time.as_string::<i32>();
    let group = group.as_string::<i32>();
    let value = value.as_string::<i32>();

    let mut sums: IndexMap<(i32, String), f64> = IndexMap::new();
    let mut dropped = 0usize;
    for i in 0..table.num_rows() {
        let t = present(time.is_valid(i).then(|| time.value(i)));
        let g = present(group.is_valid(i).then(|| group.value(i)));
        let (Some(t), Some(g)) = (t, g) else {
            dropped += 1;
            continue;
        };
        let day = parse_day(t)
            .with_context(|| format!("row {}: invalid date `{t}` in `{}`", i + 1, columns.time))?;
        let v = match present(value.is_valid(i).then(|| value.value(i))) {
            Some(v) => v
                .parse::<f64>()
                .with_context(|| format!("row {}: invalid number `{v}` in `{}`", i + 1, columns.value))?,
            None => 0.0,
        };
        *sums.entry((day, g.to_string())).or_insert(0.0) += v;
    }
    sums.sort_keys();
    debug!(
        "aggregated {} rows into {} (dropped {dropped} without date or group)",
        table.num_rows(),
        sums.len()
    );

    let days: Date32Array = sums.keys().map(|(d, _)| Some(*d)).collect();
    let groups: StringArray = sums.keys().map(|(_, g)| Some(g.as_str())).collect();
    let values: Float64Array = sums.values().map(|v| Some(*v)).collect();
    Ok(RecordBatch::try_from_iter(vec![
        (columns.time.as_str(), Arc::new(days) as ArrayRef),
        (columns.group.as_str(), Arc::new(groups) as ArrayRef),
        (columns.value.as_str(), Arc::new(values) as ArrayRef),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    const SAMPLE: &str = "\
Date_of_report;Date_of_publication;Municipality_name;Province;Total_reported;Deceased
2020-03-14 10:00:00;2020-03-13;Aa en Hunze;Drenthe;2;0
2020-03-14 10:00:00;2020-03-13;Assen;Drenthe;3;1
2020-03-14 10:00:00;2020-03-13;Arnhem;Gelderland;;0
2020-03-15 10:00:00;2020-03-14;Assen;Drenthe;4;
2020-03-15 10:00:00;2020-03-14;;;7;2
2020-03-15 10:00:00;2020-03-14;Arnhem;Gelderland;5;1
";

    fn columns(value: &str) -> RidgelineColumns {
        RidgelineColumns::new("Date_of_publication", "Province", value)
    }

    #[rstest]
    #[case("https://data.rivm.nl/covid.csv", InputSource::Url("https://data.rivm.nl/covid.csv".to_string()))]
    #[case("data/covid.csv", InputSource::File(PathBuf::from("data/covid.csv")))]
    fn test_input_source(#[case] text: &str, #[case] expected: InputSource) {
        assert_eq!(text.parse::<InputSource>().unwrap(), expected);
        assert_eq!(expected.to_string(), text);
    }

    #[test]
    fn test_read_csv_lowercases_names() {
        let table = read_csv(SAMPLE.as_bytes(), ';').unwrap();
        assert_eq!(table.num_rows(), 6);
        assert_eq!(table.schema().field(1).name(), "date_of_publication");
        assert_eq!(table.schema().field(4).name(), "total_reported");
        assert!(table.schema().fields().iter().all(|f| f.data_type() == &DataType::Utf8));
    }

    #[test]
    fn test_aggregate_sums_per_day_and_group() {
        let table = read_csv(SAMPLE.as_bytes(), ';').unwrap();
        let columns = lowercase_columns(&columns("Total_reported"));
        let batch = aggregate(&table, &columns).unwrap();
        assert_eq!(batch.num_rows(), 4);

        let days = batch.column(0).as_primitive::<arrow::datatypes::Date32Type>();
        let groups = batch.column(1).as_string::<i32>();
        let values = batch.column(2).as_primitive::<arrow::datatypes::Float64Type>();
        let march_13 = days_from_date(&NaiveDate::from_ymd_opt(2020, 3, 13).unwrap()) as i32;

        let rows: Vec<(i32, &str, f64)> = (0..batch.num_rows())
            .map(|i| (days.value(i), groups.value(i), values.value(i)))
            .collect();
        assert_eq!(rows[0], (march_13, "Drenthe", 5.0));
        assert_eq!(rows[1], (march_13, "Gelderland", 0.0));
        assert_eq!(rows[2], (march_13 + 1, "Drenthe", 4.0));
        assert_eq!(rows[3], (march_13 + 1, "Gelderland", 5.0));
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Date32);
    }

    #[test]
    fn test_aggregate_other_value_column() {
        let table = read_csv(SAMPLE.as_bytes(), ';').unwrap();
        let batch = aggregate(&table, &lowercase_columns(&columns("Deceased"))).unwrap();
        let values = batch.column(2).as_primitive::<arrow::datatypes::Float64Type>();
        let total: f64 = values.values().iter().sum();
        assert_approx_eq!(f64, total, 2.0);
    }

    #[test]
    fn test_aggregate_errors() {
        let table = read_csv(SAMPLE.as_bytes(), ';').unwrap();
        let missing = aggregate(&table, &lowercase_columns(&columns("hospital_admission")));
        assert!(missing.unwrap_err().to_string().contains("hospital_admission"));

        let bad_dates = "day,region,count\n13/03/2020,North,1\n";
        let table = read_csv(bad_dates.as_bytes(), ',').unwrap();
        let result = aggregate(&table, &RidgelineColumns::new("day", "region", "count"));
        assert!(result.unwrap_err().to_string().contains("invalid date"));

        assert!(read_csv(SAMPLE.as_bytes(), '€').is_err());
    }

    #[test]
    fn test_parse_day_accepts_datetimes() {
        assert_eq!(parse_day("1970-01-02").unwrap(), 1);
        assert_eq!(parse_day("1970-01-03T08:00:00").unwrap(), 2);
        assert!(parse_day("20200313").is_err());
    }
}
