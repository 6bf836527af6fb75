use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Date64Type, Float64Type, Int64Type, TimeUnit};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::RidgelineChartError;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Names of the time, group and value columns of a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RidgelineColumns {
    pub time: String,
    pub group: String,
    pub value: String,
}

impl RidgelineColumns {
    pub fn new(time: impl Into<String>, group: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            group: group.into(),
            value: value.into(),
        }
    }
}

/// How time coordinates were derived, which decides axis labelling
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeKind {
    /// Fractional days since the Unix epoch
    #[default]
    Temporal,
    Numeric,
}

/// Owned copies of the three columns a ridgeline needs
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumns {
    pub time: Vec<f64>,
    pub group: Vec<String>,
    /// Missing values are NaN
    pub value: Vec<f64>,
    pub time_kind: TimeKind,
}

impl SeriesColumns {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, RidgelineChartError> {
    batch.column_by_name(name).ok_or_else(|| {
        RidgelineChartError::DataShape(format!(
            "column `{name}` not found, available columns: {:?}",
            batch
                .schema()
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect::<Vec<_>>()
        ))
    })
}

fn cast_column(array: &ArrayRef, to: &DataType, name: &str) -> Result<ArrayRef, RidgelineChartError> {
    cast(array, to).map_err(|err| {
        RidgelineChartError::DataShape(format!(
            "column `{name}` of type {} cannot be read as {to}: {err}",
            array.data_type()
        ))
    })
}

fn read_time(array: &ArrayRef, name: &str) -> Result<(Vec<f64>, TimeKind), RidgelineChartError> {
    if array.null_count() > 0 {
        return Err(RidgelineChartError::DataShape(format!(
            "time column `{name}` contains {} null values",
            array.null_count()
        )));
    }
    let values = match array.data_type() {
        DataType::Date32 => {
            let days = array.as_primitive::<Date32Type>();
            (days.values().iter().map(|d| *d as f64).collect(), TimeKind::Temporal)
        }
        DataType::Date64 => {
            let millis = array.as_primitive::<Date64Type>();
            let days = millis.values().iter().map(|ms| *ms as f64 / MILLIS_PER_DAY);
            (days.collect(), TimeKind::Temporal)
        }
        DataType::Timestamp(unit, _) => {
            let per_day = match unit {
                TimeUnit::Second => MILLIS_PER_DAY / 1e3,
                TimeUnit::Millisecond => MILLIS_PER_DAY,
                TimeUnit::Microsecond => MILLIS_PER_DAY * 1e3,
                TimeUnit::Nanosecond => MILLIS_PER_DAY * 1e6,
            };
            let raw = cast_column(array, &DataType::Int64, name)?;
            let days = raw
                .as_primitive::<Int64Type>()
                .values()
                .iter()
                .map(|v| *v as f64 / per_day);
            (days.collect(), TimeKind::Temporal)
        }
        dtype if dtype.is_numeric() => {
            let numbers = cast_column(array, &DataType::Float64, name)?;
            let values = numbers.as_primitive::<Float64Type>().values().to_vec();
            (values, TimeKind::Numeric)
        }
        dtype => {
            return Err(RidgelineChartError::DataShape(format!(
                "time column `{name}` has unsupported type {dtype}"
            )))
        }
    };
    if values.0.iter().any(|t| !t.is_finite()) {
        return Err(RidgelineChartError::DataShape(format!(
            "time column `{name}` contains non-finite values"
        )));
    }
    Ok(values)
}

fn read_group(array: &ArrayRef, name: &str) -> Result<Vec<String>, RidgelineChartError> {
    if array.null_count() > 0 {
        return Err(RidgelineChartError::DataShape(format!(
            "group column `{name}` contains {} null values",
            array.null_count()
        )));
    }
    let labels = cast_column(array, &DataType::Utf8, name)?;
    Ok(labels
        .as_string::<i32>()
        .iter()
        .map(|s| s.unwrap_or_default().to_string())
        .collect())
}

fn read_value(array: &ArrayRef, name: &str) -> Result<Vec<f64>, RidgelineChartError> {
    if !array.data_type().is_numeric() && array.data_type() != &DataType::Null {
        return Err(RidgelineChartError::DataShape(format!(
            "value column `{name}` has non-numeric type {}",
            array.data_type()
        )));
    }
    let numbers = cast_column(array, &DataType::Float64, name)?;
    Ok(numbers
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Copy the time, group and value columns out of `batch`.
///
/// Temporal time columns (`Date32`, `Date64`, `Timestamp`) become
/// fractional days since the epoch, numeric ones are used as is. Null
/// values become NaN; null times or groups are rejected.
pub fn read_columns(
    batch: &RecordBatch,
    columns: &RidgelineColumns,
) -> Result<SeriesColumns, RidgelineChartError> {
    let (time, time_kind) = read_time(column(batch, &columns.time)?, &columns.time)?;
    let group = read_group(column(batch, &columns.group)?, &columns.group)?;
    let value = read_value(column(batch, &columns.value)?, &columns.value)?;
    Ok(SeriesColumns {
        time,
        group,
        value,
        time_kind,
    })
}
