use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Date32Array, Date64Array, Float64Array, Int32Array, Int64Array, StringArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray,
};
use arrow::datatypes::{DataType, TimeUnit};
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    COL_ABSTRACT, COL_AUTHORS, COL_JOURNAL, COL_PUBLISH_TIME, COL_TITLE, RawRecord,
    REQUIRED_COLUMNS, SOURCE_ALIASES,
};

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

/// The input is missing part of the required column set. This is a fatal
/// configuration error, raised before any row is parsed; the pipeline never
/// tries to recover from a broken schema.
#[derive(Debug, Error)]
#[error("input is missing required column(s): {}", missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

/// Positions of the corpus columns within one input schema.
#[derive(Debug, Clone)]
struct ColumnIndex {
    title: usize,
    abstract_text: usize,
    authors: usize,
    journal: usize,
    publish_time: usize,
    /// Optional; resolved through [`SOURCE_ALIASES`].
    source: Option<usize>,
}

impl ColumnIndex {
    /// Resolve column positions from a header, collecting every missing
    /// required column into a single [`SchemaError`].
    fn resolve(headers: &[String]) -> Result<Self, SchemaError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError { missing });
        }

        // Every required position exists once the check above passes.
        let at = |name: &str| position(name).unwrap_or_default();
        Ok(ColumnIndex {
            title: at(COL_TITLE),
            abstract_text: at(COL_ABSTRACT),
            authors: at(COL_AUTHORS),
            journal: at(COL_JOURNAL),
            publish_time: at(COL_PUBLISH_TIME),
            source: SOURCE_ALIASES.iter().copied().find_map(position),
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a metadata corpus from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the corpus columns (the usual export)
/// * `.json`    – records-oriented array: `[{ "title": ..., ... }, ...]`
/// * `.parquet` – string columns named like the CSV header
pub fn load_file(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let cols = ColumnIndex::resolve(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(RawRecord {
            title: non_empty(row.get(cols.title)),
            abstract_text: non_empty(row.get(cols.abstract_text)),
            authors: non_empty(row.get(cols.authors)),
            journal: non_empty(row.get(cols.journal)),
            publish_time: non_empty(row.get(cols.publish_time)),
            source: cols.source.and_then(|i| non_empty(row.get(i))),
        });
    }
    Ok(records)
}

/// Normalize a possibly missing cell: `None` for an absent or blank value.
fn non_empty(cell: Option<&str>) -> Option<String> {
    match cell {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "title": "Covid impact study",
///     "abstract": "We study ...",
///     "authors": "Doe, J.; Roe, R.",
///     "journal": "Nature",
///     "publish_time": "2020-03-15",
///     "source_x": "PMC"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    // A records-oriented file has no header; its column set is the union of
    // keys, since serializers drop null fields from individual rows.
    let mut keys: BTreeSet<&str> = BTreeSet::new();
    for row in rows {
        if let Some(obj) = row.as_object() {
            keys.extend(obj.keys().map(String::as_str));
        }
    }
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !keys.contains(**name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError { missing }.into());
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let field = |name: &str| obj.get(name).and_then(json_to_text);
        records.push(RawRecord {
            title: field(COL_TITLE),
            abstract_text: field(COL_ABSTRACT),
            authors: field(COL_AUTHORS),
            journal: field(COL_JOURNAL),
            publish_time: field(COL_PUBLISH_TIME),
            source: SOURCE_ALIASES.iter().copied().find_map(field),
        });
    }
    Ok(records)
}

/// Convert a JSON value to cell text, treating null and blanks as missing.
fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
        JsonValue::String(_) | JsonValue::Null => None,
        // A bare-year publish_time serializes as a number.
        JsonValue::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a metadata corpus from a Parquet file.
///
/// Expected schema: one Utf8 (or LargeUtf8) column per corpus column; numeric
/// columns are rendered as the text the CSV loader would have seen, and date
/// or timestamp columns as ISO dates.  Any other column type fails the load.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let cols = ColumnIndex::resolve(&field_names)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let cell = |idx: usize| {
                text_at(batch.column(idx), row)
                    .with_context(|| format!("decoding column {:?}", schema.field(idx).name()))
            };
            records.push(RawRecord {
                title: cell(cols.title)?,
                abstract_text: cell(cols.abstract_text)?,
                authors: cell(cols.authors)?,
                journal: cell(cols.journal)?,
                publish_time: cell(cols.publish_time)?,
                source: match cols.source {
                    Some(idx) => cell(idx)?,
                    None => None,
                },
            });
        }
    }
    Ok(records)
}

/// Extract one cell as text from an Arrow column at the given row.  Nulls and
/// blank strings come back as `None`.  A column type outside the supported
/// set is a structural error, not a missing value, so it fails the load
/// instead of draining the column.
fn text_at(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row).to_string()),
        // Pandas writes datetime columns as Date32 or Timestamp.
        DataType::Date32 => col
            .as_any()
            .downcast_ref::<Date32Array>()
            .and_then(|a| a.value_as_date(row))
            .map(|d| d.format("%Y-%m-%d").to_string()),
        DataType::Date64 => col
            .as_any()
            .downcast_ref::<Date64Array>()
            .and_then(|a| a.value_as_date(row))
            .map(|d| d.format("%Y-%m-%d").to_string()),
        DataType::Timestamp(unit, _) => {
            timestamp_date(col, *unit, row).map(|d| d.format("%Y-%m-%d").to_string())
        }
        other => bail!("Unsupported parquet column type: {other}"),
    };
    Ok(text.filter(|s| !s.trim().is_empty()))
}

/// Calendar date of one timestamp cell, whatever its precision.
fn timestamp_date(col: &Arc<dyn Array>, unit: TimeUnit, row: usize) -> Option<NaiveDate> {
    let datetime = match unit {
        TimeUnit::Second => col
            .as_any()
            .downcast_ref::<TimestampSecondArray>()
            .and_then(|a| a.value_as_datetime(row)),
        TimeUnit::Millisecond => col
            .as_any()
            .downcast_ref::<TimestampMillisecondArray>()
            .and_then(|a| a.value_as_datetime(row)),
        TimeUnit::Microsecond => col
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .and_then(|a| a.value_as_datetime(row)),
        TimeUnit::Nanosecond => col
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .and_then(|a| a.value_as_datetime(row)),
    };
    datetime.map(|dt| dt.date())
}
