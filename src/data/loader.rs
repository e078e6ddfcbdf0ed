use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use log::{info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Row, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the listings and reviews tables.
///
/// The reviews table is never consulted by the analysis, so a missing
/// reviews file degrades to an empty table instead of failing the run.
pub fn load_data(listings_path: &Path, reviews_path: &Path) -> Result<(Table, Table)> {
    let listings = load_table(listings_path)
        .with_context(|| format!("loading listings from {}", listings_path.display()))?;
    info!(
        "loaded {} listings with {} columns from {}",
        listings.len(),
        listings.columns.len(),
        listings_path.display()
    );

    let reviews = if reviews_path.exists() {
        let reviews = load_table(reviews_path)
            .with_context(|| format!("loading reviews from {}", reviews_path.display()))?;
        info!("loaded {} reviews from {}", reviews.len(), reviews_path.display());
        reviews
    } else {
        warn!(
            "reviews file {} not found, continuing without reviews",
            reviews_path.display()
        );
        Table::default()
    };

    Ok((listings, reviews))
}

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one listing per line
/// * `.json`    – `[{ "price": "$100", "neighbourhood": "...", ... }, ...]`
/// * `.parquet` – flat scalar columns
pub fn load_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "price": "$120.00", "neighbourhood": "Mission", "room_type": "Entire home/apt" },
///   ...
/// ]
/// ```
///
/// Column order follows the key order of the records.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        rows.push(obj.iter().map(|(k, v)| (k.clone(), json_to_cell(v))).collect());
    }

    Ok(Table::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Cells stay text; the usual NA tokens become nulls.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(col_name, value)| (col_name.clone(), csv_cell(value)))
            .collect();
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

/// Tokens read as missing, as `pandas.read_csv` does by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV cells keep their source text; labels such as `02134` must survive
/// untouched. Prices are coerced later, during cleaning.
fn csv_cell(s: &str) -> CellValue {
    if NA_TOKENS.contains(&s) {
        return CellValue::Null;
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let cells = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(col_idx, field)| {
                    let value = extract_cell(batch.column(col_idx), row)
                        .with_context(|| format!("Row {row}: failed to read '{}'", field.name()))?;
                    Ok::<_, anyhow::Error>((field.name().clone(), value))
                })
                .collect::<Result<Row>>()?;
            rows.push(cells);
        }
    }

    Ok(Table::new(columns, rows))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_string_opt::<i32>().context("expected StringArray")?;
            CellValue::String(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string_opt::<i64>().context("expected LargeStringArray")?;
            CellValue::String(arr.value(row).to_string())
        }
        DataType::Int32 => {
            let arr = col.as_primitive_opt::<Int32Type>().context("expected Int32Array")?;
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_primitive_opt::<Int64Type>().context("expected Int64Array")?;
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_primitive_opt::<Float32Type>().context("expected Float32Array")?;
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_primitive_opt::<Float64Type>().context("expected Float64Array")?;
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_boolean_opt().context("expected BooleanArray")?;
            CellValue::Bool(arr.value(row))
        }
        _ => {
            let formatted = arrow::util::display::array_value_to_string(col, row)
                .context("formatting arrow value")?;
            CellValue::String(formatted)
        }
    };
    Ok(value)
}
