use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use palette::Srgb;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Column, SpectrumSeries, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one value per cell (instrument exports)
/// * `.json`    – `[{ "Wavenumber (cm-1)": 4000.0, "%T": 98.2 }, ...]`
/// * `.parquet` – flat primitive columns
pub fn load_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Load a file as a [`SpectrumSeries`] named after the file.
pub fn load_series(path: &Path, color: Srgb<u8>) -> Result<SpectrumSeries> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());

    let table = load_table(path).with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "Loaded {name}: {} rows, columns {:?}",
        table.len(),
        table.column_names().collect::<Vec<_>>()
    );
    Ok(SpectrumSeries::new(name, table, color))
}

/// A file that could not be turned into a series.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned());
        write!(f, "Error processing {name}: {:#}", self.error)
    }
}

/// Load every file in order, pairing each with its colour.
///
/// A file that fails to load is logged as a warning and returned in the
/// failure list; the remaining files are still loaded.
pub fn load_all<P: AsRef<Path>>(
    paths: &[P],
    colors: &[Srgb<u8>],
) -> (Vec<SpectrumSeries>, Vec<LoadFailure>) {
    let mut series = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();

    for (path, &color) in paths.iter().zip(colors) {
        let path = path.as_ref();
        match load_series(path, color) {
            Ok(s) => series.push(s),
            Err(error) => {
                let failure = LoadFailure {
                    path: path.to_path_buf(),
                    error,
                };
                log::warn!("{failure}");
                failures.push(failure);
            }
        }
    }

    (series, failures)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one value per cell.
/// Ragged rows are padded with nulls so every column keeps its row index.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, column) in cells.iter_mut().enumerate() {
            let value = record.get(col_idx).map_or(CellValue::Null, guess_cell_type);
            column.push(value);
        }
    }

    Ok(Table::new(
        headers
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect(),
    ))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Wavenumber (cm-1)": 4000.0, "%Transmittance": 98.1 },
///   { "Wavenumber (cm-1)": 3998.0, "%Transmittance": 98.0 }
/// ]
/// ```
///
/// Columns appear in order of first occurrence; keys missing from a record
/// become nulls.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<Column> = Vec::new();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for (key, val) in obj {
            let idx = match columns.iter().position(|c| c.name == *key) {
                Some(idx) => idx,
                None => {
                    columns.push(Column::new(key.clone(), vec![CellValue::Null; i]));
                    columns.len() - 1
                }
            };
            columns[idx].cells.push(json_to_cell(val));
        }

        // Pad columns this record did not mention.
        for column in &mut columns {
            if column.cells.len() < i + 1 {
                column.cells.push(CellValue::Null);
            }
        }
    }

    Ok(Table::new(columns))
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
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).  Nested columns are kept as their type
/// name so they never match a numeric role.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let mut columns: Vec<Column> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Column::new(f.name().clone(), Vec::new()))
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (column, array) in columns.iter_mut().zip(batch.columns()) {
            column
                .cells
                .extend((0..batch.num_rows()).map(|row| extract_cell_value(array, row)));
        }
    }

    Ok(Table::new(columns))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map_or(CellValue::Null, |s| CellValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(row))),
        other => CellValue::String(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ftir-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_cells_are_typed_per_value() {
        let path = temp_file(
            "typed.csv",
            "Wavenumber (cm-1),%Transmittance,note\n4000,98.5,ok\n3998,n/a,\n",
        );
        let table = load_table(&path).unwrap();

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["Wavenumber (cm-1)", "%Transmittance", "note"]
        );
        assert_eq!(table.columns[0].cells[0], CellValue::Integer(4000));
        assert_eq!(table.columns[1].cells[0], CellValue::Float(98.5));
        assert_eq!(table.columns[1].cells[1], CellValue::String("n/a".into()));
        assert_eq!(table.columns[2].cells[1], CellValue::Null);
    }

    #[test]
    fn short_csv_rows_are_padded() {
        let path = temp_file("ragged.csv", "cm,%T\n4000,99\n3998\n");
        let table = load_table(&path).unwrap();
        assert_eq!(table.columns[1].cells, vec![CellValue::Integer(99), CellValue::Null]);
    }

    #[test]
    fn json_records_keep_first_seen_column_order() {
        let path = temp_file(
            "records.json",
            r#"[{"cm-1": 4000, "%T": 97.5}, {"%T": 96.0, "extra": true}]"#,
        );
        let table = load_table(&path).unwrap();

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["cm-1", "%T", "extra"]
        );
        assert_eq!(table.columns[0].cells, vec![CellValue::Integer(4000), CellValue::Null]);
        assert_eq!(table.columns[2].cells, vec![CellValue::Null, CellValue::Bool(true)]);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let path = temp_file("bad.json", r#"{"cm": [1, 2]}"#);
        assert!(load_table(&path).is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = temp_file("spectrum.xyz", "");
        let err = load_table(&path).unwrap_err();
        assert!(err.to_string().contains(".xyz"));
    }

    #[test]
    fn load_all_reports_broken_files_and_keeps_going() {
        let good = temp_file("good_batch.csv", "cm,%T\n4000,99\n");
        let broken = temp_file("broken_batch.parquet", "not parquet at all");
        let black = Srgb::new(0, 0, 0);

        let (series, failures) = load_all(&[&good, &broken], &[black, black]);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "good_batch.csv");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].path, broken);
        assert!(
            failures[0]
                .to_string()
                .starts_with("Error processing broken_batch.parquet: ")
        );
    }

    #[test]
    fn series_is_named_after_the_file() {
        let path = temp_file("sample_a.csv", "cm,%T\n4000,99\n");
        let series = load_series(&path, Srgb::new(0, 0, 0)).unwrap();
        assert_eq!(series.name, "sample_a.csv");
        assert_eq!(series.table.len(), 1);
    }
}
