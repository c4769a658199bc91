use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::AsArray;
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{LABEL_COLUMN, Table};
use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sensor table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-delimited text with a header row
/// * `.tsv` / `.tab` – tab-delimited text with a header row
/// * `.json`         – `[{ "t": 0, "accel_x": 0.1, ..., "label": "walk" }, ...]`
/// * `.parquet`      – flat Parquet file, any integer/float columns
///
/// Every column except `label` is read as a number.
pub fn load_file(path: &Path) -> Result<Table, ViewerError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let loaded = match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b','),
        "tsv" | "tab" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(anyhow!("Unsupported file extension: .{other}")),
    };

    loaded.map_err(|e| ViewerError::Load {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })
}

// ---------------------------------------------------------------------------
// Row-wise table assembly (text and JSON sources)
// ---------------------------------------------------------------------------

struct TableBuilder {
    headers: Vec<String>,
    label_idx: usize,
    columns: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl TableBuilder {
    fn new(headers: Vec<String>) -> Result<Self> {
        if headers.iter().all(|h| h.is_empty()) {
            bail!("file has no header row");
        }
        let label_idx = headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .with_context(|| format!("missing '{LABEL_COLUMN}' column"))?;
        Ok(TableBuilder {
            columns: vec![Vec::new(); headers.len()],
            headers,
            label_idx,
            labels: Vec::new(),
        })
    }

    /// Append one row of raw cells, in header order.
    fn push_row<S: AsRef<str>>(&mut self, row_no: usize, cells: impl IntoIterator<Item = S>) -> Result<()> {
        let mut n = 0;
        for (col_idx, cell) in cells.into_iter().enumerate() {
            let cell = cell.as_ref().trim();
            let Some(header) = self.headers.get(col_idx) else {
                bail!("row {row_no}: more cells than header columns");
            };
            if col_idx == self.label_idx {
                if cell.is_empty() {
                    bail!("row {row_no}: empty label");
                }
                self.labels.push(cell.to_string());
            } else {
                let value = parse_cell(cell)
                    .with_context(|| format!("row {row_no}, column '{header}': '{cell}' is not a number"))?;
                self.columns[col_idx].push(value);
            }
            n += 1;
        }
        if n != self.headers.len() {
            bail!("row {row_no}: expected {} cells, found {n}", self.headers.len());
        }
        Ok(())
    }

    fn finish(self) -> Result<Table> {
        let label_idx = self.label_idx;
        let columns = self
            .headers
            .into_iter()
            .zip(self.columns)
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, c)| c)
            .collect();
        Table::from_columns(columns, self.labels)
    }
}

/// Empty cells are missing values.
fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

fn load_delimited(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context("opening file")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut builder = TableBuilder::new(headers)?;
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {row_no}"))?;
        builder.push_row(row_no, record.iter())?;
    }
    log::debug!("parsed {} delimited rows from {}", builder.labels.len(), path.display());
    builder.finish()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). The keys of the
/// first record define the columns, in the order they appear.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;
    let headers: Vec<String> = records
        .first()
        .and_then(|r| r.as_object())
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();

    let mut builder = TableBuilder::new(headers)?;
    for (row_no, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("row {row_no} is not a JSON object"))?;
        let cells: Vec<String> = builder
            .headers
            .iter()
            .map(|h| obj.get(h).map(json_cell).unwrap_or_default())
            .collect();
        builder.push_row(row_no, cells)?;
    }
    builder.finish()
}

fn json_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file (as written by Pandas or Polars).
///
/// Numeric columns of any integer or float type are widened to `f64`; the
/// label column may be text or integer and is read as text.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    let label_idx = schema
        .index_of(LABEL_COLUMN)
        .map_err(|_| anyhow!("Parquet file missing '{LABEL_COLUMN}' column"))?;
    let numeric: Vec<(usize, String)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx)
        .map(|(i, f)| (i, f.name().clone()))
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); numeric.len()];
    let mut labels: Vec<String> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for ((col_idx, name), slot) in numeric.iter().zip(values.iter_mut()) {
            let col = cast(batch.column(*col_idx), &DataType::Float64)
                .with_context(|| format!("column '{name}' is not numeric"))?;
            slot.extend(
                col.as_primitive::<Float64Type>()
                    .iter()
                    .map(|v| v.unwrap_or(f64::NAN)),
            );
        }

        let label_col = cast(batch.column(label_idx), &DataType::Utf8)
            .context("label column cannot be read as text")?;
        for value in label_col.as_string::<i32>().iter() {
            match value {
                Some(v) if !v.is_empty() => labels.push(v.to_string()),
                _ => bail!("row {}: empty label", labels.len()),
            }
        }
    }

    let columns = numeric
        .into_iter()
        .map(|(_, name)| name)
        .zip(values)
        .collect();
    Table::from_columns(columns, labels)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_columns_are_numeric_except_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "imu.csv",
            "t,accel_x,label\n0,0.5,walk\n1,,walk\n2,-1e-3,run\n",
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names(), ["t", "accel_x"]);
        let ax = table.column("accel_x").unwrap();
        assert_eq!(ax[0], 0.5);
        assert!(ax[1].is_nan());
        assert_eq!(ax[2], -0.001);
        assert_eq!(table.unique_labels(), vec!["walk", "run"]);
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "imu.tsv", "label\tt\nidle\t4\n");
        let table = load_file(&path).unwrap();
        assert_eq!(table.column("t").unwrap(), &[4.0]);
        assert_eq!(table.labels(), ["idle"]);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, ViewerError::Load { .. }));
    }

    #[test]
    fn empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", "");
        match load_file(&path).unwrap_err() {
            ViewerError::Load { reason, .. } => assert!(reason.contains("no header"), "{reason}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn label_column_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "nolabel.csv", "t,accel_x\n0,1\n");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("'label'"), "{err}");
    }

    #[test]
    fn non_numeric_cell_names_row_and_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "t,label\n0,a\nnope,a\n");
        let err = load_file(&path).unwrap_err().to_string();
        assert!(err.contains("row 1"), "{err}");
        assert!(err.contains("column 't'"), "{err}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.xlsx", "t,label\n");
        assert!(load_file(&path).unwrap_err().to_string().contains(".xlsx"));
    }

    #[test]
    fn json_records_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "imu.json",
            r#"[{"t": 0, "gyr_x": 1.5, "label": "walk"},
                {"t": 1, "gyr_x": null, "label": 3}]"#,
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.column("t").unwrap(), &[0.0, 1.0]);
        assert!(table.column("gyr_x").unwrap()[1].is_nan());
        assert_eq!(table.labels(), ["walk", "3"]);
    }

    #[test]
    fn json_columns_keep_record_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "order.json", r#"[{"t": 0, "accel_x": 1, "label": "w"}]"#);
        let table = load_file(&path).unwrap();
        assert_eq!(table.column_names(), ["t", "accel_x"]);
    }

    #[test]
    fn parquet_columns_are_widened_to_f64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imu.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("sample", DataType::Int64, false),
            Field::new("accel_z", DataType::Float32, true),
            Field::new("label", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![10, 11, 12])),
                Arc::new(Float32Array::from(vec![Some(0.5), None, Some(-2.0)])),
                Arc::new(StringArray::from(vec!["sit", "sit", "stand"])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.column_names(), ["sample", "accel_z"]);
        assert_eq!(table.column("sample").unwrap(), &[10.0, 11.0, 12.0]);
        let z = table.column("accel_z").unwrap();
        assert_eq!(z[0], 0.5);
        assert!(z[1].is_nan());
        assert_eq!(table.unique_labels(), vec!["sit", "stand"]);
    }
}
