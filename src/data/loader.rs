use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    BOOSTER_CATEGORY_COLUMN, CLASS_COLUMN, LaunchRecord, LaunchTable, PAYLOAD_COLUMN,
    SITE_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the four launch columns (default)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per launch attribute
///
/// Extra columns are ignored. An empty table, a class outside `{0, 1}` or a
/// negative payload is a load error.
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    if table.is_empty() {
        bail!("{} contains no launch records", path.display());
    }
    Ok(table)
}

/// Validate one row's raw values and turn them into a record.
fn build_record(
    row: usize,
    site: &str,
    payload_mass_kg: f64,
    class: f64,
    category: &str,
) -> Result<LaunchRecord> {
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        bail!("Row {row}: payload mass {payload_mass_kg} is not a non-negative number");
    }
    let class = if class == 0.0 {
        0
    } else if class == 1.0 {
        1
    } else {
        bail!("Row {row}: class {class} is not 0 or 1");
    };
    Ok(LaunchRecord {
        site: site.to_string(),
        payload_mass_kg,
        class,
        booster_version_category: category.to_string(),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let site_idx = header_index(&headers, SITE_COLUMN)?;
    let payload_idx = header_index(&headers, PAYLOAD_COLUMN)?;
    let class_idx = header_index(&headers, CLASS_COLUMN)?;
    let category_idx = header_index(&headers, BOOSTER_CATEGORY_COLUMN)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let site = record.get(site_idx).unwrap_or("").trim();
        let category = record.get(category_idx).unwrap_or("").trim();
        let payload = parse_number(record.get(payload_idx).unwrap_or(""), row_no, PAYLOAD_COLUMN)?;
        let class = parse_number(record.get(class_idx).unwrap_or(""), row_no, CLASS_COLUMN)?;

        records.push(build_record(row_no, site, payload, class, category)?);
    }

    Ok(LaunchTable::from_records(records))
}

fn header_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("CSV missing '{name}' column"))
}

fn parse_number(s: &str, row: usize, col: &str) -> Result<f64> {
    let tok = s.trim();
    tok.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{tok}' is not a number"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let site = json_str(obj.get(SITE_COLUMN), i, SITE_COLUMN)?;
        let category = json_str(obj.get(BOOSTER_CATEGORY_COLUMN), i, BOOSTER_CATEGORY_COLUMN)?;
        let payload = json_f64(obj.get(PAYLOAD_COLUMN), i, PAYLOAD_COLUMN)?;
        let class = json_f64(obj.get(CLASS_COLUMN), i, CLASS_COLUMN)?;

        records.push(build_record(i, site, payload, class, category)?);
    }

    Ok(LaunchTable::from_records(records))
}

fn json_str<'a>(val: Option<&'a JsonValue>, row: usize, col: &str) -> Result<&'a str> {
    val.and_then(|v| v.as_str())
        .with_context(|| format!("Row {row}: missing or non-string '{col}'"))
}

fn json_f64(val: Option<&JsonValue>, row: usize, col: &str) -> Result<f64> {
    val.and_then(|v| v.as_f64())
        .with_context(|| format!("Row {row}: missing or non-numeric '{col}'"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per launch attribute.
///
/// Numeric columns may be Int32/Int64/Float32/Float64, as written by either
/// **Pandas** (`df.to_parquet()`) or **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = batch_column(&batch, SITE_COLUMN)?;
        let payload_col = batch_column(&batch, PAYLOAD_COLUMN)?;
        let class_col = batch_column(&batch, CLASS_COLUMN)?;
        let category_col = batch_column(&batch, BOOSTER_CATEGORY_COLUMN)?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            let site = extract_string(site_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{SITE_COLUMN}'"))?;
            let category = extract_string(category_col, row).with_context(|| {
                format!("Row {row_no}: failed to read '{BOOSTER_CATEGORY_COLUMN}'")
            })?;
            let payload = extract_f64(payload_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{PAYLOAD_COLUMN}'"))?;
            let class = extract_f64(class_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{CLASS_COLUMN}'"))?;

            records.push(build_record(row_no, &site, payload, class, &category)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(LaunchTable::from_records(records))
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .context("expected LargeStringArray")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    }
}

/// Extract a numeric cell as `f64` from any integer or float column.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;

    fn temp_with(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,1,525.0,F9 v1.0  B0004,v1.0
3,VAFB SLC-4E,1,9600.0,F9 B4 B1041.1,B4
";

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let file = temp_with(".csv", CSV);
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.records[1].site, "CCAFS LC-40");
        assert_eq!(table.records[1].payload_mass_kg, 525.0);
        assert_eq!(table.records[1].class, 1);
        assert_eq!(table.records[2].booster_version_category, "B4");
    }

    #[test]
    fn loads_bundled_dataset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/spacex_launch_dash.csv");
        let table = load_file(&path).unwrap();

        assert_eq!(table.len(), 56);
        assert_eq!(
            table.distinct_sites(),
            vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert_eq!(table.payload_bounds(), Some((0.0, 9600.0)));
        let successes = table.records.iter().filter(|r| r.class == 1).count();
        assert_eq!(successes, 25);
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let file = temp_with(".csv", "Launch Site,class\nA,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_rejects_invalid_class() {
        let file = temp_with(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,2,100,FT\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("not 0 or 1"));
    }

    #[test]
    fn csv_rejects_negative_payload() {
        let file = temp_with(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,-5,FT\n",
        );
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn empty_table_is_an_error() {
        let file = temp_with(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no launch records"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/nonexistent/spacex_launch_dash.csv")).is_err());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let file = temp_with(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn loads_json_records() {
        let file = temp_with(
            ".json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "class": 1, "Booster Version Category": "FT"},
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5600.5, "class": 0, "Booster Version Category": "FT"}
            ]"#,
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].payload_mass_kg, 2490.0);
        assert_eq!(table.records[1].class, 0);
    }

    #[test]
    fn json_row_with_missing_site_is_an_error() {
        let file = temp_with(
            ".json",
            r#"[{"Payload Mass (kg)": 1, "class": 1, "Booster Version Category": "FT"}]"#,
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Launch Site"));
    }

    #[test]
    fn loads_parquet_with_integer_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, DataType::Int64, false),
            Field::new(CLASS_COLUMN, DataType::Int32, false),
            Field::new(BOOSTER_CATEGORY_COLUMN, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS SLC-40", "VAFB SLC-4E"])),
                Arc::new(Int64Array::from(vec![3600, 475])),
                Arc::new(Int32Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["B5", "FT"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].site, "CCAFS SLC-40");
        assert_eq!(table.records[0].payload_mass_kg, 3600.0);
        assert_eq!(table.records[1].class, 0);
        assert_eq!(table.records[1].booster_version_category, "FT");
    }
}
