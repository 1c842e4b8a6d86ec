//! CSV reader/writer producing and consuming string-typed frames.
//!
//! Every column is read as strings; typing is the decoders' job, since the
//! same column can hold numbers, sentinels and free text in one export.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use polars::prelude::{AnyValue, Column, DataFrame};
use tracing::{info, warn};

use crate::values::any_to_string;

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read one CSV file into an all-string `DataFrame`.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read headers of {}", path.display()))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("read row {} of {}", row_idx + 1, path.display())
        })?;
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let cell = record.get(col_idx).unwrap_or("");
            column.push(cell.trim().to_string());
        }
    }

    let mut frame_columns = Vec::with_capacity(headers.len());
    for (header, values) in headers.into_iter().zip(columns) {
        if header.is_empty() {
            warn!("skipping column with empty header in {}", path.display());
            continue;
        }
        frame_columns.push(Column::new(header.into(), values));
    }
    let df = DataFrame::new(frame_columns)
        .with_context(|| format!("build frame from {}", path.display()))?;
    info!(
        rows = df.height(),
        columns = df.width(),
        "read table {}",
        path.display()
    );
    Ok(df)
}

/// Read a directory of CSV files as a sheet map (file stem = sheet name),
/// the in-memory shape multi-sheet sources arrive in.
pub fn read_sheets(dir: &Path) -> Result<BTreeMap<String, DataFrame>> {
    let mut sheets = BTreeMap::new();
    let entries = std::fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let df = read_table(&path)?;
        sheets.insert(stem.to_string(), df);
    }
    if sheets.is_empty() {
        warn!("no csv sheets found under {}", dir.display());
    }
    Ok(sheets)
}

/// Write a `DataFrame` to CSV, rendering every cell through the canonical
/// string conversion.
pub fn write_table(df: &DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    writer.write_record(&names)?;

    for row_idx in 0..df.height() {
        let mut record = Vec::with_capacity(names.len());
        for name in &names {
            let column = df.column(name.as_str())?;
            let value = column.get(row_idx).unwrap_or(AnyValue::Null);
            record.push(any_to_string(value));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!(rows = df.height(), "wrote table {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_a_small_table() {
        let dir = std::env::temp_dir().join("reestr-ingest-test");
        std::fs::create_dir_all(&dir).expect("tmp dir");
        let path = dir.join("sample.csv");
        std::fs::write(&path, "id,fio_full\n1,Иванов Иван Иванович\n2,\n").expect("write csv");

        let df = read_table(&path).expect("read");
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);

        let out = dir.join("out.csv");
        write_table(&df, &out).expect("write");
        let again = read_table(&out).expect("reread");
        assert_eq!(again.height(), 2);
    }
}
