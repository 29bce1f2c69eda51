//! Raw tabular readers for the practice sheet.
//!
//! Both readers produce a [`RawTable`]: the header row plus every following
//! row as plain strings. Column resolution happens one level up so CSV and
//! workbook sources share the same rules.

use super::DatasetError;
use calamine::{Data, Reader, open_workbook_auto};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Header row plus data rows, all cells as text.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    fn from_rows(mut rows: Vec<Vec<String>>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::MissingHeader);
        }
        let headers = rows.remove(0);
        Ok(Self { headers, rows })
    }
}

pub(super) fn read_table(path: &Path, sheet: Option<&str>) -> Result<RawTable, DatasetError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => {
            let file = File::open(path).map_err(|source| DatasetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_csv(file)
        }
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, sheet),
        _ => Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Read a CSV document whose first record is the header row.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(rows = rows.len(), "Read CSV records");
    RawTable::from_rows(rows)
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<RawTable, DatasetError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| DatasetError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DatasetError::NoWorksheet(path.to_path_buf()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| DatasetError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    debug!(sheet = %sheet_name, rows = rows.len(), "Read worksheet rows");
    RawTable::from_rows(rows)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        other => other.to_string(),
    }
}
