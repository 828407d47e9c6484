use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use odelia_model::{
    CaseRecord, CellValue, FOLD_COLUMN, INSTITUTION_COLUMN, PATH_COLUMN, SPLIT_COLUMN, UID_COLUMN,
    modality_from_flag_column,
};

use crate::error::{IngestError, Result};

/// A metadata table held as raw text, one row per case.
///
/// Cells keep their original spelling so that re-exported columns are
/// byte-identical to the input; typed access goes through [`CellValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

impl MetadataTable {
    /// Builds a table, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Looks up a column, failing with the list of available columns.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|values| values.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Raw values of a column in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some((0..self.rows.len()).map(|row| self.cell(row, index)).collect())
    }

    /// Modality flag columns (`has_*`) in table order.
    pub fn flag_columns(&self) -> Vec<&str> {
        self.headers
            .iter()
            .map(String::as_str)
            .filter(|header| modality_from_flag_column(header).is_some())
            .collect()
    }

    /// Replaces the values of `name`, appending the column when absent.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.headers.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
    }

    /// Builds one [`CaseRecord`] per row.
    ///
    /// `UID` and `Institution` are required. `Split`, `Fold` and `Path` are
    /// optional, and a missing label column yields `Null` labels.
    pub fn to_cases(&self, label_column: Option<&str>) -> Result<Vec<CaseRecord>> {
        let uid = self.require_column(UID_COLUMN)?;
        let institution = self.require_column(INSTITUTION_COLUMN)?;
        let split = self.column_index(SPLIT_COLUMN);
        let fold = self.column_index(FOLD_COLUMN);
        let path = self.column_index(PATH_COLUMN);
        let label = match label_column {
            Some(name) => Some(self.require_column(name)?),
            None => None,
        };
        let flags: Vec<(usize, &str)> = self
            .headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| modality_from_flag_column(header).map(|m| (idx, m)))
            .collect();

        let mut cases = Vec::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            let optional = |column: Option<usize>| {
                column
                    .map(|idx| self.cell(row, idx))
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            };
            cases.push(CaseRecord {
                row,
                uid: self.cell(row, uid).to_string(),
                institution: self.cell(row, institution).to_string(),
                split: optional(split),
                fold: fold.and_then(|idx| parse_fold(self.cell(row, idx))),
                path: optional(path),
                flags: flags
                    .iter()
                    .map(|(idx, modality)| {
                        ((*modality).to_string(), CellValue::infer(self.cell(row, *idx)))
                    })
                    .collect(),
                label: label
                    .map(|idx| CellValue::infer(self.cell(row, idx)))
                    .unwrap_or_default(),
            });
        }
        Ok(cases)
    }
}

fn parse_fold(raw: &str) -> Option<i64> {
    match CellValue::infer(raw) {
        CellValue::Int(value) => Some(value),
        CellValue::Float(value) if value.fract() == 0.0 => Some(value as i64),
        _ => None,
    }
}

/// Reads a metadata CSV from disk.
pub fn read_metadata_table(path: &Path) -> Result<MetadataTable> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let table = parse_metadata_csv(file, path)?;
    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "metadata table loaded"
    );
    Ok(table)
}

/// Parses metadata CSV content; `path` is only used in error messages.
pub fn parse_metadata_csv<R: Read>(reader: R, path: &Path) -> Result<MetadataTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| csv_error(path, &e))?
            .iter()
            .map(normalize_header)
            .collect(),
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, &e))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        if row.len() != headers.len() {
            warn!(
                path = %path.display(),
                line = record.position().map(csv::Position::line),
                expected = headers.len(),
                found = row.len(),
                "row width does not match header"
            );
        }
        rows.push(row);
    }
    Ok(MetadataTable::new(headers, rows))
}

fn csv_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
