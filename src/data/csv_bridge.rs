//! Conversion between the table's records and CSV text

use crate::data::datatable::{DataValue, Record, RowId, ID_COLUMN};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Default file name offered for exports
pub const DEFAULT_EXPORT_FILE: &str = "table_export.csv";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file is empty or has invalid format.")]
    Empty,

    #[error("CSV Error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Row {row}: Missing required fields")]
    MissingFields { row: usize },

    #[error("Row {row}: {column} must be a number")]
    NotNumeric { row: usize, column: String },

    #[error("Error reading CSV file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export.")]
    NoData,

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Extra checks applied to imported records.
///
/// The default performs none: any header-plus-rows file is accepted.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Reject the import at the first record missing one of these columns
    /// (matched case-insensitively against the header)
    pub required_columns: Vec<String>,

    /// Columns whose values must read as numbers
    pub numeric_columns: Vec<String>,
}

impl ImportOptions {
    pub fn strict(required_columns: Vec<String>, numeric_columns: Vec<String>) -> Self {
        Self {
            required_columns,
            numeric_columns,
        }
    }

    fn is_strict(&self) -> bool {
        !self.required_columns.is_empty() || !self.numeric_columns.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').to_string()
}

fn lookup<'a>(record: &'a Record, column: &str) -> Option<&'a DataValue> {
    record
        .fields
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(column))
        .map(|(_, value)| value)
}

/// Handles CSV import and export for the table
pub struct CsvBridge;

impl CsvBridge {
    /// Parse CSV text into fresh records.
    ///
    /// Ids are assigned sequentially from "1"; every other header becomes a
    /// text field. The caller decides what to do with the result, nothing is
    /// merged here.
    pub fn import_str(text: &str, options: &ImportOptions) -> Result<Vec<Record>, ImportError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::Empty);
        }

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            let mut record = Record::new(RowId::sequential(idx));
            for (header, value) in headers.iter().zip(row.iter()) {
                // The identifier is always reassigned
                if header == ID_COLUMN {
                    continue;
                }
                record.set(header.clone(), value);
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(ImportError::Empty);
        }

        if options.is_strict() {
            Self::validate(&records, options)?;
        }

        debug!(target: "csv", "Parsed {} records with columns {:?}", records.len(), headers);
        Ok(records)
    }

    pub fn import_file(path: &Path, options: &ImportOptions) -> Result<Vec<Record>, ImportError> {
        let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records = Self::import_str(&text, options)?;
        info!(target: "csv", "Imported {} rows from {}", records.len(), path.display());
        Ok(records)
    }

    fn validate(records: &[Record], options: &ImportOptions) -> Result<(), ImportError> {
        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;

            let missing = options.required_columns.iter().any(|column| {
                lookup(record, column).map_or(true, |value| value.is_empty_text())
            });
            if missing {
                return Err(ImportError::MissingFields { row });
            }

            for column in &options.numeric_columns {
                if let Some(value) = lookup(record, column) {
                    if value.as_number().is_none() {
                        return Err(ImportError::NotNumeric {
                            row,
                            column: capitalize(column),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialise rows, projecting only `columns` in the given order.
    /// Missing fields are written as empty cells.
    pub fn export_string(rows: &[Record], columns: &[String]) -> Result<String, ExportError> {
        if rows.is_empty() {
            return Err(ExportError::NoData);
        }

        let mut writer = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(columns.iter().map(|c| row.display_value(c)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Export to a file; returns the number of rows written
    pub fn export_file(
        rows: &[Record],
        columns: &[String],
        path: &Path,
    ) -> Result<usize, ExportError> {
        let text = Self::export_string(rows, columns)?;
        fs::write(path, text).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(target: "csv", "Exported {} rows to {}", rows.len(), path.display());
        Ok(rows.len())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_assigns_sequential_ids() {
        let csv = "name,email\nAlice,a@x.io\n\nBob,b@x.io\n";
        let rows = CsvBridge::import_str(csv, &ImportOptions::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id.as_str(), "1");
        assert_eq!(rows[1].id.as_str(), "2");
        assert_eq!(rows[1].display_value("email"), "b@x.io");
    }

    #[test]
    fn test_import_ignores_id_column() {
        let csv = "id,name\n42,Alice\n";
        let rows = CsvBridge::import_str(csv, &ImportOptions::default()).unwrap();
        assert_eq!(rows[0].id.as_str(), "1");
        assert!(rows[0].get("id").is_none());
    }

    #[test]
    fn test_import_rejects_empty_input() {
        assert!(matches!(
            CsvBridge::import_str("", &ImportOptions::default()),
            Err(ImportError::Empty)
        ));
        assert!(matches!(
            CsvBridge::import_str("name,email\n", &ImportOptions::default()),
            Err(ImportError::Empty)
        ));
    }

    #[test]
    fn test_import_tolerates_ragged_rows() {
        let csv = "name,email,age\nAlice\nBob,b@x.io,30,extra\n";
        let rows = CsvBridge::import_str(csv, &ImportOptions::default()).unwrap();
        assert!(rows[0].get("email").is_none());
        assert_eq!(rows[1].display_value("age"), "30");
    }

    #[test]
    fn test_strict_import() {
        let options = ImportOptions::strict(
            vec!["name".into(), "age".into()],
            vec!["age".into()],
        );

        let ok = CsvBridge::import_str("Name,Age\nAlice,30\n", &options).unwrap();
        assert_eq!(ok.len(), 1);

        let missing = CsvBridge::import_str("Name,Age\nAlice,30\n,31\n", &options).unwrap_err();
        assert_eq!(missing.to_string(), "Row 2: Missing required fields");

        let bad_age = CsvBridge::import_str("Name,Age\nAlice,old\n", &options).unwrap_err();
        assert_eq!(bad_age.to_string(), "Row 1: Age must be a number");
    }

    #[test]
    fn test_export_quotes_and_projects() {
        let rows = vec![
            Record::new("1")
                .with_field("name", "Smith, Jane")
                .with_field("age", 41i64)
                .with_field("role", "CTO"),
            Record::new("2").with_field("name", "Lee"),
        ];
        let columns = vec!["age".to_string(), "name".to_string()];

        let text = CsvBridge::export_string(&rows, &columns).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["age,name", "41,\"Smith, Jane\"", ",Lee"]);
    }

    #[test]
    fn test_export_without_rows() {
        assert!(matches!(
            CsvBridge::export_string(&[], &["name".to_string()]),
            Err(ExportError::NoData)
        ));
    }
}
