use crate::constants::{CATEGORY_COLUMN, COMPLAINT_TEXT_COLUMN};
use crate::types::DepartmentLabel;
use crate::Error;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// One labelled row of the training corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub complaint_text: String,
    pub category: DepartmentLabel,
}

impl TrainingRecord {
    pub fn new<T: Into<String>, C: Into<DepartmentLabel>>(complaint_text: T, category: C) -> Self {
        Self {
            complaint_text: complaint_text.into(),
            category: category.into(),
        }
    }

    /// Reads a `complaint_text,category` CSV file. Extra columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file can't be opened and `ParserError` for malformed CSV or
    /// missing columns.
    pub fn read_from_path(path: &Path) -> Result<Vec<Self>, Error> {
        let file = File::open(path)?;
        let records = Self::read_from_reader(file)?;
        debug!("Loaded {} training records from {:?}", records.len(), path);
        Ok(records)
    }

    pub fn read_from_str(csv_str: &str) -> Result<Vec<Self>, Error> {
        Self::read_from_reader(Cursor::new(csv_str))
    }

    /// Rows with a blank category are skipped with a warning. A blank complaint is kept; it
    /// normalizes to "" like any other text without content.
    pub fn read_from_reader<R: Read>(reader: R) -> Result<Vec<Self>, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::ParserError(format!("Failed to read headers: {}", e)))?
            .clone();

        let text_position = column_position(&headers, COMPLAINT_TEXT_COLUMN)?;
        let category_position = column_position(&headers, CATEGORY_COLUMN)?;

        let mut records = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record =
                record.map_err(|e| Error::ParserError(format!("Failed to read record: {}", e)))?;

            let category = record.get(category_position).map(str::trim).unwrap_or("");
            if category.is_empty() {
                warn!("Skipping row {} with no category", row_idx + 1);
                continue;
            }

            let complaint_text = record.get(text_position).unwrap_or("");
            records.push(Self::new(complaint_text, category));
        }

        Ok(records)
    }
}

fn column_position(headers: &StringRecord, column: &str) -> Result<usize, Error> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| Error::ParserError(format!("Missing '{}' column", column)))
}
