//! Batch validation of an IBAN column in a CSV file.

use crate::error::IbanError;
use crate::iban::Iban;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub line: usize,
    pub input: String,
    pub valid: bool,
    pub iban: Option<String>,
    pub country: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid_characters: usize,
    pub wrong_checksum: usize,
    pub invalid_country: usize,
    pub invalid_structure: usize,
}

impl BatchSummary {
    pub fn invalid(&self) -> usize {
        self.total - self.valid
    }

    fn record(&mut self, outcome: &Result<Iban, IbanError>) {
        self.total += 1;
        match outcome {
            Ok(_) => self.valid += 1,
            Err(IbanError::InvalidCharacters) => self.invalid_characters += 1,
            Err(IbanError::WrongChecksum) => self.wrong_checksum += 1,
            Err(IbanError::InvalidCountry(_)) => self.invalid_country += 1,
            Err(IbanError::InvalidStructure) => self.invalid_structure += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
    pub summary: BatchSummary,
}

pub fn check_csv(path: &Path, column: &str) -> Result<BatchReport, String> {
    let file = File::open(path).map_err(|err| format!("{}: {err}", path.display()))?;
    check_reader(file, column)
}

/// Validate `column` of every record. Line numbers count the header as 1.
pub fn check_reader<R: Read>(input: R, column: &str) -> Result<BatchReport, String> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().map_err(|err| err.to_string())?.clone();
    let idx = headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| format!("column '{column}' not found in CSV header"))?;

    let mut rows = Vec::new();
    let mut summary = BatchSummary::default();
    for (n, result) in reader.records().enumerate() {
        let record = result.map_err(|err| err.to_string())?;
        let input = record.get(idx).unwrap_or("").to_string();
        let outcome = Iban::parse(&input);
        summary.record(&outcome);

        let row = match outcome {
            Ok(iban) => BatchRow {
                line: n + 2,
                input,
                valid: true,
                country: Some(iban.country().as_str().to_string()),
                iban: Some(iban.to_raw()),
                error: None,
            },
            Err(err) => {
                log::debug!("line {}: {err}", n + 2);
                BatchRow {
                    line: n + 2,
                    input,
                    valid: false,
                    iban: None,
                    country: None,
                    error: Some(err.to_string()),
                }
            }
        };
        rows.push(row);
    }

    log::info!(
        "checked {} IBAN(s): {} valid, {} invalid",
        summary.total,
        summary.valid,
        summary.invalid()
    );
    Ok(BatchReport { rows, summary })
}

pub fn write_report(output: &Path, rows: &[BatchRow]) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    for row in rows {
        writer.serialize(row).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "name,iban\n\
        alice,GB82 WEST 1234 5698 7654 32\n\
        bob,GB81WEST12345698765432\n\
        carol,ZZ33WEST12345698765432\n\
        dave,GB82WE$T12345698765432\n\
        erin,GB88WEST1234569876543\n";

    #[test]
    fn summarises_each_outcome() {
        let report = check_reader(SAMPLE.as_bytes(), "iban").unwrap();
        assert_eq!(
            report.summary,
            BatchSummary {
                total: 5,
                valid: 1,
                invalid_characters: 1,
                wrong_checksum: 1,
                invalid_country: 1,
                invalid_structure: 1,
            }
        );
        assert_eq!(report.summary.invalid(), 4);
    }

    #[test]
    fn rows_carry_line_numbers_and_normalized_values() {
        let report = check_reader(SAMPLE.as_bytes(), "iban").unwrap();
        let first = &report.rows[0];
        assert_eq!(first.line, 2);
        assert!(first.valid);
        assert_eq!(first.iban.as_deref(), Some("GB82WEST12345698765432"));
        assert_eq!(first.country.as_deref(), Some("GB"));

        let carol = &report.rows[2];
        assert_eq!(carol.line, 4);
        assert!(!carol.valid);
        assert_eq!(
            carol.error.as_deref(),
            Some("IBAN country code is not recognised: ZZ")
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = check_reader(SAMPLE.as_bytes(), "account").unwrap_err();
        assert!(err.contains("account"));
    }
}
