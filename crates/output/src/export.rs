//! Report serialization in CSV and JSON form.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use cartagena_primitives::{AttributionRow, DailyReport};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while serializing or writing a report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem write failed.
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    /// CSV bytes were not valid UTF-8.
    #[error("csv output was not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ExportError {
    /// Whether retrying the same export could succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated rows preceded by a `# key: value` preamble.
    Csv,
    /// Compact JSON of the full report.
    Json,
    /// Pretty-printed JSON of the full report.
    PrettyJson,
}

impl ExportFormat {
    /// Conventional file extension for the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Fixed CSV column order; the header names are part of the output contract.
const CSV_HEADER: [&str; 6] = ["factor", "return", "beta", "contribution", "corr", "score"];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    factor: &'a str,
    #[serde(rename = "return")]
    native_return: f64,
    beta: f64,
    contribution: f64,
    corr: f64,
    score: f64,
}

impl<'a> From<&'a AttributionRow> for CsvRow<'a> {
    fn from(row: &'a AttributionRow) -> Self {
        Self {
            factor: &row.factor,
            native_return: row.raw_return,
            beta: row.beta,
            contribution: row.capped_contribution,
            corr: row.correlation,
            score: row.score,
        }
    }
}

/// Serialize a report (or a collection of them) in any supported format.
pub trait Exporter {
    /// Render into a string.
    ///
    /// # Errors
    /// Returns `ExportError` when serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Render into a file at `path`, replacing any existing content.
    ///
    /// # Errors
    /// Returns `ExportError` when serialization or the filesystem write
    /// fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for DailyReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut output = String::new();
                output.push_str(&format!("# date: {}\n", self.date));
                output.push_str(&format!("# target: {}\n", self.target));
                output.push_str(&format!("# horizon: {}\n", self.horizon.label()));
                output.push_str(&format!("# target_return: {}\n", self.target_return));
                output.push_str(&format!("# explained: {}\n", self.explained));
                output.push_str(&format!("# unexplained: {}\n", self.unexplained));

                let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(vec![]);
                wtr.write_record(CSV_HEADER)?;
                for row in &self.rows {
                    wtr.serialize(CsvRow::from(row))?;
                }
                let rows = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
                output.push_str(&rows);
                Ok(output)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<DailyReport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let sections: Vec<String> = self
                    .iter()
                    .map(|report| report.export_to_string(ExportFormat::Csv))
                    .collect::<Result<_, _>>()?;
                Ok(sections.join("\n"))
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
