//! Workbook writers.
//!
//! A [`WorkbookWriter`] owns the on-disk format. The projector only builds
//! the in-memory [`Workbook`]; writing it is the single fallible step of an
//! export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, XlsxError};
use tracing::{debug, warn};

use super::filename::export_filename;
use super::model::{Cell, Workbook};
use super::projector::Projector;
use crate::error::{EcaError, Result};
use crate::record::ChangeRecord;

/// Writes a workbook to a path.
pub trait WorkbookWriter {
    /// File extension, without the dot. Empty when the output is a directory.
    fn extension(&self) -> &str;

    /// Write the workbook to `path`.
    fn write(&self, workbook: &Workbook, path: &Path) -> Result<()>;
}

/// A single spreadsheet with one worksheet per sheet, in sheet order.
///
/// The first row of each worksheet is its title and is written bold.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    const COLUMN_WIDTH: f64 = 30.0;
}

impl WorkbookWriter for XlsxWriter {
    fn extension(&self) -> &str {
        "xlsx"
    }

    fn write(&self, workbook: &Workbook, path: &Path) -> Result<()> {
        let mut book = rust_xlsxwriter::Workbook::new();
        let title = Format::new().set_bold();

        for sheet in &workbook.sheets {
            let worksheet = book.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(xlsx_error)?;

            let width = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
            for col in (0u16..).take(width) {
                worksheet
                    .set_column_width(col, Self::COLUMN_WIDTH)
                    .map_err(xlsx_error)?;
            }

            for (row, cells) in (0u32..).zip(&sheet.rows) {
                for (col, cell) in (0u16..).zip(cells) {
                    let written = match cell {
                        Cell::Text(text) if row == 0 => {
                            worksheet.write_string_with_format(row, col, text, &title)
                        }
                        Cell::Text(text) => worksheet.write_string(row, col, text),
                        Cell::Number(n) => worksheet.write_number(row, col, *n as f64),
                        Cell::Empty => continue,
                    };
                    written.map_err(xlsx_error)?;
                }
            }
            debug!(sheet = %sheet.name, rows = sheet.rows.len(), "Wrote worksheet");
        }

        book.save(path).map_err(xlsx_error)
    }
}

fn xlsx_error(e: XlsxError) -> EcaError {
    EcaError::Other(e.into())
}

/// A directory with one CSV file per sheet, numbered in sheet order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvBundleWriter;

impl CsvBundleWriter {
    /// File name for the sheet at `index` (0-based).
    pub fn sheet_file_name(index: usize, sheet_name: &str) -> String {
        let name: String = sheet_name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        format!("{:02}_{}.csv", index + 1, name)
    }
}

impl WorkbookWriter for CsvBundleWriter {
    fn extension(&self) -> &str {
        ""
    }

    fn write(&self, workbook: &Workbook, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;

        for (index, sheet) in workbook.sheets.iter().enumerate() {
            let file = path.join(Self::sheet_file_name(index, &sheet.name));
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_path(&file)
                .map_err(|e| EcaError::Other(e.into()))?;

            for row in &sheet.rows {
                writer
                    .write_record(row.iter().map(|cell| cell.to_string()))
                    .map_err(|e| EcaError::Other(e.into()))?;
            }
            writer.flush()?;
            debug!(sheet = %sheet.name, file = %file.display(), "Wrote sheet");
        }

        Ok(())
    }
}

/// A single JSON document: `{"sheets": [{"name", "rows"}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl WorkbookWriter for JsonWriter {
    fn extension(&self) -> &str {
        "json"
    }

    fn write(&self, workbook: &Workbook, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(workbook).map_err(|e| EcaError::Other(e.into()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// A single YAML document with the same shape as [`JsonWriter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlWriter;

impl WorkbookWriter for YamlWriter {
    fn extension(&self) -> &str {
        "yml"
    }

    fn write(&self, workbook: &Workbook, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(workbook).map_err(|e| EcaError::Other(e.into()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Selectable export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Xlsx, Self::Csv, Self::Json, Self::Yaml];

    pub fn writer(&self) -> Box<dyn WorkbookWriter> {
        match self {
            Self::Xlsx => Box::new(XlsxWriter),
            Self::Csv => Box::new(CsvBundleWriter),
            Self::Json => Box::new(JsonWriter),
            Self::Yaml => Box::new(YamlWriter),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!(
                "unknown export format '{}' (expected xlsx, csv, json or yaml)",
                s
            )),
        }
    }
}

/// Project a record and write it into `dir`.
///
/// Returns the written path. Any writer failure surfaces as
/// [`EcaError::ExportFailed`]; nothing about the record changes.
pub fn export_record(
    record: &ChangeRecord,
    projector: &Projector,
    writer: &dyn WorkbookWriter,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(export_filename(record, date, writer.extension()));
    let workbook = projector.project(record);

    let result = fs::create_dir_all(dir)
        .map_err(EcaError::from)
        .and_then(|()| writer.write(&workbook, &path));

    match result {
        Ok(()) => {
            debug!(path = %path.display(), sheets = workbook.sheets.len(), "Exported record");
            Ok(path)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Export failed");
            Err(EcaError::ExportFailed {
                path,
                message: e.to_string(),
            })
        }
    }
}
