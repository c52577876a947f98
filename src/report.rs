//! Classification summary and the `.xlsx` report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::night::format_night;
use crate::{Error, Row, Value};

pub const RESULTS_SHEET: &str = "Classify Results";
pub const SUMMARY_SHEET: &str = "Classification Summary";
pub const NIGHTS_SHEET: &str = "Night Classification Summary";
pub const NIGHT_COLUMN: &str = "night";

/// Longest sheet name Excel accepts.
const MAX_SHEET_NAME: usize = 31;

/// What happened to one data row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<'a> {
    /// A rule matched and emitted these values.
    Matched(&'a [Value]),
    /// No rule matched.
    Unmatched,
    /// The row could not be tested.
    Failed,
}

/// Per-night row counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NightCounts {
    pub classified: u64,
    pub unclassified: u64,
}

impl NightCounts {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.classified + self.unclassified
    }
}

/// Running totals over a classification run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    result_columns: Vec<String>,
    classified: u64,
    unclassified: u64,
    failed: u64,
    nights: BTreeMap<NaiveDate, NightCounts>,
    values: Vec<BTreeMap<String, u64>>,
}

impl Summary {
    #[must_use]
    pub fn new(result_columns: &[String]) -> Self {
        Self {
            result_columns: result_columns.to_vec(),
            values: vec![BTreeMap::new(); result_columns.len()],
            ..Self::default()
        }
    }

    /// Count one row. Failed rows count as not classified for their night.
    pub fn record(&mut self, outcome: Outcome<'_>, night: Option<NaiveDate>) {
        let classified = match outcome {
            Outcome::Matched(values) => {
                self.classified += 1;
                for (counts, value) in self.values.iter_mut().zip(values) {
                    *counts.entry(value.to_string()).or_default() += 1;
                }
                true
            }
            Outcome::Unmatched => {
                self.unclassified += 1;
                false
            }
            Outcome::Failed => {
                self.failed += 1;
                false
            }
        };

        if let Some(night) = night {
            let counts = self.nights.entry(night).or_default();
            if classified {
                counts.classified += 1;
            } else {
                counts.unclassified += 1;
            }
        }
    }

    #[must_use]
    pub fn classified(&self) -> u64 {
        self.classified
    }

    #[must_use]
    pub fn unclassified(&self) -> u64 {
        self.unclassified
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.classified + self.unclassified + self.failed
    }

    /// Per-night counts in chronological order.
    #[must_use]
    pub fn nights(&self) -> &BTreeMap<NaiveDate, NightCounts> {
        &self.nights
    }

    /// How often each value was emitted for a result column.
    #[must_use]
    pub fn value_counts(&self, column: &str) -> Option<&BTreeMap<String, u64>> {
        let index = self.result_columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }
}

/// A report being written row by row. Call [`Report::save`] when done.
pub struct Report {
    results: Worksheet,
    next_row: u32,
    data_columns: Vec<String>,
    with_night: bool,
    summary: Summary,
}

impl Report {
    /// Start a report. The results sheet lists the result columns, then the
    /// night column when `with_night` is set, then every data column.
    ///
    /// # Errors
    ///
    /// Returns an XLSX error if the header cannot be written.
    pub fn new(
        result_columns: &[String],
        data_columns: &[String],
        with_night: bool,
    ) -> Result<Self, Error> {
        let mut results = Worksheet::new();
        results.set_name(RESULTS_SHEET)?;

        let bold = Format::new().set_bold();
        let mut header: Vec<&str> = result_columns.iter().map(String::as_str).collect();
        if with_night {
            header.push(NIGHT_COLUMN);
        }
        header.extend(data_columns.iter().map(String::as_str));
        for (col, name) in header.iter().enumerate() {
            results.write_string_with_format(0, column(col)?, *name, &bold)?;
        }

        Ok(Self {
            results,
            next_row: 1,
            data_columns: data_columns.to_vec(),
            with_night,
            summary: Summary::new(result_columns),
        })
    }

    /// Write one data row with its outcome and count it in the summary.
    ///
    /// # Errors
    ///
    /// Returns an XLSX error if the row exceeds the sheet limits.
    pub fn append(
        &mut self,
        row: &Row,
        outcome: Outcome<'_>,
        night: Option<NaiveDate>,
    ) -> Result<(), Error> {
        let r = self.next_row;
        let mut col = self.summary.result_columns.len();

        if let Outcome::Matched(values) = outcome {
            for (i, value) in values.iter().enumerate() {
                write_value(&mut self.results, r, i, value)?;
            }
        }

        if self.with_night {
            if let Some(night) = night {
                self.results.write_string(r, column(col)?, format_night(night))?;
            }
            col += 1;
        }

        for (offset, name) in self.data_columns.iter().enumerate() {
            if let Some(value) = row.get(name) {
                write_value(&mut self.results, r, col + offset, value)?;
            }
        }

        self.next_row = r.checked_add(1).ok_or(XlsxError::RowColumnLimitError)?;
        self.summary.record(outcome, night);
        Ok(())
    }

    /// Totals recorded so far.
    #[must_use]
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Add the summary sheets and write the workbook.
    ///
    /// # Errors
    ///
    /// Returns an XLSX error if the workbook cannot be assembled or saved.
    pub fn save(self, path: impl AsRef<Path>) -> Result<Summary, Error> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.results);

        let bold = Format::new().set_bold();
        let summary = self.summary;

        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET)?;
        write_pair_header(sheet, "Classified", "Count", &bold)?;
        let totals = [
            ("Yes", summary.classified),
            ("No", summary.unclassified),
            ("Failed", summary.failed),
            ("Total", summary.total()),
        ];
        for (i, (label, count)) in totals.iter().enumerate() {
            let r = row_index(i + 1)?;
            sheet.write_string(r, 0, *label)?;
            sheet.write_number(r, 1, count_cell(*count))?;
        }

        if !summary.nights.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet.set_name(NIGHTS_SHEET)?;
            let header = ["Night", "Rows Classified", "Rows Not Classified", "Total Rows"];
            for (col, name) in header.iter().enumerate() {
                sheet.write_string_with_format(0, column(col)?, *name, &bold)?;
            }
            for (i, (night, counts)) in summary.nights.iter().enumerate() {
                let r = row_index(i + 1)?;
                sheet.write_string(r, 0, format_night(*night))?;
                sheet.write_number(r, 1, count_cell(counts.classified))?;
                sheet.write_number(r, 2, count_cell(counts.unclassified))?;
                sheet.write_number(r, 3, count_cell(counts.total()))?;
            }
        }

        for (column_name, counts) in summary.result_columns.iter().zip(&summary.values) {
            if counts.len() < 2 {
                continue;
            }
            let sheet = workbook.add_worksheet();
            sheet.set_name(sheet_name(&format!("{column_name} Summary")))?;
            write_pair_header(sheet, "Value", "Rows Classified", &bold)?;
            for (i, (value, count)) in counts.iter().enumerate() {
                let r = row_index(i + 1)?;
                sheet.write_string(r, 0, value)?;
                sheet.write_number(r, 1, count_cell(*count))?;
            }
        }

        workbook.save(path.as_ref())?;
        Ok(summary)
    }
}

/// `path` with an `.xlsx` extension appended unless it already has one.
#[must_use]
pub fn xlsx_path(path: &Path) -> PathBuf {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if is_xlsx {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".xlsx");
        PathBuf::from(name)
    }
}

fn write_value(sheet: &mut Worksheet, row: u32, col: usize, value: &Value) -> Result<(), Error> {
    match value {
        Value::Empty => {}
        Value::Number(n) => {
            sheet.write_number(row, column(col)?, *n)?;
        }
        Value::Text(s) => {
            sheet.write_string(row, column(col)?, s)?;
        }
    }
    Ok(())
}

fn write_pair_header(
    sheet: &mut Worksheet,
    first: &str,
    second: &str,
    bold: &Format,
) -> Result<(), Error> {
    sheet.write_string_with_format(0, 0, first, bold)?;
    sheet.write_string_with_format(0, 1, second, bold)?;
    Ok(())
}

fn column(index: usize) -> Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn row_index(index: usize) -> Result<u32, XlsxError> {
    u32::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

#[allow(clippy::cast_precision_loss)]
fn count_cell(count: u64) -> f64 {
    count as f64
}

/// Replace characters Excel forbids in sheet names and truncate to its limit.
fn sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect()
}
