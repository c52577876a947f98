//! Rule and data tables read from delimited text or `.xlsx` workbooks.

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::{Error, Row, Value};

/// How many leading bytes of a `.txt` file are inspected for a tab.
const SNIFF_LEN: usize = 1000;

/// A header plus rows, as read from a `.csv`, `.txt` or `.xlsx` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Read a table from disk. `.csv` files are comma-delimited; `.txt` files
    /// are tab-delimited when a tab appears near the start, comma-delimited
    /// otherwise; `.xlsx` files are read from their first worksheet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension, and I/O,
    /// CSV or workbook errors when the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => {
                let bytes = std::fs::read(path)?;
                Self::from_reader(bytes.as_slice(), b',')
            }
            Some("txt") => {
                let bytes = std::fs::read(path)?;
                Self::from_reader(bytes.as_slice(), sniff_delimiter(&bytes))
            }
            Some("xlsx") => Self::from_workbook(path),
            _ => Err(Error::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Read the first worksheet of a workbook. Numeric cells become
    /// [`Value::Number`], empty cells [`Value::Empty`] and everything else
    /// [`Value::Text`].
    ///
    /// # Errors
    ///
    /// Returns a workbook error if the file cannot be opened, or
    /// [`Error::EmptyWorkbook`] if it has no worksheet.
    pub fn from_workbook(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::EmptyWorkbook {
                path: path.display().to_string(),
            })??;

        let mut rows = range.rows();
        let header = match rows.next() {
            Some(first) => header_columns(first.iter().map(|c| c.to_string())),
            None => Vec::new(),
        };
        let rows = rows
            .map(|record| {
                assemble_row(&header, |i| record.get(i).map_or(Value::Empty, workbook_cell))
            })
            .collect();

        Ok(Self::new(header, rows))
    }

    /// Read a table from any reader with the given delimiter. The first record
    /// is the header; columns with an empty header are ignored and short
    /// records are padded with [`Value::Empty`].
    ///
    /// # Errors
    ///
    /// Returns a CSV error if the input is malformed.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let header = header_columns(reader.headers()?.iter().map(str::to_owned));

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(assemble_row(&header, |i| cell(record.get(i))));
        }

        Ok(Self::new(header, rows))
    }

    fn new(header: Vec<(usize, String)>, rows: Vec<Row>) -> Self {
        Self {
            columns: header.into_iter().map(|(_, h)| h).collect(),
            rows,
        }
    }

    /// Header names in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Trimmed header names with their source positions; unnamed columns are dropped.
fn header_columns(names: impl Iterator<Item = String>) -> Vec<(usize, String)> {
    names
        .enumerate()
        .map(|(i, h)| (i, h.trim_start_matches('\u{feff}').trim().to_owned()))
        .filter(|(_, h)| !h.is_empty())
        .collect()
}

fn assemble_row(header: &[(usize, String)], mut cell_at: impl FnMut(usize) -> Value) -> Row {
    header
        .iter()
        .map(|(i, column)| (column.as_str(), cell_at(*i)))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn workbook_cell(data: &Data) -> Value {
    match data {
        Data::Empty => Value::Empty,
        Data::Int(n) => Value::Number(*n as f64),
        Data::Float(n) => Value::Number(*n),
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::String(s) if s.is_empty() => Value::Empty,
        other => Value::Text(other.to_string()),
    }
}

fn cell(raw: Option<&str>) -> Value {
    match raw {
        None | Some("") => Value::Empty,
        Some(s) => Value::Text(s.to_owned()),
    }
}

fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    if head.contains(&b'\t') {
        b'\t'
    } else {
        b','
    }
}

/// Rule-table columns divided by whether the data table has them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSplit {
    /// Rule columns also present in the data; these hold criteria.
    pub criteria: Vec<String>,
    /// Rule columns absent from the data; their values are emitted on a match.
    pub results: Vec<String>,
}

/// Split rule columns into criteria and result columns, keeping rule order.
#[must_use]
pub fn split_columns(rule_columns: &[String], data_columns: &[String]) -> ColumnSplit {
    let mut split = ColumnSplit::default();
    for column in rule_columns {
        if data_columns.contains(column) {
            split.criteria.push(column.clone());
        } else {
            split.results.push(column.clone());
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let input = "Filename,HiF,Species\na.wav,42,Myoluc\nb.wav,,\n";
        let table = Table::from_reader(input.as_bytes(), b',').unwrap();
        assert_eq!(table.columns(), &["Filename", "HiF", "Species"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0].get("HiF"), Some(&Value::from("42")));
        assert_eq!(table.rows()[1].get("Species"), Some(&Value::Empty));
    }

    #[test]
    fn pads_short_records() {
        let input = "a\tb\tc\n1\t2\n";
        let table = Table::from_reader(input.as_bytes(), b'\t').unwrap();
        assert_eq!(table.rows()[0].get("c"), Some(&Value::Empty));
        assert_eq!(table.rows()[0].get("b"), Some(&Value::from("2")));
    }

    #[test]
    fn ignores_unnamed_columns() {
        let input = "a,,b\n1,x,2\n";
        let table = Table::from_reader(input.as_bytes(), b',').unwrap();
        assert_eq!(table.columns(), &["a", "b"]);
        assert_eq!(table.rows()[0].get("b"), Some(&Value::from("2")));
        assert_eq!(table.rows()[0].len(), 2);
    }

    #[test]
    fn sniffs_tabs() {
        assert_eq!(sniff_delimiter(b"a\tb\n1\t2"), b'\t');
        assert_eq!(sniff_delimiter(b"a,b\n1,2"), b',');
        let mut late_tab = vec![b'a'; SNIFF_LEN];
        late_tab.push(b'\t');
        assert_eq!(sniff_delimiter(&late_tab), b',');
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = Table::from_path("rules.xls").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn reads_txt_from_disk() {
        let dir = std::env::temp_dir().join("echoclean_test_table");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.txt");
        std::fs::write(&path, "Filename\tHiF\nx.wav\t3\n").unwrap();

        let table = Table::from_path(&path).unwrap();
        assert_eq!(table.columns(), &["Filename", "HiF"]);
        assert_eq!(table.rows()[0].get("HiF"), Some(&Value::from("3")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn reads_xlsx_first_worksheet() {
        let dir = std::env::temp_dir().join("echoclean_test_table_xlsx");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rules.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, " HiF ").unwrap();
        sheet.write_string(0, 2, "Species").unwrap();
        sheet.write_string(0, 3, "Qual").unwrap();
        sheet.write_string(1, 0, ">40").unwrap();
        sheet.write_string(1, 1, "ignored").unwrap();
        sheet.write_string(1, 2, "Myoluc").unwrap();
        sheet.write_number(2, 0, 25).unwrap();
        sheet.write_string(2, 2, "Eptfus").unwrap();
        sheet.write_string(2, 3, "good").unwrap();
        workbook.save(&path).unwrap();

        let table = Table::from_path(&path).unwrap();
        assert_eq!(table.columns(), &["HiF", "Species", "Qual"]);
        assert_eq!(table.rows().len(), 2);

        let first = &table.rows()[0];
        assert_eq!(first.get("HiF"), Some(&Value::from(">40")));
        assert_eq!(first.get("Species"), Some(&Value::from("Myoluc")));
        assert_eq!(first.get("Qual"), Some(&Value::Empty));
        assert_eq!(first.len(), 3);

        let second = &table.rows()[1];
        assert_eq!(second.get("HiF"), Some(&Value::Number(25.0)));
        assert_eq!(second.get("Qual"), Some(&Value::from("good")));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn workbook_cells() {
        assert_eq!(workbook_cell(&Data::Empty), Value::Empty);
        assert_eq!(workbook_cell(&Data::Int(3)), Value::Number(3.0));
        assert_eq!(workbook_cell(&Data::Float(2.5)), Value::Number(2.5));
        assert_eq!(workbook_cell(&Data::String("a".into())), Value::from("a"));
        assert_eq!(workbook_cell(&Data::String(String::new())), Value::Empty);
        assert_eq!(workbook_cell(&Data::Bool(true)), Value::from("true"));
    }

    #[test]
    fn split_rule_columns() {
        let rules = vec!["HiF".to_owned(), "Species".to_owned(), "Qual".to_owned()];
        let data = vec!["Filename".to_owned(), "HiF".to_owned(), "Qual".to_owned()];
        let split = split_columns(&rules, &data);
        assert_eq!(split.criteria, vec!["HiF", "Qual"]);
        assert_eq!(split.results, vec!["Species"]);
    }
}
