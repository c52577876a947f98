use thiserror::Error;

use crate::parse::ParseError;
use crate::{SchemaError, ValueError};

/// Unified error type covering rule parsing, schema mismatches, per-row value
/// errors and, with the `cli` feature, table, workbook and report I/O.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("rule {rule}, column '{column}': {source}")]
    Value {
        rule: usize,
        column: String,
        #[source]
        source: ValueError,
    },

    #[cfg(feature = "cli")]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[cfg(feature = "cli")]
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[cfg(feature = "cli")]
    #[error(transparent)]
    Workbook(#[from] calamine::Error),

    #[cfg(feature = "cli")]
    #[error("unsupported table format '{path}': expected a .csv, .txt or .xlsx file")]
    UnsupportedFormat { path: String },

    #[cfg(feature = "cli")]
    #[error("workbook '{path}' has no worksheets")]
    EmptyWorkbook { path: String },
}
