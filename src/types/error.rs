use thiserror::Error;

/// A rule row and a data row disagree about which columns exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("rule {rule} is missing result column '{column}'")]
    MissingResultColumn { rule: usize, column: String },

    #[error("duplicate result column '{column}'")]
    DuplicateResultColumn { column: String },

    #[error("row is missing column '{column}' required by rule {rule}")]
    MissingColumn { rule: usize, column: String },
}

/// A candidate value cannot be evaluated by the criterion it was given to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected a number, got '{value}'")]
    NotNumeric { value: String },
}
