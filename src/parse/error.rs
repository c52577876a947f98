use std::fmt;

/// A rule cell could not be parsed into a criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    column: String,
    text: String,
    message: String,
}

impl ParseError {
    pub(crate) fn new(
        column: impl Into<String>,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            text: text.into(),
            message: message.into(),
        }
    }

    /// Column holding the malformed cell.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The normalized cell text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error in column '{}' ('{}'): {}",
            self.column, self.text, self.message
        )
    }
}

impl std::error::Error for ParseError {}
